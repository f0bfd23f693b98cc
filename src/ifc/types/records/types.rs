//! Type records, addressed by [`TypeIndex`].

use zerocopy::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use crate::ifc::macros::record_getters;
use crate::ifc::types::sorts::{ChartIndex, DeclIndex, ExprIndex, SyntaxIndex, TypeIndex};

/// A built-in type such as `int` or `double`.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct FundamentalType {
    basis: u8,
    precision: u8,
    sign: u8,
    _reserved: u8,
}

impl FundamentalType {
    record_getters! {
        basis: u8,
        precision: u8,
        sign: u8,
    }
}

/// A type named by its declaration.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct DesignatedType {
    decl: DeclIndex,
}

impl DesignatedType {
    record_getters! {
        decl: DeclIndex,
    }
}

/// The type of a constructor or destructor.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct TorType {
    source: TypeIndex,
    eh_spec: ExprIndex,
    convention: u8,
    _reserved: u8,
    traits: U16,
}

impl TorType {
    record_getters! {
        source: TypeIndex,
        eh_spec: ExprIndex,
        convention: u8,
        traits: u16,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct SyntacticType {
    expr: ExprIndex,
}

impl SyntacticType {
    record_getters! {
        expr: ExprIndex,
    }
}

/// A pack expansion.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct ExpansionType {
    pack: TypeIndex,
    mode: u8,
    _reserved: [u8; 3],
}

impl ExpansionType {
    record_getters! {
        pack: TypeIndex,
        mode: u8,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct PointerType {
    pointee: TypeIndex,
}

impl PointerType {
    record_getters! {
        pointee: TypeIndex,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct FunctionType {
    target: TypeIndex,
    source: TypeIndex,
    eh_spec: ExprIndex,
    convention: u8,
    _reserved: u8,
    traits: U16,
}

impl FunctionType {
    record_getters! {
        /// Return type.
        target: TypeIndex,
        /// Parameter types, a tuple type when there is more than one.
        source: TypeIndex,
        eh_spec: ExprIndex,
        convention: u8,
        traits: u16,
    }
}

/// The type of a non-static member function.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct MethodType {
    target: TypeIndex,
    source: TypeIndex,
    class_type: TypeIndex,
    eh_spec: ExprIndex,
    convention: u8,
    _reserved: u8,
    traits: U16,
}

impl MethodType {
    record_getters! {
        target: TypeIndex,
        source: TypeIndex,
        class_type: TypeIndex,
        eh_spec: ExprIndex,
        convention: u8,
        traits: u16,
    }
}

/// A base class in a class's base list.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct BaseType {
    ty: TypeIndex,
    access: u8,
    specifiers: u8,
    _reserved: [u8; 2],
}

impl BaseType {
    record_getters! {
        ty: TypeIndex,
        access: u8,
        specifiers: u8,
    }
}

/// A run of `heap.type`.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct TupleType {
    start: U32,
    cardinality: U32,
}

impl TupleType {
    record_getters! {
        start: u32,
        cardinality: u32,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct LvalueReference {
    referee: TypeIndex,
}

impl LvalueReference {
    record_getters! {
        referee: TypeIndex,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct RvalueReference {
    referee: TypeIndex,
}

impl RvalueReference {
    record_getters! {
        referee: TypeIndex,
    }
}

/// A cv-qualified type.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct QualifiedType {
    unqualified: TypeIndex,
    qualifiers: u8,
    _reserved: [u8; 3],
}

impl QualifiedType {
    record_getters! {
        unqualified: TypeIndex,
        qualifiers: u8,
    }
}

/// A type parameterized by a template chart.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct ForallType {
    chart: ChartIndex,
    subject: TypeIndex,
}

impl ForallType {
    record_getters! {
        chart: ChartIndex,
        subject: TypeIndex,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct SyntaxType {
    syntax: SyntaxIndex,
}

impl SyntaxType {
    record_getters! {
        syntax: SyntaxIndex,
    }
}

/// `auto`, `decltype(auto)` and constrained placeholders.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct PlaceholderType {
    constraint: ExprIndex,
    basis: u8,
    _reserved: [u8; 3],
    elaboration: TypeIndex,
}

impl PlaceholderType {
    record_getters! {
        constraint: ExprIndex,
        basis: u8,
        elaboration: TypeIndex,
    }
}

//! Expression records, addressed by [`ExprIndex`].
//!
//! Every expression starts with its source location and its type.

use zerocopy::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use crate::ifc::macros::record_getters;
use crate::ifc::types::models::SourceLocation;
use crate::ifc::types::sorts::{DeclIndex, ExprIndex, LitIndex, NameIndex, TypeIndex};

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct LiteralExpression {
    locus: SourceLocation,
    ty: TypeIndex,
    value: LitIndex,
}

impl LiteralExpression {
    record_getters! {
        locus: SourceLocation,
        ty: TypeIndex,
        value: LitIndex,
    }
}

/// A type used in expression position, e.g. a template argument.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct TypeExpression {
    locus: SourceLocation,
    ty: TypeIndex,
    denotation: TypeIndex,
}

impl TypeExpression {
    record_getters! {
        locus: SourceLocation,
        ty: TypeIndex,
        denotation: TypeIndex,
    }
}

/// A use of a named declaration.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct NamedDecl {
    locus: SourceLocation,
    ty: TypeIndex,
    decl: DeclIndex,
}

impl NamedDecl {
    record_getters! {
        locus: SourceLocation,
        ty: TypeIndex,
        decl: DeclIndex,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct UnqualifiedId {
    locus: SourceLocation,
    ty: TypeIndex,
    name: NameIndex,
    resolution: ExprIndex,
}

impl UnqualifiedId {
    record_getters! {
        locus: SourceLocation,
        ty: TypeIndex,
        name: NameIndex,
        resolution: ExprIndex,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct TemplateId {
    locus: SourceLocation,
    ty: TypeIndex,
    primary_template: ExprIndex,
    arguments: ExprIndex,
}

impl TemplateId {
    record_getters! {
        locus: SourceLocation,
        ty: TypeIndex,
        primary_template: ExprIndex,
        arguments: ExprIndex,
    }
}

/// A binary operation.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct DyadExpression {
    locus: SourceLocation,
    ty: TypeIndex,
    left: ExprIndex,
    right: ExprIndex,
    operator: U16,
    _reserved: [u8; 2],
}

impl DyadExpression {
    record_getters! {
        locus: SourceLocation,
        ty: TypeIndex,
        left: ExprIndex,
        right: ExprIndex,
        operator: u16,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct SizeofExpression {
    locus: SourceLocation,
    ty: TypeIndex,
    operand: TypeIndex,
}

impl SizeofExpression {
    record_getters! {
        locus: SourceLocation,
        ty: TypeIndex,
        operand: TypeIndex,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct AlignofExpression {
    locus: SourceLocation,
    ty: TypeIndex,
    operand: TypeIndex,
}

impl AlignofExpression {
    record_getters! {
        locus: SourceLocation,
        ty: TypeIndex,
        operand: TypeIndex,
    }
}

/// A run of `heap.expr`.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct TupleExpression {
    locus: SourceLocation,
    ty: TypeIndex,
    start: U32,
    cardinality: U32,
}

impl TupleExpression {
    record_getters! {
        locus: SourceLocation,
        ty: TypeIndex,
        start: u32,
        cardinality: u32,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct PackedTemplateArguments {
    locus: SourceLocation,
    ty: TypeIndex,
    arguments: ExprIndex,
}

impl PackedTemplateArguments {
    record_getters! {
        locus: SourceLocation,
        ty: TypeIndex,
        arguments: ExprIndex,
    }
}

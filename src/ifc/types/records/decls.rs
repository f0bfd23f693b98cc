//! Declaration records, addressed by [`DeclIndex`].

use zerocopy::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use crate::ifc::macros::record_getters;
use crate::ifc::types::models::{ModuleReference, SourceLocation, TextOffset};
use crate::ifc::types::sorts::{ChartIndex, DeclIndex, ExprIndex, NameIndex, TypeIndex};

/// A class, struct, union or namespace.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct ScopeDeclaration {
    name: TextOffset,
    locus: SourceLocation,
    ty: TypeIndex,
    base: TypeIndex,
    initializer: U32,
    home_scope: DeclIndex,
    alignment: ExprIndex,
    pack_size: U16,
    specifiers: u8,
    access: u8,
    properties: U32,
}

impl ScopeDeclaration {
    record_getters! {
        name: TextOffset,
        locus: SourceLocation,
        ty: TypeIndex,
        base: TypeIndex,
        home_scope: DeclIndex,
        alignment: ExprIndex,
        pack_size: u16,
        specifiers: u8,
        access: u8,
        properties: u32,
    }

    /// Index of the scope holding the members, `None` for an incomplete type.
    ///
    /// Stored biased by one so that zero can mean "no definition".
    pub fn members(&self) -> Option<u32> {
        self.initializer.get().checked_sub(1)
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct TemplateDeclaration {
    name: NameIndex,
    locus: SourceLocation,
    home_scope: DeclIndex,
    chart: ChartIndex,
    entity: DeclIndex,
    ty: TypeIndex,
    specifiers: u8,
    access: u8,
    properties: U16,
}

impl TemplateDeclaration {
    record_getters! {
        name: NameIndex,
        locus: SourceLocation,
        home_scope: DeclIndex,
        chart: ChartIndex,
        entity: DeclIndex,
        ty: TypeIndex,
        specifiers: u8,
        access: u8,
        properties: u16,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct UsingDeclaration {
    name: TextOffset,
    locus: SourceLocation,
    home_scope: DeclIndex,
    resolution: DeclIndex,
    parent: ExprIndex,
    member_name: TextOffset,
    specifiers: u8,
    access: u8,
    hidden: u8,
    _reserved: u8,
}

impl UsingDeclaration {
    record_getters! {
        name: TextOffset,
        locus: SourceLocation,
        home_scope: DeclIndex,
        resolution: DeclIndex,
        parent: ExprIndex,
        member_name: TextOffset,
        specifiers: u8,
        access: u8,
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden != 0
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct Enumeration {
    name: TextOffset,
    locus: SourceLocation,
    ty: TypeIndex,
    base: TypeIndex,
    enumerators_start: U32,
    enumerators_count: U32,
    home_scope: DeclIndex,
    alignment: ExprIndex,
    specifiers: u8,
    access: u8,
    properties: U16,
}

impl Enumeration {
    record_getters! {
        name: TextOffset,
        locus: SourceLocation,
        ty: TypeIndex,
        base: TypeIndex,
        enumerators_start: u32,
        enumerators_count: u32,
        home_scope: DeclIndex,
        alignment: ExprIndex,
        specifiers: u8,
        access: u8,
        properties: u16,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct AliasDeclaration {
    name: TextOffset,
    locus: SourceLocation,
    ty: TypeIndex,
    home_scope: DeclIndex,
    aliasee: TypeIndex,
    specifiers: u8,
    access: u8,
    _reserved: [u8; 2],
}

impl AliasDeclaration {
    record_getters! {
        name: TextOffset,
        locus: SourceLocation,
        ty: TypeIndex,
        home_scope: DeclIndex,
        aliasee: TypeIndex,
        specifiers: u8,
        access: u8,
    }
}

/// A declaration owned by another module.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct DeclReference {
    module: ModuleReference,
    index: DeclIndex,
}

impl DeclReference {
    record_getters! {
        module: ModuleReference,
        /// Index of the declaration within the owning module's file.
        index: DeclIndex,
    }
}

/// Shared shape of free functions and member functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct FunctionDeclaration {
    name: NameIndex,
    locus: SourceLocation,
    ty: TypeIndex,
    home_scope: DeclIndex,
    chart: ChartIndex,
    traits: U16,
    specifiers: u8,
    access: u8,
    properties: U32,
}

impl FunctionDeclaration {
    record_getters! {
        name: NameIndex,
        locus: SourceLocation,
        ty: TypeIndex,
        home_scope: DeclIndex,
        chart: ChartIndex,
        traits: u16,
        specifiers: u8,
        access: u8,
        properties: u32,
    }
}

#[repr(transparent)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct MethodDeclaration(FunctionDeclaration);

impl std::ops::Deref for MethodDeclaration {
    type Target = FunctionDeclaration;

    fn deref(&self) -> &FunctionDeclaration {
        &self.0
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct Constructor {
    name: TextOffset,
    locus: SourceLocation,
    ty: TypeIndex,
    home_scope: DeclIndex,
    chart: ChartIndex,
    traits: U16,
    specifiers: u8,
    access: u8,
    properties: U32,
}

impl Constructor {
    record_getters! {
        name: TextOffset,
        locus: SourceLocation,
        ty: TypeIndex,
        home_scope: DeclIndex,
        chart: ChartIndex,
        traits: u16,
        specifiers: u8,
        access: u8,
        properties: u32,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct Destructor {
    name: TextOffset,
    locus: SourceLocation,
    home_scope: DeclIndex,
    eh_spec: ExprIndex,
    specifiers: u8,
    access: u8,
    traits: U16,
    properties: U32,
}

impl Destructor {
    record_getters! {
        name: TextOffset,
        locus: SourceLocation,
        home_scope: DeclIndex,
        eh_spec: ExprIndex,
        specifiers: u8,
        access: u8,
        traits: u16,
        properties: u32,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct VariableDeclaration {
    name: TextOffset,
    locus: SourceLocation,
    ty: TypeIndex,
    home_scope: DeclIndex,
    initializer: ExprIndex,
    alignment: ExprIndex,
    obj_spec: U16,
    specifiers: u8,
    access: u8,
    properties: U32,
}

impl VariableDeclaration {
    record_getters! {
        name: TextOffset,
        locus: SourceLocation,
        ty: TypeIndex,
        home_scope: DeclIndex,
        initializer: ExprIndex,
        alignment: ExprIndex,
        obj_spec: u16,
        specifiers: u8,
        access: u8,
        properties: u32,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct ParameterDeclaration {
    name: TextOffset,
    locus: SourceLocation,
    ty: TypeIndex,
    type_constraint: ExprIndex,
    initializer: ExprIndex,
    level: U32,
    position: U32,
    sort: u8,
    properties: u8,
    _reserved: [u8; 2],
}

impl ParameterDeclaration {
    record_getters! {
        name: TextOffset,
        locus: SourceLocation,
        ty: TypeIndex,
        type_constraint: ExprIndex,
        /// Default argument, null when absent.
        initializer: ExprIndex,
        level: u32,
        position: u32,
        sort: u8,
        properties: u8,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct FieldDeclaration {
    name: TextOffset,
    locus: SourceLocation,
    ty: TypeIndex,
    home_scope: DeclIndex,
    initializer: ExprIndex,
    alignment: ExprIndex,
    obj_spec: U16,
    specifiers: u8,
    access: u8,
    properties: U32,
}

impl FieldDeclaration {
    record_getters! {
        name: TextOffset,
        locus: SourceLocation,
        ty: TypeIndex,
        home_scope: DeclIndex,
        initializer: ExprIndex,
        alignment: ExprIndex,
        obj_spec: u16,
        specifiers: u8,
        access: u8,
        properties: u32,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct Concept {
    name: TextOffset,
    locus: SourceLocation,
    home_scope: DeclIndex,
    ty: TypeIndex,
    chart: ChartIndex,
    constraint: ExprIndex,
    specifiers: u8,
    access: u8,
    _reserved: [u8; 2],
}

impl Concept {
    record_getters! {
        name: TextOffset,
        locus: SourceLocation,
        home_scope: DeclIndex,
        ty: TypeIndex,
        chart: ChartIndex,
        constraint: ExprIndex,
        specifiers: u8,
        access: u8,
    }
}

/// Links a deduction guide name to its primary template.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct DeductionGuide {
    primary_template: DeclIndex,
}

impl DeductionGuide {
    record_getters! {
        primary_template: DeclIndex,
    }
}

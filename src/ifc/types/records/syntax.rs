//! Syntax tree records, addressed by [`SyntaxIndex`].
//!
//! Producers keep these when a declaration cannot be fully elaborated, e.g.
//! inside uninstantiated templates.

use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use crate::ifc::macros::record_getters;
use crate::ifc::types::models::SourceLocation;
use crate::ifc::types::sorts::{ExprIndex, SyntaxIndex, TypeIndex};

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct SimpleTypeSpecifier {
    ty: TypeIndex,
    expr: ExprIndex,
    locus: SourceLocation,
}

impl SimpleTypeSpecifier {
    record_getters! {
        ty: TypeIndex,
        expr: ExprIndex,
        locus: SourceLocation,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct TypeSpecifierSeq {
    type_script: SyntaxIndex,
    ty: TypeIndex,
    locus: SourceLocation,
    qualifiers: u8,
    unhashed: u8,
    _reserved: [u8; 2],
}

impl TypeSpecifierSeq {
    record_getters! {
        type_script: SyntaxIndex,
        ty: TypeIndex,
        locus: SourceLocation,
        qualifiers: u8,
    }

    pub fn is_unhashed(&self) -> bool {
        self.unhashed != 0
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct TypeIdSyntax {
    type_specifier: SyntaxIndex,
    abstract_declarator: SyntaxIndex,
    ty: TypeIndex,
    locus: SourceLocation,
}

impl TypeIdSyntax {
    record_getters! {
        type_specifier: SyntaxIndex,
        abstract_declarator: SyntaxIndex,
        ty: TypeIndex,
        locus: SourceLocation,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct DeclaratorSyntax {
    pointer: SyntaxIndex,
    parenthesized_declarator: SyntaxIndex,
    array_or_function_declarator: SyntaxIndex,
    trailing_return_type: SyntaxIndex,
    virtual_specifiers: SyntaxIndex,
    name: ExprIndex,
    ellipsis: SourceLocation,
    locus: SourceLocation,
}

impl DeclaratorSyntax {
    record_getters! {
        pointer: SyntaxIndex,
        parenthesized_declarator: SyntaxIndex,
        array_or_function_declarator: SyntaxIndex,
        trailing_return_type: SyntaxIndex,
        virtual_specifiers: SyntaxIndex,
        name: ExprIndex,
        ellipsis: SourceLocation,
        locus: SourceLocation,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct PointerDeclaratorSyntax {
    owner: TypeIndex,
    child: SyntaxIndex,
    locus: SourceLocation,
    kind: u8,
    qualifiers: u8,
    convention: u8,
    is_function: u8,
}

impl PointerDeclaratorSyntax {
    record_getters! {
        owner: TypeIndex,
        child: SyntaxIndex,
        locus: SourceLocation,
        kind: u8,
        qualifiers: u8,
        convention: u8,
    }

    pub fn is_function(&self) -> bool {
        self.is_function != 0
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct ExpressionSyntax {
    expression: ExprIndex,
    locus: SourceLocation,
}

impl ExpressionSyntax {
    record_getters! {
        expression: ExprIndex,
        locus: SourceLocation,
    }
}

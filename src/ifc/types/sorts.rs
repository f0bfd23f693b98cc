//! Sort enumerations for every reference category.
//!
//! Discriminants are the on-disk sort values. Sorts this reader does not
//! materialize are absent from the enums and decode as
//! [`IfcError::UnknownReferenceSort`](super::error::IfcError::UnknownReferenceSort).

use crate::ifc::kinds::PartitionKind;
use super::reference::{Reference, Sort, Target};

macro_rules! impl_sort {
    ($sort:ident, $bits:expr, $category:literal, [$($variant:ident),* $(,)?]) => {
        impl Sort for $sort {
            const BITS: u32 = $bits;
            const CATEGORY: &'static str = $category;

            fn from_raw(raw: u32) -> Option<Self> {
                $(
                    if raw == $sort::$variant as u32 {
                        return Some($sort::$variant);
                    }
                )*
                None
            }

            fn raw(self) -> u32 {
                self as u32
            }

            fn target(self) -> Target {
                $sort::target(self)
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DeclSort {
    Variable = 2,
    Parameter = 3,
    Field = 4,
    Scope = 6,
    Enumeration = 7,
    Alias = 8,
    Template = 10,
    Concept = 14,
    Function = 15,
    Method = 16,
    Constructor = 17,
    Destructor = 19,
    Reference = 20,
    Using = 21,
}

impl DeclSort {
    pub const fn target(self) -> Target {
        Target::Partition(match self {
            DeclSort::Variable => PartitionKind::Variables,
            DeclSort::Parameter => PartitionKind::Parameters,
            DeclSort::Field => PartitionKind::Fields,
            DeclSort::Scope => PartitionKind::ScopeDeclarations,
            DeclSort::Enumeration => PartitionKind::Enumerations,
            DeclSort::Alias => PartitionKind::AliasDeclarations,
            DeclSort::Template => PartitionKind::TemplateDeclarations,
            DeclSort::Concept => PartitionKind::Concepts,
            DeclSort::Function => PartitionKind::Functions,
            DeclSort::Method => PartitionKind::Methods,
            DeclSort::Constructor => PartitionKind::Constructors,
            DeclSort::Destructor => PartitionKind::Destructors,
            DeclSort::Reference => PartitionKind::DeclReferences,
            DeclSort::Using => PartitionKind::UsingDeclarations,
        })
    }
}

impl_sort!(DeclSort, 5, "decl", [
    Variable, Parameter, Field, Scope, Enumeration, Alias, Template, Concept,
    Function, Method, Constructor, Destructor, Reference, Using,
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeSort {
    Fundamental = 1,
    Designated = 2,
    Tor = 3,
    Syntactic = 4,
    Expansion = 5,
    Pointer = 6,
    LvalueReference = 8,
    RvalueReference = 9,
    Function = 10,
    Method = 11,
    Qualified = 14,
    Base = 15,
    Placeholder = 17,
    Tuple = 18,
    Forall = 19,
    SyntaxTree = 21,
}

impl TypeSort {
    pub const fn target(self) -> Target {
        Target::Partition(match self {
            TypeSort::Fundamental => PartitionKind::FundamentalTypes,
            TypeSort::Designated => PartitionKind::DesignatedTypes,
            TypeSort::Tor => PartitionKind::TorTypes,
            TypeSort::Syntactic => PartitionKind::SyntacticTypes,
            TypeSort::Expansion => PartitionKind::ExpansionTypes,
            TypeSort::Pointer => PartitionKind::PointerTypes,
            TypeSort::LvalueReference => PartitionKind::LvalueReferences,
            TypeSort::RvalueReference => PartitionKind::RvalueReferences,
            TypeSort::Function => PartitionKind::FunctionTypes,
            TypeSort::Method => PartitionKind::MethodTypes,
            TypeSort::Qualified => PartitionKind::QualifiedTypes,
            TypeSort::Base => PartitionKind::BaseTypes,
            TypeSort::Placeholder => PartitionKind::PlaceholderTypes,
            TypeSort::Tuple => PartitionKind::TupleTypes,
            TypeSort::Forall => PartitionKind::ForallTypes,
            TypeSort::SyntaxTree => PartitionKind::SyntaxTypes,
        })
    }
}

impl_sort!(TypeSort, 5, "type", [
    Fundamental, Designated, Tor, Syntactic, Expansion, Pointer, LvalueReference,
    RvalueReference, Function, Method, Qualified, Base, Placeholder, Tuple, Forall,
    SyntaxTree,
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExprSort {
    Literal = 2,
    Type = 4,
    NamedDecl = 5,
    TemplateId = 7,
    UnqualifiedId = 8,
    Dyad = 15,
    SizeofType = 27,
    Alignof = 28,
    Tuple = 51,
    PackedTemplateArguments = 58,
}

impl ExprSort {
    pub const fn target(self) -> Target {
        Target::Partition(match self {
            ExprSort::Literal => PartitionKind::LiteralExpressions,
            ExprSort::Type => PartitionKind::TypeExpressions,
            ExprSort::NamedDecl => PartitionKind::DeclExpressions,
            ExprSort::TemplateId => PartitionKind::TemplateIds,
            ExprSort::UnqualifiedId => PartitionKind::UnqualifiedIdExpressions,
            ExprSort::Dyad => PartitionKind::DyadExpressions,
            ExprSort::SizeofType => PartitionKind::SizeofExpressions,
            ExprSort::Alignof => PartitionKind::AlignofExpressions,
            ExprSort::Tuple => PartitionKind::TupleExpressions,
            ExprSort::PackedTemplateArguments => PartitionKind::PackedTemplateArguments,
        })
    }
}

impl_sort!(ExprSort, 6, "expr", [
    Literal, Type, NamedDecl, TemplateId, UnqualifiedId, Dyad, SizeofType, Alignof,
    Tuple, PackedTemplateArguments,
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NameSort {
    /// The index is a text offset.
    Identifier = 0,
    Operator = 1,
    Guide = 7,
}

impl NameSort {
    pub const fn target(self) -> Target {
        match self {
            NameSort::Identifier => Target::Text,
            NameSort::Operator => Target::Partition(PartitionKind::OperatorNames),
            NameSort::Guide => Target::Partition(PartitionKind::DeductionGuides),
        }
    }
}

impl_sort!(NameSort, 3, "name", [Identifier, Operator, Guide]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChartSort {
    Unilevel = 1,
    Multilevel = 2,
}

impl ChartSort {
    pub const fn target(self) -> Target {
        Target::Partition(match self {
            ChartSort::Unilevel => PartitionKind::UnilevelCharts,
            ChartSort::Multilevel => PartitionKind::MultilevelCharts,
        })
    }
}

impl_sort!(ChartSort, 2, "chart", [Unilevel, Multilevel]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LiteralSort {
    /// The index is the value.
    Immediate = 0,
    Integer = 1,
    FloatingPoint = 2,
}

impl LiteralSort {
    pub const fn target(self) -> Target {
        match self {
            LiteralSort::Immediate => Target::Immediate,
            LiteralSort::Integer => Target::Partition(PartitionKind::IntegerLiterals),
            LiteralSort::FloatingPoint => Target::Partition(PartitionKind::FpLiterals),
        }
    }
}

impl_sort!(LiteralSort, 2, "literal", [Immediate, Integer, FloatingPoint]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SyntaxSort {
    SimpleTypeSpecifier = 1,
    TypeSpecifierSeq = 4,
    TypeId = 18,
    Declarator = 20,
    PointerDeclarator = 21,
    Expression = 58,
}

impl SyntaxSort {
    pub const fn target(self) -> Target {
        Target::Partition(match self {
            SyntaxSort::SimpleTypeSpecifier => PartitionKind::SimpleTypeSpecifiers,
            SyntaxSort::TypeSpecifierSeq => PartitionKind::TypeSpecifierSeqSyntaxTrees,
            SyntaxSort::TypeId => PartitionKind::TypeIdSyntaxTrees,
            SyntaxSort::Declarator => PartitionKind::DeclaratorSyntaxTrees,
            SyntaxSort::PointerDeclarator => PartitionKind::PointerDeclaratorSyntaxTrees,
            SyntaxSort::Expression => PartitionKind::ExpressionSyntaxTrees,
        })
    }
}

impl_sort!(SyntaxSort, 7, "syntax", [
    SimpleTypeSpecifier, TypeSpecifierSeq, TypeId, Declarator, PointerDeclarator, Expression,
]);

pub type DeclIndex = Reference<DeclSort>;
pub type TypeIndex = Reference<TypeSort>;
pub type ExprIndex = Reference<ExprSort>;
pub type NameIndex = Reference<NameSort>;
pub type ChartIndex = Reference<ChartSort>;
pub type LitIndex = Reference<LiteralSort>;
pub type SyntaxIndex = Reference<SyntaxSort>;

impl LitIndex {
    /// The value of an immediate literal, `None` for other sorts.
    pub fn immediate(&self) -> Option<u32> {
        match self.sort() {
            Ok(LiteralSort::Immediate) => Some(self.index()),
            _ => None,
        }
    }
}

//! Registry of every partition kind the reader materializes.
//!
//! Each kind is declared once below with its on-disk name, its record shape
//! and the index type that addresses it. From that single table the macro
//! derives the [`PartitionKind`] enum, the static descriptor table, the
//! [`Record`] implementations and one named accessor on [`File`] per kind.
//! All accessors share [`File::partition`] and its per-kind cache.

use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use super::file::File;
use super::partition::{Partition, PartitionIndex};
use super::types::error::Result;
use super::types::models::{Declaration, ModuleReference, ScopeDescriptor};
use super::types::records::*;
use super::types::sorts::{ChartIndex, DeclIndex, ExprIndex, LitIndex, NameIndex, SyntaxIndex, TypeIndex};

/// A fixed-layout record stored in a partition.
pub trait Record: FromBytes + KnownLayout + Immutable + Unaligned + Sized + 'static {
    /// The partition holding records of this shape.
    const KIND: PartitionKind;

    /// The index type addressing this partition.
    type Index: PartitionIndex;
}

/// Static facts about one partition kind.
#[derive(Debug)]
pub struct KindDescriptor {
    pub kind: PartitionKind,
    /// Name of the partition in the directory.
    pub name: &'static str,
    /// Size of one record in bytes.
    pub entry_size: usize,
}

macro_rules! partition_kinds {
    ($(
        $(#[$meta:meta])*
        $kind:ident => $name:literal, $record:ty, $index:ty, $accessor:ident;
    )*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum PartitionKind {
            $($kind,)*
        }

        static DESCRIPTORS: &[KindDescriptor] = &[
            $(
                KindDescriptor {
                    kind: PartitionKind::$kind,
                    name: $name,
                    entry_size: ::std::mem::size_of::<$record>(),
                },
            )*
        ];

        impl PartitionKind {
            pub const ALL: &'static [PartitionKind] = &[$(PartitionKind::$kind,)*];
        }

        $(
            impl Record for $record {
                const KIND: PartitionKind = PartitionKind::$kind;
                type Index = $index;
            }
        )*

        impl File {
            $(
                $(#[$meta])*
                pub fn $accessor(&self) -> Result<Partition<'_, $record>> {
                    self.partition::<$record>()
                }
            )*
        }
    };
}

partition_kinds! {
    /// All scope descriptors; the global scope is one of them.
    ScopeDescriptors => "scope.desc", ScopeDescriptor, u32, scope_descriptors;
    /// Scope members. Scopes are contiguous runs of this partition.
    Declarations => "scope.member", Declaration, u32, declarations;

    ScopeDeclarations => "decl.scope", ScopeDeclaration, DeclIndex, scope_declarations;
    TemplateDeclarations => "decl.template", TemplateDeclaration, DeclIndex, template_declarations;
    UsingDeclarations => "decl.using-declaration", UsingDeclaration, DeclIndex, using_declarations;
    Enumerations => "decl.enum", Enumeration, DeclIndex, enumerations;
    AliasDeclarations => "decl.alias", AliasDeclaration, DeclIndex, alias_declarations;
    /// Declarations owned by imported modules.
    DeclReferences => "decl.reference", DeclReference, DeclIndex, decl_references;
    Functions => "decl.function", FunctionDeclaration, DeclIndex, functions;
    Methods => "decl.method", MethodDeclaration, DeclIndex, methods;
    Constructors => "decl.constructor", Constructor, DeclIndex, constructors;
    Destructors => "decl.destructor", Destructor, DeclIndex, destructors;
    Variables => "decl.variable", VariableDeclaration, DeclIndex, variables;
    Parameters => "decl.parameter", ParameterDeclaration, DeclIndex, parameters;
    Fields => "decl.field", FieldDeclaration, DeclIndex, fields;
    Concepts => "decl.concept", Concept, DeclIndex, concepts;
    DeductionGuides => "name.guide", DeductionGuide, NameIndex, deduction_guides;

    FundamentalTypes => "type.fundamental", FundamentalType, TypeIndex, fundamental_types;
    DesignatedTypes => "type.designated", DesignatedType, TypeIndex, designated_types;
    TorTypes => "type.tor", TorType, TypeIndex, tor_types;
    SyntacticTypes => "type.syntactic", SyntacticType, TypeIndex, syntactic_types;
    ExpansionTypes => "type.expansion", ExpansionType, TypeIndex, expansion_types;
    PointerTypes => "type.pointer", PointerType, TypeIndex, pointer_types;
    FunctionTypes => "type.function", FunctionType, TypeIndex, function_types;
    MethodTypes => "type.nonstatic-member-function", MethodType, TypeIndex, method_types;
    BaseTypes => "type.base", BaseType, TypeIndex, base_types;
    TupleTypes => "type.tuple", TupleType, TypeIndex, tuple_types;
    LvalueReferences => "type.lvalue-reference", LvalueReference, TypeIndex, lvalue_references;
    RvalueReferences => "type.rvalue-reference", RvalueReference, TypeIndex, rvalue_references;
    QualifiedTypes => "type.qualified", QualifiedType, TypeIndex, qualified_types;
    ForallTypes => "type.forall", ForallType, TypeIndex, forall_types;
    SyntaxTypes => "type.syntax-tree", SyntaxType, TypeIndex, syntax_types;
    PlaceholderTypes => "type.placeholder", PlaceholderType, TypeIndex, placeholder_types;

    LiteralExpressions => "expr.literal", LiteralExpression, ExprIndex, literal_expressions;
    TypeExpressions => "expr.type", TypeExpression, ExprIndex, type_expressions;
    DeclExpressions => "expr.decl", NamedDecl, ExprIndex, decl_expressions;
    UnqualifiedIdExpressions => "expr.unqualified-id", UnqualifiedId, ExprIndex, unqualified_id_expressions;
    TemplateIds => "expr.template-id", TemplateId, ExprIndex, template_ids;
    DyadExpressions => "expr.dyad", DyadExpression, ExprIndex, dyad_expressions;
    SizeofExpressions => "expr.sizeof-type", SizeofExpression, ExprIndex, sizeof_expressions;
    AlignofExpressions => "expr.alignof", AlignofExpression, ExprIndex, alignof_expressions;
    TupleExpressions => "expr.tuple", TupleExpression, ExprIndex, tuple_expressions;
    PackedTemplateArguments => "expr.packed-template-arguments", PackedTemplateArguments, ExprIndex, packed_template_arguments;

    /// Element storage for tuple types.
    TypeHeap => "heap.type", TypeIndex, u32, type_heap;
    /// Element storage for tuple expressions.
    ExprHeap => "heap.expr", ExprIndex, u32, expr_heap;

    OperatorNames => "name.operator", OperatorFunctionName, NameIndex, operator_names;

    UnilevelCharts => "chart.unilevel", ChartUnilevel, ChartIndex, unilevel_charts;
    MultilevelCharts => "chart.multi-level", ChartMultilevel, ChartIndex, multilevel_charts;

    IntegerLiterals => "const.i64", IntegerLiteral, LitIndex, integer_literals;
    FpLiterals => "const.f64", FPLiteral, LitIndex, fp_literals;

    SimpleTypeSpecifiers => "syntax.simple-type-specifier", SimpleTypeSpecifier, SyntaxIndex, simple_type_specifiers;
    TypeSpecifierSeqSyntaxTrees => "syntax.type-specifier-seq", TypeSpecifierSeq, SyntaxIndex, type_specifier_seq_syntax_trees;
    TypeIdSyntaxTrees => "syntax.type-id", TypeIdSyntax, SyntaxIndex, typeid_syntax_trees;
    DeclaratorSyntaxTrees => "syntax.declarator", DeclaratorSyntax, SyntaxIndex, declarator_syntax_trees;
    PointerDeclaratorSyntaxTrees => "syntax.pointer-declarator", PointerDeclaratorSyntax, SyntaxIndex, pointer_declarator_syntax_trees;
    ExpressionSyntaxTrees => "syntax.expression", ExpressionSyntax, SyntaxIndex, expression_syntax_trees;

    /// Modules imported by this translation unit.
    ImportedModules => "module.imported", ModuleReference, u32, imported_modules;
}

impl PartitionKind {
    pub const COUNT: usize = Self::ALL.len();

    pub fn descriptor(self) -> &'static KindDescriptor {
        &DESCRIPTORS[self as usize]
    }

    /// Name of the partition in the directory.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn entry_size(self) -> usize {
        self.descriptor().entry_size
    }
}

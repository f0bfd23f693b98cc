mod common;

use common::{function_record, words, ContainerBuilder};
use ifc_reader::records::{FunctionDeclaration, IntegerLiteral, VariableDeclaration};
use ifc_reader::sorts::{DeclIndex, DeclSort, LitIndex, LiteralSort, NameIndex, NameSort, TypeSort};
use ifc_reader::{File, IfcError, PartitionKind, Reference, Resolved, ScopeDescriptor, Target, TextOffset};
use tempfile::TempDir;

fn functions_file(names: &[&str]) -> (TempDir, File) {
    let mut builder = ContainerBuilder::new();
    let mut records = Vec::new();
    for name in names {
        let offset = builder.string(name);
        records.extend(function_record(offset));
    }
    builder
        .with_global_scope(names.len() as u32)
        .partition("decl.function", 32, records);
    let dir = TempDir::new().unwrap();
    let path = builder.write(dir.path(), "unit.ifc");
    let file = File::open(&path).unwrap();
    (dir, file)
}

#[test]
fn packs_sort_below_index() {
    let reference = DeclIndex::new(DeclSort::Function, 7);
    assert_eq!(reference.raw(), (7 << 5) | 15);
    assert_eq!(reference.index(), 7);
    assert_eq!(reference.sort().unwrap(), DeclSort::Function);
    assert_eq!(reference.target().unwrap(), Target::Partition(PartitionKind::Functions));

    let ty = Reference::new(TypeSort::Fundamental, 3);
    assert_eq!(ty.index(), 3);
    assert_eq!(ty.sort().unwrap(), TypeSort::Fundamental);
}

#[test]
fn null_references_resolve_to_nothing() {
    let (_dir, file) = functions_file(&["f"]);
    let null = DeclIndex::null();

    assert!(null.is_null());
    assert_eq!(null, DeclIndex::default());
    assert!(file.record::<FunctionDeclaration>(null).unwrap().is_none());
    assert!(file.resolve(null).unwrap().is_none());
}

#[test]
fn null_reference_has_no_sort() {
    let (_dir, file) = functions_file(&["f"]);
    let null = DeclIndex::null();

    assert!(matches!(null.sort(), Err(IfcError::NullReference { category: "decl" })));
    assert!(matches!(null.target(), Err(IfcError::NullReference { category: "decl" })));
    assert!(matches!(
        file.functions().unwrap().get(null),
        Err(IfcError::NullReference { category: "decl" })
    ));
    assert!(LitIndex::null().immediate().is_none());
}

#[test]
fn typed_reference_reaches_matching_record() {
    let (_dir, file) = functions_file(&["f", "g"]);
    let functions = file.functions().unwrap();
    assert_eq!(functions.len(), 2);

    let reference = DeclIndex::new(DeclSort::Function, 1);
    let record = file.record::<FunctionDeclaration>(reference).unwrap().unwrap();
    assert!(std::ptr::eq(record, functions.at(1).unwrap()));
    assert!(std::ptr::eq(record, functions.get(reference).unwrap()));

    let name = file.resolve(record.name()).unwrap().unwrap();
    assert!(matches!(name, Resolved::Text("g")));
}

#[test]
fn global_scope_members_dereference_to_functions() {
    let (_dir, file) = functions_file(&["alpha", "beta", "gamma"]);
    let scope = file.global_scope().unwrap();

    let mut names = Vec::new();
    for member in file.scope_members(scope).unwrap() {
        let function = file.record::<FunctionDeclaration>(member.index()).unwrap().unwrap();
        match file.resolve(function.name()).unwrap() {
            Some(Resolved::Text(name)) => names.push(name),
            other => panic!("unexpected name {:?}", other),
        }
    }
    assert_eq!(names, ["alpha", "beta", "gamma"]);
}

#[test]
fn sort_must_match_partition() {
    let (_dir, file) = functions_file(&["f"]);
    let variable = DeclIndex::new(DeclSort::Variable, 0);

    assert!(matches!(
        file.functions().unwrap().get(variable),
        Err(IfcError::SortMismatch { category: "decl", partition: "decl.function", .. })
    ));
    assert!(matches!(
        file.record::<FunctionDeclaration>(variable),
        Err(IfcError::SortMismatch { .. })
    ));
}

#[test]
fn unknown_sort_is_reported_as_such() {
    let (_dir, file) = functions_file(&["f"]);
    let unknown = DeclIndex::from_raw((3 << 5) | 1);

    assert!(matches!(
        unknown.sort(),
        Err(IfcError::UnknownReferenceSort { category: "decl", sort: 1 })
    ));
    assert!(matches!(
        file.resolve(unknown),
        Err(IfcError::UnknownReferenceSort { category: "decl", sort: 1 })
    ));
    assert!(matches!(
        file.record::<FunctionDeclaration>(unknown),
        Err(IfcError::UnknownReferenceSort { .. })
    ));
    assert_eq!(format!("{:?}", unknown), "decl(?1, 3)");
}

#[test]
fn out_of_range_reference_fails() {
    let (_dir, file) = functions_file(&["f"]);
    assert!(matches!(
        file.resolve(DeclIndex::new(DeclSort::Function, 1)),
        Err(IfcError::IndexOutOfRange { partition: "decl.function", index: 1, count: 1 })
    ));
}

#[test]
fn reference_into_absent_partition_is_not_found() {
    let (_dir, file) = functions_file(&["f"]);
    assert!(matches!(
        file.record::<VariableDeclaration>(DeclIndex::new(DeclSort::Variable, 0)),
        Err(IfcError::PartitionNotFound(name)) if name == "decl.variable"
    ));
}

#[test]
fn untyped_resolution_views_record_bytes() {
    let (_dir, file) = functions_file(&["f", "g"]);
    let resolved = file.resolve(DeclIndex::new(DeclSort::Function, 0)).unwrap().unwrap();

    match resolved {
        Resolved::Record { kind, index, bytes } => {
            assert_eq!(kind, PartitionKind::Functions);
            assert_eq!(index, 0);
            assert_eq!(bytes.len(), 32);
        }
        other => panic!("expected a record, got {:?}", other),
    }
    let function = resolved.as_record::<FunctionDeclaration>().unwrap();
    assert_eq!(function.locus().line(), 1);
    assert!(resolved.as_record::<VariableDeclaration>().is_none());
}

#[test]
fn text_and_immediate_sorts_do_not_touch_partitions() {
    let mut builder = ContainerBuilder::new();
    let offset = builder.string("operator");
    let dir = TempDir::new().unwrap();
    let file = File::open(builder.write(dir.path(), "unit.ifc")).unwrap();

    let name = NameIndex::new(NameSort::Identifier, offset);
    assert_eq!(name.target().unwrap(), Target::Text);
    assert!(matches!(file.resolve(name).unwrap(), Some(Resolved::Text("operator"))));

    let literal = LitIndex::new(LiteralSort::Immediate, 42);
    assert_eq!(literal.immediate(), Some(42));
    assert!(matches!(file.resolve(literal).unwrap(), Some(Resolved::Immediate(42))));
    assert_eq!(file.directory_lookups(), 0);
}

#[test]
fn integer_literals_are_read_in_place() {
    let mut builder = ContainerBuilder::new();
    builder.partition("const.i64", 8, words(&[0xdead_beef, 0x1, 7, 0]));
    let dir = TempDir::new().unwrap();
    let file = File::open(builder.write(dir.path(), "unit.ifc")).unwrap();

    let literal = LitIndex::new(LiteralSort::Integer, 1);
    assert_eq!(literal.immediate(), None);
    let value = file.record::<IntegerLiteral>(literal).unwrap().unwrap();
    assert_eq!(value.value(), 7);
    assert_eq!(file.integer_literals().unwrap().at(0).unwrap().value(), 0x1_dead_beef);
}

#[test]
fn scope_declarations_name_their_member_scope_biased_by_one() {
    let mut builder = ContainerBuilder::new();
    let incomplete = builder.string("Incomplete");
    let complete = builder.string("Complete");
    let mut records = Vec::new();
    for (name, initializer) in [(incomplete, 0), (complete, 2)] {
        // name, locus, ty, base, initializer, home_scope, alignment, pack/specifiers/access, properties
        records.extend(words(&[name, 1, 1, 0, 0, initializer, 0, 0, 0, 0]));
    }
    builder
        .partition("scope.member", 4, words(&[(1 << 5) | 6, 15, 47]))
        .partition("scope.desc", 8, words(&[0, 1, 1, 2]))
        .partition("decl.scope", 40, records);
    let dir = TempDir::new().unwrap();
    let file = File::open(builder.write(dir.path(), "unit.ifc")).unwrap();

    let scopes = file.scope_declarations().unwrap();
    let first = scopes.at(0).unwrap();
    assert_eq!(file.get_string(first.name()).unwrap(), "Incomplete");
    assert_eq!(first.members(), None);

    let second = scopes.get(DeclIndex::new(DeclSort::Scope, 1)).unwrap();
    assert_eq!(file.get_string(second.name()).unwrap(), "Complete");
    // A stored 2 designates scope.desc[1], while the header's global scope
    // index is used as is.
    assert_eq!(second.members(), Some(1));
    let members = file.scope(second.members().unwrap()).unwrap();
    assert_eq!(members, ScopeDescriptor::new(1, 2));
    assert_eq!(file.global_scope().unwrap(), ScopeDescriptor::new(0, 1));
    assert_eq!(file.scope_members(members).unwrap().len(), 2);
    assert_ne!(second.name(), TextOffset::new(0));
}

mod common;

use common::{words, ContainerBuilder};
use ifc_reader::sorts::{DeclIndex, DeclSort};
use ifc_reader::{Environment, File, IfcError, ModuleLocator, ModuleName, SearchPathLocator};
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex, OnceLock, Weak};
use std::thread;
use tempfile::TempDir;

/// A module with one function in its global scope.
fn write_module(dir: &Path, file_name: &str) -> PathBuf {
    let mut builder = ContainerBuilder::new();
    let name = builder.string("f");
    builder
        .with_global_scope(1)
        .partition("decl.function", 32, common::function_record(name));
    builder.write(dir, file_name)
}

/// A module importing `imports` and re-exporting `(module, declaration)` pairs
/// through `decl.reference`.
fn write_importer(dir: &Path, file_name: &str, imports: &[&str], references: &[(&str, u32)]) -> PathBuf {
    let mut builder = ContainerBuilder::new();
    let imported: Vec<u32> = imports.iter().flat_map(|m| [builder.string(m), 0]).collect();
    let referenced: Vec<u32> = references
        .iter()
        .flat_map(|&(m, decl)| [builder.string(m), 0, decl])
        .collect();
    builder.with_global_scope(1).partition("module.imported", 8, words(&imported));
    if !referenced.is_empty() {
        builder.partition("decl.reference", 12, words(&referenced));
    }
    builder.write(dir, file_name)
}

fn environment(dir: &TempDir) -> Arc<Environment> {
    Environment::new(SearchPathLocator::new([dir.path()]))
}

#[test]
fn resolving_a_module_twice_yields_the_same_file() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "core.ifc");
    let env = environment(&dir);

    let module = ModuleName::new("core");
    let first = env.resolve(&module).unwrap();
    let second = env.resolve(&module).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.header(), second.header());
    assert_eq!(env.len(), 1);
}

#[test]
fn path_and_name_share_one_identity() {
    let dir = TempDir::new().unwrap();
    let path = write_module(dir.path(), "core.ifc");
    let env = environment(&dir);

    let by_path = env.open(&path).unwrap();
    let by_name = env.resolve(&ModuleName::new("core")).unwrap();
    assert!(Arc::ptr_eq(&by_path, &by_name));
    assert!(Arc::ptr_eq(&by_path, &env.open(&path).unwrap()));
}

#[test]
fn partitions_are_located_by_owner_and_partition() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "core-detail.ifc");
    let env = environment(&dir);

    let module = ModuleName::partition("core", "detail");
    assert_eq!(module.to_string(), "core:detail");
    let file = env.resolve(&module).unwrap();
    assert!(file.path().ends_with("core-detail.ifc"));
    assert!(matches!(
        env.resolve(&ModuleName::new("core")),
        Err(IfcError::ModuleNotFound(name)) if name == "core"
    ));
}

#[test]
fn missing_module_is_not_found() {
    let dir = TempDir::new().unwrap();
    let env = environment(&dir);
    assert!(matches!(
        env.resolve(&ModuleName::new("absent")),
        Err(IfcError::ModuleNotFound(_))
    ));
    assert!(env.is_empty());
}

#[test]
fn unreadable_module_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("broken.ifc"), b"not an ifc file at all").unwrap();
    let env = environment(&dir);

    assert!(matches!(
        env.resolve(&ModuleName::new("broken")),
        Err(IfcError::ModuleLoadError { module, .. }) if module == "broken"
    ));
}

#[test]
fn imported_modules_resolve_through_the_environment() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "core.ifc");
    write_module(dir.path(), "util.ifc");
    let app = write_importer(dir.path(), "app.ifc", &["core", "util"], &[]);
    let env = environment(&dir);

    let app = env.open(app).unwrap();
    let imports = app.imports().unwrap();
    assert_eq!(imports.len(), 2);

    let core = env.resolve(&ModuleName::new("core")).unwrap();
    assert!(Arc::ptr_eq(&imports[0], &core));

    let reference = *app.imported_modules().unwrap().at(1).unwrap();
    assert_eq!(app.module_name(reference).unwrap(), ModuleName::new("util"));
    assert!(Arc::ptr_eq(&app.imported_module(reference).unwrap(), &imports[1]));
}

#[test]
fn declaration_references_lead_to_the_owning_module() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "core.ifc");
    let function = DeclIndex::new(DeclSort::Function, 0);
    let app = write_importer(dir.path(), "app.ifc", &["core"], &[("core", function.raw())]);
    let env = environment(&dir);

    let app = env.open(app).unwrap();
    let (owner, index) = app
        .follow_declaration(DeclIndex::new(DeclSort::Reference, 0))
        .unwrap();
    let core = env.resolve(&ModuleName::new("core")).unwrap();
    assert!(Arc::ptr_eq(&owner, &core));
    assert_eq!(index, function);
    assert_eq!(owner.functions().unwrap().get(index).unwrap().locus().line(), 1);

    // Local declarations are their own owners.
    let (same, local) = app.follow_declaration(function).unwrap();
    assert!(Arc::ptr_eq(&same, &app));
    assert_eq!(local, function);
}

#[test]
fn cyclic_declaration_references_are_load_errors() {
    let dir = TempDir::new().unwrap();
    let reference = DeclIndex::new(DeclSort::Reference, 0).raw();
    write_importer(dir.path(), "a.ifc", &["b"], &[("b", reference)]);
    write_importer(dir.path(), "b.ifc", &["a"], &[("a", reference)]);
    let env = environment(&dir);

    let a = env.resolve(&ModuleName::new("a")).unwrap();
    assert!(matches!(
        a.follow_declaration(DeclIndex::new(DeclSort::Reference, 0)),
        Err(IfcError::ModuleLoadError { .. })
    ));
}

#[test]
fn reentrant_resolution_is_a_cycle() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "core.ifc");
    let search = SearchPathLocator::new([dir.path()]);

    let slot: Arc<OnceLock<Weak<Environment>>> = Arc::new(OnceLock::new());
    let locator_slot = Arc::clone(&slot);
    let env = Environment::new(move |module: &ModuleName| -> ifc_reader::Result<PathBuf> {
        if let Some(env) = locator_slot.get().and_then(Weak::upgrade) {
            env.resolve(module)?;
        }
        search.locate(module)
    });
    slot.set(Arc::downgrade(&env)).unwrap();

    assert!(matches!(
        env.resolve(&ModuleName::new("core")),
        Err(IfcError::ModuleLoadError { reason, .. }) if reason.contains("cyclic")
    ));
    assert!(env.is_empty());
}

#[test]
fn panicking_locator_releases_the_module() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "core.ifc");
    let search = SearchPathLocator::new([dir.path()]);

    let calls = AtomicUsize::new(0);
    let env = Environment::new(move |module: &ModuleName| -> ifc_reader::Result<PathBuf> {
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("locator failed for {}", module);
        }
        search.locate(module)
    });

    let module = ModuleName::new("core");
    assert!(panic::catch_unwind(AssertUnwindSafe(|| env.resolve(&module))).is_err());

    // A stale in-flight mark would report this as a cycle.
    let file = env.resolve(&module).unwrap();
    assert!(file.path().ends_with("core.ifc"));
    assert_eq!(env.len(), 1);
}

#[test]
fn crossed_resolutions_on_two_threads_do_not_deadlock() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "x.ifc");
    write_module(dir.path(), "y.ifc");
    let search = SearchPathLocator::new([dir.path()]);

    // Resolving x needs y and resolving y needs x; both threads get their
    // module in flight before asking for the other one.
    let barrier = Barrier::new(2);
    let entered = Mutex::new(HashSet::new());
    let slot: Arc<OnceLock<Weak<Environment>>> = Arc::new(OnceLock::new());
    let locator_slot = Arc::clone(&slot);
    let env = Environment::new(move |module: &ModuleName| -> ifc_reader::Result<PathBuf> {
        if entered.lock().unwrap().insert(module.owner.clone()) {
            barrier.wait();
            let other = if module.owner == "x" { "y" } else { "x" };
            if let Some(env) = locator_slot.get().and_then(Weak::upgrade) {
                env.resolve(&ModuleName::new(other))?;
            }
        }
        search.locate(module)
    });
    slot.set(Arc::downgrade(&env)).unwrap();

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = ["x", "y"]
            .into_iter()
            .map(|name| {
                let env = &env;
                s.spawn(move || env.resolve(&ModuleName::new(name)))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let cycles = results
        .iter()
        .filter(|r| matches!(r, Err(IfcError::ModuleLoadError { reason, .. }) if reason.contains("cyclic")))
        .count();
    assert_eq!(cycles, 1);
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);

    assert!(env.resolve(&ModuleName::new("x")).is_ok());
    assert!(env.resolve(&ModuleName::new("y")).is_ok());
    assert_eq!(env.len(), 2);
}

#[test]
fn concurrent_resolution_opens_once() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "core.ifc");
    let env = environment(&dir);

    let files: Vec<Arc<File>> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| env.resolve(&ModuleName::new("core")).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(files.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    assert_eq!(env.len(), 1);
}

#[test]
fn standalone_files_cannot_follow_imports() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "core.ifc");
    let app = write_importer(dir.path(), "app.ifc", &["core"], &[]);

    let file = File::open(app).unwrap();
    assert!(matches!(file.imports(), Err(IfcError::ModuleLoadError { module, .. }) if module == "core"));
}

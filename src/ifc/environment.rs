//! Module resolution shared across opened files.
//!
//! An [`Environment`] maps module names to opened [`File`]s so that every
//! importer of a module sees the same instance. Finding the file for a name
//! is delegated to a [`ModuleLocator`]; the environment only guarantees
//! identity, serialization of concurrent opens, and cycle detection.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, ThreadId};

use log::{debug, info, warn};
use parking_lot::{Condvar, Mutex};

use super::file::File;
use super::options::ReaderOptions;
use super::types::error::{IfcError, Result};

/// Canonical identity of a module: its name and, for partitions, the
/// partition name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleName {
    pub owner: String,
    pub partition: Option<String>,
}

impl ModuleName {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            partition: None,
        }
    }

    pub fn partition(owner: impl Into<String>, partition: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            partition: Some(partition.into()),
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.partition {
            Some(partition) => write!(f, "{}:{}", self.owner, partition),
            None => f.write_str(&self.owner),
        }
    }
}

/// Maps a module name to the path of its IFC file.
pub trait ModuleLocator: Send + Sync {
    /// # Errors
    /// `ModuleNotFound` when no file exists for `module`.
    fn locate(&self, module: &ModuleName) -> Result<PathBuf>;
}

impl<F> ModuleLocator for F
where
    F: Fn(&ModuleName) -> Result<PathBuf> + Send + Sync,
{
    fn locate(&self, module: &ModuleName) -> Result<PathBuf> {
        self(module)
    }
}

/// Looks modules up as `<owner>.ifc` or `<owner>-<partition>.ifc` in a list of
/// directories, first match wins.
#[derive(Debug, Clone, Default)]
pub struct SearchPathLocator {
    dirs: Vec<PathBuf>,
}

impl SearchPathLocator {
    pub const EXTENSION: &'static str = "ifc";

    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn add_dir(&mut self, dir: impl Into<PathBuf>) {
        self.dirs.push(dir.into());
    }

    /// The file name a module is expected under.
    pub fn file_name(module: &ModuleName) -> String {
        match &module.partition {
            Some(partition) => format!("{}-{}.{}", module.owner, partition, Self::EXTENSION),
            None => format!("{}.{}", module.owner, Self::EXTENSION),
        }
    }
}

impl ModuleLocator for SearchPathLocator {
    fn locate(&self, module: &ModuleName) -> Result<PathBuf> {
        let file_name = Self::file_name(module);
        self.dirs
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| IfcError::ModuleNotFound(module.to_string()))
    }
}

#[derive(Default)]
struct ModuleTable {
    modules: HashMap<ModuleName, Arc<File>>,
    files: HashMap<PathBuf, Arc<File>>,
    in_flight: HashMap<ModuleName, ThreadId>,
    waiting: HashMap<ThreadId, ModuleName>,
}

impl ModuleTable {
    /// Whether `owner` is `current`, or is blocked (directly or through other
    /// threads) on a module `current` is resolving.
    fn waits_on(&self, mut owner: ThreadId, current: ThreadId) -> bool {
        for _ in 0..=self.in_flight.len() {
            if owner == current {
                return true;
            }
            match self.waiting.get(&owner).and_then(|m| self.in_flight.get(m)) {
                Some(&next) => owner = next,
                None => return false,
            }
        }
        false
    }
}

/// Clears an in-flight mark and wakes waiters, also when loading unwinds.
struct InFlight<'a> {
    environment: &'a Environment,
    module: &'a ModuleName,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.environment.table.lock().in_flight.remove(self.module);
        self.environment.resolved.notify_all();
    }
}

/// A shared cache of opened files, keyed by module name and by path.
///
/// Entries are never evicted; a file stays mapped as long as the environment
/// or any importer holds it.
pub struct Environment {
    locator: Box<dyn ModuleLocator>,
    options: ReaderOptions,
    table: Mutex<ModuleTable>,
    resolved: Condvar,
}

impl Environment {
    pub fn new(locator: impl ModuleLocator + 'static) -> Arc<Self> {
        Self::with_options(locator, ReaderOptions::default())
    }

    /// An environment opening every file with `options`.
    pub fn with_options(locator: impl ModuleLocator + 'static, options: ReaderOptions) -> Arc<Self> {
        Arc::new(Self {
            locator: Box::new(locator),
            options,
            table: Mutex::new(ModuleTable::default()),
            resolved: Condvar::new(),
        })
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Opens the file at `path`, or returns the instance already opened from
    /// the same canonical path.
    pub fn open(self: &Arc<Self>, path: impl AsRef<Path>) -> Result<Arc<File>> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(IfcError::NotARegularFile(path.to_path_buf()));
        }
        let canonical = path.canonicalize()?;

        let mut table = self.table.lock();
        if let Some(file) = table.files.get(&canonical) {
            debug!("Reusing opened file: {}", canonical.display());
            return Ok(Arc::clone(file));
        }
        let file = Arc::new(File::open_in(&canonical, &self.options, Arc::downgrade(self))?);
        table.files.insert(canonical, Arc::clone(&file));
        Ok(file)
    }

    /// The file for `module`, opening it on first request.
    ///
    /// # Errors
    /// - `ModuleNotFound` when the locator finds no file
    /// - `ModuleLoadError` when the file cannot be opened, or when resolving
    ///   `module` would wait on itself: re-entry on the same thread, or a
    ///   chain of threads each waiting on a module the next one is resolving
    pub fn resolve(self: &Arc<Self>, module: &ModuleName) -> Result<Arc<File>> {
        let current = thread::current().id();
        let mut table = self.table.lock();
        loop {
            if let Some(file) = table.modules.get(module) {
                return Ok(Arc::clone(file));
            }
            match table.in_flight.get(module) {
                Some(&owner) if table.waits_on(owner, current) => {
                    return Err(IfcError::ModuleLoadError {
                        module: module.to_string(),
                        reason: "cyclic module resolution".to_string(),
                    });
                }
                Some(_) => {
                    debug!("Waiting for module {} resolved by another thread", module);
                    table.waiting.insert(current, module.clone());
                    self.resolved.wait(&mut table);
                    table.waiting.remove(&current);
                }
                None => break,
            }
        }
        table.in_flight.insert(module.clone(), current);
        drop(table);

        let _in_flight = InFlight {
            environment: self,
            module,
        };
        match self.load(module) {
            Ok(file) => {
                info!("Resolved module {}: {}", module, file.path().display());
                self.table.lock().modules.insert(module.clone(), Arc::clone(&file));
                Ok(file)
            }
            Err(e) => {
                warn!("Failed to resolve module {}: {}", module, e);
                Err(e)
            }
        }
    }

    fn load(self: &Arc<Self>, module: &ModuleName) -> Result<Arc<File>> {
        let path = self.locator.locate(module).map_err(|e| wrap(module, e))?;
        self.open(&path).map_err(|e| wrap(module, e))
    }

    /// Number of modules resolved by name.
    pub fn len(&self) -> usize {
        self.table.lock().modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.lock();
        f.debug_struct("Environment")
            .field("options", &self.options)
            .field("modules", &table.modules.len())
            .field("files", &table.files.len())
            .finish()
    }
}

fn wrap(module: &ModuleName, error: IfcError) -> IfcError {
    match error {
        IfcError::ModuleNotFound(_) | IfcError::ModuleLoadError { .. } => error,
        other => IfcError::ModuleLoadError {
            module: module.to_string(),
            reason: other.to_string(),
        },
    }
}

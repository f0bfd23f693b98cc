use std::collections::HashSet;
use std::fs;
use std::mem;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, Weak};

use log::{debug, info, trace};
use memmap2::Mmap;
use zerocopy::FromBytes;

use super::environment::{Environment, ModuleName};
use super::format::directory::Directory;
use super::format::header;
use super::kinds::{PartitionKind, Record};
use super::options::ReaderOptions;
use super::partition::{Partition, PartitionIndex};
use super::types::error::{IfcError, Result};
use super::types::models::{Declaration, FileHeader, ModuleReference, ScopeDescriptor, TextOffset};
use super::types::reference::{Reference, Sort, Target};
use super::types::sorts::{DeclIndex, DeclSort};
use super::utils;

/// Validated location of a partition's records in the map.
#[derive(Debug, Clone, Copy)]
struct Extent {
    offset: usize,
    count: usize,
}

/// The outcome of dereferencing a tagged reference without knowing its sort.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    /// A record: its partition, position, and raw bytes.
    Record {
        kind: PartitionKind,
        index: u32,
        bytes: &'a [u8],
    },
    /// Text from the string table.
    Text(&'a str),
    /// A value stored in the reference itself.
    Immediate(u32),
}

impl<'a> Resolved<'a> {
    /// Views a resolved record as `R`, if it came from `R`'s partition.
    pub fn as_record<R: Record>(&self) -> Option<&'a R> {
        match *self {
            Resolved::Record { kind, bytes, .. } if kind == R::KIND => R::ref_from_bytes(bytes).ok(),
            _ => None,
        }
    }
}

/// An opened IFC file.
///
/// Owns the memory map for its whole lifetime. Everything handed out
/// (partitions, records, strings) borrows from it; nothing is copied.
/// Partition extents are validated on first use and cached per kind.
#[derive(Debug)]
pub struct File {
    path: PathBuf,
    mmap: Mmap,
    header: FileHeader,
    directory: Directory,
    extents: [OnceLock<Extent>; PartitionKind::COUNT],
    lookups: AtomicUsize,
    environment: Weak<Environment>,
}

impl File {
    /// Opens an IFC file with default options.
    ///
    /// Files opened this way have no environment; resolving imported modules
    /// fails with `ModuleLoadError`. Use [`Environment::open`] to follow
    /// imports.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The path is not a regular file
    /// - The file cannot be opened or mapped
    /// - The signature or version is not supported
    /// - The string table or directory lies outside the file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &ReaderOptions::default())
    }

    pub fn open_with(path: impl AsRef<Path>, options: &ReaderOptions) -> Result<Self> {
        Self::open_in(path.as_ref(), options, Weak::new())
    }

    pub(crate) fn open_in(
        path: &Path,
        options: &ReaderOptions,
        environment: Weak<Environment>,
    ) -> Result<Self> {
        if !path.is_file() {
            return Err(IfcError::NotARegularFile(path.to_path_buf()));
        }
        info!("Opening IFC file: {}", path.display());
        let file = fs::File::open(path)?;
        let len = file.metadata()?.len();
        if len < header::PREAMBLE_SIZE as u64 {
            return Err(IfcError::Truncated {
                needed: header::PREAMBLE_SIZE as u64,
                actual: len,
            });
        }
        // SAFETY: the map is read-only and never outlives `File`; callers must
        // not truncate the file while it is open.
        let mmap = unsafe { Mmap::map(&file)? };

        let header = header::parse(&mmap)?;
        let strings = header::string_table(&header, &mmap)?;
        let directory = Directory::parse(&mmap, &header, strings)?;

        let file = Self {
            path: path.to_path_buf(),
            mmap,
            header,
            directory,
            extents: std::array::from_fn(|_| OnceLock::new()),
            lookups: AtomicUsize::new(0),
            environment,
        };

        if options.verify_global_scope {
            file.global_scope()?;
        }
        if options.validate_scopes {
            file.validate_scopes()?;
        }

        info!(
            "IFC file opened: version {}.{}, {} partitions",
            file.header.major_version,
            file.header.minor_version,
            file.directory.len()
        );
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Size of the mapped file in bytes.
    pub fn size(&self) -> usize {
        self.mmap.len()
    }

    /// Number of directory resolutions performed by the partition cache.
    ///
    /// Each partition kind is resolved at most once per successful access;
    /// repeated accesses are served from the cache.
    pub fn directory_lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn has_partition(&self, kind: PartitionKind) -> bool {
        self.directory.contains(kind.name())
    }

    /// The partition holding records of shape `R`.
    ///
    /// # Errors
    /// - `PartitionNotFound` when the directory has no such partition
    /// - `CorruptPartition` when its entry size or extent is inconsistent
    pub fn partition<R: Record>(&self) -> Result<Partition<'_, R>> {
        let extent = self.extent(R::KIND)?;
        let start = extent.offset;
        let end = start + extent.count * mem::size_of::<R>();
        let records = <[R]>::ref_from_bytes(&self.mmap[start..end])
            .map_err(|_| IfcError::corrupt(R::KIND.name(), "records cannot be viewed in place"))?;
        Ok(Partition::new(records))
    }

    /// Like [`partition`](Self::partition), but an absent partition is `None`.
    ///
    /// A present but empty partition is `Some` with no records.
    pub fn try_partition<R: Record>(&self) -> Result<Option<Partition<'_, R>>> {
        if !self.has_partition(R::KIND) {
            return Ok(None);
        }
        self.partition::<R>().map(Some)
    }

    /// Resolves and validates a partition's extent, once per kind.
    fn extent(&self, kind: PartitionKind) -> Result<Extent> {
        let slot = &self.extents[kind as usize];
        if let Some(extent) = slot.get() {
            trace!("Partition cache hit: {}", kind.name());
            return Ok(*extent);
        }

        self.lookups.fetch_add(1, Ordering::Relaxed);
        let entry = self.directory.find(kind.name())?;
        if entry.entry_size as usize != kind.entry_size() {
            return Err(IfcError::corrupt(
                &entry.name,
                format!(
                    "entry size {} does not match record size {}",
                    entry.entry_size,
                    kind.entry_size()
                ),
            ));
        }
        let size = entry.byte_size().ok_or_else(|| {
            IfcError::corrupt(&entry.name, "partition size overflows")
        })?;
        let range = utils::checked_range(entry.offset as u64, size, self.mmap.len()).ok_or_else(|| {
            IfcError::corrupt(
                &entry.name,
                format!(
                    "extent {:#x}+{} exceeds file size {}",
                    entry.offset,
                    size,
                    self.mmap.len()
                ),
            )
        })?;

        debug!(
            "Materialized partition {}: {} records at {:#x}",
            entry.name, entry.cardinality, entry.offset
        );
        Ok(*slot.get_or_init(|| Extent {
            offset: range.start,
            count: entry.cardinality as usize,
        }))
    }

    /// Typed dereference: the record `index` addresses, `None` for null.
    ///
    /// # Errors
    /// - `UnknownReferenceSort` when the sort is not recognized
    /// - `SortMismatch` when the sort does not lead to `R`'s partition
    /// - `IndexOutOfRange` when the index exceeds the partition
    pub fn record<R: Record>(&self, index: R::Index) -> Result<Option<&R>> {
        if index.is_null() {
            return Ok(None);
        }
        self.partition::<R>()?.get(index).map(Some)
    }

    /// Untyped dereference through the closed sort table.
    pub fn resolve<S: Sort>(&self, reference: Reference<S>) -> Result<Option<Resolved<'_>>> {
        if reference.is_null() {
            return Ok(None);
        }
        let index = reference.index();
        let resolved = match reference.target()? {
            Target::Partition(kind) => Resolved::Record {
                kind,
                index,
                bytes: self.record_bytes(kind, index)?,
            },
            Target::Text => Resolved::Text(self.get_string(TextOffset::new(index))?),
            Target::Immediate => Resolved::Immediate(index),
        };
        Ok(Some(resolved))
    }

    fn record_bytes(&self, kind: PartitionKind, index: u32) -> Result<&[u8]> {
        let extent = self.extent(kind)?;
        if index as usize >= extent.count {
            return Err(IfcError::IndexOutOfRange {
                partition: kind.name(),
                index: index as u64,
                count: extent.count as u64,
            });
        }
        let start = extent.offset + index as usize * kind.entry_size();
        Ok(&self.mmap[start..start + kind.entry_size()])
    }

    /// Text at `offset` in the string table.
    pub fn get_string(&self, offset: TextOffset) -> Result<&str> {
        let strings = header::string_table(&self.header, &self.mmap)?;
        utils::read_text(strings, offset.get())
    }

    /// The translation unit's scope, as recorded in the header.
    pub fn global_scope(&self) -> Result<ScopeDescriptor> {
        self.scope(self.header.global_scope)
    }

    /// The scope descriptor at `index`, checked against the declarations.
    pub fn scope(&self, index: u32) -> Result<ScopeDescriptor> {
        let scope = *self.scope_descriptors()?.at(index as usize)?;
        let declarations = self.declarations()?.len() as u64;
        if scope.range().end > declarations {
            return Err(IfcError::corrupt(
                PartitionKind::ScopeDescriptors.name(),
                format!(
                    "scope {} covers {:?} but there are {} declarations",
                    index,
                    scope.range(),
                    declarations
                ),
            ));
        }
        Ok(scope)
    }

    /// The declarations making up `scope`.
    pub fn scope_members(&self, scope: ScopeDescriptor) -> Result<&[Declaration]> {
        self.declarations()?.slice(scope.start(), scope.cardinality())
    }

    /// Sum of the cardinalities of all scopes.
    pub fn scoped_declaration_count(&self) -> Result<u64> {
        Ok(self
            .scope_descriptors()?
            .iter()
            .map(|scope| scope.cardinality() as u64)
            .sum())
    }

    /// Checks every scope descriptor: in bounds, and no two non-empty scopes
    /// sharing a declaration.
    pub fn validate_scopes(&self) -> Result<()> {
        let scopes = self.scope_descriptors()?;
        let declarations = self.declarations()?.len() as u64;

        let mut ranges = Vec::with_capacity(scopes.len());
        for (i, scope) in scopes.iter().enumerate() {
            let range = scope.range();
            if range.end > declarations {
                return Err(IfcError::corrupt(
                    scopes.name(),
                    format!("scope {} covers {:?} but there are {} declarations", i, range, declarations),
                ));
            }
            if !range.is_empty() {
                ranges.push((range, i));
            }
        }

        ranges.sort_by_key(|(range, _)| range.start);
        for pair in ranges.windows(2) {
            let (first, a) = &pair[0];
            let (second, b) = &pair[1];
            if second.start < first.end {
                return Err(IfcError::corrupt(
                    scopes.name(),
                    format!("scopes {} ({:?}) and {} ({:?}) overlap", a, first, b, second),
                ));
            }
        }
        debug!("Validated {} scopes over {} declarations", scopes.len(), declarations);
        Ok(())
    }

    /// The name of the module a reference designates.
    pub fn module_name(&self, reference: ModuleReference) -> Result<ModuleName> {
        let owner = self.get_string(reference.owner())?.to_string();
        let partition = if reference.partition().is_null() {
            None
        } else {
            Some(self.get_string(reference.partition())?.to_string())
        };
        Ok(ModuleName { owner, partition })
    }

    /// Opens (or reuses) the file of an imported module through this file's
    /// environment.
    pub fn imported_module(&self, reference: ModuleReference) -> Result<Arc<File>> {
        let module = self.module_name(reference)?;
        let environment = self.environment.upgrade().ok_or_else(|| IfcError::ModuleLoadError {
            module: module.to_string(),
            reason: format!("{} was opened without an environment", self.path.display()),
        })?;
        environment.resolve(&module)
    }

    /// Resolves every module listed in `module.imported`.
    pub fn imports(&self) -> Result<Vec<Arc<File>>> {
        match self.try_partition::<ModuleReference>()? {
            Some(modules) => modules.iter().map(|m| self.imported_module(*m)).collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Follows `decl.reference` entries until reaching the file that owns
    /// the declaration.
    ///
    /// Returns that file and the declaration's index within it. Reaching the
    /// same reference twice is a cycle and fails with `ModuleLoadError`.
    pub fn follow_declaration(self: &Arc<Self>, index: DeclIndex) -> Result<(Arc<File>, DeclIndex)> {
        let mut file = Arc::clone(self);
        let mut index = index;
        let mut visited = HashSet::new();

        while !index.is_null() && index.sort()? == DeclSort::Reference {
            if !visited.insert((Arc::as_ptr(&file) as usize, index.raw())) {
                return Err(IfcError::ModuleLoadError {
                    module: file.path.display().to_string(),
                    reason: format!("cyclic declaration reference through {:?}", index),
                });
            }
            let reference = *file.decl_references()?.get(index)?;
            let next = file.imported_module(reference.module())?;
            trace!(
                "Declaration {:?} in {} resolves to {:?} in {}",
                index,
                file.path.display(),
                reference.index(),
                next.path.display()
            );
            index = reference.index();
            file = next;
        }
        Ok((file, index))
    }
}


//! # ifc-reader
//!
//! A zero-copy reader for IFC files, the binary module interfaces emitted by
//! C++ compilers for named modules.
//!
//! A file is memory-mapped once; its directory is scanned at open, and every
//! partition is handed out as a bounds-checked view straight over the map.
//! Cross-links between records are typed references, dereferenced through a
//! closed table of sorts. Imported modules are resolved through a shared
//! [`Environment`] so that every importer sees the same [`File`].
pub mod ifc;

// Re-export the main types for convenience
pub use ifc::{
    Environment, File, IfcError, ModuleLocator, ModuleName, Partition, PartitionIndex,
    PartitionKind, ReaderOptions, Record, Resolved, Result, SearchPathLocator,
    types::{
        models::{
            Declaration, DirectoryEntry, FileHeader, ModuleReference, ScopeDescriptor,
            SourceLocation, TextOffset,
        },
        records,
        reference::{Reference, Sort, Target},
        sorts,
    },
};

//! Custom error types for the ifc-reader crate.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum IfcError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The path passed to an open call does not name a regular file.
    #[error("{} is not a regular file", .0.display())]
    NotARegularFile(PathBuf),

    /// The file is too short to hold the structure being read.
    #[error("File truncated: needed {needed} bytes, but only {actual} are available")]
    Truncated { needed: u64, actual: u64 },

    /// The leading signature does not identify an IFC container.
    #[error("Bad signature: {0:02x?}")]
    BadSignature([u8; 4]),

    /// The header names a format revision this reader does not support.
    #[error("Unsupported IFC version: {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    /// The directory has no entry for the requested partition.
    #[error("Partition not found: {0}")]
    PartitionNotFound(String),

    /// A partition's declared extent or shape is inconsistent with the file.
    #[error("Corrupt partition {partition}: {reason}")]
    CorruptPartition { partition: String, reason: String },

    /// An index exceeds the bounds of the partition it addresses.
    #[error("Index {index} out of range for {partition} ({count} entries)")]
    IndexOutOfRange {
        partition: &'static str,
        index: u64,
        count: u64,
    },

    /// A reference carries a sort tag this reader does not know.
    ///
    /// This usually means the file was produced by a newer format revision.
    #[error("Unknown {category} sort: {sort}")]
    UnknownReferenceSort { category: &'static str, sort: u32 },

    /// The null reference was dereferenced.
    #[error("Null {category} reference")]
    NullReference { category: &'static str },

    /// A reference was dereferenced against a partition its sort does not map to.
    #[error("{category} sort {sort} does not address partition {partition}")]
    SortMismatch {
        category: &'static str,
        sort: String,
        partition: &'static str,
    },

    /// Text at the given offset is not valid UTF-8.
    #[error("Invalid string at text offset {offset}")]
    InvalidString { offset: u32 },

    /// No file could be located for a module.
    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    /// A module was located but could not be loaded.
    #[error("Failed to load module {module}: {reason}")]
    ModuleLoadError { module: String, reason: String },
}

impl IfcError {
    pub(crate) fn corrupt(partition: impl Into<String>, reason: impl Into<String>) -> Self {
        IfcError::CorruptPartition {
            partition: partition.into(),
            reason: reason.into(),
        }
    }
}

/// A convenience `Result` type alias using the crate's `IfcError` type.
pub type Result<T> = std::result::Result<T, IfcError>;

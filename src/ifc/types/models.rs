//! Core data structures for IFC container components.
//!
//! This module defines the fundamental types used throughout the library:
//! - The file header and directory entries, parsed once at open
//! - Scope descriptors and scope members, viewed in place
//! - Text offsets, source locations and module references shared by records

use std::fmt;
use std::ops::Range;

use zerocopy::little_endian::U32;
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use crate::ifc::macros::record_getters;
use super::sorts::DeclIndex;

/// Complete parsed header of an IFC file.
///
/// Every field is copied out of the mapped bytes at open; the header never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// Content hash recorded by the producer. Not verified by this reader.
    pub checksum: [u8; 32],
    pub major_version: u8,
    pub minor_version: u8,
    pub abi: u8,
    pub arch: u8,
    pub language_version: u32,
    /// Byte offset of the string table.
    pub string_table_bytes: u32,
    /// Size of the string table in bytes.
    pub string_table_size: u32,
    pub unit: u32,
    pub src_path: TextOffset,
    /// Index of the translation unit's scope in `scope.desc`.
    pub global_scope: u32,
    /// Byte offset of the directory.
    pub toc: u32,
    pub partition_count: u32,
    pub internal_partition: bool,
}

impl FileHeader {
    pub fn version(&self) -> (u8, u8) {
        (self.major_version, self.minor_version)
    }
}

/// One partition's descriptor from the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    /// Absolute byte offset of the first record.
    pub offset: u32,
    /// Number of records.
    pub cardinality: u32,
    /// Size of one record in bytes.
    pub entry_size: u32,
}

impl DirectoryEntry {
    /// Total size of the partition in bytes, `None` on overflow.
    pub fn byte_size(&self) -> Option<u64> {
        (self.cardinality as u64).checked_mul(self.entry_size as u64)
    }
}

/// Offset of a NUL-terminated string within the string table.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct TextOffset(U32);

impl TextOffset {
    pub fn new(offset: u32) -> Self {
        Self(U32::new(offset))
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }

    pub fn is_null(&self) -> bool {
        self.get() == 0
    }
}

impl fmt::Debug for TextOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextOffset({})", self.get())
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct SourceLocation {
    line: U32,
    column: U32,
}

impl SourceLocation {
    record_getters! {
        line: u32,
        column: u32,
    }
}

/// A contiguous run of the declarations partition forming one scope.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct ScopeDescriptor {
    start: U32,
    cardinality: U32,
}

impl ScopeDescriptor {
    pub fn new(start: u32, cardinality: u32) -> Self {
        Self {
            start: U32::new(start),
            cardinality: U32::new(cardinality),
        }
    }

    record_getters! {
        start: u32,
        cardinality: u32,
    }

    /// Positions covered in the declarations partition.
    pub fn range(&self) -> Range<u64> {
        let start = self.start() as u64;
        start..start + self.cardinality() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }
}

/// One member of a scope: a reference to the declaration proper.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct Declaration {
    index: DeclIndex,
}

impl Declaration {
    record_getters! {
        index: DeclIndex,
    }
}

/// Names the module (and partition) owning an imported entity.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct ModuleReference {
    owner: TextOffset,
    partition: TextOffset,
}

impl ModuleReference {
    pub fn new(owner: TextOffset, partition: TextOffset) -> Self {
        Self { owner, partition }
    }

    record_getters! {
        owner: TextOffset,
        partition: TextOffset,
    }
}

//! Table of contents scanning.
//!
//! The directory is a packed array of 16-byte partition summaries located by
//! the header. It is scanned exactly once, at open, into a name lookup; from
//! then on finding a partition performs no I/O.

use std::collections::HashMap;

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, trace, warn};

use crate::ifc::types::error::{IfcError, Result};
use crate::ifc::types::models::{DirectoryEntry, FileHeader};
use crate::ifc::utils;

/// Size of one directory entry in bytes.
///
/// ```text
/// [4 bytes] Name (text offset)
/// [4 bytes] Byte offset of the first record
/// [4 bytes] Cardinality
/// [4 bytes] Entry size
/// ```
pub const ENTRY_SIZE: usize = 16;

/// The scanned table of contents of one file.
#[derive(Debug, Default)]
pub struct Directory {
    entries: Vec<DirectoryEntry>,
    by_name: HashMap<String, usize>,
}

impl Directory {
    /// Scans `header.partition_count` entries at `header.toc`.
    ///
    /// # Parameters
    /// * `bytes` - The whole mapped file
    /// * `header` - Its parsed header
    /// * `strings` - The string table, for partition names
    pub fn parse(bytes: &[u8], header: &FileHeader, strings: &[u8]) -> Result<Self> {
        let size = header.partition_count as u64 * ENTRY_SIZE as u64;
        let range = utils::checked_range(header.toc as u64, size, bytes.len()).ok_or_else(|| {
            IfcError::corrupt(
                "toc",
                format!(
                    "{} entries at {:#x} exceed file size {}",
                    header.partition_count,
                    header.toc,
                    bytes.len()
                ),
            )
        })?;
        let mut reader = &bytes[range];

        let count = header.partition_count as usize;
        let mut entries = Vec::with_capacity(count);
        let mut by_name = HashMap::with_capacity(count);

        for i in 0..count {
            let name_offset = reader.read_u32::<LittleEndian>()?;
            let offset = reader.read_u32::<LittleEndian>()?;
            let cardinality = reader.read_u32::<LittleEndian>()?;
            let entry_size = reader.read_u32::<LittleEndian>()?;

            let name = utils::read_text(strings, name_offset)
                .map_err(|e| IfcError::corrupt("toc", format!("entry {}: bad name: {}", i, e)))?
                .to_owned();
            trace!(
                "Partition {}: {} ({} x {} bytes at {:#x})",
                i, name, cardinality, entry_size, offset
            );

            if by_name.contains_key(&name) {
                warn!("Duplicate directory entry for partition {}; keeping the first", name);
            } else {
                by_name.insert(name.clone(), entries.len());
            }
            entries.push(DirectoryEntry {
                name,
                offset,
                cardinality,
                entry_size,
            });
        }

        debug!("Directory scanned: {} partitions", entries.len());
        Ok(Self { entries, by_name })
    }

    /// Looks a partition up by name.
    pub fn find(&self, name: &str) -> Result<&DirectoryEntry> {
        self.by_name
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| IfcError::PartitionNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All entries, in file order.
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Low-level byte range and text utilities

use std::ops::Range;

use super::types::error::{IfcError, Result};

/// Byte range `offset..offset + size`, if it lies within `len` bytes.
pub fn checked_range(offset: u64, size: u64, len: usize) -> Option<Range<usize>> {
    let end = offset.checked_add(size)?;
    if end > len as u64 {
        return None;
    }
    Some(offset as usize..end as usize)
}

/// Reads the text starting at `offset` in a string table.
///
/// Text runs up to the first NUL byte, or to the end of the table when the
/// producer left the last string unterminated.
pub fn read_text(table: &[u8], offset: u32) -> Result<&str> {
    let start = offset as usize;
    if start >= table.len() {
        return Err(IfcError::IndexOutOfRange {
            partition: "string table",
            index: offset as u64,
            count: table.len() as u64,
        });
    }
    let tail = &table[start..];
    let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
    std::str::from_utf8(&tail[..end]).map_err(|_| IfcError::InvalidString { offset })
}

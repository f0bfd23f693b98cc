//! IFC file signature and header parsing.
//!
//! This module handles:
//! - Checking the four-byte signature
//! - Parsing the fixed header that follows it
//! - Rejecting format revisions this reader does not understand
//! - Locating the string table

use std::io::Read;
use std::ops::RangeInclusive;

use byteorder::{LittleEndian, ReadBytesExt};
use log::{info, trace};

use crate::ifc::types::error::{IfcError, Result};
use crate::ifc::types::models::{FileHeader, TextOffset};
use crate::ifc::utils;

/// Leading bytes of every IFC file.
pub const SIGNATURE: [u8; 4] = [0x54, 0x51, 0x45, 0x1A];

/// Size of the header proper, excluding the signature.
pub const HEADER_SIZE: usize = 72;

/// Size of signature plus header.
pub const PREAMBLE_SIZE: usize = SIGNATURE.len() + HEADER_SIZE;

/// Format revisions (major, minor) this reader accepts.
pub const SUPPORTED_VERSIONS: RangeInclusive<(u8, u8)> = (0, 33)..=(1, 0);

/// Parses the file header from the beginning of the mapped file.
///
/// # Header Structure
/// ```text
/// [ 4 bytes] Signature 54 51 45 1A
/// [32 bytes] Content checksum
/// [ 4 bytes] Major, minor, ABI, architecture (u8 each)
/// [32 bytes] Eight little-endian u32 fields, language version through partition count
/// [ 4 bytes] Internal-partition flag (u8) and padding
/// ```
pub fn parse(bytes: &[u8]) -> Result<FileHeader> {
    if bytes.len() < PREAMBLE_SIZE {
        return Err(IfcError::Truncated {
            needed: PREAMBLE_SIZE as u64,
            actual: bytes.len() as u64,
        });
    }
    let mut reader = &bytes[..PREAMBLE_SIZE];

    let mut signature = [0u8; 4];
    reader.read_exact(&mut signature)?;
    if signature != SIGNATURE {
        return Err(IfcError::BadSignature(signature));
    }

    let mut checksum = [0u8; 32];
    reader.read_exact(&mut checksum)?;
    let major_version = reader.read_u8()?;
    let minor_version = reader.read_u8()?;
    if !SUPPORTED_VERSIONS.contains(&(major_version, minor_version)) {
        return Err(IfcError::UnsupportedVersion {
            major: major_version,
            minor: minor_version,
        });
    }

    let header = FileHeader {
        checksum,
        major_version,
        minor_version,
        abi: reader.read_u8()?,
        arch: reader.read_u8()?,
        language_version: reader.read_u32::<LittleEndian>()?,
        string_table_bytes: reader.read_u32::<LittleEndian>()?,
        string_table_size: reader.read_u32::<LittleEndian>()?,
        unit: reader.read_u32::<LittleEndian>()?,
        src_path: TextOffset::new(reader.read_u32::<LittleEndian>()?),
        global_scope: reader.read_u32::<LittleEndian>()?,
        toc: reader.read_u32::<LittleEndian>()?,
        partition_count: reader.read_u32::<LittleEndian>()?,
        internal_partition: reader.read_u8()? != 0,
    };

    trace!(
        "String table at {:#x} ({} bytes), directory at {:#x}",
        header.string_table_bytes, header.string_table_size, header.toc
    );
    info!(
        "Header parsed: version={}.{}, partitions={}, global scope={}",
        header.major_version, header.minor_version, header.partition_count, header.global_scope
    );

    Ok(header)
}

/// The string table's bytes, validated against the file size.
pub fn string_table<'a>(header: &FileHeader, bytes: &'a [u8]) -> Result<&'a [u8]> {
    let range = utils::checked_range(
        header.string_table_bytes as u64,
        header.string_table_size as u64,
        bytes.len(),
    )
    .ok_or_else(|| {
        IfcError::corrupt(
            "string table",
            format!(
                "extent {:#x}+{} exceeds file size {}",
                header.string_table_bytes,
                header.string_table_size,
                bytes.len()
            ),
        )
    })?;
    Ok(&bytes[range])
}

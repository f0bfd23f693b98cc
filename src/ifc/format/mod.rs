//! File format parsing layer for IFC containers.
//!
//! This module provides the mid-level parsing layer that bridges between
//! the raw memory map and the high-level [`File`](crate::ifc::file::File).
//!
//! # Module Organization
//!
//! - [`header`]: Validates the signature and parses the fixed header
//! - [`directory`]: Scans the table of contents into a name lookup
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  Signature      │ ← header::parse()
//! │  Header         │
//! ├─────────────────┤
//! │  String Table   │ ← utils::read_text()
//! ├─────────────────┤
//! │  Partitions     │ ← File::partition()
//! │  (fixed-size    │
//! │   records)      │
//! ├─────────────────┤
//! │  Directory      │ ← directory::Directory::parse()
//! └─────────────────┘
//! ```
//!
//! Only the header sits at a fixed position; the string table and the
//! directory are located through header fields, partitions through the
//! directory.

pub mod directory;
pub mod header;

//! Builds minimal IFC containers byte by byte.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const PREAMBLE_SIZE: usize = 76;
pub const SIGNATURE: [u8; 4] = [0x54, 0x51, 0x45, 0x1A];

/// Byte offsets of header fields within the file.
pub const STRING_TABLE_SIZE_AT: usize = 48;
pub const GLOBAL_SCOPE_AT: usize = 60;
pub const TOC_AT: usize = 64;

struct PendingPartition {
    name: u32,
    entry_size: u32,
    cardinality: u32,
    data: Vec<u8>,
}

/// Lays a container out as `preamble | strings | partitions | directory`.
pub struct ContainerBuilder {
    strings: Vec<u8>,
    partitions: Vec<PendingPartition>,
    version: (u8, u8),
    global_scope: u32,
    src_path: u32,
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self {
            // Offset 0 is the empty string, so that a zero text offset is null.
            strings: vec![0],
            partitions: Vec::new(),
            version: (0, 43),
            global_scope: 0,
            src_path: 0,
        }
    }

    /// Appends NUL-terminated text to the string table, returning its offset.
    pub fn string(&mut self, text: &str) -> u32 {
        let offset = self.strings.len() as u32;
        self.strings.extend_from_slice(text.as_bytes());
        self.strings.push(0);
        offset
    }

    /// Adds a partition whose cardinality is derived from `data`.
    pub fn partition(&mut self, name: &str, entry_size: u32, data: Vec<u8>) -> &mut Self {
        let cardinality = data.len() as u32 / entry_size;
        self.raw_partition(name, entry_size, cardinality, data)
    }

    /// Adds a partition with an arbitrary declared cardinality.
    pub fn raw_partition(&mut self, name: &str, entry_size: u32, cardinality: u32, data: Vec<u8>) -> &mut Self {
        let name = self.string(name);
        self.partitions.push(PendingPartition {
            name,
            entry_size,
            cardinality,
            data,
        });
        self
    }

    pub fn version(&mut self, major: u8, minor: u8) -> &mut Self {
        self.version = (major, minor);
        self
    }

    pub fn global_scope(&mut self, index: u32) -> &mut Self {
        self.global_scope = index;
        self
    }

    pub fn src_path(&mut self, path: &str) -> &mut Self {
        self.src_path = self.string(path);
        self
    }

    /// The usual pair: `count` function declarations in one global scope.
    pub fn with_global_scope(&mut self, count: u32) -> &mut Self {
        let members: Vec<u32> = (0..count).map(|i| (i << 5) | 15).collect();
        self.partition("scope.member", 4, words(&members))
            .partition("scope.desc", 8, words(&[0, count]))
    }

    pub fn build(&self) -> Vec<u8> {
        let strings_at = PREAMBLE_SIZE;
        let mut offset = strings_at + self.strings.len();

        let mut body = Vec::new();
        let mut toc = Vec::new();
        for p in &self.partitions {
            toc.extend_from_slice(&words(&[p.name, offset as u32, p.cardinality, p.entry_size]));
            body.extend_from_slice(&p.data);
            offset += p.data.len();
        }
        let toc_at = offset;

        let mut bytes = Vec::with_capacity(toc_at + toc.len());
        bytes.extend_from_slice(&SIGNATURE);
        bytes.extend_from_slice(&[0u8; 32]);
        bytes.extend_from_slice(&[self.version.0, self.version.1, 0, 0]);
        bytes.extend_from_slice(&words(&[
            20,
            strings_at as u32,
            self.strings.len() as u32,
            0,
            self.src_path,
            self.global_scope,
            toc_at as u32,
            self.partitions.len() as u32,
        ]));
        bytes.extend_from_slice(&[0u8; 4]);
        assert_eq!(bytes.len(), PREAMBLE_SIZE);

        bytes.extend_from_slice(&self.strings);
        bytes.extend_from_slice(&body);
        bytes.extend_from_slice(&toc);
        bytes
    }

    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, self.build()).expect("write container");
        path
    }
}

/// Little-endian encoding of a run of `u32`s.
pub fn words(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Overwrites the `u32` at `at`.
pub fn patch_u32(bytes: &mut [u8], at: usize, value: u32) {
    bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

/// A 32-byte function declaration named by `name` (a text offset).
pub fn function_record(name: u32) -> Vec<u8> {
    // name (identifier sort 0), locus, ty, home_scope, chart, traits/specifiers/access, properties
    let mut record = words(&[name << 3, 1, 1, 0, 0, 0, 0]);
    record.extend_from_slice(&words(&[0]));
    assert_eq!(record.len(), 32);
    record
}

//! Zero-copy views over partitions.
//!
//! A [`Partition`] borrows a run of records straight out of the memory map.
//! It is `Copy`, cheap to obtain again from the owning
//! [`File`](crate::ifc::file::File), and every access is bounds-checked.
//!
//! # Example
//! ```no_run
//! # use ifc_reader::File;
//! # let file = File::open("module.ifc").unwrap();
//! let declarations = file.declarations().unwrap();
//! let scope = file.global_scope().unwrap();
//! for member in declarations.slice(scope.start(), scope.cardinality()).unwrap() {
//!     println!("{:?}", member.index());
//! }
//! ```

use std::fmt;
use std::slice;

use super::kinds::{PartitionKind, Record};
use super::types::error::{IfcError, Result};
use super::types::reference::{Reference, Sort, Target};

/// Anything that can address a record within a partition.
pub trait PartitionIndex: Copy + fmt::Debug {
    /// A short name used in diagnostics.
    const CATEGORY: &'static str;

    /// Whether this is the null reference.
    fn is_null(self) -> bool {
        false
    }

    /// Position of the addressed record within a partition of `kind`.
    ///
    /// Tagged references fail when their sort does not lead to `kind`.
    fn position_in(self, kind: PartitionKind) -> Result<u32>;
}

impl PartitionIndex for u32 {
    const CATEGORY: &'static str = "position";

    fn position_in(self, _kind: PartitionKind) -> Result<u32> {
        Ok(self)
    }
}

impl<S: Sort> PartitionIndex for Reference<S> {
    const CATEGORY: &'static str = S::CATEGORY;

    fn is_null(self) -> bool {
        self.raw() == 0
    }

    fn position_in(self, kind: PartitionKind) -> Result<u32> {
        let sort = self.sort()?;
        if sort.target() != Target::Partition(kind) {
            return Err(IfcError::SortMismatch {
                category: S::CATEGORY,
                sort: format!("{:?}", sort),
                partition: kind.name(),
            });
        }
        Ok(self.index())
    }
}

/// A bounds-checked view over all records of one partition.
pub struct Partition<'a, R: Record> {
    records: &'a [R],
}

impl<'a, R: Record> Partition<'a, R> {
    pub(crate) fn new(records: &'a [R]) -> Self {
        Self { records }
    }

    pub fn kind(&self) -> PartitionKind {
        R::KIND
    }

    pub fn name(&self) -> &'static str {
        R::KIND.name()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks a record up by its index type.
    ///
    /// Tagged references are checked against this partition's kind first;
    /// the null reference addresses nothing and fails with `NullReference`.
    pub fn get(&self, index: R::Index) -> Result<&'a R> {
        if index.is_null() {
            return Err(IfcError::NullReference {
                category: <R::Index as PartitionIndex>::CATEGORY,
            });
        }
        let position = index.position_in(R::KIND)?;
        self.at(position as usize)
    }

    /// Looks a record up by raw position.
    pub fn at(&self, position: usize) -> Result<&'a R> {
        self.records.get(position).ok_or(IfcError::IndexOutOfRange {
            partition: self.name(),
            index: position as u64,
            count: self.len() as u64,
        })
    }

    /// The `count` records starting at `start`.
    pub fn slice(&self, start: u32, count: u32) -> Result<&'a [R]> {
        let start = start as usize;
        let end = start + count as usize;
        if end > self.len() {
            return Err(IfcError::IndexOutOfRange {
                partition: self.name(),
                index: end as u64,
                count: self.len() as u64,
            });
        }
        Ok(&self.records[start..end])
    }

    pub fn as_slice(&self) -> &'a [R] {
        self.records
    }

    pub fn iter(&self) -> slice::Iter<'a, R> {
        self.records.iter()
    }
}

impl<R: Record> Clone for Partition<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Record> Copy for Partition<'_, R> {}

impl<R: Record> fmt::Debug for Partition<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partition")
            .field("name", &self.name())
            .field("len", &self.len())
            .finish()
    }
}

impl<'a, R: Record> IntoIterator for Partition<'a, R> {
    type Item = &'a R;
    type IntoIter = slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<'a, R: Record> IntoIterator for &Partition<'a, R> {
    type Item = &'a R;
    type IntoIter = slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

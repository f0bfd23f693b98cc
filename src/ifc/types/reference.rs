//! Tagged cross-links between records.
//!
//! Every link in an IFC container is a single little-endian `u32`: the low
//! bits carry a *sort* naming the category of the target, the remaining bits
//! carry the index of the target within the partition for that sort.
//!
//! ```text
//!  31                         BITS   BITS-1      0
//! ┌──────────────────────────────┬───────────────┐
//! │            index             │     sort      │
//! └──────────────────────────────┴───────────────┘
//! ```
//!
//! The sort is a type parameter, so a `DeclIndex` can never be confused with
//! a `TypeIndex` at compile time even though both are four bytes on disk.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use zerocopy::little_endian::U32;
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use super::error::{IfcError, Result};
use crate::ifc::kinds::PartitionKind;

/// Where a dereferenced sort leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A record in the given partition.
    Partition(PartitionKind),
    /// A text offset into the string table.
    Text,
    /// The index itself is the value.
    Immediate,
}

/// A closed category of reference sorts.
///
/// Implementations are plain enums whose discriminants are the on-disk sort
/// values. `target` is a total mapping: every sort the enum can represent
/// leads somewhere.
pub trait Sort: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Number of low bits holding the sort.
    const BITS: u32;

    /// A short name used in diagnostics.
    const CATEGORY: &'static str;

    /// Decodes a raw sort value; `None` for values this reader does not know.
    fn from_raw(raw: u32) -> Option<Self>;

    /// The on-disk sort value.
    fn raw(self) -> u32;

    /// Where references of this sort point.
    fn target(self) -> Target;
}

/// A sort-tagged index into one of a category's partitions.
#[repr(transparent)]
#[derive(FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct Reference<S> {
    raw: U32,
    _sort: PhantomData<S>,
}

impl<S: Sort> Reference<S> {
    const MASK: u32 = (1 << S::BITS) - 1;

    /// Packs a sort and an index.
    ///
    /// Bits of `index` that do not fit above the sort are discarded.
    pub fn new(sort: S, index: u32) -> Self {
        Self::from_raw((index << S::BITS) | sort.raw())
    }

    pub fn from_raw(raw: u32) -> Self {
        Self {
            raw: U32::new(raw),
            _sort: PhantomData,
        }
    }

    /// The null reference.
    pub fn null() -> Self {
        Self::from_raw(0)
    }

    pub fn raw(&self) -> u32 {
        self.raw.get()
    }

    pub fn is_null(&self) -> bool {
        self.raw() == 0
    }

    /// Position of the target within its partition.
    pub fn index(&self) -> u32 {
        self.raw() >> S::BITS
    }

    pub fn sort_bits(&self) -> u32 {
        self.raw() & Self::MASK
    }

    /// Decodes the sort tag.
    ///
    /// The null reference has no sort and fails with `NullReference`.
    pub fn sort(&self) -> Result<S> {
        if self.is_null() {
            return Err(IfcError::NullReference { category: S::CATEGORY });
        }
        S::from_raw(self.sort_bits()).ok_or(IfcError::UnknownReferenceSort {
            category: S::CATEGORY,
            sort: self.sort_bits(),
        })
    }

    /// The decoded sort's target.
    pub fn target(&self) -> Result<Target> {
        self.sort().map(Sort::target)
    }
}

impl<S> Clone for Reference<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Reference<S> {}

impl<S> PartialEq for Reference<S> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<S> Eq for Reference<S> {}

impl<S> Hash for Reference<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.get().hash(state);
    }
}

impl<S: Sort> Default for Reference<S> {
    fn default() -> Self {
        Self::null()
    }
}

impl<S: Sort> fmt::Debug for Reference<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "{}(null)", S::CATEGORY);
        }
        match S::from_raw(self.sort_bits()) {
            Some(sort) => write!(f, "{}({:?}, {})", S::CATEGORY, sort, self.index()),
            None => write!(f, "{}(?{}, {})", S::CATEGORY, self.sort_bits(), self.index()),
        }
    }
}

//! Names, charts and literal constants.

use zerocopy::little_endian::{F64, U16, U32, U64};
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use crate::ifc::macros::record_getters;
use crate::ifc::types::models::TextOffset;
use crate::ifc::types::sorts::ExprIndex;

/// The name of an overloaded operator, e.g. `operator+`.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct OperatorFunctionName {
    encoded: TextOffset,
    operator: U16,
    _reserved: [u8; 2],
}

impl OperatorFunctionName {
    record_getters! {
        encoded: TextOffset,
        operator: u16,
    }
}

/// A single level of template parameters, a run of `decl.parameter`.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct ChartUnilevel {
    start: U32,
    cardinality: U32,
    constraint: ExprIndex,
}

impl ChartUnilevel {
    record_getters! {
        start: u32,
        cardinality: u32,
        /// The requires-clause, null when unconstrained.
        constraint: ExprIndex,
    }
}

/// Nested template parameter lists, a run of `chart.unilevel`.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct ChartMultilevel {
    start: U32,
    cardinality: U32,
}

impl ChartMultilevel {
    record_getters! {
        start: u32,
        cardinality: u32,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct IntegerLiteral {
    value: U64,
}

impl IntegerLiteral {
    record_getters! {
        value: u64,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct FPLiteral {
    value: F64,
    size: U32,
    _reserved: [u8; 4],
}

impl FPLiteral {
    record_getters! {
        value: f64,
        /// Width of the source type in bits.
        size: u32,
    }
}

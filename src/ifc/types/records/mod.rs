//! Record shapes for every materialized partition.
//!
//! Field semantics follow the producer's format; this reader relies only on
//! the shapes (to validate partition extents) and on the typed references
//! they embed.

mod decls;
mod exprs;
mod misc;
mod syntax;
mod types;

pub use decls::*;
pub use exprs::*;
pub use misc::*;
pub use syntax::*;
pub use types::*;

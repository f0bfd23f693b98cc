//! Accessor generation for in-place records.
//!
//! Record fields are stored as unaligned little-endian zerocopy types and
//! kept private; `record_getters!` emits one getter per field converting to
//! the native type.
//!
//! ```ignore
//! impl ScopeDescriptor {
//!     record_getters! {
//!         start: u32,
//!         cardinality: u32,
//!     }
//! }
//! ```

macro_rules! record_getters {
    ($($(#[$meta:meta])* $field:ident : $native_ty:ty),* $(,)?) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $field(&self) -> $native_ty {
                self.$field.into()
            }
        )*
    };
}

pub(crate) use record_getters;

//! Core IFC reader module

pub mod environment;
pub mod file;
pub mod format;
pub mod kinds;
mod macros;
pub mod options;
pub mod partition;
pub mod types;
mod utils;

pub use environment::{Environment, ModuleLocator, ModuleName, SearchPathLocator};
pub use file::{File, Resolved};
pub use kinds::{KindDescriptor, PartitionKind, Record};
pub use options::ReaderOptions;
pub use partition::{Partition, PartitionIndex};
pub use types::error::{IfcError, Result};

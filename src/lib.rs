//! Reference tables for a sandboxed WebAssembly-style virtual machine.
//!
//! A [`Table`] is a growable, bounds-checked vector of opaque [`Ref`] values
//! (function indices or external-object handles). The execution engine uses
//! it to back `call_indirect` and the `table.*` instruction family; the
//! adapters in [`ops`] map those instructions onto table operations and turn
//! out-of-bounds failures into [`Trap`]s.
#![cfg_attr(feature = "no_std", no_std)]

extern crate alloc;
extern crate core;

mod errors;
mod indices;
pub mod ops;
mod table;
mod traps;
mod types;
mod utils;
mod values;

pub use errors::Error;
pub type Result<T> = core::result::Result<T, Error>;
pub use indices::{ExternIndex, FuncIndex};
pub use table::Table;
pub use traps::Trap;
pub use types::{Limits, RefType, TableType};
pub use values::Ref;

/// The absolute maximum size of a table in elements.
///
/// Tables without a declared maximum may grow up to this many elements.
pub const TABLE_MAX_ELEMENTS: u32 = u32::MAX;

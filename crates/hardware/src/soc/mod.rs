//! Board-side components.
//!
//! The core itself owns no memory. It talks to the board through the [`Bus`]
//! trait, selecting byte order with a [`BusTable`]. [`FlatMemory`] is a simple
//! single-region board used by the runner and the tests.

/// Byte-order accessor tables.
pub mod bus_table;

/// Flat RAM board.
pub mod memory;

/// Bus trait definitions.
pub mod traits;

pub use bus_table::{BusTable, ByteOrder};
pub use memory::FlatMemory;
pub use traits::{BlankSource, Bus};

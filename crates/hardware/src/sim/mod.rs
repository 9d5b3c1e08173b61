//! Host-side run support.
//!
//! Loading images into the flat board, the control mailbox and the threaded
//! run loop that steps the core between mailbox drains.

/// Raw image loading.
pub mod loader;

/// Control mailbox.
pub mod mailbox;

/// Threaded run loop.
pub mod runner;

pub use mailbox::{Mailbox, Message, Pending};
pub use runner::{Runner, RunnerHandle};

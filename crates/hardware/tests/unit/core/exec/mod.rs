/// Branches and loop control.
pub mod branch;

/// PFAM/PFMAM dual operations.
pub mod dual;

/// Floating-point arithmetic and compares.
pub mod float;



/// Loads and stores.
pub mod load_store;


/// Flat RAM board.
pub mod flat_memory;

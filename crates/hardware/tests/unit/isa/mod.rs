/// Opcode decoding.
pub mod decode;

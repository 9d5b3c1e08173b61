//! Trap and host error definitions.
//!
//! This module defines the two failure channels of the core:
//! 1. **Architectural traps:** raised by instructions, the translator and the fetch unit. They are
//!    plain values that flow through `?` up to the single trap-entry procedure and never leave
//!    the CPU as host errors.
//! 2. **Host errors:** deployment problems (failed self-test, bad configuration, images that do
//!    not fit in memory) reported to the embedding application through [`CoreError`].

use std::fmt;

use thiserror::Error;

/// Architectural trap class. Each class maps to one PSR trap-status bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrapKind {
    /// Instruction trap (PSR.IT): `trap`, `intovr` overflow and unrecognized opcodes.
    Instruction,
    /// Instruction access fault (PSR.IAT) from a failed fetch translation.
    InstructionAccess,
    /// Data access fault (PSR.DAT): translation, alignment or breakpoint failures on loads/stores.
    DataAccess,
    /// Floating-point trap (PSR.FT).
    FloatingPoint,
    /// External interrupt (PSR.IN).
    Interrupt,
}

impl TrapKind {
    /// Short mnemonic matching the PSR bit name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Instruction => "IT",
            Self::InstructionAccess => "IAT",
            Self::DataAccess => "DAT",
            Self::FloatingPoint => "FT",
            Self::Interrupt => "IN",
        }
    }
}

/// A pending trap.
///
/// Created where the fault is detected (after the matching PSR bit is set) and
/// carried by `Err` to the step loop. `in_delay_slot` and `external` select how
/// the fault instruction register is computed on trap entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trap {
    /// Trap class.
    pub kind: TrapKind,
    /// Raised by the delay-slot instruction of a delayed branch.
    pub in_delay_slot: bool,
    /// Raised by the external interrupt pin rather than by an instruction.
    pub external: bool,
}

impl Trap {
    /// A synchronous trap raised by the executing instruction.
    pub const fn new(kind: TrapKind) -> Self {
        Self {
            kind,
            in_delay_slot: false,
            external: false,
        }
    }

    /// An asynchronous trap from the interrupt pin.
    pub const fn external() -> Self {
        Self {
            kind: TrapKind::Interrupt,
            in_delay_slot: false,
            external: true,
        }
    }

    /// Marks the trap as originating in a delay slot.
    #[must_use]
    pub const fn in_delay_slot(self) -> Self {
        Self {
            in_delay_slot: true,
            ..self
        }
    }
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} trap", self.kind.name())?;
        if self.in_delay_slot {
            write!(f, " (delay slot)")?;
        }
        if self.external {
            write!(f, " (external)")?;
        }
        Ok(())
    }
}

impl std::error::Error for Trap {}

/// Result of executing one instruction routine.
pub type ExecResult = Result<(), Trap>;

/// Host-level failures surfaced to the embedding application.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The register/bus round-trip self-test failed; the host cannot run this core.
    #[error("self-test failed: {0}")]
    SelfTest(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration JSON could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// An image does not fit inside the target memory region.
    #[error("image of {len} bytes does not fit at {addr:#010x}")]
    ImageTooLarge {
        /// Physical load address.
        addr: u32,
        /// Image length in bytes.
        len: usize,
    },

    /// Reading an image or configuration file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Process exit code used by front ends when the core cannot start.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::SelfTest(_) => 3,
            Self::Config(_) | Self::ConfigParse(_) => 2,
            Self::ImageTooLarge { .. } | Self::Io(_) => 1,
        }
    }
}

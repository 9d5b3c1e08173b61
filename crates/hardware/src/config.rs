//! Configuration system for the i860 core.
//!
//! This module defines the configuration structures used to parameterize the
//! core and its run loop. It provides:
//! 1. **Defaults:** Baseline constants (vectors, cache and TLB geometry, batch sizes).
//! 2. **Structures:** Hierarchical config for general, core, run and memory settings.
//! 3. **Loading:** JSON parsing from a string or a file, with range validation.
//!
//! Every field has a default, so `{}` is a valid configuration.

use std::path::Path;

use serde::Deserialize;

use crate::common::CoreError;

/// Default configuration constants.
mod defaults {
    /// Start address after reset (the trap/reset vector).
    pub const START_PC: u32 = crate::common::constants::RESET_VECTOR;

    /// Instruction cache lines (each holds one 64-bit pair).
    pub const ICACHE_LINES: usize = 512;

    /// TLB sets; each set has a read slot and a write slot.
    pub const TLB_SETS: usize = 256;

    /// Pattern OR'd with the register index to seed registers on reset.
    pub const UNDEFINED_PATTERN: u32 = crate::common::constants::UNDEFINED_PATTERN;

    /// EPSR processor type reported by an i860 XR.
    pub const PROCESSOR_TYPE: u8 = 1;

    /// EPSR stepping number.
    pub const STEPPING: u8 = 3;

    /// Steps executed between mailbox drains.
    pub const BATCH_SIZE: u32 = 64;

    /// Idle re-check period while halted, in milliseconds.
    pub const HALT_POLL_MS: u64 = 10;

    /// Base of the flat RAM region.
    pub const RAM_BASE: u32 = 0x0000_0000;

    /// Size of the flat RAM region (32 MiB).
    pub const RAM_SIZE: usize = 32 * 1024 * 1024;
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use i860_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true },
///     "core": { "icache_lines": 64, "trap_misaligned": false },
///     "run": { "batch_size": 16 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.core.icache_lines, 64);
/// assert_eq!(config.core.tlb_sets, 256);
/// assert!(!config.core.trap_misaligned);
/// assert_eq!(config.run.batch_size, 16);
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Execution core parameters.
    #[serde(default)]
    pub core: CoreConfig,
    /// Threaded run loop parameters.
    #[serde(default)]
    pub run: RunConfig,
    /// Flat RAM board used by the runner and tests.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`CoreError::ConfigParse`] for malformed JSON, [`CoreError::Config`] for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`CoreError::Io`] if the file cannot be read, otherwise as [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks value ranges that the type system does not.
    ///
    /// # Errors
    ///
    /// [`CoreError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.core.icache_lines.is_power_of_two() {
            return Err(CoreError::Config(format!(
                "core.icache_lines must be a power of two, got {}",
                self.core.icache_lines
            )));
        }
        if !self.core.tlb_sets.is_power_of_two() {
            return Err(CoreError::Config(format!(
                "core.tlb_sets must be a power of two, got {}",
                self.core.tlb_sets
            )));
        }
        if self.core.stepping > 0x1f {
            return Err(CoreError::Config(format!(
                "core.stepping must fit in 5 bits, got {}",
                self.core.stepping
            )));
        }
        if self.run.batch_size == 0 {
            return Err(CoreError::Config("run.batch_size must be non-zero".into()));
        }
        if self.memory.ram_size == 0 {
            return Err(CoreError::Config("memory.ram_size must be non-zero".into()));
        }
        Ok(())
    }
}

/// General settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Emit a `trace!` event for every executed instruction.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Program counter after construction and reset.
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,
}

impl GeneralConfig {
    fn default_start_pc() -> u32 {
        defaults::START_PC
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: defaults::START_PC,
        }
    }
}

/// Execution core parameters.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CoreConfig {
    /// Instruction cache lines (power of two).
    #[serde(default = "CoreConfig::default_icache_lines")]
    pub icache_lines: usize,

    /// TLB sets (power of two); each set holds two translations.
    #[serde(default = "CoreConfig::default_tlb_sets")]
    pub tlb_sets: usize,

    /// Raise a data access trap on misaligned loads and stores.
    #[serde(default = "CoreConfig::default_true")]
    pub trap_misaligned: bool,

    /// Raise the source-exception trap from `frcp`/`frsqr` on invalid input.
    #[serde(default)]
    pub fp_source_exception_traps: bool,

    /// Pattern seeded into registers on reset.
    #[serde(default = "CoreConfig::default_pattern")]
    pub undefined_pattern: u32,

    /// EPSR processor type field.
    #[serde(default = "CoreConfig::default_processor_type")]
    pub processor_type: u8,

    /// EPSR stepping field (5 bits).
    #[serde(default = "CoreConfig::default_stepping")]
    pub stepping: u8,
}

impl CoreConfig {
    fn default_icache_lines() -> usize {
        defaults::ICACHE_LINES
    }

    fn default_tlb_sets() -> usize {
        defaults::TLB_SETS
    }

    fn default_true() -> bool {
        true
    }

    fn default_pattern() -> u32 {
        defaults::UNDEFINED_PATTERN
    }

    fn default_processor_type() -> u8 {
        defaults::PROCESSOR_TYPE
    }

    fn default_stepping() -> u8 {
        defaults::STEPPING
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            icache_lines: defaults::ICACHE_LINES,
            tlb_sets: defaults::TLB_SETS,
            trap_misaligned: true,
            fp_source_exception_traps: false,
            undefined_pattern: defaults::UNDEFINED_PATTERN,
            processor_type: defaults::PROCESSOR_TYPE,
            stepping: defaults::STEPPING,
        }
    }
}

/// Threaded run loop parameters.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RunConfig {
    /// Steps between mailbox drains.
    #[serde(default = "RunConfig::default_batch_size")]
    pub batch_size: u32,

    /// Idle re-check period while halted, in milliseconds.
    #[serde(default = "RunConfig::default_halt_poll_ms")]
    pub halt_poll_ms: u64,
}

impl RunConfig {
    fn default_batch_size() -> u32 {
        defaults::BATCH_SIZE
    }

    fn default_halt_poll_ms() -> u64 {
        defaults::HALT_POLL_MS
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: defaults::BATCH_SIZE,
            halt_poll_ms: defaults::HALT_POLL_MS,
        }
    }
}

/// Flat RAM board parameters.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Physical base address of RAM.
    #[serde(default = "MemoryConfig::default_ram_base")]
    pub ram_base: u32,

    /// RAM size in bytes.
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: usize,
}

impl MemoryConfig {
    fn default_ram_base() -> u32 {
        defaults::RAM_BASE
    }

    fn default_ram_size() -> usize {
        defaults::RAM_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
        }
    }
}

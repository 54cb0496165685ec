//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterise a
//! machine and its assembler. It provides:
//! 1. **Defaults:** Baseline constants (word kind, memory size, origin).
//! 2. **Structures:** Hierarchical config for the machine and the assembler.
//! 3. **Ingestion:** JSON deserialization for embedding hosts and the CLI's
//!    `--config` flag; `Config::default()` otherwise.
//!
//! Changing the word kind or memory size of a live machine is not supported;
//! construct a new instance instead.

use serde::Deserialize;

use crate::num::NumericKind;

/// Default configuration constants.
pub mod defaults {
    /// Default memory size in words.
    ///
    /// Teaching programs are small; 256 words keeps memory views legible.
    pub const MEMORY_WORDS: usize = 256;

    /// Default byte address the first instruction is assembled at.
    pub const ORIGIN: u64 = 0;

    /// Default cycle cap for `run` drivers.
    ///
    /// Halting a runaway program is only possible between cycles, so every
    /// driver-level loop carries a cap.
    pub const CYCLE_CAP: u64 = 100_000;
}

/// Machine variant selecting the instruction table and dispatch chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Base ARM-flavoured set.
    #[default]
    Base,
    /// Base set plus I/O, extra math, pointer addressing and frames.
    Extended,
    /// Independent RS set.
    Rs,
}

/// Root configuration type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CPU-side configuration.
    pub machine: MachineConfig,
    /// Assembler-side configuration.
    pub assembler: AssemblerConfig,
}

impl Config {
    /// Deserializes a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// CPU-side configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Machine variant (instruction table + dispatch chain).
    pub variant: Variant,
    /// Active numeric kind; fixes the word width for registers and memory.
    pub numeric: NumericKind,
    /// Memory capacity in words (capacity in bytes is words × width).
    pub words: usize,
    /// Treat NULL as HALT instead of a no-op.
    pub halt_on_null: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Base,
            numeric: NumericKind::U32,
            words: defaults::MEMORY_WORDS,
            halt_on_null: false,
        }
    }
}

/// Assembler-side configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Byte address the first instruction is assembled at.
    pub origin: u64,
    /// Rewrite constant-target branches to labels when decompiling.
    pub label_substitution: bool,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            origin: defaults::ORIGIN,
            label_substitution: false,
        }
    }
}

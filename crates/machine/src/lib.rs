//! Instruction-set simulator library.
//!
//! This crate implements a two-way assembler and execution engine for a
//! family of small teaching architectures, with the following:
//! 1. **Numerics:** Configurable word kinds (u8 through i64, f32, f64) with
//!    encoding, comparison and per-byte display formatting.
//! 2. **ISA:** Declarative instruction tables for the base ARM-flavoured
//!    set, its extended variant and the independent RS set.
//! 3. **Assembler:** Two-way translation between assembly text and machine
//!    code, with macros, labels and caret-underlined diagnostics.
//! 4. **CPU:** Register file, byte-addressable memory, variant dispatch
//!    chain, stack-frame protocol and pluggable I/O port.
//! 5. **Simulation:** Session façade driving assemble/load/step/run.

/// Two-way assembler (compilation and decompilation).
pub mod asm;
/// Error taxonomy and source-line diagnostics.
pub mod common;
/// Simulator configuration (defaults, variants, hierarchical structures).
pub mod config;
/// CPU execution engine (registers, memory, dispatch, stack, I/O).
pub mod cpu;
/// Instruction set tables (base, extended, RS).
pub mod isa;
/// Numeric word kinds.
pub mod num;
/// Simulation session façade.
pub mod sim;

/// Two-way assembler; construct through a [`sim::Session`] or directly.
pub use crate::asm::Assembler;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main machine type; register file, memory and dispatch chain.
pub use crate::cpu::Cpu;
/// One configured machine with its assembler.
pub use crate::sim::Session;

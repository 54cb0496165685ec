//! Opcode handler sets.
//!
//! One module per capability set. Every handler consumes exactly as many
//! operand words as its table entry declares, in storage order, via
//! [`Cpu::fetch`](crate::cpu::Cpu::fetch); performs its semantic effect;
//! updates the compare flag where its set says so; and returns a continue
//! flag through [`Dispatch::Claimed`](crate::cpu::dispatch::Dispatch).

/// Base-set handlers.
pub mod base;
/// Extension-set handlers.
pub mod extended;
/// RS-set handlers.
pub mod rs;

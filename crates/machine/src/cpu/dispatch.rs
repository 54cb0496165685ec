//! Opcode dispatch chain.
//!
//! Variants are not inheritance: a machine carries an ordered list of
//! handler sets, tried most-derived-first. A handler either claims the
//! opcode (performing its whole semantic effect, including consuming the
//! operand words) or reports it unclaimed, in which case the next set in
//! the chain is tried. An opcode unclaimed by the entire chain is an
//! illegal instruction.

use crate::config::Variant;
use crate::cpu::Cpu;
use crate::cpu::ops;
use crate::common::ExecError;

/// Outcome of offering an opcode to one handler set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The set executed the opcode; the flag is the continue flag
    /// (`false` halts the machine).
    Claimed(bool),
    /// The opcode does not belong to this set.
    Unclaimed,
}

/// One capability set of opcode handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerSet {
    /// Base ARM-flavoured operations.
    Base,
    /// Extension operations (I/O, pointers, frames).
    Extended,
    /// Independent RS operations.
    Rs,
}

impl HandlerSet {
    /// Offers an opcode to this set.
    pub fn try_execute(self, cpu: &mut Cpu, opcode: u64) -> Result<Dispatch, ExecError> {
        match self {
            HandlerSet::Base => ops::base::execute(cpu, opcode),
            HandlerSet::Extended => ops::extended::execute(cpu, opcode),
            HandlerSet::Rs => ops::rs::execute(cpu, opcode),
        }
    }
}

/// Builds the dispatch chain for a variant, most-derived-first.
///
/// The extended machine delegates through its own set before falling back
/// to the base set; the RS machine never consults the base set.
pub fn chain(variant: Variant) -> Vec<HandlerSet> {
    match variant {
        Variant::Base => vec![HandlerSet::Base],
        Variant::Extended => vec![HandlerSet::Extended, HandlerSet::Base],
        Variant::Rs => vec![HandlerSet::Rs],
    }
}

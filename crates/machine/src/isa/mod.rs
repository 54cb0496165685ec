//! Instruction-set definitions.
//!
//! This module binds opcodes, mnemonics and operand shapes together for both
//! directions of the tool. It provides:
//! 1. **Descriptors:** One entry per instruction variant (mnemonic, numeric
//!    opcode, ordered operand-kind signature, description).
//! 2. **Tables:** Immutable opcode-validated maps serving execution
//!    (lookup-by-opcode) and assembly (lookup-by-mnemonic-and-signature).
//! 3. **Variants:** The base ARM-flavoured set, the extended set layered on
//!    top of it, and the independent RS set.

/// Base instruction set (arithmetic, data movement, compare, branches).
pub mod base;
/// Extended instruction set (I/O, extra math, pointer addressing, frames).
pub mod extended;
/// Independent RS instruction set.
pub mod rs;
/// Instruction table construction and lookup.
pub mod table;

use std::fmt;

pub use table::InstructionTable;

/// The kind of one instruction operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// A register named directly (`r3`).
    Register,
    /// A register named through a pointer register (`*r3`).
    RegisterPtr,
    /// A byte address in memory.
    Address,
    /// A literal value (`#12`, `#xFF`, `'a'`).
    Constant,
    /// An unresolved label reference; becomes [`Address`](Self::Address) in
    /// assembly pass 2. Never appears in a table signature.
    Symbol,
}

impl OperandKind {
    /// Whether a parsed operand of kind `self` satisfies a table slot
    /// declared as `slot`. Matching is exact and positional; the only
    /// latitude is that a not-yet-resolved symbol stands for an address.
    #[inline]
    pub fn matches(self, slot: OperandKind) -> bool {
        self == slot || (self == OperandKind::Symbol && slot == OperandKind::Address)
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperandKind::Register => "register",
            OperandKind::RegisterPtr => "register pointer",
            OperandKind::Address => "address",
            OperandKind::Constant => "constant",
            OperandKind::Symbol => "symbol",
        };
        write!(f, "{name}")
    }
}

/// One instruction variant: the unit both the assembler and the CPU share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    /// Human-readable instruction name; several descriptors may share one
    /// mnemonic ("overloads") distinguished by signature.
    pub mnemonic: &'static str,
    /// Numeric opcode, unique within its table.
    pub opcode: u64,
    /// Ordered operand-kind signature.
    pub operands: &'static [OperandKind],
    /// One-line description for listings and diagnostics.
    pub description: &'static str,
}

impl Descriptor {
    /// Renders the mnemonic with its expected signature, e.g.
    /// `ADD register, register, constant`.
    pub fn signature(&self) -> String {
        if self.operands.is_empty() {
            return self.mnemonic.to_string();
        }
        let kinds: Vec<String> = self.operands.iter().map(ToString::to_string).collect();
        format!("{} {}", self.mnemonic, kinds.join(", "))
    }
}

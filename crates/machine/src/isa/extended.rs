//! Extended instruction set.
//!
//! Everything the base set has, plus I/O through the machine's port, extra
//! math, pointer-indirect loads/stores, register-pointer moves, and the
//! subroutine call/return pair backed by the stack-frame protocol. The
//! extension entries are opcode-disjoint from the base set; the table is
//! produced by union.

use crate::common::ConfigError;
use crate::isa::OperandKind::{Address, Constant, Register, RegisterPtr};
use crate::isa::{Descriptor, InstructionTable, OperandKind, base};

/// Numeric opcodes of the extension entries.
pub mod opcodes {
    /// INP rd — prompt for a number.
    pub const INP: u64 = 0x80;
    /// OUT rn — write a number.
    pub const OUT: u64 = 0x81;
    /// OUTC rn — write the character at rn's code point.
    pub const OUTC: u64 = 0x82;
    /// INC rd.
    pub const INC: u64 = 0x84;
    /// DEC rd.
    pub const DEC: u64 = 0x85;
    /// LDR rd, *rp — load from the address held in the pointed-to register.
    pub const LDR_PTR: u64 = 0x86;
    /// STR rn, *rp — store likewise.
    pub const STR_PTR: u64 = 0x87;
    /// MOV rd, *rp — copy out of the register the pointer names.
    pub const MOV_FROM_PTR: u64 = 0x88;
    /// MOV *rp, rn — copy into the register the pointer names.
    pub const MOV_TO_PTR: u64 = 0x89;
    /// CALL addr.
    pub const CALL_MEM: u64 = 0x8A;
    /// CALL rn.
    pub const CALL_REG: u64 = 0x8B;
    /// RET #args.
    pub const RET_ARGS: u64 = 0x8C;
    /// RET.
    pub const RET: u64 = 0x8D;
    /// PUSH rn.
    pub const PUSH: u64 = 0x8E;
    /// POP rd.
    pub const POP: u64 = 0x8F;
}

/// Signature: register only.
const R: &[OperandKind] = &[Register];
/// Signature: register, register pointer.
const RP: &[OperandKind] = &[Register, RegisterPtr];
/// Signature: register pointer, register.
const PR: &[OperandKind] = &[RegisterPtr, Register];
/// Signature: address only.
const A: &[OperandKind] = &[Address];
/// Signature: constant only.
const C: &[OperandKind] = &[Constant];
/// Empty signature.
const NONE: &[OperandKind] = &[];

/// Extension descriptors, appended after the base entries during union.
pub const ENTRIES: &[Descriptor] = &[
    Descriptor { mnemonic: "INP", opcode: opcodes::INP, operands: R, description: "read a number into rd" },
    Descriptor { mnemonic: "OUT", opcode: opcodes::OUT, operands: R, description: "write rn as a number" },
    Descriptor { mnemonic: "OUTC", opcode: opcodes::OUTC, operands: R, description: "write rn as a character" },
    Descriptor { mnemonic: "INC", opcode: opcodes::INC, operands: R, description: "rd = rd + 1" },
    Descriptor { mnemonic: "DEC", opcode: opcodes::DEC, operands: R, description: "rd = rd - 1" },
    Descriptor { mnemonic: "LDR", opcode: opcodes::LDR_PTR, operands: RP, description: "rd = [rp]" },
    Descriptor { mnemonic: "STR", opcode: opcodes::STR_PTR, operands: RP, description: "[rp] = rn" },
    Descriptor { mnemonic: "MOV", opcode: opcodes::MOV_FROM_PTR, operands: RP, description: "rd = reg(rp)" },
    Descriptor { mnemonic: "MOV", opcode: opcodes::MOV_TO_PTR, operands: PR, description: "reg(rp) = rn" },
    Descriptor { mnemonic: "CALL", opcode: opcodes::CALL_MEM, operands: A, description: "push frame, branch to addr" },
    Descriptor { mnemonic: "CALL", opcode: opcodes::CALL_REG, operands: R, description: "push frame, branch to rn" },
    Descriptor { mnemonic: "RET", opcode: opcodes::RET_ARGS, operands: C, description: "pop frame, discard n argument words" },
    Descriptor { mnemonic: "RET", opcode: opcodes::RET, operands: NONE, description: "pop frame" },
    Descriptor { mnemonic: "PUSH", opcode: opcodes::PUSH, operands: R, description: "push rn" },
    Descriptor { mnemonic: "POP", opcode: opcodes::POP, operands: R, description: "pop into rd" },
];

/// Builds the extended table: base entries unioned with the extension.
pub fn table() -> Result<InstructionTable, ConfigError> {
    base::table()?.union(ENTRIES)
}

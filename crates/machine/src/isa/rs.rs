//! RS instruction set.
//!
//! An independent teaching set with its own mnemonics and opcode space. It
//! is not a union over the base set and its machine variant never delegates
//! to the base handler.

use crate::common::ConfigError;
use crate::isa::OperandKind::{Address, Constant, Register};
use crate::isa::{Descriptor, InstructionTable, OperandKind};

/// Numeric opcodes of the RS set.
pub mod opcodes {
    /// Stop execution.
    pub const HLT: u64 = 0x00;
    /// SET rd, #imm.
    pub const SET: u64 = 0x01;
    /// CPY rd, rs.
    pub const CPY: u64 = 0x02;
    /// LOD rd, addr.
    pub const LOD: u64 = 0x03;
    /// STO rs, addr.
    pub const STO: u64 = 0x04;
    /// ADD rd, rs.
    pub const ADD: u64 = 0x05;
    /// SUB rd, rs.
    pub const SUB: u64 = 0x06;
    /// JMP addr.
    pub const JMP: u64 = 0x07;
    /// JNZ rs, addr.
    pub const JNZ: u64 = 0x08;
    /// OUT rs.
    pub const OUT: u64 = 0x09;
    /// INP rd.
    pub const INP: u64 = 0x0A;
}

/// Signature: register, constant.
const RC: &[OperandKind] = &[Register, Constant];
/// Signature: register, register.
const RR: &[OperandKind] = &[Register, Register];
/// Signature: register, address.
const RA: &[OperandKind] = &[Register, Address];
/// Signature: address only.
const A: &[OperandKind] = &[Address];
/// Signature: register only.
const R: &[OperandKind] = &[Register];
/// Empty signature.
const NONE: &[OperandKind] = &[];

/// RS descriptors in declaration order.
pub const ENTRIES: &[Descriptor] = &[
    Descriptor { mnemonic: "HLT", opcode: opcodes::HLT, operands: NONE, description: "stop execution" },
    Descriptor { mnemonic: "SET", opcode: opcodes::SET, operands: RC, description: "rd = imm" },
    Descriptor { mnemonic: "CPY", opcode: opcodes::CPY, operands: RR, description: "rd = rs" },
    Descriptor { mnemonic: "LOD", opcode: opcodes::LOD, operands: RA, description: "rd = [addr]" },
    Descriptor { mnemonic: "STO", opcode: opcodes::STO, operands: RA, description: "[addr] = rs" },
    Descriptor { mnemonic: "ADD", opcode: opcodes::ADD, operands: RR, description: "rd = rd + rs" },
    Descriptor { mnemonic: "SUB", opcode: opcodes::SUB, operands: RR, description: "rd = rd - rs" },
    Descriptor { mnemonic: "JMP", opcode: opcodes::JMP, operands: A, description: "jump to addr" },
    Descriptor { mnemonic: "JNZ", opcode: opcodes::JNZ, operands: RA, description: "jump to addr if rs is non-zero" },
    Descriptor { mnemonic: "OUT", opcode: opcodes::OUT, operands: R, description: "write rs as a number" },
    Descriptor { mnemonic: "INP", opcode: opcodes::INP, operands: R, description: "read a number into rd" },
];

/// Opcodes that jump to a constant target, for decompiler label substitution.
pub const LABELLED_BRANCHES: &[u64] = &[opcodes::JMP, opcodes::JNZ];

/// Builds the RS table.
pub fn table() -> Result<InstructionTable, ConfigError> {
    InstructionTable::new(ENTRIES)
}

//! Base instruction set.
//!
//! The ARM-flavoured teaching set: three-form arithmetic and bitwise
//! operations, data movement, compare, and unconditional/conditional
//! branches. Every arithmetic mnemonic exists in register-register-register,
//! register-register-address and register-register-constant form; the forms
//! are separate opcodes sharing one mnemonic ("overloads").

use crate::common::ConfigError;
use crate::isa::OperandKind::{Address, Constant, Register};
use crate::isa::{Descriptor, InstructionTable, OperandKind};

/// Numeric opcodes of the base set.
pub mod opcodes {
    /// No operation (halts instead when `halt_on_null` is configured).
    pub const NULL: u64 = 0x00;
    /// Stop execution.
    pub const HALT: u64 = 0x01;

    /// ADD rd, rn, rm.
    pub const ADD_REG: u64 = 0x10;
    /// ADD rd, rn, addr.
    pub const ADD_MEM: u64 = 0x11;
    /// ADD rd, rn, #imm.
    pub const ADD_IMM: u64 = 0x12;
    /// SUB rd, rn, rm.
    pub const SUB_REG: u64 = 0x13;
    /// SUB rd, rn, addr.
    pub const SUB_MEM: u64 = 0x14;
    /// SUB rd, rn, #imm.
    pub const SUB_IMM: u64 = 0x15;
    /// MUL rd, rn, rm.
    pub const MUL_REG: u64 = 0x16;
    /// MUL rd, rn, addr.
    pub const MUL_MEM: u64 = 0x17;
    /// MUL rd, rn, #imm.
    pub const MUL_IMM: u64 = 0x18;
    /// DIV rd, rn, rm.
    pub const DIV_REG: u64 = 0x19;
    /// DIV rd, rn, addr.
    pub const DIV_MEM: u64 = 0x1A;
    /// DIV rd, rn, #imm.
    pub const DIV_IMM: u64 = 0x1B;
    /// EXP rd, rn, rm.
    pub const EXP_REG: u64 = 0x1C;
    /// EXP rd, rn, addr.
    pub const EXP_MEM: u64 = 0x1D;
    /// EXP rd, rn, #imm.
    pub const EXP_IMM: u64 = 0x1E;
    /// MOD rd, rn, rm.
    pub const MOD_REG: u64 = 0x1F;
    /// MOD rd, rn, addr.
    pub const MOD_MEM: u64 = 0x20;
    /// MOD rd, rn, #imm.
    pub const MOD_IMM: u64 = 0x21;
    /// AND rd, rn, rm.
    pub const AND_REG: u64 = 0x22;
    /// AND rd, rn, addr.
    pub const AND_MEM: u64 = 0x23;
    /// AND rd, rn, #imm.
    pub const AND_IMM: u64 = 0x24;
    /// ORR rd, rn, rm.
    pub const ORR_REG: u64 = 0x25;
    /// ORR rd, rn, addr.
    pub const ORR_MEM: u64 = 0x26;
    /// ORR rd, rn, #imm.
    pub const ORR_IMM: u64 = 0x27;
    /// EOR rd, rn, rm.
    pub const EOR_REG: u64 = 0x28;
    /// EOR rd, rn, addr.
    pub const EOR_MEM: u64 = 0x29;
    /// EOR rd, rn, #imm.
    pub const EOR_IMM: u64 = 0x2A;
    /// LSL rd, rn, rm.
    pub const LSL_REG: u64 = 0x2B;
    /// LSL rd, rn, addr.
    pub const LSL_MEM: u64 = 0x2C;
    /// LSL rd, rn, #imm.
    pub const LSL_IMM: u64 = 0x2D;
    /// LSR rd, rn, rm.
    pub const LSR_REG: u64 = 0x2E;
    /// LSR rd, rn, addr.
    pub const LSR_MEM: u64 = 0x2F;
    /// LSR rd, rn, #imm.
    pub const LSR_IMM: u64 = 0x30;
    /// MVN rd, rm.
    pub const MVN_REG: u64 = 0x31;
    /// MVN rd, addr.
    pub const MVN_MEM: u64 = 0x32;
    /// MVN rd, #imm.
    pub const MVN_IMM: u64 = 0x33;

    /// LDR rd, addr.
    pub const LDR: u64 = 0x40;
    /// STR rn, addr.
    pub const STR: u64 = 0x41;
    /// MOV rd, rm.
    pub const MOV_REG: u64 = 0x42;
    /// MOV rd, #imm.
    pub const MOV_IMM: u64 = 0x43;

    /// CMP rn, rm.
    pub const CMP_REG: u64 = 0x50;
    /// CMP rn, addr.
    pub const CMP_MEM: u64 = 0x51;
    /// CMP rn, #imm.
    pub const CMP_IMM: u64 = 0x52;

    /// B addr.
    pub const B_MEM: u64 = 0x60;
    /// B rn.
    pub const B_REG: u64 = 0x61;
    /// BEQ addr.
    pub const BEQ_MEM: u64 = 0x62;
    /// BEQ rn.
    pub const BEQ_REG: u64 = 0x63;
    /// BNE addr.
    pub const BNE_MEM: u64 = 0x64;
    /// BNE rn.
    pub const BNE_REG: u64 = 0x65;
    /// BLT addr.
    pub const BLT_MEM: u64 = 0x66;
    /// BLT rn.
    pub const BLT_REG: u64 = 0x67;
    /// BGT addr.
    pub const BGT_MEM: u64 = 0x68;
    /// BGT rn.
    pub const BGT_REG: u64 = 0x69;
}

/// Signature: register, register, register.
const RRR: &[OperandKind] = &[Register, Register, Register];
/// Signature: register, register, address.
const RRA: &[OperandKind] = &[Register, Register, Address];
/// Signature: register, register, constant.
const RRC: &[OperandKind] = &[Register, Register, Constant];
/// Signature: register, register.
const RR: &[OperandKind] = &[Register, Register];
/// Signature: register, address.
const RA: &[OperandKind] = &[Register, Address];
/// Signature: register, constant.
const RC: &[OperandKind] = &[Register, Constant];
/// Signature: address only.
const A: &[OperandKind] = &[Address];
/// Signature: register only.
const R: &[OperandKind] = &[Register];
/// Empty signature.
const NONE: &[OperandKind] = &[];

/// Base-set descriptors in declaration order.
///
/// Declaration order matters: overload resolution scans this list and the
/// first positional match wins.
pub const ENTRIES: &[Descriptor] = &[
    Descriptor { mnemonic: "NULL", opcode: opcodes::NULL, operands: NONE, description: "no operation" },
    Descriptor { mnemonic: "HALT", opcode: opcodes::HALT, operands: NONE, description: "stop execution" },
    Descriptor { mnemonic: "ADD", opcode: opcodes::ADD_REG, operands: RRR, description: "rd = rn + rm" },
    Descriptor { mnemonic: "ADD", opcode: opcodes::ADD_MEM, operands: RRA, description: "rd = rn + [addr]" },
    Descriptor { mnemonic: "ADD", opcode: opcodes::ADD_IMM, operands: RRC, description: "rd = rn + imm" },
    Descriptor { mnemonic: "SUB", opcode: opcodes::SUB_REG, operands: RRR, description: "rd = rn - rm" },
    Descriptor { mnemonic: "SUB", opcode: opcodes::SUB_MEM, operands: RRA, description: "rd = rn - [addr]" },
    Descriptor { mnemonic: "SUB", opcode: opcodes::SUB_IMM, operands: RRC, description: "rd = rn - imm" },
    Descriptor { mnemonic: "MUL", opcode: opcodes::MUL_REG, operands: RRR, description: "rd = rn * rm" },
    Descriptor { mnemonic: "MUL", opcode: opcodes::MUL_MEM, operands: RRA, description: "rd = rn * [addr]" },
    Descriptor { mnemonic: "MUL", opcode: opcodes::MUL_IMM, operands: RRC, description: "rd = rn * imm" },
    Descriptor { mnemonic: "DIV", opcode: opcodes::DIV_REG, operands: RRR, description: "rd = rn / rm" },
    Descriptor { mnemonic: "DIV", opcode: opcodes::DIV_MEM, operands: RRA, description: "rd = rn / [addr]" },
    Descriptor { mnemonic: "DIV", opcode: opcodes::DIV_IMM, operands: RRC, description: "rd = rn / imm" },
    Descriptor { mnemonic: "EXP", opcode: opcodes::EXP_REG, operands: RRR, description: "rd = rn ** rm" },
    Descriptor { mnemonic: "EXP", opcode: opcodes::EXP_MEM, operands: RRA, description: "rd = rn ** [addr]" },
    Descriptor { mnemonic: "EXP", opcode: opcodes::EXP_IMM, operands: RRC, description: "rd = rn ** imm" },
    Descriptor { mnemonic: "MOD", opcode: opcodes::MOD_REG, operands: RRR, description: "rd = rn % rm" },
    Descriptor { mnemonic: "MOD", opcode: opcodes::MOD_MEM, operands: RRA, description: "rd = rn % [addr]" },
    Descriptor { mnemonic: "MOD", opcode: opcodes::MOD_IMM, operands: RRC, description: "rd = rn % imm" },
    Descriptor { mnemonic: "AND", opcode: opcodes::AND_REG, operands: RRR, description: "rd = rn & rm" },
    Descriptor { mnemonic: "AND", opcode: opcodes::AND_MEM, operands: RRA, description: "rd = rn & [addr]" },
    Descriptor { mnemonic: "AND", opcode: opcodes::AND_IMM, operands: RRC, description: "rd = rn & imm" },
    Descriptor { mnemonic: "ORR", opcode: opcodes::ORR_REG, operands: RRR, description: "rd = rn | rm" },
    Descriptor { mnemonic: "ORR", opcode: opcodes::ORR_MEM, operands: RRA, description: "rd = rn | [addr]" },
    Descriptor { mnemonic: "ORR", opcode: opcodes::ORR_IMM, operands: RRC, description: "rd = rn | imm" },
    Descriptor { mnemonic: "EOR", opcode: opcodes::EOR_REG, operands: RRR, description: "rd = rn ^ rm" },
    Descriptor { mnemonic: "EOR", opcode: opcodes::EOR_MEM, operands: RRA, description: "rd = rn ^ [addr]" },
    Descriptor { mnemonic: "EOR", opcode: opcodes::EOR_IMM, operands: RRC, description: "rd = rn ^ imm" },
    Descriptor { mnemonic: "LSL", opcode: opcodes::LSL_REG, operands: RRR, description: "rd = rn << rm" },
    Descriptor { mnemonic: "LSL", opcode: opcodes::LSL_MEM, operands: RRA, description: "rd = rn << [addr]" },
    Descriptor { mnemonic: "LSL", opcode: opcodes::LSL_IMM, operands: RRC, description: "rd = rn << imm" },
    Descriptor { mnemonic: "LSR", opcode: opcodes::LSR_REG, operands: RRR, description: "rd = rn >> rm" },
    Descriptor { mnemonic: "LSR", opcode: opcodes::LSR_MEM, operands: RRA, description: "rd = rn >> [addr]" },
    Descriptor { mnemonic: "LSR", opcode: opcodes::LSR_IMM, operands: RRC, description: "rd = rn >> imm" },
    Descriptor { mnemonic: "MVN", opcode: opcodes::MVN_REG, operands: RR, description: "rd = !rm" },
    Descriptor { mnemonic: "MVN", opcode: opcodes::MVN_MEM, operands: RA, description: "rd = ![addr]" },
    Descriptor { mnemonic: "MVN", opcode: opcodes::MVN_IMM, operands: RC, description: "rd = !imm" },
    Descriptor { mnemonic: "LDR", opcode: opcodes::LDR, operands: RA, description: "rd = [addr]" },
    Descriptor { mnemonic: "STR", opcode: opcodes::STR, operands: RA, description: "[addr] = rn" },
    Descriptor { mnemonic: "MOV", opcode: opcodes::MOV_REG, operands: RR, description: "rd = rm" },
    Descriptor { mnemonic: "MOV", opcode: opcodes::MOV_IMM, operands: RC, description: "rd = imm" },
    Descriptor { mnemonic: "CMP", opcode: opcodes::CMP_REG, operands: RR, description: "compare rn with rm" },
    Descriptor { mnemonic: "CMP", opcode: opcodes::CMP_MEM, operands: RA, description: "compare rn with [addr]" },
    Descriptor { mnemonic: "CMP", opcode: opcodes::CMP_IMM, operands: RC, description: "compare rn with imm" },
    Descriptor { mnemonic: "B", opcode: opcodes::B_MEM, operands: A, description: "branch to addr" },
    Descriptor { mnemonic: "B", opcode: opcodes::B_REG, operands: R, description: "branch to rn" },
    Descriptor { mnemonic: "BEQ", opcode: opcodes::BEQ_MEM, operands: A, description: "branch to addr if equal" },
    Descriptor { mnemonic: "BEQ", opcode: opcodes::BEQ_REG, operands: R, description: "branch to rn if equal" },
    Descriptor { mnemonic: "BNE", opcode: opcodes::BNE_MEM, operands: A, description: "branch to addr if not equal" },
    Descriptor { mnemonic: "BNE", opcode: opcodes::BNE_REG, operands: R, description: "branch to rn if not equal" },
    Descriptor { mnemonic: "BLT", opcode: opcodes::BLT_MEM, operands: A, description: "branch to addr if less than" },
    Descriptor { mnemonic: "BLT", opcode: opcodes::BLT_REG, operands: R, description: "branch to rn if less than" },
    Descriptor { mnemonic: "BGT", opcode: opcodes::BGT_MEM, operands: A, description: "branch to addr if greater than" },
    Descriptor { mnemonic: "BGT", opcode: opcodes::BGT_REG, operands: R, description: "branch to rn if greater than" },
];

/// Opcodes that branch to a constant target; the decompiler's label
/// substitution recognises exactly this set.
pub const LABELLED_BRANCHES: &[u64] = &[
    opcodes::B_MEM,
    opcodes::BEQ_MEM,
    opcodes::BNE_MEM,
    opcodes::BLT_MEM,
    opcodes::BGT_MEM,
];

/// Builds the base table.
pub fn table() -> Result<InstructionTable, ConfigError> {
    InstructionTable::new(ENTRIES)
}

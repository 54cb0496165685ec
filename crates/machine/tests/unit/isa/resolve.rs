//! # Overload Resolution Tests
//!
//! Mnemonic plus operand-kind signature resolution: first positional match
//! in declaration order wins, no widening, and mismatches enumerate every
//! candidate signature.

use pretty_assertions::assert_eq;

use microasm_core::isa::{base, extended, OperandKind};

use OperandKind::{Address, Constant, Register};

#[test]
fn test_add_overloads_resolve_by_third_operand() {
    let table = base::table().unwrap();
    let reg = table.resolve("ADD", &[Register, Register, Register]).unwrap();
    assert_eq!(reg.opcode, base::opcodes::ADD_REG);
    let mem = table.resolve("ADD", &[Register, Register, Address]).unwrap();
    assert_eq!(mem.opcode, base::opcodes::ADD_MEM);
    let imm = table.resolve("ADD", &[Register, Register, Constant]).unwrap();
    assert_eq!(imm.opcode, base::opcodes::ADD_IMM);
}

#[test]
fn test_resolution_is_case_insensitive() {
    let table = base::table().unwrap();
    let entry = table.resolve("add", &[Register, Register, Register]).unwrap();
    assert_eq!(entry.opcode, base::opcodes::ADD_REG);
}

#[test]
fn test_symbol_matches_an_address_slot() {
    let table = base::table().unwrap();
    let entry = table.resolve("B", &[OperandKind::Symbol]).unwrap();
    assert_eq!(entry.opcode, base::opcodes::B_MEM);
}

#[test]
fn test_no_widening_between_constant_and_address() {
    let table = base::table().unwrap();
    // B takes an address or a register, never a constant.
    assert!(table.resolve("B", &[Constant]).is_err());
}

#[test]
fn test_mismatch_enumerates_all_candidates() {
    let table = base::table().unwrap();
    let err = table.resolve("ADD", &[Register, Constant]).unwrap_err();
    let rendered = err.to_string();
    // All three ADD overloads appear so the author can see what exists.
    assert!(rendered.contains("ADD register, register, register"), "{rendered}");
    assert!(rendered.contains("ADD register, register, address"), "{rendered}");
    assert!(rendered.contains("ADD register, register, constant"), "{rendered}");
}

#[test]
fn test_unknown_mnemonic_is_an_error() {
    let table = base::table().unwrap();
    assert!(table.resolve("FROB", &[Register]).is_err());
}

#[test]
fn test_extended_set_shadows_nothing() {
    // LDR gains a pointer form in the extended set while the base form
    // still resolves first for its own signature.
    let table = extended::table().unwrap();
    let plain = table.resolve("LDR", &[Register, Address]).unwrap();
    assert_eq!(plain.opcode, base::opcodes::LDR);
    let ptr = table
        .resolve("LDR", &[Register, OperandKind::RegisterPtr])
        .unwrap();
    assert_eq!(ptr.opcode, extended::opcodes::LDR_PTR);
}

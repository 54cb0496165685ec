//! # Register File Tests

use pretty_assertions::assert_eq;

use microasm_core::cpu::registers::{self, RegisterFile, CF, COUNT, FP, IP, SP};

#[test]
fn test_sixteen_registers() {
    assert_eq!(COUNT, 16);
    assert_eq!(IP, 12);
    assert_eq!(SP, 13);
    assert_eq!(FP, 14);
    assert_eq!(CF, 15);
}

#[test]
fn test_new_file_is_zeroed() {
    let regs = RegisterFile::new();
    for index in 0..COUNT {
        assert_eq!(regs.read(index), 0);
    }
}

#[test]
fn test_read_write() {
    let mut regs = RegisterFile::new();
    regs.write(5, 0xDEAD_BEEF);
    assert_eq!(regs.read(5), 0xDEAD_BEEF);
}

#[test]
fn test_names_round_trip() {
    for index in 0..COUNT {
        let name = registers::name(index).unwrap();
        assert_eq!(registers::lookup(name), Some(index));
    }
    assert_eq!(registers::name(COUNT), None);
}

#[test]
fn test_lookup_is_case_insensitive() {
    assert_eq!(registers::lookup("R4"), Some(4));
    assert_eq!(registers::lookup("SP"), Some(SP));
}

#[test]
fn test_pc_aliases_ip() {
    assert_eq!(registers::lookup("pc"), Some(IP));
    assert_eq!(registers::lookup("PC"), Some(IP));
}

#[test]
fn test_unknown_names() {
    assert_eq!(registers::lookup("r16"), None);
    assert_eq!(registers::lookup("xyz"), None);
    assert_eq!(registers::lookup(""), None);
}

#[test]
fn test_snapshot_copies_all_registers() {
    let mut regs = RegisterFile::new();
    regs.write(0, 1);
    regs.write(15, 2);
    let snap = regs.snapshot();
    assert_eq!(snap[0], 1);
    assert_eq!(snap[15], 2);
}

//! # Operand Classification Tests
//!
//! Each operand string resolves to exactly one kind, in fixed priority
//! order: pointer, constant, character literal, register, bare numeric,
//! symbol.

use pretty_assertions::assert_eq;

use microasm_core::config::{Config, Variant};
use microasm_core::isa::base;
use microasm_core::num::NumericKind;

use crate::common::harness::TestContext;

fn words_for(source: &str) -> Vec<u64> {
    TestContext::base().compile(source)
}

#[test]
fn test_register_operand() {
    assert_eq!(words_for("MOV r3, r7"), vec![base::opcodes::MOV_REG, 3, 7]);
}

#[test]
fn test_register_names_are_case_insensitive() {
    assert_eq!(words_for("MOV R3, R7"), vec![base::opcodes::MOV_REG, 3, 7]);
}

#[test]
fn test_special_registers_and_pc_alias() {
    // ip is index 12 and pc names the same register.
    assert_eq!(words_for("MOV r0, ip"), vec![base::opcodes::MOV_REG, 0, 12]);
    assert_eq!(words_for("MOV r0, pc"), vec![base::opcodes::MOV_REG, 0, 12]);
    assert_eq!(words_for("MOV r0, sp"), vec![base::opcodes::MOV_REG, 0, 13]);
    assert_eq!(words_for("MOV r0, fp"), vec![base::opcodes::MOV_REG, 0, 14]);
    assert_eq!(words_for("MOV r0, cf"), vec![base::opcodes::MOV_REG, 0, 15]);
}

#[test]
fn test_constant_default_decimal() {
    assert_eq!(words_for("MOV r1, #42"), vec![base::opcodes::MOV_IMM, 1, 42]);
}

#[test]
fn test_constant_base_prefixes() {
    assert_eq!(words_for("MOV r1, #b101"), vec![base::opcodes::MOV_IMM, 1, 5]);
    assert_eq!(words_for("MOV r1, #o17"), vec![base::opcodes::MOV_IMM, 1, 15]);
    assert_eq!(words_for("MOV r1, #d99"), vec![base::opcodes::MOV_IMM, 1, 99]);
    assert_eq!(words_for("MOV r1, #xFF"), vec![base::opcodes::MOV_IMM, 1, 255]);
}

#[test]
fn test_negative_constant_wraps_to_width() {
    // Default words are u32; -1 wraps to the all-ones pattern.
    assert_eq!(
        words_for("MOV r1, #-1"),
        vec![base::opcodes::MOV_IMM, 1, 0xFFFF_FFFF]
    );
}

#[test]
fn test_fractional_constant_floors_on_integral_words() {
    assert_eq!(words_for("MOV r1, #3.9"), vec![base::opcodes::MOV_IMM, 1, 3]);
}

#[test]
fn test_float_constant_stores_bit_pattern() {
    let mut config = Config::default();
    config.machine.variant = Variant::Base;
    config.machine.numeric = NumericKind::F32;
    let mut ctx = TestContext::with_config_and_inputs(config, Vec::<String>::new());
    let words = ctx.compile("MOV r1, #1.5");
    assert_eq!(words, vec![base::opcodes::MOV_IMM, 1, u64::from(1.5f32.to_bits())]);
}

#[test]
fn test_character_literal_is_a_constant() {
    assert_eq!(
        words_for("MOV r1, 'A'"),
        vec![base::opcodes::MOV_IMM, 1, 65]
    );
}

#[test]
fn test_bare_numeric_is_an_address() {
    assert_eq!(words_for("LDR r1, 20"), vec![base::opcodes::LDR, 1, 20]);
    assert_eq!(words_for("LDR r1, x10"), vec![base::opcodes::LDR, 1, 16]);
}

#[test]
fn test_pointer_operand_requires_extended_table() {
    let mut ctx = TestContext::extended();
    let words = ctx.compile("LDR r1, *r2");
    assert_eq!(
        words,
        vec![microasm_core::isa::extended::opcodes::LDR_PTR, 1, 2]
    );
}

#[test]
fn test_pointer_must_name_a_register() {
    let mut ctx = TestContext::extended();
    let err = ctx.session.assemble("LDR r1, *20").unwrap_err();
    assert!(err.to_string().contains("does not name a register"));
}

#[test]
fn test_unclassifiable_operand_is_a_syntax_error() {
    let mut ctx = TestContext::base();
    let err = ctx.session.assemble("MOV r1, @@").unwrap_err();
    assert!(err.to_string().contains("operand type cannot be determined"));
}

#[test]
fn test_unclosed_character_literal() {
    let mut ctx = TestContext::base();
    let err = ctx.session.assemble("MOV r1, 'AB'").unwrap_err();
    // 'A opens a comment when not a complete literal, leaving a dangling
    // operand; either way the line fails to assemble.
    assert!(err.to_string().contains("error"), "{err}");
}

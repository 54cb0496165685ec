//! # RS Variant Tests
//!
//! Whole programs against the independent RS instruction set.

use pretty_assertions::assert_eq;

use microasm_core::config::Variant;

use crate::common::harness::TestContext;

#[test]
fn test_set_and_copy() {
    let mut ctx = TestContext::rs();
    ctx.run("SET r1, #9\nCPY r2, r1\nHLT");
    assert_eq!(ctx.reg("r1"), 9);
    assert_eq!(ctx.reg("r2"), 9);
}

#[test]
fn test_load_and_store() {
    let mut ctx = TestContext::rs();
    ctx.run("SET r1, #5\nSTO r1, 200\nLOD r2, 200\nHLT");
    assert_eq!(ctx.mem_word(200), 5);
    assert_eq!(ctx.reg("r2"), 5);
}

#[test]
fn test_two_operand_arithmetic_accumulates() {
    let mut ctx = TestContext::rs();
    ctx.run("SET r1, #10\nSET r2, #3\nADD r1, r2\nSUB r1, r2\nADD r1, r2\nHLT");
    assert_eq!(ctx.reg("r1"), 13);
}

#[test]
fn test_jnz_loop() {
    let mut ctx = TestContext::rs();
    // Sum 1..=4 by counting r1 down to zero.
    ctx.run(
        "SET r1, #4\n\
         SET r3, #1\n\
         top:\n\
         ADD r2, r1\n\
         SUB r1, r3\n\
         JNZ r1, top\n\
         HLT",
    );
    assert_eq!(ctx.reg("r2"), 10);
    assert_eq!(ctx.reg("r1"), 0);
}

#[test]
fn test_jmp_is_unconditional() {
    let mut ctx = TestContext::rs();
    // Words are u32: the HLT sits at byte 20, past the SET trap.
    ctx.run("JMP 20\nSET r1, #1\nHLT\nHLT");
    assert_eq!(ctx.reg("r1"), 0);
}

#[test]
fn test_rs_io() {
    let mut ctx = TestContext::with_inputs(Variant::Rs, ["21"]);
    ctx.run("INP r1\nADD r1, r1\nOUT r1\nHLT");
    assert_eq!(ctx.output(), "42");
}

#[test]
fn test_base_mnemonics_are_unknown_to_rs() {
    let mut ctx = TestContext::rs();
    assert!(ctx.session.assemble("MOV r1, #1").is_err());
    assert!(ctx.session.assemble("HALT").is_err());
}

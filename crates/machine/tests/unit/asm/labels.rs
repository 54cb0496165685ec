//! # Label Tests
//!
//! Label addresses, forward references and symbol resolution failures.

use pretty_assertions::assert_eq;

use microasm_core::common::AsmErrorKind;
use microasm_core::config::Config;
use microasm_core::isa::base;

use crate::common::harness::TestContext;

#[test]
fn test_backward_reference() {
    let mut ctx = TestContext::base();
    // Word width is 4 (u32); the loop label sits at byte 0.
    let words = ctx.compile("loop:\nADD r1, r1, #1\nB loop");
    assert_eq!(
        words,
        vec![base::opcodes::ADD_IMM, 1, 1, 1, base::opcodes::B_MEM, 0]
    );
    assert_eq!(ctx.session.asm().labels()["loop"], 0);
}

#[test]
fn test_forward_reference() {
    let mut ctx = TestContext::base();
    // B done is words 0..2 (8 bytes); done labels the HALT at byte 8.
    let words = ctx.compile("B done\nNULL\ndone:\nHALT");
    assert_eq!(
        words,
        vec![
            base::opcodes::B_MEM,
            8 + 4, // NULL occupies one word after the branch
            base::opcodes::NULL,
            base::opcodes::HALT
        ]
    );
}

#[test]
fn test_labels_respect_the_origin() {
    let mut config = Config::default();
    config.assembler.origin = 100;
    let mut ctx = TestContext::with_config_and_inputs(config, Vec::<String>::new());
    ctx.compile("start:\nHALT");
    assert_eq!(ctx.session.asm().labels()["start"], 100);
}

#[test]
fn test_duplicate_label_is_an_error() {
    let mut ctx = TestContext::base();
    let err = ctx.session.assemble("here:\nNULL\nhere:\nHALT").unwrap_err();
    assert_eq!(err.kind, AsmErrorKind::Symbol);
    assert!(err.to_string().contains("already defined"));
}

#[test]
fn test_unresolved_symbol_names_the_symbol() {
    let mut ctx = TestContext::base();
    let err = ctx.session.assemble("B nowhere").unwrap_err();
    assert_eq!(err.kind, AsmErrorKind::Symbol);
    assert!(err.to_string().contains("nowhere"));
}

#[test]
fn test_label_with_trailing_tokens_is_rejected() {
    let mut ctx = TestContext::base();
    assert!(ctx.session.assemble("loop: HALT").is_err());
}

#[test]
fn test_invalid_label_name_is_rejected() {
    let mut ctx = TestContext::base();
    assert!(ctx.session.assemble("3start:\nHALT").is_err());
}

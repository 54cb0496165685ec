//! # Directive and Macro Tests
//!
//! `#define`, `#skip`, `#stop`, and one-shot macro expansion.

use pretty_assertions::assert_eq;

use microasm_core::common::AsmErrorKind;
use microasm_core::isa::base;

use crate::common::harness::TestContext;

#[test]
fn test_define_substitutes_into_operands() {
    let mut ctx = TestContext::base();
    let with_macro = ctx.compile("#define answer #42\nMOV r1, answer");
    let literal = ctx.compile("MOV r1, #42");
    assert_eq!(with_macro, literal);
}

#[test]
fn test_macro_body_can_be_a_register() {
    let mut ctx = TestContext::base();
    let words = ctx.compile("#define counter r5\nMOV counter, #1");
    assert_eq!(words, vec![base::opcodes::MOV_IMM, 5, 1]);
}

#[test]
fn test_macro_expansion_is_not_recursive() {
    // A macro whose body names another macro expands exactly once; the
    // body is then classified as-is, here failing as an unknown symbol.
    let mut ctx = TestContext::base();
    let err = ctx
        .session
        .assemble("#define a b\n#define b #1\nB a")
        .unwrap_err();
    assert_eq!(err.kind, AsmErrorKind::Symbol);
}

#[test]
fn test_macro_redefinition_is_an_error() {
    let mut ctx = TestContext::base();
    let err = ctx
        .session
        .assemble("#define x #1\n#define x #2")
        .unwrap_err();
    assert_eq!(err.kind, AsmErrorKind::Symbol);
    assert!(err.to_string().contains("already defined"));
}

#[test]
fn test_skip_discards_the_next_line() {
    let mut ctx = TestContext::base();
    let words = ctx.compile("#skip\nthis is not assembly\nHALT");
    assert_eq!(words, vec![base::opcodes::HALT]);
}

#[test]
fn test_skip_only_reaches_one_line() {
    let mut ctx = TestContext::base();
    let words = ctx.compile("#skip\ndiscarded\nMOV r1, #1\nHALT");
    assert_eq!(
        words,
        vec![base::opcodes::MOV_IMM, 1, 1, base::opcodes::HALT]
    );
}

#[test]
fn test_stop_ignores_the_rest() {
    let mut ctx = TestContext::base();
    let words = ctx.compile("HALT\n#stop\nthis is not assembly\nneither is this");
    assert_eq!(words, vec![base::opcodes::HALT]);
}

#[test]
fn test_unknown_directive_is_a_syntax_error() {
    let mut ctx = TestContext::base();
    let err = ctx.session.assemble("#include lib.s").unwrap_err();
    assert_eq!(err.kind, AsmErrorKind::Syntax);
}

#[test]
fn test_define_requires_name_and_body() {
    let mut ctx = TestContext::base();
    assert!(ctx.session.assemble("#define").is_err());
    assert!(ctx.session.assemble("#define lonely").is_err());
}

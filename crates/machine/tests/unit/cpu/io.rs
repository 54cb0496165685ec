//! # Scripted I/O Tests
//!
//! The extended set's INP/OUT/OUTC against a scripted port.

use pretty_assertions::assert_eq;

use microasm_core::config::{Config, Variant};
use microasm_core::num::NumericKind;

use crate::common::harness::TestContext;

#[test]
fn test_out_renders_unsigned_decimal() {
    let mut ctx = TestContext::extended();
    ctx.run("MOV r1, #42\nOUT r1\nHALT");
    assert_eq!(ctx.output(), "42");
}

#[test]
fn test_out_renders_signed_decimal() {
    let mut config = Config::default();
    config.machine.variant = Variant::Extended;
    config.machine.numeric = NumericKind::I8;
    let mut ctx = TestContext::with_config_and_inputs(config, Vec::<String>::new());
    ctx.run("MOV r1, #-5\nOUT r1\nHALT");
    assert_eq!(ctx.output(), "-5");
}

#[test]
fn test_outc_renders_a_character() {
    let mut ctx = TestContext::extended();
    ctx.run("MOV r1, 'H'\nMOV r2, 'i'\nOUTC r1\nOUTC r2\nHALT");
    assert_eq!(ctx.output(), "Hi");
}

#[test]
fn test_inp_reads_a_number() {
    let mut ctx = TestContext::with_inputs(Variant::Extended, ["37"]);
    ctx.run("INP r1\nHALT");
    assert_eq!(ctx.reg("r1"), 37);
}

#[test]
fn test_inp_floors_fractional_input_on_integral_words() {
    let mut ctx = TestContext::with_inputs(Variant::Extended, ["3.7"]);
    ctx.run("INP r1\nHALT");
    assert_eq!(ctx.reg("r1"), 3);
}

#[test]
fn test_inp_rejects_garbage() {
    let mut ctx = TestContext::with_inputs(Variant::Extended, ["spaghetti"]);
    ctx.load("INP r1\nHALT");
    let err = ctx.session.step().unwrap_err();
    assert!(err.to_string().contains("not a number"), "{err}");
}

#[test]
fn test_inp_without_input_is_an_io_error() {
    let mut ctx = TestContext::extended();
    ctx.load("INP r1\nHALT");
    let err = ctx.session.step().unwrap_err();
    assert!(err.to_string().contains("out of input"), "{err}");
}

#[test]
fn test_echo_program() {
    let mut ctx = TestContext::with_inputs(Variant::Extended, ["5", "6"]);
    ctx.run("INP r1\nINP r2\nADD r3, r1, r2\nOUT r3\nHALT");
    assert_eq!(ctx.output(), "11");
}

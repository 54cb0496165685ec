//! # Diagnostic Rendering Tests
//!
//! Context stacks, line attribution and caret spans on assembly errors.

use pretty_assertions::assert_eq;

use microasm_core::common::{AsmError, Span};

use crate::common::harness::TestContext;

#[test]
fn test_context_is_innermost_first() {
    let err = AsmError::syntax("frag", "inner cause")
        .with_context("middle layer")
        .with_context("outer layer");
    assert_eq!(
        err.context,
        vec![
            "inner cause".to_string(),
            "middle layer".to_string(),
            "outer layer".to_string(),
        ]
    );
}

#[test]
fn test_at_line_attributes_once() {
    let err = AsmError::syntax("x", "bad")
        .at_line("MOV r1, x", 3)
        .at_line("other line", 9);
    let line = err.line.unwrap();
    assert_eq!(line.number, 3);
    assert_eq!(line.text, "MOV r1, x");
}

#[test]
fn test_span_is_located_from_the_fragment() {
    let err = AsmError::syntax("@@", "bad operand").at_line("MOV r1, @@", 1);
    assert_eq!(err.span, Some(Span::new(8, 2)));
}

#[test]
fn test_display_underlines_the_fragment() {
    let err = AsmError::syntax("@@", "operand type cannot be determined")
        .at_line("MOV r1, @@", 1);
    let rendered = err.to_string();
    assert!(rendered.contains("syntax error at line 1"), "{rendered}");
    assert!(rendered.contains("MOV r1, @@"), "{rendered}");
    // Caret under byte 8, squiggle for the second byte.
    assert!(rendered.contains("        ^~"), "{rendered}");
}

#[test]
fn test_operand_errors_name_instruction_and_position() {
    let mut ctx = TestContext::base();
    let err = ctx.session.assemble("NULL\nMOV r1, @@").unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("operand type cannot be determined"), "{rendered}");
    assert!(rendered.contains("operand 2 of `MOV`"), "{rendered}");
    assert!(rendered.contains("line 2"), "{rendered}");
}

#[test]
fn test_resolution_errors_carry_the_source_line() {
    let mut ctx = TestContext::base();
    let err = ctx.session.assemble("ADD r1, #2").unwrap_err();
    let line = err.line.clone().unwrap();
    assert_eq!(line.number, 1);
    assert_eq!(line.text, "ADD r1, #2");
}

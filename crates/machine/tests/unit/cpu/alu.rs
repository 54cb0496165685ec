//! # ALU Tests
//!
//! Wrapping integer arithmetic, division guards, shifts past the width and
//! the float paths.

use pretty_assertions::assert_eq;

use microasm_core::common::ExecErrorKind;
use microasm_core::cpu::alu::{self, flag, AluOp};
use microasm_core::num::{NumericKind, NumericType};

const U8: NumericType = NumericType::of(NumericKind::U8);
const I8: NumericType = NumericType::of(NumericKind::I8);
const U32: NumericType = NumericType::of(NumericKind::U32);
const F64: NumericType = NumericType::of(NumericKind::F64);

#[test]
fn test_add_wraps_to_width() {
    assert_eq!(alu::binary(AluOp::Add, 250, 10, U8).unwrap(), 4);
    assert_eq!(
        alu::binary(AluOp::Add, 0xFFFF_FFFF, 1, U32).unwrap(),
        0
    );
}

#[test]
fn test_sub_wraps_through_zero() {
    assert_eq!(alu::binary(AluOp::Sub, 0, 1, U8).unwrap(), 0xFF);
}

#[test]
fn test_signed_division_truncates_toward_zero() {
    let a = I8.wrap(-7i64 as u64);
    assert_eq!(I8.to_signed(alu::binary(AluOp::Div, a, 2, I8).unwrap()), -3);
}

#[test]
fn test_unsigned_division() {
    assert_eq!(alu::binary(AluOp::Div, 7, 2, U8).unwrap(), 3);
}

#[test]
fn test_division_by_zero_is_an_error() {
    let err = alu::binary(AluOp::Div, 1, 0, U32).unwrap_err();
    assert_eq!(err.kind, ExecErrorKind::DivisionByZero);
    let err = alu::binary(AluOp::Mod, 1, 0, U32).unwrap_err();
    assert_eq!(err.kind, ExecErrorKind::DivisionByZero);
}

#[test]
fn test_float_division_by_zero_is_ieee() {
    let one = F64.from_f64(1.0);
    let zero = F64.from_f64(0.0);
    let result = alu::binary(AluOp::Div, one, zero, F64).unwrap();
    assert!(F64.to_f64(result).is_infinite());
}

#[test]
fn test_exponentiation() {
    assert_eq!(alu::binary(AluOp::Exp, 2, 10, U32).unwrap(), 1024);
    // Negative exponent floors to zero under integer semantics.
    let minus_one = I8.wrap(-1i64 as u64);
    assert_eq!(alu::binary(AluOp::Exp, 2, minus_one, I8).unwrap(), 0);
}

#[test]
fn test_float_exponentiation() {
    let a = F64.from_f64(2.0);
    let b = F64.from_f64(0.5);
    let result = alu::binary(AluOp::Exp, a, b, F64).unwrap();
    assert!((F64.to_f64(result) - std::f64::consts::SQRT_2).abs() < 1e-12);
}

#[test]
fn test_bitwise_operations() {
    assert_eq!(alu::binary(AluOp::And, 0b1100, 0b1010, U8).unwrap(), 0b1000);
    assert_eq!(alu::binary(AluOp::Orr, 0b1100, 0b1010, U8).unwrap(), 0b1110);
    assert_eq!(alu::binary(AluOp::Eor, 0b1100, 0b1010, U8).unwrap(), 0b0110);
}

#[test]
fn test_shifts() {
    assert_eq!(alu::binary(AluOp::Lsl, 1, 3, U8).unwrap(), 8);
    assert_eq!(alu::binary(AluOp::Lsr, 8, 3, U8).unwrap(), 1);
}

#[test]
fn test_shift_past_width_yields_zero() {
    assert_eq!(alu::binary(AluOp::Lsl, 1, 8, U8).unwrap(), 0);
    assert_eq!(alu::binary(AluOp::Lsr, 0xFF, 9, U8).unwrap(), 0);
}

#[test]
fn test_not_wraps_to_width() {
    assert_eq!(alu::not(0, U8), 0xFF);
    assert_eq!(alu::not(0b1010, U8), 0b1111_0101);
}

#[test]
fn test_compare_produces_tri_state_flag() {
    assert_eq!(alu::compare(3, 3, U32), flag::EQUAL_TO);
    assert_eq!(alu::compare(2, 3, U32), flag::LESS_THAN);
    assert_eq!(alu::compare(4, 3, U32), flag::GREATER_THAN);
}

#[test]
fn test_compare_respects_signedness() {
    let minus_one = I8.wrap(-1i64 as u64);
    assert_eq!(alu::compare(minus_one, 1, I8), flag::LESS_THAN);
    assert_eq!(alu::compare(0xFF, 1, U8), flag::GREATER_THAN);
}

//! Arithmetic and logic semantics.
//!
//! Pure word-in/word-out operations parameterised over the active numeric
//! type. Integer kinds wrap to their width (no overflow errors); float kinds
//! operate on the IEEE-754 interpretation of the word's bits. Division and
//! modulo by zero are execution errors for integer kinds and follow IEEE
//! semantics for float kinds.

use crate::common::{ExecError, ExecErrorKind};
use crate::num::NumericType;

/// Binary ALU operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Exponentiation.
    Exp,
    /// Modulo.
    Mod,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Orr,
    /// Bitwise exclusive or.
    Eor,
    /// Logical shift left.
    Lsl,
    /// Logical shift right.
    Lsr,
}

/// Comparison outcome values stored in the compare flag register.
pub mod flag {
    /// Operands compared equal.
    pub const EQUAL_TO: u64 = 0;
    /// Left operand was less than the right.
    pub const LESS_THAN: u64 = 1;
    /// Left operand was greater than the right.
    pub const GREATER_THAN: u64 = 2;
}

/// Executes a binary operation on two words under `ty`.
pub fn binary(op: AluOp, a: u64, b: u64, ty: NumericType) -> Result<u64, ExecError> {
    if ty.integral {
        binary_int(op, a, b, ty)
    } else {
        Ok(binary_float(op, a, b, ty))
    }
}

fn binary_int(op: AluOp, a: u64, b: u64, ty: NumericType) -> Result<u64, ExecError> {
    let sa = ty.to_signed(a);
    let sb = ty.to_signed(b);
    let bits = ty.width * 8;
    let result = match op {
        AluOp::Add => sa.wrapping_add(sb) as u64,
        AluOp::Sub => sa.wrapping_sub(sb) as u64,
        AluOp::Mul => sa.wrapping_mul(sb) as u64,
        AluOp::Div => {
            if sb == 0 {
                return Err(ExecErrorKind::DivisionByZero.into());
            }
            if ty.signed {
                sa.wrapping_div(sb) as u64
            } else {
                ty.wrap(a) / ty.wrap(b)
            }
        }
        AluOp::Mod => {
            if sb == 0 {
                return Err(ExecErrorKind::DivisionByZero.into());
            }
            if ty.signed {
                sa.wrapping_rem(sb) as u64
            } else {
                ty.wrap(a) % ty.wrap(b)
            }
        }
        AluOp::Exp => {
            // Exponent is taken as a non-negative magnitude; negative
            // exponents floor to zero under integer semantics.
            if sb < 0 {
                0
            } else {
                (ty.wrap(a)).wrapping_pow(ty.wrap(b) as u32)
            }
        }
        AluOp::And => ty.wrap(a) & ty.wrap(b),
        AluOp::Orr => ty.wrap(a) | ty.wrap(b),
        AluOp::Eor => ty.wrap(a) ^ ty.wrap(b),
        AluOp::Lsl => {
            let shift = (ty.wrap(b) as u32) as usize;
            if shift >= bits {
                0
            } else {
                ty.wrap(a) << shift
            }
        }
        AluOp::Lsr => {
            let shift = (ty.wrap(b) as u32) as usize;
            if shift >= bits {
                0
            } else {
                ty.wrap(a) >> shift
            }
        }
    };
    Ok(ty.wrap(result))
}

fn binary_float(op: AluOp, a: u64, b: u64, ty: NumericType) -> u64 {
    let fa = ty.to_f64(a);
    let fb = ty.to_f64(b);
    let result = match op {
        AluOp::Add => fa + fb,
        AluOp::Sub => fa - fb,
        AluOp::Mul => fa * fb,
        AluOp::Div => fa / fb,
        AluOp::Mod => fa % fb,
        AluOp::Exp => fa.powf(fb),
        // Bitwise and shift operations act on the floored magnitudes.
        AluOp::And => return ty.from_f64(((fa.floor() as i64) & (fb.floor() as i64)) as f64),
        AluOp::Orr => return ty.from_f64(((fa.floor() as i64) | (fb.floor() as i64)) as f64),
        AluOp::Eor => return ty.from_f64(((fa.floor() as i64) ^ (fb.floor() as i64)) as f64),
        AluOp::Lsl => return ty.from_f64(((fa.floor() as i64) << (fb.floor() as u32 & 63)) as f64),
        AluOp::Lsr => return ty.from_f64(((fa.floor() as u64) >> (fb.floor() as u32 & 63)) as f64),
    };
    ty.from_f64(result)
}

/// Bitwise complement of a word (MVN).
#[inline]
pub fn not(a: u64, ty: NumericType) -> u64 {
    ty.wrap(!a)
}

/// Compares two words under `ty`, producing a tri-state flag value.
pub fn compare(a: u64, b: u64, ty: NumericType) -> u64 {
    match ty.compare(a, b) {
        std::cmp::Ordering::Equal => flag::EQUAL_TO,
        std::cmp::Ordering::Less => flag::LESS_THAN,
        std::cmp::Ordering::Greater => flag::GREATER_THAN,
    }
}

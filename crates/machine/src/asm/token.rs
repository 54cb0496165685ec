//! Operand tokenization.
//!
//! Classifies one operand string into its kind and numeric value, in the
//! fixed priority order: macro expansion (one non-recursive substitution),
//! pointer, constant, character literal, register, bare numeric (address),
//! symbol. Anything else is a syntax error.

use std::collections::HashMap;

use crate::common::AsmError;
use crate::cpu::registers;
use crate::isa::OperandKind;
use crate::num::NumericType;

/// One parsed operand: kind, original text and numeric value.
///
/// For a register the value is its index; for a register pointer it is the
/// pointed-to register's index; for constants and addresses it is the
/// encoded word. A symbol's value stays zero until pass 2 resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Operand kind.
    pub kind: OperandKind,
    /// Text the token was parsed from (post macro expansion).
    pub text: String,
    /// Numeric value as a word.
    pub value: u64,
}

impl Token {
    fn new(kind: OperandKind, text: impl Into<String>, value: u64) -> Self {
        Self {
            kind,
            text: text.into(),
            value,
        }
    }
}

/// Whether `text` matches the symbol grammar: letters, digits and
/// underscores, not digit-initial.
pub fn is_symbol(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A parsed numeric literal before width conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Literal {
    Int(i128),
    Float(f64),
}

impl Literal {
    /// Converts the literal into a word of the given kind. Integer kinds
    /// floor fractional values and wrap to their width.
    fn to_word(self, numeric: NumericType) -> u64 {
        match self {
            Literal::Int(value) => {
                if numeric.integral {
                    numeric.wrap(value as u64)
                } else {
                    numeric.from_f64(value as f64)
                }
            }
            Literal::Float(value) => numeric.from_f64(value),
        }
    }
}

/// Parses a numeric literal with an optional one-letter base prefix
/// (`b` binary, `o` octal, `d` decimal, `x` hex; default decimal) and an
/// optional leading minus for decimal.
fn parse_literal(text: &str) -> Option<Literal> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if body.is_empty() || !body.is_char_boundary(1) {
        return None;
    }

    let (radix, digits) = match body.split_at(1) {
        ("b", rest) if !rest.is_empty() => (2, rest),
        ("o", rest) if !rest.is_empty() => (8, rest),
        ("d", rest) if !rest.is_empty() => (10, rest),
        ("x", rest) if !rest.is_empty() => (16, rest),
        _ => (10, body),
    };

    if radix == 10 && digits.contains('.') {
        let value: f64 = digits.parse().ok()?;
        return Some(Literal::Float(if negative { -value } else { value }));
    }
    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    Some(Literal::Int(if negative { -magnitude } else { magnitude }))
}

/// Classifies one operand string.
///
/// `macros` supplies `#define` substitutions; each operand is expanded at
/// most once and the substitution is not itself expanded again.
pub fn classify(
    raw: &str,
    numeric: NumericType,
    macros: &HashMap<String, String>,
) -> Result<Token, AsmError> {
    if let Some(body) = macros.get(raw) {
        let expanded = body.trim().to_string();
        return classify_expanded(&expanded, numeric);
    }
    classify_expanded(raw, numeric)
}

fn classify_expanded(raw: &str, numeric: NumericType) -> Result<Token, AsmError> {
    if let Some(inner) = raw.strip_prefix('*') {
        let index = registers::lookup(inner).ok_or_else(|| {
            AsmError::syntax(raw, format!("`{inner}` after `*` does not name a register"))
        })?;
        return Ok(Token::new(OperandKind::RegisterPtr, raw, index as u64));
    }

    if let Some(body) = raw.strip_prefix('#') {
        let literal = parse_literal(body).ok_or_else(|| {
            AsmError::syntax(raw, format!("`{body}` is not a valid constant literal"))
        })?;
        return Ok(Token::new(
            OperandKind::Constant,
            raw,
            literal.to_word(numeric),
        ));
    }

    if raw.starts_with('\'') {
        let mut chars = raw.chars();
        let _quote = chars.next();
        return match (chars.next(), chars.next(), chars.next()) {
            (Some(c), Some('\''), None) => Ok(Token::new(
                OperandKind::Constant,
                raw,
                numeric.wrap(u64::from(u32::from(c))),
            )),
            _ => Err(AsmError::syntax(raw, "unclosed character literal")),
        };
    }

    if let Some(index) = registers::lookup(raw) {
        return Ok(Token::new(OperandKind::Register, raw, index as u64));
    }

    if let Some(literal) = parse_literal(raw) {
        return Ok(Token::new(
            OperandKind::Address,
            raw,
            literal.to_word(numeric),
        ));
    }

    if is_symbol(raw) {
        return Ok(Token::new(OperandKind::Symbol, raw, 0));
    }

    Err(AsmError::syntax(raw, "operand type cannot be determined"))
}

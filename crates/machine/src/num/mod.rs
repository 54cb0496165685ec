//! Fixed-width numeric kinds.
//!
//! This module defines the numeric kinds a machine can be configured with and
//! everything the rest of the core needs from them:
//! 1. **Registry:** The ten fixed-width kinds (8/16/32/64-bit signed and
//!    unsigned integers, 32/64-bit floats), built once and immutable.
//! 2. **Encoding:** Little-endian encode/decode between a word and its byte
//!    sequence; integers wrap to their width, floats use IEEE-754 bit patterns.
//! 3. **Formatting:** Base-N rendering of a word, one byte at a time.
//!
//! A word is carried everywhere as a `u64` bit pattern masked to the kind's
//! width; the kind decides how those bits are interpreted.

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;

/// Identity of a fixed-width numeric kind.
///
/// Kinds are shared by identity; a `NumericType` never carries per-instance
/// mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericKind {
    /// Unsigned 8-bit integer.
    U8,
    /// Signed 8-bit integer.
    I8,
    /// Unsigned 16-bit integer.
    U16,
    /// Signed 16-bit integer.
    I16,
    /// Unsigned 32-bit integer.
    U32,
    /// Signed 32-bit integer.
    I32,
    /// Unsigned 64-bit integer.
    U64,
    /// Signed 64-bit integer.
    I64,
    /// IEEE-754 single-precision float.
    F32,
    /// IEEE-754 double-precision float.
    F64,
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumericKind::U8 => "u8",
            NumericKind::I8 => "i8",
            NumericKind::U16 => "u16",
            NumericKind::I16 => "i16",
            NumericKind::U32 => "u32",
            NumericKind::I32 => "i32",
            NumericKind::U64 => "u64",
            NumericKind::I64 => "i64",
            NumericKind::F32 => "f32",
            NumericKind::F64 => "f64",
        };
        write!(f, "{name}")
    }
}

/// Immutable description of one numeric kind: identity, byte width and
/// interpretation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericType {
    /// Kind identity.
    pub kind: NumericKind,
    /// Storage width in bytes.
    pub width: usize,
    /// True for integer kinds, false for floats.
    pub integral: bool,
    /// True when the integer interpretation is signed (floats: true).
    pub signed: bool,
}

/// All registered kinds, in width order.
pub const ALL: [NumericType; 10] = [
    NumericType::of(NumericKind::U8),
    NumericType::of(NumericKind::I8),
    NumericType::of(NumericKind::U16),
    NumericType::of(NumericKind::I16),
    NumericType::of(NumericKind::U32),
    NumericType::of(NumericKind::I32),
    NumericType::of(NumericKind::U64),
    NumericType::of(NumericKind::I64),
    NumericType::of(NumericKind::F32),
    NumericType::of(NumericKind::F64),
];

impl NumericType {
    /// Looks up the registered description of a kind.
    #[inline]
    pub const fn of(kind: NumericKind) -> Self {
        let (width, integral, signed) = match kind {
            NumericKind::U8 => (1, true, false),
            NumericKind::I8 => (1, true, true),
            NumericKind::U16 => (2, true, false),
            NumericKind::I16 => (2, true, true),
            NumericKind::U32 => (4, true, false),
            NumericKind::I32 => (4, true, true),
            NumericKind::U64 => (8, true, false),
            NumericKind::I64 => (8, true, true),
            NumericKind::F32 => (4, false, true),
            NumericKind::F64 => (8, false, true),
        };
        Self {
            kind,
            width,
            integral,
            signed,
        }
    }

    /// Bit mask selecting the kind's width out of a `u64` carrier.
    #[inline]
    pub const fn mask(&self) -> u64 {
        if self.width >= 8 {
            u64::MAX
        } else {
            (1u64 << (self.width * 8)) - 1
        }
    }

    /// Wraps a carrier value to the kind's width. This is the only overflow
    /// behaviour integer kinds have; no arithmetic raises on overflow.
    #[inline]
    pub const fn wrap(&self, word: u64) -> u64 {
        word & self.mask()
    }

    /// Encodes a word as its little-endian byte sequence of exactly
    /// [`width`](Self::width) bytes.
    pub fn encode(&self, word: u64) -> Vec<u8> {
        word.to_le_bytes()[..self.width].to_vec()
    }

    /// Encodes a word into a caller-owned buffer.
    pub fn encode_into(&self, word: u64, out: &mut Vec<u8>) {
        out.extend_from_slice(&word.to_le_bytes()[..self.width]);
    }

    /// Decodes a word from the first [`width`](Self::width) bytes of `bytes`.
    ///
    /// Returns `None` when fewer bytes are available.
    pub fn decode(&self, bytes: &[u8]) -> Option<u64> {
        if bytes.len() < self.width {
            return None;
        }
        let mut buf = [0u8; 8];
        buf[..self.width].copy_from_slice(&bytes[..self.width]);
        Some(u64::from_le_bytes(buf))
    }

    /// Sign-extends a word from the kind's width into an `i64`.
    ///
    /// Unsigned kinds zero-extend. Float kinds return the raw bits.
    #[inline]
    pub fn to_signed(&self, word: u64) -> i64 {
        let word = self.wrap(word);
        if self.signed && self.integral && self.width < 8 {
            let shift = 64 - self.width * 8;
            ((word << shift) as i64) >> shift
        } else {
            word as i64
        }
    }

    /// Converts a word to the `f64` it denotes under this kind.
    pub fn to_f64(&self, word: u64) -> f64 {
        match self.kind {
            NumericKind::F32 => f64::from(f32::from_bits(self.wrap(word) as u32)),
            NumericKind::F64 => f64::from_bits(word),
            _ if self.signed => self.to_signed(word) as f64,
            _ => self.wrap(word) as f64,
        }
    }

    /// Converts a numeric value into a word of this kind.
    ///
    /// Integer kinds floor the value and wrap it to their width; float kinds
    /// store the IEEE-754 bit pattern.
    pub fn from_f64(&self, value: f64) -> u64 {
        match self.kind {
            NumericKind::F32 => u64::from((value as f32).to_bits()),
            NumericKind::F64 => value.to_bits(),
            _ => {
                let floored = value.floor();
                // Negative values wrap through the signed representation.
                self.wrap(floored as i64 as u64)
            }
        }
    }

    /// Compares two words under this kind's interpretation.
    pub fn compare(&self, a: u64, b: u64) -> Ordering {
        if !self.integral {
            return self
                .to_f64(a)
                .partial_cmp(&self.to_f64(b))
                .unwrap_or(Ordering::Equal);
        }
        if self.signed {
            self.to_signed(a).cmp(&self.to_signed(b))
        } else {
            self.wrap(a).cmp(&self.wrap(b))
        }
    }

    /// Renders a word in base `base`, one byte at a time.
    ///
    /// Each byte is converted independently, zero-padded to the digit count
    /// of `255` in that base, and concatenated most significant byte first.
    /// The display is per-byte, so the whole number is never converted in
    /// one pass. Recognised bases are 2, 8, 10 and 16; any other value
    /// falls back to decimal rendering.
    pub fn format_base(&self, word: u64, base: u32) -> String {
        let digits = byte_digits(base);
        let bytes = &self.wrap(word).to_le_bytes()[..self.width];
        let mut out = String::with_capacity(self.width * digits);
        for byte in bytes.iter().rev() {
            out.push_str(&format_byte(*byte, base, digits));
        }
        out
    }
}

/// Digits needed to render `255` in the given base.
fn byte_digits(base: u32) -> usize {
    match base {
        2 => 8,
        8 => 3,
        16 => 2,
        _ => 3,
    }
}

/// Renders one byte in the given base, zero-padded to `digits`.
fn format_byte(byte: u8, base: u32, digits: usize) -> String {
    let rendered = match base {
        2 => format!("{byte:b}"),
        8 => format!("{byte:o}"),
        16 => format!("{byte:X}"),
        _ => format!("{byte}"),
    };
    format!("{rendered:0>digits$}")
}

//! Error taxonomy for the assembler and execution engine.
//!
//! This module defines every error surface of the core. It provides:
//! 1. **Configuration Errors:** Fatal construction failures (duplicate opcodes, bad unions).
//! 2. **Assembly Diagnostics:** Syntax/symbol/decode errors attributed to a source line,
//!    carrying a byte span and an ordered context stack built while unwinding.
//! 3. **Execution Errors:** Per-cycle failures (illegal instruction, bad access, bad frame).
//!
//! Context stacks are appended immutably (`with_context` consumes and returns) rather than
//! mutated in place; the innermost cause is always first in the list.

use std::fmt;

use thiserror::Error;

/// Fatal configuration error raised once, at build time, never at use time.
///
/// Instruction-set tables and CPU instances validate their inputs on
/// construction; any violation is non-recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two table entries share a numeric opcode.
    #[error("duplicate opcode {opcode:#04x} ({first} and {second})")]
    DuplicateOpcode {
        /// The colliding opcode value.
        opcode: u64,
        /// Mnemonic of the entry registered first.
        first: String,
        /// Mnemonic of the entry that collides with it.
        second: String,
    },

    /// A table union would merge two entries with the same opcode.
    #[error("table union collision on opcode {opcode:#04x} ({mnemonic})")]
    UnionCollision {
        /// The colliding opcode value.
        opcode: u64,
        /// Mnemonic of the colliding extension entry.
        mnemonic: String,
    },

    /// The configured memory size cannot hold a single word.
    #[error("memory of {words} words is too small for a program")]
    MemoryTooSmall {
        /// Configured word count.
        words: usize,
    },

    /// The configured origin lies outside the configured memory.
    #[error("origin {origin:#x} is outside memory of {capacity} bytes")]
    OriginOutOfRange {
        /// Configured origin byte address.
        origin: u64,
        /// Memory capacity in bytes.
        capacity: usize,
    },
}

/// Byte span inside one source line, sufficient to underline the offending
/// substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the fragment within its line.
    pub offset: usize,
    /// Byte length of the fragment.
    pub len: usize,
}

impl Span {
    /// Creates a span covering `len` bytes starting at `offset`.
    #[inline]
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }
}

/// The source line an assembly diagnostic is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Full original text of the line.
    pub text: String,
    /// 1-based line number.
    pub number: usize,
}

/// Category of an assembly diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsmErrorKind {
    /// Malformed operand, unknown directive, invalid label, unclosed literal.
    Syntax,
    /// Macro/label redefinition or an unresolved reference.
    Symbol,
    /// Unknown opcode or truncated operand stream during decompilation.
    Decode,
}

impl fmt::Display for AsmErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmErrorKind::Syntax => write!(f, "syntax error"),
            AsmErrorKind::Symbol => write!(f, "symbol error"),
            AsmErrorKind::Decode => write!(f, "decode error"),
        }
    }
}

/// Assembly diagnostic: the primary user-visible error of the tool.
///
/// Carries the offending fragment, the full source line with its 1-based
/// number, a byte span for underlining, and an ordered context stack
/// (innermost cause first) accumulated as the error unwinds through the
/// operand → instruction → line layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmError {
    /// Diagnostic category.
    pub kind: AsmErrorKind,
    /// Offending source fragment.
    pub fragment: String,
    /// Ordered context lines, innermost first.
    pub context: Vec<String>,
    /// Source line attribution, if known at this point of unwinding.
    pub line: Option<SourceLine>,
    /// Span of the fragment within the attributed line.
    pub span: Option<Span>,
}

impl AsmError {
    /// Creates a syntax error for the given fragment with one initial
    /// context line.
    pub fn syntax(fragment: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(AsmErrorKind::Syntax, fragment, message)
    }

    /// Creates a symbol error for the given fragment with one initial
    /// context line.
    pub fn symbol(fragment: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(AsmErrorKind::Symbol, fragment, message)
    }

    /// Creates a decode error with one initial context line.
    pub fn decode(fragment: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(AsmErrorKind::Decode, fragment, message)
    }

    fn new(kind: AsmErrorKind, fragment: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            fragment: fragment.into(),
            context: vec![message.into()],
            line: None,
            span: None,
        }
    }

    /// Appends one outer context line; the innermost cause stays first.
    #[must_use]
    pub fn with_context(mut self, message: impl Into<String>) -> Self {
        self.context.push(message.into());
        self
    }

    /// Attributes the error to a source line if it is not already attributed.
    #[must_use]
    pub fn at_line(mut self, text: &str, number: usize) -> Self {
        if self.line.is_none() {
            self.line = Some(SourceLine {
                text: text.to_string(),
                number,
            });
            if self.span.is_none() {
                self.span = locate(text, &self.fragment);
            }
        }
        self
    }

    /// Overrides the underline span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// Finds the span of `fragment` within `line`, if it occurs.
fn locate(line: &str, fragment: &str) -> Option<Span> {
    if fragment.is_empty() {
        return None;
    }
    line.find(fragment).map(|offset| Span::new(offset, fragment.len()))
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.line {
            Some(line) => write!(f, "{} at line {}:", self.kind, line.number)?,
            None => write!(f, "{}:", self.kind)?,
        }
        for message in &self.context {
            write!(f, "\n  {message}")?;
        }
        if let Some(line) = &self.line {
            write!(f, "\n{}", line.text)?;
            if let Some(span) = self.span {
                let pad: String = " ".repeat(span.offset);
                let squiggle: String = "~".repeat(span.len.saturating_sub(1));
                write!(f, "\n{pad}^{squiggle}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for AsmError {}

/// Category of an execution-time failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecErrorKind {
    /// Opcode unrecognised by the entire dispatch chain.
    #[error("illegal instruction {opcode:#04x}")]
    IllegalInstruction {
        /// The unrecognised opcode word.
        opcode: u64,
    },

    /// Memory access outside the configured capacity.
    #[error(transparent)]
    Memory(#[from] MemoryError),

    /// Register index outside the register file.
    #[error("register index {index} out of range (file holds {count})")]
    BadRegister {
        /// Requested index.
        index: usize,
        /// Register file size.
        count: usize,
    },

    /// Integer division or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Frame unwind found an impossible frame record.
    #[error("malformed stack frame: {reason}")]
    MalformedFrame {
        /// What the unwinder found.
        reason: String,
    },

    /// The I/O port failed or returned something unusable.
    #[error("i/o error: {reason}")]
    Io {
        /// What went wrong at the port.
        reason: String,
    },

    /// Execution hit the driver-imposed cycle cap without halting.
    #[error("cycle cap of {cap} reached without HALT")]
    CycleCap {
        /// The configured cap.
        cap: u64,
    },
}

/// Execution error: aborts the current cycle only.
///
/// Partial mutations already applied before the error are not rolled back;
/// the caller decides whether to continue against the mutated state.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecError {
    /// Failure category.
    pub kind: ExecErrorKind,
    /// Ordered context lines, innermost first.
    pub context: Vec<String>,
}

impl ExecError {
    /// Wraps a failure kind with an empty context stack.
    pub fn new(kind: ExecErrorKind) -> Self {
        Self {
            kind,
            context: Vec::new(),
        }
    }

    /// Appends one outer context line; the innermost cause stays first.
    #[must_use]
    pub fn with_context(mut self, message: impl Into<String>) -> Self {
        self.context.push(message.into());
        self
    }
}

impl From<ExecErrorKind> for ExecError {
    fn from(kind: ExecErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<MemoryError> for ExecError {
    fn from(err: MemoryError) -> Self {
        Self::new(ExecErrorKind::Memory(err))
    }
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "execution error: {}", self.kind)?;
        for message in &self.context {
            write!(f, "\n  {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ExecError {}

/// Out-of-range memory access.
///
/// Bulk operations validate their whole span before touching anything, so a
/// failed bulk access has no partial effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("access of {len} byte(s) at {addr:#x} exceeds memory capacity {capacity:#x}")]
pub struct MemoryError {
    /// Start byte address of the failed access.
    pub addr: u64,
    /// Length of the failed access in bytes.
    pub len: usize,
    /// Capacity of the memory in bytes.
    pub capacity: usize,
}

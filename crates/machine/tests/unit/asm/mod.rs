//! Unit tests for the two-way assembler.


/// Diagnostic rendering: context order, line attribution, spans.
pub mod diagnostics;


/// Directives and macros.
pub mod directives;

/// Label definition and resolution.
pub mod labels;

/// Operand classification and literal parsing.
pub mod operands;

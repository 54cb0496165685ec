//! Common types shared by the assembler and the execution engine.
//!
//! This module provides the fundamental building blocks used across the core:
//! 1. **Error Handling:** The full diagnostic taxonomy (configuration, assembly,
//!    execution, memory) with ordered context stacks and byte spans.

/// Error types and diagnostic structures.
pub mod error;

pub use error::{
    AsmError, AsmErrorKind, ConfigError, ExecError, ExecErrorKind, MemoryError, SourceLine, Span,
};

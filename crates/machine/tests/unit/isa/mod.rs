//! Unit tests for instruction tables.


/// Mnemonic and signature resolution.
pub mod resolve;

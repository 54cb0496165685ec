//! Instruction table construction and lookup.
//!
//! Tables are built once and immutable thereafter. Construction validates
//! opcode uniqueness across all entries; a collision is a fatal
//! [`ConfigError`] raised at build time, never at use time.

use std::collections::HashMap;

use crate::common::{AsmError, ConfigError};
use crate::isa::{Descriptor, OperandKind};

/// Immutable map from opcode to instruction descriptor, with mnemonic +
/// signature resolution for the assembler.
///
/// Entries keep their declaration order; overload resolution scans in that
/// order and the first exact positional match wins.
#[derive(Debug, Clone)]
pub struct InstructionTable {
    entries: Vec<Descriptor>,
    by_opcode: HashMap<u64, usize>,
}

impl InstructionTable {
    /// Builds a table, validating opcode uniqueness.
    pub fn new(entries: &[Descriptor]) -> Result<Self, ConfigError> {
        let mut by_opcode = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if let Some(&previous) = by_opcode.get(&entry.opcode) {
                let first: &Descriptor = &entries[previous];
                return Err(ConfigError::DuplicateOpcode {
                    opcode: entry.opcode,
                    first: first.mnemonic.to_string(),
                    second: entry.mnemonic.to_string(),
                });
            }
            let _previous = by_opcode.insert(entry.opcode, index);
        }
        Ok(Self {
            entries: entries.to_vec(),
            by_opcode,
        })
    }

    /// Produces an extended table: this table's entries plus `extra`, in that
    /// order. Any opcode collision during the union is fatal.
    pub fn union(&self, extra: &[Descriptor]) -> Result<Self, ConfigError> {
        for entry in extra {
            if self.by_opcode.contains_key(&entry.opcode) {
                return Err(ConfigError::UnionCollision {
                    opcode: entry.opcode,
                    mnemonic: entry.mnemonic.to_string(),
                });
            }
        }
        let mut combined = self.entries.clone();
        combined.extend_from_slice(extra);
        Self::new(&combined)
    }

    /// Looks up the descriptor for a numeric opcode. Serves execution and
    /// decompilation.
    #[inline]
    pub fn by_opcode(&self, opcode: u64) -> Option<&Descriptor> {
        self.by_opcode.get(&opcode).map(|&index| &self.entries[index])
    }

    /// Resolves a mnemonic plus parsed operand kinds to a descriptor.
    ///
    /// Scans entries in declaration order; the first whose mnemonic matches
    /// (case-insensitively) and whose signature positionally equals the
    /// parsed kinds wins. No widening, no coercion. When no overload
    /// matches, the error enumerates every overload's expected signature
    /// against the attempted one.
    pub fn resolve(&self, mnemonic: &str, kinds: &[OperandKind]) -> Result<&Descriptor, AsmError> {
        let mut candidates = Vec::new();
        for entry in &self.entries {
            if !entry.mnemonic.eq_ignore_ascii_case(mnemonic) {
                continue;
            }
            if entry.operands.len() == kinds.len()
                && kinds
                    .iter()
                    .zip(entry.operands)
                    .all(|(kind, slot)| kind.matches(*slot))
            {
                return Ok(entry);
            }
            candidates.push(entry.signature());
        }

        let attempted: Vec<String> = kinds.iter().map(ToString::to_string).collect();
        let attempted = if attempted.is_empty() {
            mnemonic.to_uppercase()
        } else {
            format!("{} {}", mnemonic.to_uppercase(), attempted.join(", "))
        };
        let message = if candidates.is_empty() {
            format!("unknown mnemonic in `{attempted}`")
        } else {
            format!(
                "no overload of {} matches `{attempted}`; expected one of: {}",
                mnemonic.to_uppercase(),
                candidates.join("; "),
            )
        };
        Err(AsmError::syntax(mnemonic, message))
    }

    /// Whether any entry carries this mnemonic.
    pub fn knows_mnemonic(&self, mnemonic: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.mnemonic.eq_ignore_ascii_case(mnemonic))
    }

    /// All entries, in declaration order.
    pub fn entries(&self) -> &[Descriptor] {
        &self.entries
    }
}

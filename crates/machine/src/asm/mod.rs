//! ## 3. Two-Way Assembler
//!
//! Translates between assembly text and machine code in both directions.
//!
//! Compilation runs in three passes over the source:
//!   1. Scan: strip comments, apply directives, classify each surviving
//!      line as a label or an instruction and tokenize its operands.
//!   2. Resolve: assign each label its byte address and patch every symbol
//!      operand, rejecting duplicates and unresolved references.
//!   3. Emit: lay out one word per opcode and one word per operand.
//!
//! Decompilation walks a word stream back into mnemonic lines and can
//! substitute synthetic labels for branch targets that land on an
//! instruction boundary.

mod disasm;
mod emit;
mod line;
mod resolve;
mod token;

use std::collections::HashMap;
use std::sync::Arc;

use crate::common::{AsmError, SourceLine};
use crate::config::Config;
use crate::isa::{self, InstructionTable, OperandKind};
use crate::num::NumericType;

pub use token::Token;

/// One line of the parsed program.
#[derive(Debug, Clone)]
pub enum Line {
    /// An instruction with its resolved opcode and tokenized operands.
    Instruction {
        opcode: u64,
        mnemonic: &'static str,
        operands: Vec<Token>,
        source: SourceLine,
    },
    /// A label definition.
    Label { name: String, source: SourceLine },
}

/// Mnemonic spellings accepted as aliases for a canonical mnemonic.
const ALIASES: &[(&str, &str)] = &[("NOP", "NULL")];

/// The two-way assembler for one configured machine.
pub struct Assembler {
    table: Arc<InstructionTable>,
    numeric: NumericType,
    origin: u64,
    label_substitution: bool,
    labelled_branches: &'static [u64],
    source: String,
    ast: Vec<Line>,
    labels: HashMap<String, u64>,
    macros: HashMap<String, String>,
    words: Vec<u64>,
}

impl Assembler {
    /// Builds an assembler over the given instruction table, configured by
    /// `config` for numeric width, origin and decompiler behavior.
    pub fn new(table: Arc<InstructionTable>, config: &Config) -> Self {
        let labelled_branches = match config.machine.variant {
            crate::config::Variant::Rs => isa::rs::LABELLED_BRANCHES,
            _ => isa::base::LABELLED_BRANCHES,
        };
        Self {
            table,
            numeric: NumericType::of(config.machine.numeric),
            origin: config.assembler.origin,
            label_substitution: config.assembler.label_substitution,
            labelled_branches,
            source: String::new(),
            ast: Vec::new(),
            labels: HashMap::new(),
            macros: HashMap::new(),
            words: Vec::new(),
        }
    }

    /// Replaces the source text; any previous parse is discarded.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.ast.clear();
        self.labels.clear();
        self.macros.clear();
        self.words.clear();
    }

    /// The current source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Runs all three compilation passes over the current source.
    pub fn parse(&mut self) -> Result<(), AsmError> {
        self.ast.clear();
        self.labels.clear();
        self.macros.clear();
        self.words.clear();

        self.scan()?;
        self.labels = resolve::resolve(&mut self.ast, self.origin, self.numeric.width)?;
        self.words = emit::emit(&self.ast);
        tracing::debug!(
            lines = self.ast.len(),
            words = self.words.len(),
            "program assembled"
        );
        Ok(())
    }

    /// Pass 1: comment stripping, directives, classification, tokenization.
    fn scan(&mut self) -> Result<(), AsmError> {
        let source = std::mem::take(&mut self.source);
        let result = self.scan_lines(&source);
        self.source = source;
        result
    }

    fn scan_lines(&mut self, source: &str) -> Result<(), AsmError> {
        let mut lines = source.lines().enumerate();
        while let Some((index, raw)) = lines.next() {
            let text = line::strip_comment(raw).trim();
            if text.is_empty() {
                continue;
            }
            let source_line = SourceLine {
                text: raw.to_string(),
                number: index + 1,
            };

            if text.starts_with('#') {
                let directive = line::parse_directive(text)
                    .map_err(|e| e.at_line(&source_line.text, source_line.number))?;
                match directive {
                    line::Directive::Stop => break,
                    line::Directive::Skip => {
                        // Discards the next physical line, whatever it holds.
                        lines.next();
                        continue;
                    }
                    line::Directive::Define { name, body } => {
                        self.define_macro(name, body, source_line)?;
                        continue;
                    }
                }
            }

            if let Some(name) = text.strip_suffix(':') {
                let name = name.trim();
                if !token::is_symbol(name) {
                    return Err(AsmError::syntax(
                        name,
                        format!("`{name}` is not a valid label name"),
                    )
                    .at_line(&source_line.text, source_line.number));
                }
                self.ast.push(Line::Label {
                    name: name.to_string(),
                    source: source_line,
                });
                continue;
            }

            self.scan_instruction(text, source_line)?;
        }
        Ok(())
    }

    fn define_macro(
        &mut self,
        name: String,
        body: String,
        source: SourceLine,
    ) -> Result<(), AsmError> {
        if !token::is_symbol(&name) {
            return Err(
                AsmError::syntax(&name, format!("`{name}` is not a valid macro name"))
                    .at_line(&source.text, source.number),
            );
        }
        if self.macros.insert(name.clone(), body).is_some() {
            return Err(
                AsmError::symbol(&name, format!("macro `{name}` is already defined"))
                    .at_line(&source.text, source.number),
            );
        }
        Ok(())
    }

    fn scan_instruction(&mut self, text: &str, source: SourceLine) -> Result<(), AsmError> {
        let (head, rest) = match text.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest),
            None => (text, ""),
        };
        let mnemonic = ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(head))
            .map_or(head, |(_, canonical)| *canonical);
        if !self.table.knows_mnemonic(mnemonic) {
            return Err(AsmError::syntax(
                head,
                format!("`{head}` is not a known mnemonic"),
            )
            .at_line(&source.text, source.number));
        }

        let fields = line::split_operands(rest);
        let mut operands = Vec::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            if field.is_empty() {
                return Err(AsmError::syntax(
                    text,
                    format!("operand {} of `{mnemonic}` is empty", position + 1),
                )
                .at_line(&source.text, source.number));
            }
            let tok = token::classify(field, self.numeric, &self.macros)
                .map_err(|e| {
                    e.with_context(format!(
                        "while parsing operand {} of `{mnemonic}`",
                        position + 1
                    ))
                    .at_line(&source.text, source.number)
                })?;
            operands.push(tok);
        }

        let kinds: Vec<OperandKind> = operands.iter().map(|t| t.kind).collect();
        let descriptor = self
            .table
            .resolve(mnemonic, &kinds)
            .map_err(|e| e.at_line(&source.text, source.number))?;
        self.ast.push(Line::Instruction {
            opcode: descriptor.opcode,
            mnemonic: descriptor.mnemonic,
            operands,
            source,
        });
        Ok(())
    }

    /// The assembled program as words, empty before a successful `parse`.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// The assembled program encoded to bytes at the active numeric width.
    pub fn machine_code(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.words.len() * self.numeric.width);
        for &word in &self.words {
            self.numeric.encode_into(word, &mut bytes);
        }
        bytes
    }

    /// Label table from the last parse, names to byte addresses.
    pub fn labels(&self) -> &HashMap<String, u64> {
        &self.labels
    }

    /// Macro table from the last parse.
    pub fn macros(&self) -> &HashMap<String, String> {
        &self.macros
    }

    /// Byte address the program is assembled to load at.
    pub fn origin(&self) -> u64 {
        self.origin
    }

    /// Parsed program lines from the last parse.
    pub fn lines(&self) -> &[Line] {
        &self.ast
    }
}

impl std::fmt::Debug for Assembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assembler")
            .field("numeric", &self.numeric)
            .field("origin", &self.origin)
            .field("lines", &self.ast.len())
            .field("words", &self.words.len())
            .finish_non_exhaustive()
    }
}

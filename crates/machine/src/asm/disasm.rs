//! Decompilation: machine code back to assembly text.

use std::collections::HashMap;

use crate::asm::Assembler;
use crate::common::AsmError;
use crate::cpu::registers;
use crate::isa::OperandKind;

/// One decoded instruction awaiting rendering.
struct Decoded {
    /// Word index of the opcode within the stream.
    position: usize,
    mnemonic: &'static str,
    operands: Vec<String>,
    /// Operand slots holding a branch target, with the target address.
    targets: Vec<(usize, u64)>,
}

impl Assembler {
    /// Decompiles a byte stream into assembly text.
    ///
    /// Each opcode word is resolved through the instruction table and its
    /// operand words are rendered by declared kind: registers by name,
    /// pointers as `*name`, constants as `#` plus their unsigned value,
    /// addresses as bare decimal. With label substitution on, branch targets
    /// that land on an instruction boundary are replaced by synthetic labels
    /// and matching label lines are inserted; targets that land mid-stream
    /// stay numeric.
    pub fn de_assemble(&self, bytes: &[u8]) -> Result<String, AsmError> {
        let width = self.numeric.width;
        if bytes.len() % width != 0 {
            return Err(AsmError::decode(
                format!("{} byte(s)", bytes.len()),
                format!(
                    "stream of {} byte(s) is not a whole number of {width}-byte words",
                    bytes.len()
                ),
            ));
        }
        let words: Vec<u64> = bytes
            .chunks_exact(width)
            .filter_map(|chunk| self.numeric.decode(chunk))
            .collect();

        let mut decoded = Vec::new();
        let mut index = 0;
        while index < words.len() {
            let opcode = words[index];
            let descriptor = self.table.by_opcode(opcode).ok_or_else(|| {
                AsmError::decode(
                    format!("{opcode:#04x}"),
                    format!("{opcode:#04x} is not an opcode of this instruction set"),
                )
                .with_context(format!("at word {index} of the stream"))
            })?;

            let available = words.len() - index - 1;
            if available < descriptor.operands.len() {
                return Err(AsmError::decode(
                    descriptor.mnemonic,
                    format!(
                        "{} expects {} operand word(s) but only {available} remain",
                        descriptor.mnemonic,
                        descriptor.operands.len(),
                    ),
                )
                .with_context(format!("at word {index} of the stream")));
            }

            let labelled = self.labelled_branches.contains(&opcode);
            let mut operands = Vec::with_capacity(descriptor.operands.len());
            let mut targets = Vec::new();
            for (slot, &kind) in descriptor.operands.iter().enumerate() {
                let word = words[index + 1 + slot];
                if labelled && kind == OperandKind::Address {
                    targets.push((slot, word));
                }
                operands.push(render_operand(kind, word)?);
            }
            decoded.push(Decoded {
                position: index,
                mnemonic: descriptor.mnemonic,
                operands,
                targets,
            });
            index += 1 + descriptor.operands.len();
        }

        let labels = if self.label_substitution {
            self.substitute_targets(&mut decoded)
        } else {
            HashMap::new()
        };

        let mut out = String::new();
        for (line, item) in decoded.iter().enumerate() {
            if let Some(name) = labels.get(&line) {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(name);
                out.push(':');
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(item.mnemonic);
            if !item.operands.is_empty() {
                out.push(' ');
                out.push_str(&item.operands.join(", "));
            }
        }
        Ok(out)
    }

    /// Rewrites boundary-landing branch targets to synthetic labels; returns
    /// the decoded-line index each label precedes. Names are sequential in
    /// order of first appearance.
    fn substitute_targets(&self, decoded: &mut [Decoded]) -> HashMap<usize, String> {
        let width = self.numeric.width;
        let boundary: HashMap<u64, usize> = decoded
            .iter()
            .enumerate()
            .map(|(line, item)| (self.origin + (item.position * width) as u64, line))
            .collect();

        let mut names: HashMap<usize, String> = HashMap::new();
        for item_index in 0..decoded.len() {
            let targets = decoded[item_index].targets.clone();
            for (slot, target) in targets {
                let Some(&line) = boundary.get(&target) else {
                    continue;
                };
                let next = names.len();
                let name = names
                    .entry(line)
                    .or_insert_with(|| format!("label{next}"))
                    .clone();
                decoded[item_index].operands[slot] = name;
            }
        }
        names
    }
}

/// Renders one operand word according to its declared kind.
fn render_operand(kind: OperandKind, word: u64) -> Result<String, AsmError> {
    match kind {
        OperandKind::Register => register_name(word),
        OperandKind::RegisterPtr => Ok(format!("*{}", register_name(word)?)),
        OperandKind::Constant => Ok(format!("#{word}")),
        OperandKind::Address | OperandKind::Symbol => Ok(word.to_string()),
    }
}

fn register_name(word: u64) -> Result<String, AsmError> {
    usize::try_from(word)
        .ok()
        .and_then(registers::name)
        .map(str::to_string)
        .ok_or_else(|| {
            AsmError::decode(
                word.to_string(),
                format!("{word} is not a register index"),
            )
        })
}

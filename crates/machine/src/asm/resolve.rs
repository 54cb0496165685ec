//! Pass 2: label address assignment and symbol patching.

use std::collections::HashMap;

use crate::asm::Line;
use crate::common::AsmError;
use crate::isa::OperandKind;

/// Assigns each label its byte address, then patches every symbol operand
/// to an address token.
///
/// Instructions occupy one word for their opcode plus one word per operand,
/// starting at `origin`; a label names the address of the instruction that
/// follows it. Duplicate labels and unresolved symbols are fatal.
pub fn resolve(
    ast: &mut [Line],
    origin: u64,
    width: usize,
) -> Result<HashMap<String, u64>, AsmError> {
    let mut labels: HashMap<String, u64> = HashMap::new();
    let mut address = origin;
    for line in ast.iter() {
        match line {
            Line::Label { name, source } => {
                if labels.insert(name.clone(), address).is_some() {
                    return Err(AsmError::symbol(
                        name,
                        format!("label `{name}` is already defined"),
                    )
                    .at_line(&source.text, source.number));
                }
            }
            Line::Instruction { operands, .. } => {
                address += ((1 + operands.len()) * width) as u64;
            }
        }
    }

    for line in ast.iter_mut() {
        let Line::Instruction {
            mnemonic,
            operands,
            source,
            ..
        } = line
        else {
            continue;
        };
        for token in operands.iter_mut() {
            if token.kind != OperandKind::Symbol {
                continue;
            }
            let Some(&target) = labels.get(&token.text) else {
                return Err(AsmError::symbol(
                    &token.text,
                    format!("`{}` does not name a label", token.text),
                )
                .with_context(format!("while resolving operands of `{mnemonic}`"))
                .at_line(&source.text, source.number));
            };
            token.kind = OperandKind::Address;
            token.value = target;
        }
    }
    Ok(labels)
}

//! Pass 3: machine-code emission.

use crate::asm::Line;

/// Lays out the resolved program as a flat word stream: one word per
/// opcode, then one word per operand, in source order. Labels emit
/// nothing.
pub fn emit(ast: &[Line]) -> Vec<u64> {
    let mut words = Vec::new();
    for line in ast {
        let Line::Instruction {
            opcode, operands, ..
        } = line
        else {
            continue;
        };
        words.push(*opcode);
        words.extend(operands.iter().map(|token| token.value));
    }
    words
}

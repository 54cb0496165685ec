//! Base-set execution semantics.
//!
//! Arithmetic and bitwise operations in their three addressing forms, data
//! movement, compare, and branches. Conditional branches always fetch
//! their operand word first and only then decide whether to redirect the
//! instruction pointer, keeping fetch count equal to operand count on both
//! paths.

use crate::common::ExecError;
use crate::cpu::alu::{self, AluOp, flag};
use crate::cpu::dispatch::Dispatch;
use crate::cpu::registers::CF;
use crate::cpu::Cpu;
use crate::isa::base::opcodes as op;

/// Addressing form of an ALU opcode's final operand.
#[derive(Clone, Copy)]
enum Form {
    /// Third operand is a register.
    Reg,
    /// Third operand is a memory address.
    Mem,
    /// Third operand is an inline constant.
    Imm,
}

/// Maps a three-operand ALU opcode to its operation and form.
fn alu_binary(opcode: u64) -> Option<(AluOp, Form)> {
    let entry = match opcode {
        op::ADD_REG => (AluOp::Add, Form::Reg),
        op::ADD_MEM => (AluOp::Add, Form::Mem),
        op::ADD_IMM => (AluOp::Add, Form::Imm),
        op::SUB_REG => (AluOp::Sub, Form::Reg),
        op::SUB_MEM => (AluOp::Sub, Form::Mem),
        op::SUB_IMM => (AluOp::Sub, Form::Imm),
        op::MUL_REG => (AluOp::Mul, Form::Reg),
        op::MUL_MEM => (AluOp::Mul, Form::Mem),
        op::MUL_IMM => (AluOp::Mul, Form::Imm),
        op::DIV_REG => (AluOp::Div, Form::Reg),
        op::DIV_MEM => (AluOp::Div, Form::Mem),
        op::DIV_IMM => (AluOp::Div, Form::Imm),
        op::EXP_REG => (AluOp::Exp, Form::Reg),
        op::EXP_MEM => (AluOp::Exp, Form::Mem),
        op::EXP_IMM => (AluOp::Exp, Form::Imm),
        op::MOD_REG => (AluOp::Mod, Form::Reg),
        op::MOD_MEM => (AluOp::Mod, Form::Mem),
        op::MOD_IMM => (AluOp::Mod, Form::Imm),
        op::AND_REG => (AluOp::And, Form::Reg),
        op::AND_MEM => (AluOp::And, Form::Mem),
        op::AND_IMM => (AluOp::And, Form::Imm),
        op::ORR_REG => (AluOp::Orr, Form::Reg),
        op::ORR_MEM => (AluOp::Orr, Form::Mem),
        op::ORR_IMM => (AluOp::Orr, Form::Imm),
        op::EOR_REG => (AluOp::Eor, Form::Reg),
        op::EOR_MEM => (AluOp::Eor, Form::Mem),
        op::EOR_IMM => (AluOp::Eor, Form::Imm),
        op::LSL_REG => (AluOp::Lsl, Form::Reg),
        op::LSL_MEM => (AluOp::Lsl, Form::Mem),
        op::LSL_IMM => (AluOp::Lsl, Form::Imm),
        op::LSR_REG => (AluOp::Lsr, Form::Reg),
        op::LSR_MEM => (AluOp::Lsr, Form::Mem),
        op::LSR_IMM => (AluOp::Lsr, Form::Imm),
        _ => return None,
    };
    Some(entry)
}

/// Fetches the final operand of a form and produces its value.
fn fetch_operand(cpu: &mut Cpu, form: Form) -> Result<u64, ExecError> {
    match form {
        Form::Reg => {
            let index = cpu.fetch_register()?;
            cpu.reg(index)
        }
        Form::Mem => {
            let addr = cpu.fetch()?;
            Ok(cpu.mem.read(addr, cpu.numeric())?)
        }
        Form::Imm => cpu.fetch(),
    }
}

/// Offers a base-set opcode for execution.
pub fn execute(cpu: &mut Cpu, opcode: u64) -> Result<Dispatch, ExecError> {
    if let Some((alu_op, form)) = alu_binary(opcode) {
        let rd = cpu.fetch_register()?;
        let rn = cpu.fetch_register()?;
        let rhs = fetch_operand(cpu, form)?;
        let lhs = cpu.reg(rn)?;
        let result = alu::binary(alu_op, lhs, rhs, cpu.numeric())?;
        cpu.set_reg(rd, result)?;
        return Ok(Dispatch::Claimed(true));
    }

    match opcode {
        op::NULL => Ok(Dispatch::Claimed(!cpu.halt_on_null())),
        op::HALT => Ok(Dispatch::Claimed(false)),

        op::MVN_REG | op::MVN_MEM | op::MVN_IMM => {
            let rd = cpu.fetch_register()?;
            let form = match opcode {
                op::MVN_REG => Form::Reg,
                op::MVN_MEM => Form::Mem,
                _ => Form::Imm,
            };
            let value = fetch_operand(cpu, form)?;
            cpu.set_reg(rd, alu::not(value, cpu.numeric()))?;
            Ok(Dispatch::Claimed(true))
        }

        op::LDR => {
            let rd = cpu.fetch_register()?;
            let addr = cpu.fetch()?;
            let value = cpu.mem.read(addr, cpu.numeric())?;
            cpu.set_reg(rd, value)?;
            Ok(Dispatch::Claimed(true))
        }
        op::STR => {
            let rn = cpu.fetch_register()?;
            let addr = cpu.fetch()?;
            let value = cpu.reg(rn)?;
            cpu.mem.write(addr, value, cpu.numeric())?;
            Ok(Dispatch::Claimed(true))
        }
        op::MOV_REG => {
            let rd = cpu.fetch_register()?;
            let rm = cpu.fetch_register()?;
            let value = cpu.reg(rm)?;
            cpu.set_reg(rd, value)?;
            Ok(Dispatch::Claimed(true))
        }
        op::MOV_IMM => {
            let rd = cpu.fetch_register()?;
            let value = cpu.fetch()?;
            cpu.set_reg(rd, value)?;
            Ok(Dispatch::Claimed(true))
        }

        op::CMP_REG | op::CMP_MEM | op::CMP_IMM => {
            let rn = cpu.fetch_register()?;
            let form = match opcode {
                op::CMP_REG => Form::Reg,
                op::CMP_MEM => Form::Mem,
                _ => Form::Imm,
            };
            let rhs = fetch_operand(cpu, form)?;
            let lhs = cpu.reg(rn)?;
            let outcome = alu::compare(lhs, rhs, cpu.numeric());
            cpu.set_reg(CF, outcome)?;
            Ok(Dispatch::Claimed(true))
        }

        op::B_MEM | op::B_REG | op::BEQ_MEM | op::BEQ_REG | op::BNE_MEM | op::BNE_REG
        | op::BLT_MEM | op::BLT_REG | op::BGT_MEM | op::BGT_REG => {
            let target = if matches!(
                opcode,
                op::B_REG | op::BEQ_REG | op::BNE_REG | op::BLT_REG | op::BGT_REG
            ) {
                let index = cpu.fetch_register()?;
                cpu.reg(index)?
            } else {
                cpu.fetch()?
            };
            let cf = cpu.reg(CF)?;
            let taken = match opcode {
                op::B_MEM | op::B_REG => true,
                op::BEQ_MEM | op::BEQ_REG => cf == flag::EQUAL_TO,
                op::BNE_MEM | op::BNE_REG => cf != flag::EQUAL_TO,
                op::BLT_MEM | op::BLT_REG => cf == flag::LESS_THAN,
                _ => cf == flag::GREATER_THAN,
            };
            if taken {
                cpu.set_ip(target);
            }
            Ok(Dispatch::Claimed(true))
        }

        _ => Ok(Dispatch::Unclaimed),
    }
}

//! RS-set execution semantics.
//!
//! The RS machine is independent: its handler never falls through to the
//! base set, and its opcode space overlaps the base one freely. Arithmetic
//! is two-operand (destination doubles as left source) and control flow is
//! a plain jump plus jump-if-non-zero; there is no compare flag.

use crate::common::ExecError;
use crate::cpu::dispatch::Dispatch;
use crate::cpu::ops::extended::read_number;
use crate::cpu::Cpu;
use crate::isa::rs::opcodes as op;

/// Offers an RS-set opcode for execution.
pub fn execute(cpu: &mut Cpu, opcode: u64) -> Result<Dispatch, ExecError> {
    match opcode {
        op::HLT => Ok(Dispatch::Claimed(false)),

        op::SET => {
            let rd = cpu.fetch_register()?;
            let value = cpu.fetch()?;
            cpu.set_reg(rd, value)?;
            Ok(Dispatch::Claimed(true))
        }
        op::CPY => {
            let rd = cpu.fetch_register()?;
            let rs = cpu.fetch_register()?;
            let value = cpu.reg(rs)?;
            cpu.set_reg(rd, value)?;
            Ok(Dispatch::Claimed(true))
        }
        op::LOD => {
            let rd = cpu.fetch_register()?;
            let addr = cpu.fetch()?;
            let value = cpu.mem.read(addr, cpu.numeric())?;
            cpu.set_reg(rd, value)?;
            Ok(Dispatch::Claimed(true))
        }
        op::STO => {
            let rs = cpu.fetch_register()?;
            let addr = cpu.fetch()?;
            let value = cpu.reg(rs)?;
            cpu.mem.write(addr, value, cpu.numeric())?;
            Ok(Dispatch::Claimed(true))
        }

        op::ADD | op::SUB => {
            let rd = cpu.fetch_register()?;
            let rs = cpu.fetch_register()?;
            let a = cpu.reg(rd)?;
            let b = cpu.reg(rs)?;
            let alu_op = if opcode == op::ADD {
                crate::cpu::alu::AluOp::Add
            } else {
                crate::cpu::alu::AluOp::Sub
            };
            let result = crate::cpu::alu::binary(alu_op, a, b, cpu.numeric())?;
            cpu.set_reg(rd, result)?;
            Ok(Dispatch::Claimed(true))
        }

        op::JMP => {
            let target = cpu.fetch()?;
            cpu.set_ip(target);
            Ok(Dispatch::Claimed(true))
        }
        op::JNZ => {
            let rs = cpu.fetch_register()?;
            let target = cpu.fetch()?;
            if cpu.numeric().wrap(cpu.reg(rs)?) != 0 {
                cpu.set_ip(target);
            }
            Ok(Dispatch::Claimed(true))
        }

        op::OUT => {
            let rs = cpu.fetch_register()?;
            let text = cpu.render_number(cpu.reg(rs)?);
            cpu.io_mut().output(&text);
            Ok(Dispatch::Claimed(true))
        }
        op::INP => {
            let rd = cpu.fetch_register()?;
            let value = read_number(cpu)?;
            cpu.set_reg(rd, value)?;
            Ok(Dispatch::Claimed(true))
        }

        _ => Ok(Dispatch::Unclaimed),
    }
}

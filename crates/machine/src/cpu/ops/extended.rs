//! Extension-set execution semantics.
//!
//! I/O through the machine port, increment/decrement, pointer-indirect
//! loads and stores, register-pointer moves, stack push/pop, and the
//! call/return pair backed by the frame protocol.

use crate::common::{ExecError, ExecErrorKind};
use crate::cpu::dispatch::Dispatch;
use crate::cpu::Cpu;
use crate::isa::extended::opcodes as op;

/// Offers an extension-set opcode for execution.
pub fn execute(cpu: &mut Cpu, opcode: u64) -> Result<Dispatch, ExecError> {
    match opcode {
        op::INP => {
            let rd = cpu.fetch_register()?;
            let value = read_number(cpu)?;
            cpu.set_reg(rd, value)?;
            Ok(Dispatch::Claimed(true))
        }
        op::OUT => {
            let rn = cpu.fetch_register()?;
            let text = cpu.render_number(cpu.reg(rn)?);
            cpu.io_mut().output(&text);
            Ok(Dispatch::Claimed(true))
        }
        op::OUTC => {
            let rn = cpu.fetch_register()?;
            let code = cpu.numeric().wrap(cpu.reg(rn)?);
            let character = u32::try_from(code).ok().and_then(char::from_u32).ok_or_else(|| {
                ExecError::from(ExecErrorKind::Io {
                    reason: format!("{code:#x} is not a character code point"),
                })
            })?;
            cpu.io_mut().output(&character.to_string());
            Ok(Dispatch::Claimed(true))
        }

        op::INC | op::DEC => {
            let rd = cpu.fetch_register()?;
            let value = cpu.reg(rd)?;
            let next = if opcode == op::INC {
                value.wrapping_add(1)
            } else {
                value.wrapping_sub(1)
            };
            cpu.set_reg(rd, next)?;
            Ok(Dispatch::Claimed(true))
        }

        op::LDR_PTR => {
            let rd = cpu.fetch_register()?;
            let rp = cpu.fetch_register()?;
            let addr = cpu.reg(rp)?;
            let value = cpu.mem.read(addr, cpu.numeric())?;
            cpu.set_reg(rd, value)?;
            Ok(Dispatch::Claimed(true))
        }
        op::STR_PTR => {
            let rn = cpu.fetch_register()?;
            let rp = cpu.fetch_register()?;
            let addr = cpu.reg(rp)?;
            let value = cpu.reg(rn)?;
            cpu.mem.write(addr, value, cpu.numeric())?;
            Ok(Dispatch::Claimed(true))
        }

        // Register indirection without memory: the pointer operand names a
        // register whose value is itself a register index.
        op::MOV_FROM_PTR => {
            let rd = cpu.fetch_register()?;
            let rp = cpu.fetch_register()?;
            let source = usize::try_from(cpu.reg(rp)?).unwrap_or(usize::MAX);
            let value = cpu
                .reg(source)
                .map_err(|err| err.with_context("pointer register does not name a register"))?;
            cpu.set_reg(rd, value)?;
            Ok(Dispatch::Claimed(true))
        }
        op::MOV_TO_PTR => {
            let rp = cpu.fetch_register()?;
            let rn = cpu.fetch_register()?;
            let target = usize::try_from(cpu.reg(rp)?).unwrap_or(usize::MAX);
            let value = cpu.reg(rn)?;
            cpu.set_reg(target, value)
                .map_err(|err| err.with_context("pointer register does not name a register"))?;
            Ok(Dispatch::Claimed(true))
        }

        op::CALL_MEM | op::CALL_REG => {
            let target = if opcode == op::CALL_REG {
                let index = cpu.fetch_register()?;
                cpu.reg(index)?
            } else {
                cpu.fetch()?
            };
            // The operand is consumed before the frame is pushed, so the
            // saved instruction pointer is the return address.
            cpu.push_frame()
                .map_err(|err| err.with_context("CALL could not open a frame"))?;
            cpu.set_ip(target);
            Ok(Dispatch::Claimed(true))
        }
        op::RET => {
            cpu.pop_frame(0)
                .map_err(|err| err.with_context("RET could not unwind"))?;
            Ok(Dispatch::Claimed(true))
        }
        op::RET_ARGS => {
            let args = cpu.fetch()?;
            cpu.pop_frame(args)
                .map_err(|err| err.with_context("RET could not unwind"))?;
            Ok(Dispatch::Claimed(true))
        }

        op::PUSH => {
            let rn = cpu.fetch_register()?;
            let value = cpu.reg(rn)?;
            cpu.push(value)?;
            Ok(Dispatch::Claimed(true))
        }
        op::POP => {
            let rd = cpu.fetch_register()?;
            let value = cpu.pop()?;
            cpu.set_reg(rd, value)?;
            Ok(Dispatch::Claimed(true))
        }

        _ => Ok(Dispatch::Unclaimed),
    }
}

/// Prompts the I/O port for a number and converts it into a word of the
/// machine's kind.
pub(super) fn read_number(cpu: &mut Cpu) -> Result<u64, ExecError> {
    let line = cpu.io_mut().input("? ")?;
    let trimmed = line.trim();
    let value: f64 = trimmed.parse().map_err(|_| {
        ExecError::from(ExecErrorKind::Io {
            reason: format!("`{trimmed}` is not a number"),
        })
    })?;
    Ok(cpu.numeric().from_f64(value))
}

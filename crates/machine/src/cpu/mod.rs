//! CPU execution engine.
//!
//! This module defines the `Cpu` structure owning the whole machine state.
//! It coordinates the following:
//! 1. **State:** Register file and byte-addressable memory, sized once at
//!    construction; changing the word kind or memory size means building a
//!    new instance.
//! 2. **Execution:** `fetch`/`execute`/`cycle` with the variant dispatch
//!    chain; an error aborts the current cycle only and is rethrown with
//!    added context, with no rollback of mutations already applied.
//! 3. **Surface:** Register and memory access by name, index or byte
//!    address, bulk helpers, write observers, and value formatting for
//!    external layers.

/// Arithmetic/logic semantics.
pub mod alu;
/// Opcode dispatch chain.
pub mod dispatch;
/// Machine I/O port.
pub mod io;
/// Main memory.
pub mod memory;
/// Opcode handler sets.
pub mod ops;
/// Register file and register naming.
pub mod registers;
/// Stack and frame protocol.
pub mod stack;

use std::sync::Arc;

use tracing::trace;

use crate::common::{ConfigError, ExecError, ExecErrorKind};
use crate::config::Config;
use crate::cpu::dispatch::{Dispatch, HandlerSet};
use crate::cpu::io::{MachineIo, StdIo};
use crate::cpu::memory::Memory;
use crate::cpu::registers::RegisterFile;
use crate::isa::InstructionTable;
use crate::num::NumericType;

/// The CPU: register file, memory, and the dispatch chain of its variant.
///
/// A `Cpu` is mutable shared state driven by one logical caller at a time;
/// concurrent cycles on one instance are undefined and must be serialized
/// externally. The only cancellation point is between cycles.
pub struct Cpu {
    /// Register file.
    pub regs: RegisterFile,
    /// Main memory.
    pub mem: Memory,
    numeric: NumericType,
    table: Arc<InstructionTable>,
    handlers: Vec<HandlerSet>,
    halt_on_null: bool,
    frame_len: u64,
    io: Box<dyn MachineIo>,
}

impl Cpu {
    /// Builds a machine from configuration with the standard I/O port.
    pub fn new(config: &Config, table: Arc<InstructionTable>) -> Result<Self, ConfigError> {
        Self::with_io(config, table, Box::new(StdIo))
    }

    /// Builds a machine with a caller-supplied I/O port.
    pub fn with_io(
        config: &Config,
        table: Arc<InstructionTable>,
        io: Box<dyn MachineIo>,
    ) -> Result<Self, ConfigError> {
        let numeric = NumericType::of(config.machine.numeric);
        if config.machine.words == 0 {
            return Err(ConfigError::MemoryTooSmall { words: 0 });
        }
        let capacity = config.machine.words * numeric.width;
        let origin = config.assembler.origin;
        if usize::try_from(origin).map_or(true, |origin| origin >= capacity) {
            return Err(ConfigError::OriginOutOfRange { origin, capacity });
        }

        let mut regs = RegisterFile::new();
        // The stack starts at the last word and grows toward lower addresses.
        let stack_top = (capacity - numeric.width) as u64;
        regs.write(registers::SP, stack_top);
        regs.write(registers::FP, stack_top);
        regs.write(registers::IP, origin);

        Ok(Self {
            regs,
            mem: Memory::new(config.machine.words, numeric),
            numeric,
            table,
            handlers: dispatch::chain(config.machine.variant),
            halt_on_null: config.machine.halt_on_null,
            frame_len: 0,
            io,
        })
    }

    /// The machine's word kind.
    #[inline]
    pub fn numeric(&self) -> NumericType {
        self.numeric
    }

    /// The instruction table this machine executes.
    #[inline]
    pub fn table(&self) -> &InstructionTable {
        &self.table
    }

    /// Whether NULL halts instead of doing nothing.
    #[inline]
    pub fn halt_on_null(&self) -> bool {
        self.halt_on_null
    }

    /// The I/O port.
    pub(crate) fn io_mut(&mut self) -> &mut dyn MachineIo {
        self.io.as_mut()
    }

    // ── Register surface ──────────────────────────────────

    /// Reads a register by validated index.
    pub fn reg(&self, index: usize) -> Result<u64, ExecError> {
        if index >= registers::COUNT {
            return Err(ExecErrorKind::BadRegister {
                index,
                count: registers::COUNT,
            }
            .into());
        }
        Ok(self.regs.read(index))
    }

    /// Writes a register by validated index, wrapped to the word width.
    pub fn set_reg(&mut self, index: usize, value: u64) -> Result<(), ExecError> {
        if index >= registers::COUNT {
            return Err(ExecErrorKind::BadRegister {
                index,
                count: registers::COUNT,
            }
            .into());
        }
        self.regs.write(index, self.numeric.wrap(value));
        Ok(())
    }

    /// Reads a register by name (`r4`, `sp`, `ip`/`pc`, `fp`, `cf`).
    pub fn reg_by_name(&self, name: &str) -> Option<u64> {
        registers::lookup(name).map(|index| self.regs.read(index))
    }

    /// Writes a register by name; returns false for an unknown name.
    pub fn set_reg_by_name(&mut self, name: &str, value: u64) -> bool {
        match registers::lookup(name) {
            Some(index) => {
                self.regs.write(index, self.numeric.wrap(value));
                true
            }
            None => false,
        }
    }

    /// Current instruction pointer.
    #[inline]
    pub fn ip(&self) -> u64 {
        self.regs.read(registers::IP)
    }

    /// Overwrites the instruction pointer.
    #[inline]
    pub fn set_ip(&mut self, value: u64) {
        self.regs.write(registers::IP, self.numeric.wrap(value));
    }

    // ── Execution ─────────────────────────────────────────

    /// Reads one word at the instruction pointer and advances the pointer by
    /// the word width.
    ///
    /// This is the sole mechanism by which opcodes and operands are
    /// consumed, so operand storage order must exactly match the call order
    /// of `fetch` inside each opcode handler.
    pub fn fetch(&mut self) -> Result<u64, ExecError> {
        let ip = self.ip();
        let word = self.mem.read(ip, self.numeric)?;
        self.set_ip(ip + self.numeric.width as u64);
        Ok(word)
    }

    /// Fetches one operand word and validates it as a register index.
    pub(crate) fn fetch_register(&mut self) -> Result<usize, ExecError> {
        let word = self.fetch()?;
        let index = usize::try_from(word).unwrap_or(usize::MAX);
        if index >= registers::COUNT {
            return Err(ExecError::from(ExecErrorKind::BadRegister {
                index,
                count: registers::COUNT,
            })
            .with_context("operand word is not a register index"));
        }
        Ok(index)
    }

    /// Executes one already-fetched opcode through the dispatch chain.
    ///
    /// Returns the continue flag; `false` means the machine halted.
    pub fn execute(&mut self, opcode: u64) -> Result<bool, ExecError> {
        for chain_pos in 0..self.handlers.len() {
            let handler = self.handlers[chain_pos];
            match handler.try_execute(self, opcode)? {
                Dispatch::Claimed(keep_going) => return Ok(keep_going),
                Dispatch::Unclaimed => {}
            }
        }
        Err(ExecError::from(ExecErrorKind::IllegalInstruction { opcode })
            .with_context("opcode unrecognised by every handler set"))
    }

    /// Runs one fetch/execute cycle.
    ///
    /// Any error aborts this cycle only; mutations already applied stay.
    pub fn cycle(&mut self) -> Result<bool, ExecError> {
        let at = self.ip();
        let opcode = self
            .fetch()
            .map_err(|err| err.with_context(format!("fetching opcode at {at:#x}")))?;
        trace!(opcode, at, "cycle");
        self.execute(opcode)
            .map_err(|err| err.with_context(format!("executing opcode {opcode:#04x} fetched at {at:#x}")))
    }

    // ── Formatting ────────────────────────────────────────

    /// Renders a word in the machine's word kind and the chosen display
    /// base, one byte at a time.
    pub fn format_value(&self, word: u64, base: u32) -> String {
        self.numeric.format_base(word, base)
    }

    /// Renders a word as a decimal number under the word kind's
    /// interpretation (signed, unsigned or float).
    pub fn render_number(&self, word: u64) -> String {
        if !self.numeric.integral {
            let value = self.numeric.to_f64(word);
            if value.fract() == 0.0 {
                format!("{value:.0}")
            } else {
                format!("{value}")
            }
        } else if self.numeric.signed {
            format!("{}", self.numeric.to_signed(word))
        } else {
            format!("{}", self.numeric.wrap(word))
        }
    }
}

impl std::fmt::Debug for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("numeric", &self.numeric.kind)
            .field("handlers", &self.handlers)
            .field("ip", &self.ip())
            .finish_non_exhaustive()
    }
}

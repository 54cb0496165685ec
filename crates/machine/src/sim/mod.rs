//! ## 5. Simulation Session
//!
//! Ties the configuration, instruction table, assembler and CPU together
//! behind one façade. A session owns one machine; embedding hosts and the
//! CLI drive everything through it.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::asm::Assembler;
use crate::common::{AsmError, ConfigError, ExecError, ExecErrorKind, MemoryError};
use crate::config::{defaults, Config, Variant};
use crate::cpu::io::MachineIo;
use crate::cpu::Cpu;
use crate::isa::{self, InstructionTable};

/// Any failure surfaced by a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Construction-time configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Assembly or decompilation diagnostic.
    #[error(transparent)]
    Asm(#[from] AsmError),
    /// Execution failure.
    #[error(transparent)]
    Exec(#[from] ExecError),
    /// A loaded program does not fit in memory.
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Builds the instruction table for a machine variant.
pub fn table_for(variant: Variant) -> Result<InstructionTable, ConfigError> {
    match variant {
        Variant::Base => isa::base::table(),
        Variant::Extended => isa::extended::table(),
        Variant::Rs => isa::rs::table(),
    }
}

/// One configured machine with its assembler.
///
/// The session is single-threaded by construction; callers wanting
/// cancellation or timeouts drive `step` themselves and decide between
/// cycles.
#[derive(Debug)]
pub struct Session {
    config: Config,
    asm: Assembler,
    cpu: Cpu,
}

impl Session {
    /// Builds a session with the standard I/O port.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let table = Arc::new(table_for(config.machine.variant)?);
        let asm = Assembler::new(Arc::clone(&table), &config);
        let cpu = Cpu::new(&config, table)?;
        Ok(Self { config, asm, cpu })
    }

    /// Builds a session with a caller-supplied I/O port.
    pub fn with_io(config: Config, io: Box<dyn MachineIo>) -> Result<Self, ConfigError> {
        let table = Arc::new(table_for(config.machine.variant)?);
        let asm = Assembler::new(Arc::clone(&table), &config);
        let cpu = Cpu::with_io(&config, table, io)?;
        Ok(Self { config, asm, cpu })
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The assembler.
    pub fn asm(&self) -> &Assembler {
        &self.asm
    }

    /// The assembler, mutably.
    pub fn asm_mut(&mut self) -> &mut Assembler {
        &mut self.asm
    }

    /// The machine.
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// The machine, mutably.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Assembles `source` and returns the program as words.
    pub fn assemble(&mut self, source: &str) -> Result<&[u64], AsmError> {
        self.asm.set_source(source);
        self.asm.parse()?;
        Ok(self.asm.words())
    }

    /// Writes the last assembled program into memory at the origin and
    /// points the instruction pointer at it.
    pub fn load(&mut self) -> Result<(), MemoryError> {
        let origin = self.asm.origin();
        let code = self.asm.machine_code();
        self.cpu.mem.write_region(origin, &code)?;
        self.cpu.set_ip(origin);
        debug!(origin, bytes = code.len(), "program loaded");
        Ok(())
    }

    /// Assembles `source`, loads it at the origin and readies the machine.
    pub fn assemble_and_load(&mut self, source: &str) -> Result<(), SessionError> {
        let _words = self.assemble(source)?;
        self.load()?;
        Ok(())
    }

    /// Runs one cycle; returns the continue flag.
    pub fn step(&mut self) -> Result<bool, ExecError> {
        self.cpu.cycle()
    }

    /// Runs until the machine halts or `cap` cycles have elapsed. Returns
    /// the number of cycles executed; hitting the cap without a halt is an
    /// error.
    pub fn run_for(&mut self, cap: u64) -> Result<u64, ExecError> {
        let mut cycles = 0;
        while cycles < cap {
            cycles += 1;
            if !self.cpu.cycle()? {
                debug!(cycles, "machine halted");
                return Ok(cycles);
            }
        }
        Err(ExecErrorKind::CycleCap { cap }.into())
    }

    /// Runs until the machine halts, with the default cycle cap.
    pub fn run(&mut self) -> Result<u64, ExecError> {
        self.run_for(defaults::CYCLE_CAP)
    }
}

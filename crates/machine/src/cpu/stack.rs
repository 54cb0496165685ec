//! Stack and frame protocol.
//!
//! The stack lives in main memory and grows toward lower addresses:
//! `push` writes at the stack pointer and then decrements it, `pop`
//! increments and then reads. A frame records, from the pushing side:
//! every general-purpose register in index order, the instruction pointer,
//! and the running frame-size counter + 1. The frame pointer always
//! addresses the most recent frame's header. Unwinding reverses the push
//! order exactly; that symmetry is the protocol's core invariant.

use crate::common::{ExecError, ExecErrorKind};
use crate::cpu::registers::{FP, GENERAL_COUNT, IP, SP};
use crate::cpu::Cpu;

/// Words a frame header occupies: the general registers, the saved
/// instruction pointer, and the size word.
pub const FRAME_HEADER_WORDS: u64 = GENERAL_COUNT as u64 + 2;

impl Cpu {
    /// Pushes one word: writes at the stack pointer, then decrements it.
    pub fn push(&mut self, value: u64) -> Result<(), ExecError> {
        let sp = self.regs.read(SP);
        self.mem
            .write(sp, self.numeric().wrap(value), self.numeric())
            .map_err(|err| ExecError::from(err).with_context("pushing onto the stack"))?;
        self.regs
            .write(SP, sp.wrapping_sub(self.numeric().width as u64));
        self.frame_len += 1;
        Ok(())
    }

    /// Pops one word: increments the stack pointer, then reads.
    pub fn pop(&mut self) -> Result<u64, ExecError> {
        let sp = self.regs.read(SP).wrapping_add(self.numeric().width as u64);
        let value = self
            .mem
            .read(sp, self.numeric())
            .map_err(|err| ExecError::from(err).with_context("popping from the stack"))?;
        self.regs.write(SP, sp);
        self.frame_len = self.frame_len.saturating_sub(1);
        Ok(value)
    }

    /// Words pushed since the current frame began.
    #[inline]
    pub fn frame_len(&self) -> u64 {
        self.frame_len
    }

    /// Opens a subroutine frame.
    ///
    /// Pushes `r0..r11` in index order, then the instruction pointer, then
    /// the running frame-size counter + 1; points the frame pointer at the
    /// new stack head and resets the counter. The stored size therefore
    /// counts every word pushed since the previous frame began, including
    /// this frame's own saves, which is exactly the distance from the new
    /// frame head back to the previous one.
    pub fn push_frame(&mut self) -> Result<(), ExecError> {
        for index in 0..GENERAL_COUNT {
            let value = self.regs.read(index);
            self.push(value)
                .map_err(|err| err.with_context(format!("saving r{index}")))?;
        }
        let ip = self.regs.read(IP);
        self.push(ip)
            .map_err(|err| err.with_context("saving the instruction pointer"))?;
        let size = self.frame_len + 1;
        self.push(size)
            .map_err(|err| err.with_context("recording the frame size"))?;
        self.regs.write(FP, self.regs.read(SP));
        self.frame_len = 0;
        Ok(())
    }

    /// Unwinds the most recent frame.
    ///
    /// Resets the stack pointer to the frame pointer, pops the recorded
    /// size, restores the instruction pointer and the general registers in
    /// reverse push order, discards `arg_words` caller-pushed argument
    /// words, and restores the frame pointer to the previous frame head
    /// (`old fp + recorded size × width`). The argument count comes from
    /// the unwinder's caller — for RET it is the instruction's operand.
    pub fn pop_frame(&mut self, arg_words: u64) -> Result<(), ExecError> {
        let fp = self.regs.read(FP);
        self.regs.write(SP, fp);

        let size = self
            .pop()
            .map_err(|err| err.with_context("reading the recorded frame size"))?;
        if size < FRAME_HEADER_WORDS + arg_words {
            return Err(ExecError::from(ExecErrorKind::MalformedFrame {
                reason: format!(
                    "recorded size {size} cannot hold {FRAME_HEADER_WORDS} header words and {arg_words} argument word(s)"
                ),
            })
            .with_context("unwinding a subroutine frame"));
        }
        // The size word comes from memory; a corrupted slot must not wrap
        // the frame-pointer arithmetic below.
        let width = self.numeric().width as u64;
        let span_ok = size
            .checked_mul(width)
            .is_some_and(|bytes| bytes <= self.mem.capacity() as u64);
        if !span_ok {
            return Err(ExecError::from(ExecErrorKind::MalformedFrame {
                reason: format!("recorded size {size} exceeds the memory capacity"),
            })
            .with_context("unwinding a subroutine frame"));
        }

        let ip = self
            .pop()
            .map_err(|err| err.with_context("restoring the instruction pointer"))?;
        self.regs.write(IP, ip);
        for index in (0..GENERAL_COUNT).rev() {
            let value = self
                .pop()
                .map_err(|err| err.with_context(format!("restoring r{index}")))?;
            self.regs.write(index, value);
        }
        for _ in 0..arg_words {
            let _ = self
                .pop()
                .map_err(|err| err.with_context("discarding caller arguments"))?;
        }

        self.regs
            .write(FP, self.numeric().wrap(fp.wrapping_add(size * width)));
        self.frame_len = size - FRAME_HEADER_WORDS - arg_words;
        Ok(())
    }
}

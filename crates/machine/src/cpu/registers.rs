//! Register file.
//!
//! A fixed-size file of word slots addressable by name or integer index.
//! Indices are stable for the CPU instance's lifetime. Four slots are
//! reserved: the instruction pointer, the stack pointer, the frame pointer
//! and the compare flag; the rest are general purpose and are the ones the
//! frame protocol preserves.

use std::fmt;

/// Number of general-purpose registers (`r0`..`r11`).
pub const GENERAL_COUNT: usize = 12;
/// Instruction pointer index.
pub const IP: usize = 12;
/// Stack pointer index.
pub const SP: usize = 13;
/// Frame pointer index.
pub const FP: usize = 14;
/// Compare flag index.
pub const CF: usize = 15;
/// Total register count.
pub const COUNT: usize = 16;

/// Register names by index.
const NAMES: [&str; COUNT] = [
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "ip", "sp", "fp",
    "cf",
];

/// Returns the canonical name of a register index.
#[inline]
pub fn name(index: usize) -> Option<&'static str> {
    NAMES.get(index).copied()
}

/// Resolves a register name to its index. Matching is case-insensitive;
/// `pc` is accepted as an alias for `ip`.
pub fn lookup(name: &str) -> Option<usize> {
    if name.eq_ignore_ascii_case("pc") {
        return Some(IP);
    }
    NAMES
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// Write observer callback: receives (index, new value).
pub type RegisterObserver = Box<dyn FnMut(usize, u64)>;

/// Fixed-size register file, independent of main memory.
///
/// Every write fires the registered observer; an unregistered observer is a
/// legal no-op. Observers run synchronously with the triggering mutation and
/// must not re-enter the owning machine's mutation path.
pub struct RegisterFile {
    words: [u64; COUNT],
    observer: Option<RegisterObserver>,
}

impl RegisterFile {
    /// Creates a register file with every slot zeroed.
    pub fn new() -> Self {
        Self {
            words: [0; COUNT],
            observer: None,
        }
    }

    /// Reads a register by index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= COUNT`. Indices taken from instruction words are
    /// validated by the CPU before they reach the file.
    #[inline]
    pub fn read(&self, index: usize) -> u64 {
        self.words[index]
    }

    /// Writes a register by index, firing the write observer.
    ///
    /// # Panics
    ///
    /// Panics if `index >= COUNT`; see [`read`](Self::read).
    #[inline]
    pub fn write(&mut self, index: usize, value: u64) {
        self.words[index] = value;
        if let Some(observer) = self.observer.as_mut() {
            observer(index, value);
        }
    }

    /// Registers the write observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: RegisterObserver) {
        self.observer = Some(observer);
    }

    /// Snapshot of all register values, in index order.
    pub fn snapshot(&self) -> [u64; COUNT] {
        self.words
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterFile")
            .field("words", &self.words)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

//! Main memory.
//!
//! A byte-addressable buffer of fixed capacity (word count × word width).
//! Every access takes a byte address and a numeric type, so mixed-width
//! reads and writes against one underlying buffer are supported (for
//! example reading a single byte out of a 32-bit-word memory). Bulk helpers
//! validate their whole span before touching anything: an out-of-range
//! address fails the entire operation with no partial effect.

use std::fmt;

use crate::common::MemoryError;
use crate::num::NumericType;

/// Write observer callback: receives the inclusive (start byte, end byte)
/// range of the mutation.
pub type MemoryObserver = Box<dyn FnMut(usize, usize)>;

/// Byte-addressable memory with typed access and a write observer.
pub struct Memory {
    bytes: Vec<u8>,
    numeric: NumericType,
    observer: Option<MemoryObserver>,
}

impl Memory {
    /// Allocates a zeroed memory of `words` words of the given kind.
    pub fn new(words: usize, numeric: NumericType) -> Self {
        Self {
            bytes: vec![0; words * numeric.width],
            numeric,
            observer: None,
        }
    }

    /// Capacity in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// The memory's default numeric type (the machine's word kind).
    #[inline]
    pub fn numeric(&self) -> NumericType {
        self.numeric
    }

    /// Validates that `[addr, addr + len)` lies inside the buffer and
    /// returns the start offset.
    fn span(&self, addr: u64, len: usize) -> Result<usize, MemoryError> {
        let start = usize::try_from(addr).unwrap_or(usize::MAX);
        let end = start.checked_add(len);
        match end {
            Some(end) if end <= self.bytes.len() => Ok(start),
            _ => Err(MemoryError {
                addr,
                len,
                capacity: self.bytes.len(),
            }),
        }
    }

    /// Reads one value of type `ty` at a byte address.
    pub fn read(&self, addr: u64, ty: NumericType) -> Result<u64, MemoryError> {
        let start = self.span(addr, ty.width)?;
        // span() already guaranteed enough bytes.
        Ok(ty.decode(&self.bytes[start..]).unwrap_or_default())
    }

    /// Reads one word of the memory's default type.
    #[inline]
    pub fn read_word(&self, addr: u64) -> Result<u64, MemoryError> {
        self.read(addr, self.numeric)
    }

    /// Writes one value of type `ty` at a byte address, firing the write
    /// observer with the mutated byte range.
    pub fn write(&mut self, addr: u64, value: u64, ty: NumericType) -> Result<(), MemoryError> {
        let start = self.span(addr, ty.width)?;
        self.bytes[start..start + ty.width].copy_from_slice(&value.to_le_bytes()[..ty.width]);
        self.notify(start, start + ty.width - 1);
        Ok(())
    }

    /// Writes one word of the memory's default type.
    #[inline]
    pub fn write_word(&mut self, addr: u64, value: u64) -> Result<(), MemoryError> {
        self.write(addr, value, self.numeric)
    }

    /// Fills `count` consecutive default-width words starting at a byte
    /// address. Fails atomically if any word of the range is out of range.
    pub fn fill_words(&mut self, addr: u64, count: usize, value: u64) -> Result<(), MemoryError> {
        let width = self.numeric.width;
        let start = self.span(addr, count * width)?;
        let encoded = &value.to_le_bytes()[..width];
        for word in 0..count {
            let at = start + word * width;
            self.bytes[at..at + width].copy_from_slice(encoded);
        }
        if count > 0 {
            self.notify(start, start + count * width - 1);
        }
        Ok(())
    }

    /// Reads a byte region. Fails atomically when the span exceeds capacity.
    pub fn read_region(&self, addr: u64, len: usize) -> Result<&[u8], MemoryError> {
        let start = self.span(addr, len)?;
        Ok(&self.bytes[start..start + len])
    }

    /// Copies a byte region into memory. Fails atomically when the span
    /// exceeds capacity.
    pub fn write_region(&mut self, addr: u64, data: &[u8]) -> Result<(), MemoryError> {
        let start = self.span(addr, data.len())?;
        self.bytes[start..start + data.len()].copy_from_slice(data);
        if !data.is_empty() {
            self.notify(start, start + data.len() - 1);
        }
        Ok(())
    }

    /// Registers the write observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: MemoryObserver) {
        self.observer = Some(observer);
    }

    fn notify(&mut self, start: usize, end: usize) {
        if let Some(observer) = self.observer.as_mut() {
            observer(start, end);
        }
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("capacity", &self.bytes.len())
            .field("numeric", &self.numeric.kind)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

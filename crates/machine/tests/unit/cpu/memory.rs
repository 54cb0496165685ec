//! # Memory Tests
//!
//! Bounds validation, bulk-operation atomicity and mixed-width access.

use pretty_assertions::assert_eq;

use microasm_core::cpu::memory::Memory;
use microasm_core::num::{NumericKind, NumericType};

fn u32_memory(words: usize) -> Memory {
    Memory::new(words, NumericType::of(NumericKind::U32))
}

#[test]
fn test_capacity_is_words_times_width() {
    let mem = u32_memory(8);
    assert_eq!(mem.capacity(), 32);
}

#[test]
fn test_word_round_trip() {
    let mut mem = u32_memory(8);
    mem.write_word(4, 0x1234_5678).unwrap();
    assert_eq!(mem.read_word(4).unwrap(), 0x1234_5678);
}

#[test]
fn test_unaligned_byte_addressing() {
    let mut mem = u32_memory(8);
    mem.write_word(1, 0xAABB_CCDD).unwrap();
    assert_eq!(mem.read_word(1).unwrap(), 0xAABB_CCDD);
}

#[test]
fn test_mixed_width_access() {
    let mut mem = u32_memory(8);
    let u8_ty = NumericType::of(NumericKind::U8);
    // Write a u32, read its little-endian bytes back one at a time.
    mem.write_word(0, 0x0403_0201).unwrap();
    for offset in 0..4u64 {
        assert_eq!(mem.read(offset, u8_ty).unwrap(), offset + 1);
    }
}

#[test]
fn test_out_of_bounds_read() {
    let mem = u32_memory(2);
    // Capacity 8: a 4-byte read at 5 crosses the end.
    let err = mem.read_word(5).unwrap_err();
    assert_eq!(err.addr, 5);
    assert_eq!(err.len, 4);
    assert_eq!(err.capacity, 8);
    assert!(mem.read_word(u64::MAX).is_err());
}

#[test]
fn test_failed_bulk_write_has_no_partial_effect() {
    let mut mem = u32_memory(2);
    mem.write_word(0, 0x1111_1111).unwrap();
    mem.write_word(4, 0x2222_2222).unwrap();
    // Ten bytes at 0 exceed the 8-byte capacity; nothing may change.
    assert!(mem.write_region(0, &[0xFF; 10]).is_err());
    assert_eq!(mem.read_word(0).unwrap(), 0x1111_1111);
    assert_eq!(mem.read_word(4).unwrap(), 0x2222_2222);
}

#[test]
fn test_failed_fill_has_no_partial_effect() {
    let mut mem = u32_memory(2);
    assert!(mem.fill_words(4, 2, 7).is_err());
    assert_eq!(mem.read_word(4).unwrap(), 0);
}

#[test]
fn test_fill_words() {
    let mut mem = u32_memory(4);
    mem.fill_words(0, 4, 9).unwrap();
    for addr in (0..16).step_by(4) {
        assert_eq!(mem.read_word(addr).unwrap(), 9);
    }
}

#[test]
fn test_read_region() {
    let mut mem = u32_memory(2);
    mem.write_region(0, &[1, 2, 3, 4]).unwrap();
    assert_eq!(mem.read_region(1, 2).unwrap(), &[2, 3]);
    assert!(mem.read_region(7, 2).is_err());
}

//! # Configuration Tests

use pretty_assertions::assert_eq;

use microasm_core::config::{defaults, Config, Variant};
use microasm_core::num::NumericKind;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.machine.variant, Variant::Base);
    assert_eq!(config.machine.numeric, NumericKind::U32);
    assert_eq!(config.machine.words, defaults::MEMORY_WORDS);
    assert!(!config.machine.halt_on_null);
    assert_eq!(config.assembler.origin, defaults::ORIGIN);
    assert!(!config.assembler.label_substitution);
}

#[test]
fn test_json_full() {
    let config = Config::from_json(
        r#"{
            "machine": { "variant": "extended", "numeric": "u8", "words": 64, "halt_on_null": true },
            "assembler": { "origin": 8, "label_substitution": true }
        }"#,
    )
    .unwrap();
    assert_eq!(config.machine.variant, Variant::Extended);
    assert_eq!(config.machine.numeric, NumericKind::U8);
    assert_eq!(config.machine.words, 64);
    assert!(config.machine.halt_on_null);
    assert_eq!(config.assembler.origin, 8);
    assert!(config.assembler.label_substitution);
}

#[test]
fn test_json_partial_falls_back_to_defaults() {
    let config = Config::from_json(r#"{ "machine": { "variant": "rs" } }"#).unwrap();
    assert_eq!(config.machine.variant, Variant::Rs);
    assert_eq!(config.machine.numeric, NumericKind::U32);
    assert_eq!(config.machine.words, defaults::MEMORY_WORDS);
}

#[test]
fn test_json_rejects_unknown_variant() {
    assert!(Config::from_json(r#"{ "machine": { "variant": "quantum" } }"#).is_err());
}

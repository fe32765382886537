use js_deobfuscator::classifier::{COMMON_NUMBERS, PROTECTED_IDENTIFIERS};
use js_deobfuscator::extractor::{tokens, TokenKind};
use js_deobfuscator::{Deobfuscator, EngineConfig};
use proptest::prelude::*;

const PROPTEST_CASES: u32 = 200;

fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z_$][a-zA-Z0-9_$]{0,6}",
        "_0x[0-9a-f]{4,6}",
        "[0-9]{1,6}",
        "0x[0-9a-fA-F]{1,4}",
        Just("var".to_string()),
        Just("function".to_string()),
        Just("document".to_string()),
        Just("getElementById".to_string()),
        Just("404".to_string()),
        Just("1024".to_string()),
    ]
}

fn separator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(" "),
        Just("."),
        Just("("),
        Just(")"),
        Just(" = "),
        Just(";\n"),
        Just("-"),
        Just(", "),
    ]
}

fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((token_strategy(), separator_strategy()), 1..60).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(token, sep)| format!("{}{}", token, sep))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn same_input_same_output(source in source_strategy()) {
        let deobfuscator = Deobfuscator::new(&EngineConfig::default());
        let first = deobfuscator.transform(&source).unwrap();
        let second = deobfuscator.transform(&source).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn mapped_keys_leave_the_output(source in source_strategy()) {
        let out = Deobfuscator::new(&EngineConfig::default()).transform(&source).unwrap();
        for token in tokens(&out.deobfuscated) {
            match token.kind {
                TokenKind::Identifier => prop_assert!(!out.mappings.contains_key(token.text), "{}", token.text),
                TokenKind::Number => prop_assert!(!out.numeric_mappings.contains_key(token.text), "{}", token.text),
            }
        }
    }

    #[test]
    fn protected_and_common_values_are_never_keys(source in source_strategy()) {
        let out = Deobfuscator::new(&EngineConfig::default()).transform(&source).unwrap();
        for key in out.mappings.keys() {
            prop_assert!(!PROTECTED_IDENTIFIERS.contains(key.as_str()));
        }
        for key in out.numeric_mappings.keys() {
            prop_assert!(!COMMON_NUMBERS.contains(key.as_str()));
        }
    }

    #[test]
    fn replacement_names_are_unique(source in source_strategy()) {
        let out = Deobfuscator::new(&EngineConfig::default()).transform(&source).unwrap();
        let mut names: Vec<&String> = out.mappings.values().collect();
        let total = names.len();
        names.sort();
        names.dedup();
        prop_assert_eq!(names.len(), total);
    }
}

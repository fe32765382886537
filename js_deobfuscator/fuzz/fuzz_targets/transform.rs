#![no_main]

use js_deobfuscator::extractor::{tokens, TokenKind};
use js_deobfuscator::{Deobfuscator, EngineConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);

    // Skip empty or extremely long inputs to focus fuzzing efforts
    if input.trim().is_empty() || input.len() > 100_000 {
        return;
    }

    let deobfuscator = Deobfuscator::new(&EngineConfig::default());
    let Ok(out) = deobfuscator.transform(&input) else {
        return;
    };

    for token in tokens(&out.deobfuscated) {
        match token.kind {
            TokenKind::Identifier => assert!(!out.mappings.contains_key(token.text)),
            TokenKind::Number => assert!(!out.numeric_mappings.contains_key(token.text)),
        }
    }
});

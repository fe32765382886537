//! Shape heuristics deciding whether an identifier or numeric literal looks
//! like obfuscator output.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// JavaScript keywords. Never renamed, never emitted as a replacement.
pub static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "break", "case", "catch", "class", "const", "continue", "debugger", "default",
        "delete", "do", "else", "export", "extends", "finally", "for", "function",
        "if", "import", "in", "instanceof", "let", "new", "return", "super",
        "switch", "this", "throw", "try", "typeof", "var", "void", "while", "with", "yield",
    ]
    .into_iter()
    .collect()
});

/// Host, DOM and download APIs that keep their names whatever their shape.
pub static PROTECTED_IDENTIFIERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "document", "window", "navigator", "location", "console",
        "getElementById", "querySelector", "querySelectorAll",
        "createElement", "appendChild", "removeChild", "innerHTML",
        "addEventListener", "removeEventListener", "setTimeout", "setInterval",
        "setClipboardCopyData", "clearTimeout", "clearInterval",
        "localStorage", "sessionStorage", "fetch", "XMLHttpRequest",
        "File", "Blob", "download", "URL", "createObjectURL",
        "DownloadFile", "WebClient", "charCodeAt", "fromCharCode",
    ]
    .into_iter()
    .collect()
});

/// Literals left alone even though other rules would flag them. Compared by
/// text, so `0x10` is not covered by `16`.
pub static COMMON_NUMBERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10",
        "100", "200", "300", "400", "401", "403", "404", "500", "503",
        "24", "60", "365", "1000", "3600", "86400",
        "16", "32", "64", "128", "256", "512", "1024", "2048", "4096",
    ]
    .into_iter()
    .collect()
});

static VALID_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_$][a-zA-Z0-9_$]*$").unwrap());
static SIGIL_HEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[_$][0-9a-fA-F]+$").unwrap());
static UNDERSCORE_0X: Lazy<Regex> = Lazy::new(|| Regex::new(r"^_0x[0-9a-fA-F]").unwrap());
static CASE_TRANSITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z][A-Z]|[A-Z][a-z]").unwrap());
static PASCAL_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-z]+$").unwrap());
static CAMEL_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]+[A-Z][a-z]*$").unwrap());
static HEX_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?0x[0-9a-fA-F]+$").unwrap());
static FOUR_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4,}$").unwrap());

pub fn is_valid_identifier(name: &str) -> bool {
    VALID_IDENTIFIER.is_match(name)
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(name)
}

pub fn is_obfuscated_identifier(name: &str) -> bool {
    if name.len() <= 2 && is_valid_identifier(name) {
        return true;
    }
    if SIGIL_HEX.is_match(name) || UNDERSCORE_0X.is_match(name) {
        return true;
    }
    if is_valid_identifier(name) && name.len() > 2 {
        return CASE_TRANSITION.is_match(name)
            && !PASCAL_CASE.is_match(name)
            && !CAMEL_CASE.is_match(name);
    }
    false
}

/// Numeric value of a literal: `0x` forms as signed hex, anything else by
/// its leading decimal digits. Out-of-range values saturate.
pub fn parse_literal(literal: &str) -> Option<i128> {
    if HEX_LITERAL.is_match(literal) {
        let negative = literal.starts_with('-');
        let digits = literal.trim_start_matches(['-', '+'])[2..].as_bytes();
        let magnitude = digits.iter().fold(0i128, |acc, b| {
            let digit = (*b as char).to_digit(16).unwrap_or(0) as i128;
            acc.saturating_mul(16).saturating_add(digit)
        });
        return Some(if negative { -magnitude } else { magnitude });
    }

    let trimmed = literal.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: Vec<u8> = rest.bytes().take_while(u8::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.iter().fold(0i128, |acc, b| {
        acc.saturating_mul(10).saturating_add((b - b'0') as i128)
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Lowercase hex rendering, with a leading `-` for negative values.
fn to_hex_string(value: i128) -> String {
    if value < 0 {
        format!("-{:x}", value.unsigned_abs())
    } else {
        format!("{:x}", value)
    }
}

pub fn is_obfuscated_number(literal: &str) -> bool {
    let Some(mut num) = parse_literal(literal) else {
        return false;
    };
    // signed hex is scored by magnitude
    if HEX_LITERAL.is_match(literal) {
        num = num.abs();
    }
    if COMMON_NUMBERS.contains(literal) {
        return false;
    }
    if (32..=126).contains(&num) {
        return true;
    }
    let hex = to_hex_string(num);
    if hex.len() >= 2 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return true;
    }
    if num > 1000 && num < 1_000_000 {
        return true;
    }
    if FOUR_DIGITS.is_match(literal) {
        return true;
    }
    if num > 99 && num < 1000 && num % 10 != 0 {
        return true;
    }
    (65..=90).contains(&num) || (97..=122).contains(&num) || (48..=57).contains(&num)
}

/// Classifier with the static protected set plus names supplied through
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    extra_protected: HashSet<String>,
}

impl Classifier {
    pub fn new(extra_protected: &[String]) -> Self {
        Self {
            extra_protected: extra_protected.iter().cloned().collect(),
        }
    }

    pub fn is_protected(&self, name: &str) -> bool {
        PROTECTED_IDENTIFIERS.contains(name) || self.extra_protected.contains(name)
    }

    /// True when the name may be renamed at all.
    pub fn is_renamable(&self, name: &str) -> bool {
        !is_reserved(name) && !self.is_protected(name)
    }

    pub fn is_obfuscated_identifier(&self, name: &str) -> bool {
        is_obfuscated_identifier(name)
    }

    pub fn is_obfuscated_number(&self, literal: &str) -> bool {
        is_obfuscated_number(literal)
    }
}

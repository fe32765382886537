//! Candidate discovery over raw source text.
//!
//! Everything here works on maximal runs of identifier characters
//! (`[A-Za-z0-9_$]`), so a token never starts or ends inside a longer
//! identifier. A run beginning with a letter, `_` or `$` is an identifier.
//! A run of digits, or `0x` plus hex digits, is a numeric literal. A hex
//! literal picks up a `+`/`-` immediately in front of it when that sign is
//! in unary position.

use crate::classifier::{is_reserved, Classifier};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;

static WORD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_$]+").unwrap());
static HEX_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]+$").unwrap());
static DECIMAL_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
static ANONYMIZED_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^_0x[a-fA-F0-9]{4,}$").unwrap());

static DECLARATION_SITE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:var|let|const)\s+([a-zA-Z_$][a-zA-Z0-9_$]*)").unwrap());
static FUNCTION_SITE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bfunction\s+([a-zA-Z_$][a-zA-Z0-9_$]*)").unwrap());
static FUNCTION_EXPRESSION_SITE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-zA-Z_$][a-zA-Z0-9_$]*)\s*=\s*function\b").unwrap());
static PROPERTY_SITE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.([a-zA-Z_$][a-zA-Z0-9_$]*)").unwrap());

pub(crate) fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Number,
}

/// A token located in the source. `span` includes a unary sign for signed
/// hex literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Range<usize>,
}

/// Identifier and numeric tokens in source order. Digit-led runs that are
/// not well-formed literals (`1e5`, `0abc`) are skipped.
pub fn tokens(source: &str) -> impl Iterator<Item = Token<'_>> {
    let bytes = source.as_bytes();
    WORD_RUN.find_iter(source).filter_map(move |m| {
        let run = m.as_str();
        let first = run.as_bytes()[0];
        if !first.is_ascii_digit() {
            return Some(Token {
                kind: TokenKind::Identifier,
                text: run,
                span: m.range(),
            });
        }
        if HEX_RUN.is_match(run) {
            let mut start = m.start();
            if start > 0 && matches!(bytes[start - 1], b'-' | b'+') {
                let unary = match start.checked_sub(2).map(|i| bytes[i]) {
                    None => true,
                    Some(prev) => !is_identifier_byte(prev) && prev != b')' && prev != b']',
                };
                if unary {
                    start -= 1;
                }
            }
            return Some(Token {
                kind: TokenKind::Number,
                text: &source[start..m.end()],
                span: start..m.end(),
            });
        }
        if DECIMAL_RUN.is_match(run) {
            return Some(Token {
                kind: TokenKind::Number,
                text: run,
                span: m.range(),
            });
        }
        None
    })
}

/// Every distinct identifier token in the text.
pub fn identifiers(source: &str) -> HashSet<&str> {
    tokens(source)
        .filter(|t| t.kind == TokenKind::Identifier)
        .map(|t| t.text)
        .collect()
}

/// Identifiers used as functions: followed by `(` or named by a
/// `function` declaration.
pub fn function_like(source: &str) -> HashSet<&str> {
    let bytes = source.as_bytes();
    tokens(source)
        .filter(|t| t.kind == TokenKind::Identifier)
        .filter(|t| {
            let called = bytes[t.span.end..]
                .iter()
                .find(|b| !b.is_ascii_whitespace())
                .is_some_and(|b| *b == b'(');
            called || follows_function_keyword(source, t.span.start)
        })
        .map(|t| t.text)
        .collect()
}

/// Insertion-ordered set of candidates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Candidates {
    pub identifiers: Vec<String>,
    pub numbers: Vec<String>,
}

impl Candidates {
    fn add_identifier(&mut self, seen: &mut HashSet<String>, classifier: &Classifier, name: &str) {
        if classifier.is_renamable(name) && seen.insert(name.to_string()) {
            self.identifiers.push(name.to_string());
        }
    }
}

fn starts_run(source: &str, at: usize) -> bool {
    at == 0 || !is_identifier_byte(source.as_bytes()[at - 1])
}

// `function` keyword, then at least one whitespace character, right before `at`
fn follows_function_keyword(source: &str, at: usize) -> bool {
    let before = &source[..at];
    let trimmed = before.trim_end_matches(|c: char| c.is_ascii_whitespace());
    trimmed.len() < before.len()
        && trimmed.ends_with("function")
        && starts_run(trimmed, trimmed.len() - "function".len())
}

pub fn extract(source: &str, classifier: &Classifier) -> Candidates {
    let mut candidates = Candidates::default();
    let mut seen = HashSet::new();

    for token in tokens(source).filter(|t| t.kind == TokenKind::Identifier) {
        if ANONYMIZED_NAME.is_match(token.text) {
            candidates.add_identifier(&mut seen, classifier, token.text);
        }
    }

    for site in [&*DECLARATION_SITE, &*FUNCTION_SITE, &*FUNCTION_EXPRESSION_SITE] {
        for caps in site.captures_iter(source) {
            let Some(name) = caps.get(1) else { continue };
            if starts_run(source, name.start()) && classifier.is_obfuscated_identifier(name.as_str()) {
                candidates.add_identifier(&mut seen, classifier, name.as_str());
            }
        }
    }

    for caps in PROPERTY_SITE.captures_iter(source) {
        let Some(name) = caps.get(1) else { continue };
        if classifier.is_obfuscated_identifier(name.as_str()) && !is_reserved(name.as_str()) {
            candidates.add_identifier(&mut seen, classifier, name.as_str());
        }
    }

    let mut seen_numbers = HashSet::new();
    for token in tokens(source).filter(|t| t.kind == TokenKind::Number) {
        if classifier.is_obfuscated_number(token.text) && seen_numbers.insert(token.text) {
            candidates.numbers.push(token.text.to_string());
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str, kind: TokenKind) -> Vec<&str> {
        tokens(source).filter(|t| t.kind == kind).map(|t| t.text).collect()
    }

    #[test]
    fn tokens_respect_identifier_boundaries() {
        let source = "var _0x1a2b = 0x1F + abc12 + 1e5 + x-0x10 + (-0x20);";
        assert_eq!(texts(source, TokenKind::Identifier), vec!["var", "_0x1a2b", "abc12", "x"]);
        assert_eq!(texts(source, TokenKind::Number), vec!["0x1F", "0x10", "-0x20"]);
    }

    #[test]
    fn function_roles() {
        let source = "function aB(){} var q = 1; zz (2); q.x = 3;";
        let roles = function_like(source);
        assert!(roles.contains("aB"));
        assert!(roles.contains("zz"));
        assert!(!roles.contains("q"));
        assert!(!roles.contains("x"));
    }

    #[test]
    fn extracts_each_site_kind() {
        let classifier = Classifier::default();
        let source = "var _0xabcd = 1; let n = 2; function fN() {} hX = function () {}; o.qW = _0x9f9f9f;";
        let found = extract(source, &classifier);
        for name in ["_0xabcd", "_0x9f9f9f", "n", "fN", "hX", "o", "qW"] {
            let expected = name != "o";
            assert_eq!(found.identifiers.iter().any(|i| i == name), expected, "{name}");
        }
    }

    #[test]
    fn candidates_are_deduplicated() {
        let classifier = Classifier::default();
        let found = extract("var a = 777; var a = 777; a.a = 777;", &classifier);
        assert_eq!(found.identifiers, vec!["a"]);
        assert_eq!(found.numbers, vec!["777"]);
    }

    #[test]
    fn protected_and_reserved_are_never_candidates() {
        let classifier = Classifier::default();
        let found = extract("document.getElementById('x').innerHTML = 1; x.do = 2;", &classifier);
        assert!(found.identifiers.is_empty(), "{:?}", found.identifiers);
    }
}

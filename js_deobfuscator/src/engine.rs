//! Mapping construction and whole-token substitution.

use crate::classifier::{parse_literal, Classifier};
use crate::extractor::{self, Candidates, TokenKind};
use crate::naming::{NamingPolicy, Role};
use std::collections::BTreeMap;
use tracing::debug;

/// How numeric candidates are replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberMode {
    /// Fresh alphabetic token per literal.
    #[default]
    Alphabetic,
    /// Printable char codes become `'c'`, everything else its decimal value.
    DecodeChars,
}

/// Mutable state of a single transformation.
#[derive(Debug, Default)]
pub struct Session {
    naming: NamingPolicy,
    pub mappings: BTreeMap<String, String>,
    pub numeric_mappings: BTreeMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves every identifier in `source` so no generated name collides
    /// with one that stays untouched.
    pub fn seed_from_source(&mut self, source: &str) {
        self.naming.seed(extractor::identifiers(source));
    }

    pub fn build_identifier_mappings(&mut self, source: &str, candidates: &Candidates, classifier: &Classifier) {
        let function_like = extractor::function_like(source);
        for identifier in &candidates.identifiers {
            if self.mappings.contains_key(identifier) || !classifier.is_renamable(identifier) {
                continue;
            }
            let role = if function_like.contains(identifier.as_str()) {
                Role::Function
            } else {
                Role::Variable
            };
            let name = self.naming.generate_meaningful_name(role);
            debug!(original = %identifier, replacement = %name, %role, "identifier mapped");
            self.mappings.insert(identifier.clone(), name);
        }
    }

    pub fn build_numeric_mappings(&mut self, candidates: &Candidates, mode: NumberMode) {
        for literal in &candidates.numbers {
            if self.numeric_mappings.contains_key(literal) {
                continue;
            }
            let replacement = match mode {
                NumberMode::Alphabetic => self.naming.generate_alphabetic_name(),
                NumberMode::DecodeChars => decode_char(literal),
            };
            debug!(original = %literal, replacement = %replacement, "number mapped");
            self.numeric_mappings.insert(literal.clone(), replacement);
        }
    }
}

fn decode_char(literal: &str) -> String {
    let value = parse_literal(literal).unwrap_or(0);
    match u8::try_from(value) {
        Ok(code @ 32..=126) => match code as char {
            '\'' => "'\\''".to_string(),
            '\\' => "'\\\\'".to_string(),
            c => format!("'{}'", c),
        },
        _ => value.to_string(),
    }
}

/// Rewrites every token of `kind` found in `mapping`. Tokens are located by
/// the same scanner that produced the candidates, so only whole tokens are
/// replaced and replacements are never rescanned.
pub fn substitute(text: &str, kind: TokenKind, mapping: &BTreeMap<String, String>) -> String {
    if mapping.is_empty() {
        return text.to_string();
    }
    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    for token in extractor::tokens(text).filter(|t| t.kind == kind) {
        if let Some(replacement) = mapping.get(token.text) {
            output.push_str(&text[last..token.span.start]);
            output.push_str(replacement);
            last = token.span.end;
        }
    }
    output.push_str(&text[last..]);
    output
}

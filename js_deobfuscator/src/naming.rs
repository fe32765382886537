//! Replacement name generation.

use crate::classifier::is_reserved;
use std::collections::HashSet;
use std::fmt;

const VARIABLE_NAMES: &[&str] = &[
    "element", "container", "wrapper", "content", "data", "result", "value", "item",
    "config", "options", "settings", "params", "args", "response", "request",
    "target", "source", "destination", "handler", "callback", "listener",
    "counter", "index", "length", "size", "count", "total", "sum",
    "message", "text", "string", "buffer", "cache", "storage", "memory",
    "timer", "interval", "timeout", "delay", "duration", "timestamp",
    "url", "path", "route", "endpoint", "api", "service", "client",
    "user", "session", "token", "key", "id", "name", "title", "description",
];

const FUNCTION_NAMES: &[&str] = &[
    "initialize", "setup", "configure", "process", "execute", "run", "start",
    "stop", "pause", "resume", "update", "refresh", "reload", "reset",
    "create", "build", "generate", "construct", "make", "produce",
    "parse", "format", "convert", "transform", "encode", "decode",
    "validate", "verify", "check", "test", "confirm", "ensure",
    "get", "set", "add", "remove", "delete", "insert", "append",
    "find", "search", "filter", "sort", "map", "reduce", "forEach",
    "handle", "manage", "control", "monitor", "track", "observe",
    "send", "receive", "fetch", "load", "save", "store", "retrieve",
    "show", "hide", "display", "render", "draw", "paint", "animate",
];

/// What an identifier is used as, which picks the word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Variable,
    Function,
}

impl Role {
    fn words(self) -> &'static [&'static str] {
        match self {
            Role::Variable => VARIABLE_NAMES,
            Role::Function => FUNCTION_NAMES,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Variable => write!(f, "variable"),
            Role::Function => write!(f, "function"),
        }
    }
}

/// Counters and issued names for one session.
#[derive(Debug, Default)]
pub struct NamingPolicy {
    variable_counter: usize,
    function_counter: usize,
    numeric_counter: usize,
    issued: HashSet<String>,
    // tokens the alphabetic generator must not produce
    occupied: HashSet<String>,
}

impl NamingPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks names already present in the source as taken. Neither
    /// generator will emit them.
    pub fn seed<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            self.occupied.insert(name.clone());
            self.issued.insert(name);
        }
    }

    pub fn generate_meaningful_name(&mut self, role: Role) -> String {
        let words = role.words();
        loop {
            let counter = match role {
                Role::Variable => &mut self.variable_counter,
                Role::Function => &mut self.function_counter,
            };
            let n = *counter;
            *counter += 1;

            let base = words[n % words.len()];
            let suffix = n / words.len();
            let name = if suffix == 0 {
                base.to_string()
            } else {
                format!("{}{}", base, suffix + 1)
            };
            if !self.issued.contains(&name) && !is_reserved(&name) {
                self.issued.insert(name.clone());
                return name;
            }
        }
    }

    /// Next token of the `a, b, …, z, aa, ab, …` sequence.
    pub fn generate_alphabetic_name(&mut self) -> String {
        loop {
            let token = alphabetic(self.numeric_counter);
            self.numeric_counter += 1;
            if !is_reserved(&token) && !self.occupied.contains(&token) {
                return token;
            }
        }
    }
}

/// Bijective base-26: 0 → `a`, 25 → `z`, 26 → `aa`.
fn alphabetic(mut n: usize) -> String {
    let mut bytes = Vec::new();
    loop {
        bytes.push(b'a' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    bytes.reverse();
    String::from_utf8(bytes).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabetic_sequence() {
        assert_eq!(alphabetic(0), "a");
        assert_eq!(alphabetic(25), "z");
        assert_eq!(alphabetic(26), "aa");
        assert_eq!(alphabetic(27), "ab");
        assert_eq!(alphabetic(51), "az");
        assert_eq!(alphabetic(52), "ba");
        assert_eq!(alphabetic(701), "zz");
        assert_eq!(alphabetic(702), "aaa");
    }

    #[test]
    fn variable_names_follow_the_list() {
        let mut naming = NamingPolicy::new();
        assert_eq!(naming.generate_meaningful_name(Role::Variable), "element");
        assert_eq!(naming.generate_meaningful_name(Role::Variable), "container");
        assert_eq!(naming.generate_meaningful_name(Role::Function), "initialize");
        assert_eq!(naming.generate_meaningful_name(Role::Variable), "wrapper");
    }

    #[test]
    fn wrapped_names_get_a_numeric_suffix() {
        let mut naming = NamingPolicy::new();
        let names: Vec<String> = (0..VARIABLE_NAMES.len() + 2)
            .map(|_| naming.generate_meaningful_name(Role::Variable))
            .collect();
        assert_eq!(names[VARIABLE_NAMES.len()], "element2");
        assert_eq!(names[VARIABLE_NAMES.len() + 1], "container2");
    }

    #[test]
    fn seeded_names_are_skipped() {
        let mut naming = NamingPolicy::new();
        naming.seed(["element", "a", "c"]);
        assert_eq!(naming.generate_meaningful_name(Role::Variable), "container");
        assert_eq!(naming.generate_alphabetic_name(), "b");
        assert_eq!(naming.generate_alphabetic_name(), "d");
    }

    #[test]
    fn function_list_never_emits_keywords() {
        let mut naming = NamingPolicy::new();
        let names: Vec<String> = (0..FUNCTION_NAMES.len())
            .map(|_| naming.generate_meaningful_name(Role::Function))
            .collect();
        assert!(!names.iter().any(|n| n == "delete"));
    }

    #[test]
    fn alphabetic_skips_keywords() {
        let mut naming = NamingPolicy::new();
        let tokens: Vec<String> = (0..300).map(|_| naming.generate_alphabetic_name()).collect();
        assert!(!tokens.iter().any(|t| t == "do" || t == "if" || t == "in"));
    }
}

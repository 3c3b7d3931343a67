//! Scoping of user CSS to the preview container.
//!
//! Card CSS is written as if it owned the whole page. Before it is installed
//! next to the editor, every style rule is rewritten to apply only inside the
//! container selector (`.card` by default). The transform is purely textual
//! and never fails: fragments it cannot make sense of are dropped.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// At-rules whose body is a list of ordinary style rules that need scoping.
const GROUPING_AT_RULES: &[&str] = &["media", "supports", "container", "layer", "document"];

/// Grouping at-rules nested deeper than this are dropped with their contents.
const MAX_NESTING_DEPTH: usize = 16;

/// Rewrite `css` so that its rules only match inside `container`.
///
/// Output order is `@import` statements, then `@keyframes` blocks (both
/// verbatim), then the scoped rules, one per line.
pub fn scope(css: &str, container: &str) -> String {
    static COMMENT: OnceLock<Regex> = OnceLock::new();
    static IMPORT: OnceLock<Regex> = OnceLock::new();
    static KEYFRAMES: OnceLock<Regex> = OnceLock::new();

    let comment = COMMENT.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
    let import = IMPORT.get_or_init(|| {
        Regex::new(r#"@import\s+(?:url\([^)]*\)|"[^"]*"|'[^']*')[^;{}]*;"#).unwrap()
    });
    let keyframes = KEYFRAMES.get_or_init(|| {
        Regex::new(r"@(?:-[a-z]+-)?keyframes\s+[^\s{]+\s*\{(?:[^{}]*\{[^{}]*\})+[^{}]*\}")
            .unwrap()
    });

    let container = container.trim();
    let css = comment.replace_all(css, "");

    let mut hoisted: Vec<String> = Vec::new();
    let css = import.replace_all(&css, |caps: &Captures| {
        hoisted.push(caps[0].trim().to_string());
        ""
    });
    let css = keyframes.replace_all(&css, |caps: &Captures| {
        hoisted.push(caps[0].trim().to_string());
        ""
    });

    hoisted.extend(scope_rules(&css, container, 0));
    hoisted.join("\n")
}

fn scope_rules(css: &str, container: &str, depth: usize) -> Vec<String> {
    let mut rules = Vec::new();
    let mut rest = css;

    while let Some(open) = find_unquoted(rest, b'{') {
        let start = prelude_start(&rest[..open], &mut rules);
        let prelude = rest[start..open].trim_end();

        let Some(close) = matching_brace(rest, open) else {
            tracing::debug!("unbalanced braces, scoping the remainder rule by rule");
            rules.extend(split_unbalanced(&rest[start..], container, depth));
            return rules;
        };

        let body = &rest[open + 1..close];
        match scope_rule(prelude, body, &rest[start..=close], container, depth) {
            Some(rule) => rules.push(rule),
            None => tracing::debug!(prelude, "dropping rule without a selector"),
        }
        rest = &rest[close + 1..];
    }

    if !rest.trim().is_empty() {
        prelude_start(rest, &mut rules);
    }

    rules
}

/// Find where the rule prelude begins in the text before a `{`. Complete
/// `@` statements ending in `;` are emitted as they are; anything else ahead
/// of the prelude (stray braces, dangling declarations) is dropped.
fn prelude_start(text: &str, rules: &mut Vec<String>) -> usize {
    let mut start = match text.rfind('}') {
        Some(i) => {
            tracing::debug!("dropping stray closing brace");
            i + 1
        }
        None => 0,
    };

    if let Some(last) = text[start..].rfind(';') {
        let last = start + last;
        for statement in text[start..last].split(';').map(str::trim) {
            if statement.starts_with('@') {
                rules.push(format!("{};", statement));
            } else if !statement.is_empty() {
                tracing::debug!(statement, "dropping stray declaration");
            }
        }
        start = last + 1;
    }

    let tail = &text[start..];
    start + (tail.len() - tail.trim_start().len())
}

/// Fallback for text with an unterminated block: split on `}` and scope each
/// piece that still has a selector and a `{`.
fn split_unbalanced(css: &str, container: &str, depth: usize) -> Vec<String> {
    css.split('}')
        .filter_map(|piece| {
            let (prelude, body) = piece.split_once('{')?;
            let prelude = prelude.trim();
            let body = body.replace('{', "");
            let raw = format!("{}{{{}}}", prelude, body);
            scope_rule(prelude, &body, &raw, container, depth)
        })
        .collect()
}

/// Scope one rule. `raw` is the rule exactly as written, used for rules
/// that are emitted unchanged.
fn scope_rule(
    prelude: &str,
    body: &str,
    raw: &str,
    container: &str,
    depth: usize,
) -> Option<String> {
    if prelude.is_empty() {
        return None;
    }

    if let Some(at_rule) = prelude.strip_prefix('@') {
        let name = at_rule
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect::<String>()
            .to_ascii_lowercase();
        if GROUPING_AT_RULES.contains(&name.as_str()) {
            if depth >= MAX_NESTING_DEPTH {
                tracing::debug!(
                    prelude,
                    max_depth = MAX_NESTING_DEPTH,
                    "dropping deeply nested at-rule"
                );
                return None;
            }
            let inner = scope_rules(body, container, depth + 1);
            return Some(format!("{} {{\n{}\n}}", prelude, inner.join("\n")));
        }
        // @font-face, @page, @property and friends
        return Some(raw.to_string());
    }

    let parts: Vec<&str> = split_selectors(prelude)
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if !parts.is_empty() && parts.iter().all(|s| is_unscoped(s, container)) {
        return Some(raw.to_string());
    }

    let selectors: Vec<String> = parts
        .into_iter()
        .map(|s| {
            if is_unscoped(s, container) {
                s.to_string()
            } else {
                format!("{} {}", container, s)
            }
        })
        .collect();

    if selectors.is_empty() {
        return None;
    }
    Some(format!("{} {{{}}}", selectors.join(", "), body))
}

/// Selectors already aimed at the container, or at `:root`, stay as written.
fn is_unscoped(selector: &str, container: &str) -> bool {
    if selector.starts_with(":root") {
        return true;
    }
    match selector.strip_prefix(container) {
        Some(after) => !after
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
        None => false,
    }
}

/// Split a selector list on commas that are not inside `()` or `[]`.
fn split_selectors(prelude: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, b) in prelude.bytes().enumerate() {
        match b {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                parts.push(&prelude[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&prelude[start..]);
    parts
}

/// Index of the first `target` byte that is outside a quoted string.
fn find_unquoted(s: &str, target: u8) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None if b == target => return Some(i),
            None => {
                if b == b'"' || b == b'\'' {
                    quote = Some(b);
                }
            }
        }
        i += 1;
    }
    None
}

/// Index of the `}` closing the `{` at `open`, skipping quoted strings.
fn matching_brace(s: &str, open: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = open;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    None
}

//! Scanner for `{{...}}` tags.
//!
//! Templates are plain HTML with mustache-style tags mixed in. The scanner
//! splits a template into literal text and tags in a single pass; everything
//! downstream (substitution, conditionals, diagnostics) works on these
//! segments so that no stage ever re-reads text produced by another.

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A slice of a template: either literal text or a `{{...}}` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Tag(Tag<'a>),
}

/// A single `{{...}}` tag as it appears in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    /// The full tag including braces, exactly as written.
    pub raw: &'a str,
    /// The text between the braces with surrounding whitespace removed.
    pub inner: &'a str,
    /// Byte offset of the opening braces in the source.
    pub start: usize,
}

/// What a tag means, based on its leading sigil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind<'a> {
    /// `{{#name}}` (negated = false) or `{{^name}}` (negated = true)
    Open { name: &'a str, negated: bool },
    /// `{{/name}}`
    Close { name: &'a str },
    /// `{{type:name}}`
    Input { name: &'a str },
    /// `{{name}}`, or anything else that is not structurally meaningful
    Field { name: &'a str },
}

impl<'a> Tag<'a> {
    pub fn kind(&self) -> TagKind<'a> {
        let inner = self.inner;
        let sigil = |prefix: &str| {
            inner
                .strip_prefix(prefix)
                .map(str::trim)
                .filter(|name| !name.is_empty())
        };

        if let Some(name) = sigil("#") {
            TagKind::Open {
                name,
                negated: false,
            }
        } else if let Some(name) = sigil("^") {
            TagKind::Open {
                name,
                negated: true,
            }
        } else if let Some(name) = sigil("/") {
            TagKind::Close { name }
        } else if let Some(name) = sigil("type:") {
            TagKind::Input { name }
        } else {
            TagKind::Field { name: inner }
        }
    }
}

/// Split `src` into text and tag segments.
///
/// An opening `{{` without a matching `}}` is left as text. When a tag body
/// itself contains `{{`, scanning restarts at the innermost opening so that
/// `{{ {{term}}` yields the text `{{ ` followed by the tag `{{term}}`.
pub fn scan(src: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while let Some(rel) = src[i..].find(OPEN) {
        let open = i + rel;
        let body_start = open + OPEN.len();
        let Some(close_rel) = src[body_start..].find(CLOSE) else {
            break;
        };
        let close = body_start + close_rel;
        let body = &src[body_start..close];

        if let Some(nested) = body.rfind(OPEN) {
            i = body_start + nested;
            continue;
        }

        if open > text_start {
            segments.push(Segment::Text(&src[text_start..open]));
        }
        let end = close + CLOSE.len();
        segments.push(Segment::Tag(Tag {
            raw: &src[open..end],
            inner: body.trim(),
            start: open,
        }));
        i = end;
        text_start = end;
    }

    if text_start < src.len() {
        segments.push(Segment::Text(&src[text_start..]));
    }

    segments
}

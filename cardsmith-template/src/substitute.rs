use crate::record::{FieldRecord, FieldValue};
use crate::token::{scan, Segment, TagKind};
use regex::Regex;
use std::fmt::Write;
use std::sync::OnceLock;

/// Field placeholders the substitutor knows how to fill. Any other `{{name}}`
/// passes through untouched.
pub const KNOWN_FIELDS: &[&str] = &[
    "audio",
    "term",
    "reading",
    "translation",
    "transliteration",
    "Tags",
    "picture",
];

pub fn is_known_field(name: &str) -> bool {
    KNOWN_FIELDS.contains(&name)
}

/// Replace field placeholders and `{{type:name}}` inputs with markup.
///
/// Conditional tags and unrecognised tags are copied through verbatim.
pub fn substitute(template: &str, record: &FieldRecord) -> String {
    let mut out = String::with_capacity(template.len());
    let mut audio_count = 0;

    for segment in scan(template) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Tag(tag) => match tag.kind() {
                TagKind::Field { name } if is_known_field(name) => {
                    if record.is_sentinel(name) {
                        tracing::trace!(field = name, "keeping sentinel placeholder");
                        out.push_str(tag.raw);
                    } else {
                        push_field(&mut out, name, record, &mut audio_count);
                    }
                }
                TagKind::Input { name } => {
                    let placeholder = input_placeholder(&template[..tag.start])
                        .unwrap_or_else(|| name.to_string());
                    let _ = write!(
                        out,
                        r#"<input type="text" class="type-answer" data-field="{}" placeholder="{}">"#,
                        escape_attr(name),
                        escape_attr(&placeholder)
                    );
                }
                _ => out.push_str(tag.raw),
            },
        }
    }

    out
}

fn push_field(out: &mut String, name: &str, record: &FieldRecord, audio_count: &mut usize) {
    match name {
        "audio" => {
            if let Some(src) = record.text(name).filter(|s| !s.is_empty()) {
                let id = format!("card-audio-{}", audio_count);
                *audio_count += 1;
                let _ = write!(
                    out,
                    r#"<audio id="{id}" src="{}" preload="none" style="display:none"></audio><button type="button" class="play-audio" onclick="document.getElementById('{id}').play()">&#9654;</button>"#,
                    escape_attr(src)
                );
            }
        }
        "picture" => {
            if let Some(src) = record.text(name).filter(|s| !s.is_empty()) {
                let _ = write!(out, r#"<img src="{}" alt="">"#, escape_attr(src));
            }
        }
        _ => match record.get(name) {
            Some(FieldValue::Text(text)) => out.push_str(text),
            Some(FieldValue::Tags(tags)) => out.push_str(&tags.join(", ")),
            None => {}
        },
    }
}

/// Look up the label for typed-answer inputs: the first `placeholder="..."`
/// on an `input-container` element in `preceding` (the template text before
/// the input tag). Whitespace runs are collapsed first so reformatted markup
/// still matches.
fn input_placeholder(preceding: &str) -> Option<String> {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    static CONTAINER_TAG: OnceLock<Regex> = OnceLock::new();
    static PLACEHOLDER_ATTR: OnceLock<Regex> = OnceLock::new();

    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").unwrap());
    let container = CONTAINER_TAG.get_or_init(|| {
        Regex::new(r#"<[^<>]* id ?= ?["']input-container["'][^<>]*>"#).unwrap()
    });
    let placeholder = PLACEHOLDER_ATTR
        .get_or_init(|| Regex::new(r#" placeholder ?= ?"([^"]*)""#).unwrap());

    let normalized = whitespace.replace_all(preceding, " ");
    container.find_iter(&normalized).find_map(|tag| {
        placeholder
            .captures(tag.as_str())
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    })
}

pub(crate) fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

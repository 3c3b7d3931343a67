//! Standalone preview pages: one rendered face wrapped in a minimal HTML
//! document with the scoped card stylesheet inlined.

use crate::config::PreviewConfig;
use crate::design::CardDesign;
use crate::record::FieldRecord;
use crate::render::Face;
use crate::substitute::escape_attr;
use std::fmt::Write;

/// Base styles for the page around the card; user CSS comes after these.
const PREVIEW_BASE_STYLES: &str = "html,body{margin:0;padding:0;}\
body{display:flex;justify-content:center;padding:2rem;background:#f4f4f5;}\
.empty-front-notice{padding:1rem;border:1px dashed #a1a1aa;color:#52525b;font-family:sans-serif;}";

/// Build a complete HTML page previewing one face of `record`.
pub fn document(
    design: &CardDesign,
    record: &FieldRecord,
    face: Face,
    config: &PreviewConfig,
) -> String {
    let body = design.render(record, face, config);
    // A literal `</style>` in user CSS would end the element early.
    let css = design.scoped_css(config).replace("</", "<\\/");
    let title = match design.design_name.trim() {
        "" => "Card preview",
        name => name,
    };

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
<style>{}</style>
<style>
{}
</style>
</head>
<body>
<div {}>
{}
</div>
</body>
</html>
"#,
        escape_attr(title),
        PREVIEW_BASE_STYLES,
        css,
        wrapper_attrs(config.container()),
        body
    );
    html
}

/// Attributes for the element matched by the container selector. Only
/// simple `#id` and `.class` compounds can be expressed; anything else gets
/// the default `card` class.
fn wrapper_attrs(selector: &str) -> String {
    const FALLBACK: &str = r#"class="card""#;

    let mut id = None;
    let mut classes = Vec::new();
    let mut rest = selector;

    while let Some(sigil) = rest.chars().next() {
        if sigil != '.' && sigil != '#' {
            tracing::debug!(selector, "container selector is not a plain class or id");
            return FALLBACK.to_string();
        }
        let after = &rest[1..];
        let end = after.find(['.', '#']).unwrap_or(after.len());
        let name = &after[..end];
        if !is_identifier(name) {
            tracing::debug!(selector, "container selector is not a plain class or id");
            return FALLBACK.to_string();
        }
        if sigil == '#' {
            id = Some(name);
        } else {
            classes.push(name);
        }
        rest = &after[end..];
    }

    match (id, classes.is_empty()) {
        (Some(id), true) => format!(r#"id="{}""#, id),
        (Some(id), false) => format!(r#"id="{}" class="{}""#, id, classes.join(" ")),
        (None, false) => format!(r#"class="{}""#, classes.join(" ")),
        (None, true) => FALLBACK.to_string(),
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

//! # Cardsmith card templates
//!
//! Rendering engine for flashcard designs: HTML templates with
//! mustache-style field placeholders, conditional sections and typed-answer
//! inputs, plus the CSS scoping needed to preview a card next to an editor.
//!
//! ## Features
//! - Field substitution (`{{term}}`, `{{audio}}`, `{{picture}}`, `{{Tags}}`, ...)
//! - Nested conditional sections (`{{#field}}...{{/field}}`, `{{^field}}...{{/field}}`)
//! - Typed-answer inputs (`{{type:field}}`)
//! - Fallback notice for blank front faces
//! - Stylesheet scoping to a preview container
//! - Deck loading and wrap-around navigation
//! - Template diagnostics that never block rendering
//!
//! ## Example
//! ```
//! use cardsmith_template::{render, Face, FieldRecord};
//!
//! let record = FieldRecord::new().with("term", "猫").with("reading", "ねこ");
//! let html = render(
//!     "<h1>{{term}}</h1>{{#reading}}<p>{{reading}}</p>{{/reading}}",
//!     &record,
//!     Face::Front,
//! );
//! assert_eq!(html, "<h1>猫</h1><p>ねこ</p>");
//! ```
//!
//! ## Example: scoped stylesheet
//! ```
//! let css = cardsmith_template::scope("h1 { color: teal }", ".card");
//! assert_eq!(css, ".card h1 { color: teal }");
//! ```

pub mod conditional;
pub mod config;
pub mod css;
pub mod deck;
pub mod design;
pub mod editor;
pub mod error;
pub mod preview;
pub mod record;
pub mod render;
pub mod substitute;
pub mod token;
pub mod validator;

// --- Core types ---
pub use config::{FallbackNotice, PreviewConfig, DEFAULT_CONTAINER_SELECTOR};
pub use error::{CardError, CardResult};
pub use record::{FieldRecord, FieldValue};
pub use render::Face;

// --- Decks, designs and editor state ---
pub use deck::{Deck, DeckCursor};
pub use design::CardDesign;
pub use editor::{EditorSnapshot, EditorState, EditorTab, Preview};
pub use validator::{check_design, check_template, TemplateIssue};

/// Render one face of a card with the default configuration.
pub fn render(template: &str, record: &FieldRecord, face: Face) -> String {
    render::render(template, record, face)
}

/// Render one face of a card with a custom configuration
pub fn render_with_config(
    template: &str,
    record: &FieldRecord,
    face: Face,
    config: &PreviewConfig,
) -> String {
    render::render_with_config(template, record, face, config)
}

/// Replace field placeholders and typed-answer inputs, leaving blocks alone.
pub fn substitute(template: &str, record: &FieldRecord) -> String {
    substitute::substitute(template, record)
}

/// Prune conditional sections against `record`.
pub fn evaluate(html: &str, record: &FieldRecord) -> String {
    conditional::evaluate(html, record)
}

/// Scope a stylesheet to `container`.
pub fn scope(css: &str, container: &str) -> String {
    css::scope(css, container)
}

/// Index after `index` in a deck of `count` records, wrapping to the start.
pub fn next(index: usize, count: usize) -> usize {
    deck::next(index, count)
}

/// Index before `index` in a deck of `count` records, wrapping to the end.
pub fn previous(index: usize, count: usize) -> usize {
    deck::previous(index, count)
}

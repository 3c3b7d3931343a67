//! Editor session state.
//!
//! The UI layer owns one [`EditorState`] and feeds user actions into it;
//! rendering reads from it but never mutates it.

use crate::config::PreviewConfig;
use crate::deck::{Deck, DeckCursor};
use crate::design::CardDesign;
use crate::record::FieldRecord;
use crate::render::Face;
use serde::{Deserialize, Serialize};

/// Which buffer the editor is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorTab {
    #[default]
    FrontHtml,
    BackHtml,
    CardCss,
}

/// UI preferences persisted between sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSnapshot {
    pub active_tab: EditorTab,
    pub view_side: Face,
}

/// What the preview pane shows: rendered face HTML and the scoped stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub html: String,
    pub css: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    pub design: CardDesign,
    active_tab: EditorTab,
    view_side: Face,
    copied: bool,
    cursor: DeckCursor,
}

impl EditorState {
    pub fn new(design: CardDesign) -> Self {
        Self {
            design,
            ..Self::default()
        }
    }

    pub fn restore(design: CardDesign, snapshot: EditorSnapshot) -> Self {
        Self {
            design,
            active_tab: snapshot.active_tab,
            view_side: snapshot.view_side,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            active_tab: self.active_tab,
            view_side: self.view_side,
        }
    }

    pub fn active_tab(&self) -> EditorTab {
        self.active_tab
    }

    pub fn view_side(&self) -> Face {
        self.view_side
    }

    /// Whether the active buffer has been copied since it last changed.
    pub fn copied(&self) -> bool {
        self.copied
    }

    pub fn cursor(&self) -> DeckCursor {
        self.cursor
    }

    pub fn select_tab(&mut self, tab: EditorTab) {
        self.active_tab = tab;
        self.copied = false;
    }

    pub fn select_face(&mut self, face: Face) {
        self.view_side = face;
    }

    /// Text of the buffer under the active tab; this is what "copy" copies.
    pub fn active_content(&self) -> &str {
        match self.active_tab {
            EditorTab::FrontHtml => &self.design.front_html,
            EditorTab::BackHtml => &self.design.back_html,
            EditorTab::CardCss => &self.design.card_css,
        }
    }

    /// Replace the active buffer.
    pub fn edit_active(&mut self, text: impl Into<String>) {
        let text = text.into();
        match self.active_tab {
            EditorTab::FrontHtml => self.design.front_html = text,
            EditorTab::BackHtml => self.design.back_html = text,
            EditorTab::CardCss => self.design.card_css = text,
        }
        self.copied = false;
    }

    /// Called by the clipboard adapter once a copy has succeeded.
    pub fn mark_copied(&mut self) {
        self.copied = true;
    }

    pub fn next_card(&mut self, deck: &Deck) -> usize {
        self.cursor.advance(deck.len())
    }

    pub fn previous_card(&mut self, deck: &Deck) -> usize {
        self.cursor.retreat(deck.len())
    }

    /// Render the selected face of the current record.
    ///
    /// Falls back to the deck defaults, then to an empty record, when the
    /// deck has nothing at the cursor.
    pub fn preview(&self, deck: &Deck, config: &PreviewConfig) -> Preview {
        let empty = FieldRecord::new();
        let record = deck
            .record_or_defaults(self.cursor.index())
            .unwrap_or(&empty);

        Preview {
            html: self.design.render(record, self.view_side, config),
            css: self.design.scoped_css(config),
        }
    }
}

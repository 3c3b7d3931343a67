use crate::config::PreviewConfig;
use crate::css::scope;
use crate::error::CardResult;
use crate::record::FieldRecord;
use crate::render::{render_with_config, Face};
use serde::{Deserialize, Serialize};

/// A card design: front and back templates plus the card stylesheet.
///
/// This is also the import/export file format:
///
/// ```json
/// { "frontHtml": "...", "backHtml": "...", "cardCss": "...", "designName": "..." }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardDesign {
    pub front_html: String,
    pub back_html: String,
    pub card_css: String,
    /// Display name only; nothing in rendering looks at it.
    pub design_name: String,
}

impl CardDesign {
    pub fn from_json(json: &str) -> CardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> CardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The template for one face
    pub fn template(&self, face: Face) -> &str {
        match face {
            Face::Front => &self.front_html,
            Face::Back => &self.back_html,
        }
    }

    pub fn render(&self, record: &FieldRecord, face: Face, config: &PreviewConfig) -> String {
        render_with_config(self.template(face), record, face, config)
    }

    /// The card stylesheet scoped to the configured container.
    pub fn scoped_css(&self, config: &PreviewConfig) -> String {
        scope(&self.card_css, config.container())
    }
}

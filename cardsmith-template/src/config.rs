use crate::error::CardResult;
use crate::substitute::escape_attr;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTAINER_SELECTOR: &str = ".card";

/// Settings for previews, usually read from a small YAML file.
///
/// ```yaml
/// containerSelector: ".card"
/// fallback:
///   message: "Nothing on the front yet."
///   helpUrl: "https://example.com/help"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreviewConfig {
    /// Selector every user CSS rule is scoped under; also the preview wrapper class.
    pub container_selector: String,
    pub fallback: FallbackNotice,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_string(),
            fallback: FallbackNotice::default(),
        }
    }
}

impl PreviewConfig {
    /// Parse a YAML config. Missing keys, or an empty document, fall back to defaults.
    pub fn from_yaml(yaml: &str) -> CardResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Option<PreviewConfig> = serde_yaml::from_str(yaml)?;
        Ok(config.unwrap_or_default())
    }

    /// The container selector with surrounding whitespace removed, or the
    /// default when the configured one is blank.
    pub fn container(&self) -> &str {
        match self.container_selector.trim() {
            "" => DEFAULT_CONTAINER_SELECTOR,
            selector => selector,
        }
    }
}

/// Notice shown in place of a front face that renders to nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FallbackNotice {
    pub message: String,
    pub help_url: String,
    pub help_label: String,
}

impl Default for FallbackNotice {
    fn default() -> Self {
        Self {
            message: "The front of this card is blank. Cards with an empty front \
                      cannot be studied, so add a field or some text to the front template."
                .to_string(),
            help_url: "https://docs.ankiweb.net/templates/errors.html#the-front-of-this-card-is-blank"
                .to_string(),
            help_label: "More information".to_string(),
        }
    }
}

impl FallbackNotice {
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="empty-front-notice"><p>{}</p><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></div>"#,
            self.message,
            escape_attr(&self.help_url),
            self.help_label
        )
    }
}

use crate::conditional::evaluate;
use crate::config::PreviewConfig;
use crate::record::FieldRecord;
use crate::substitute::substitute;
use serde::{Deserialize, Serialize};

/// Which side of the card is being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    #[default]
    Front,
    Back,
}

impl Face {
    pub fn is_front(self) -> bool {
        self == Face::Front
    }
}

/// Render one face of a card with the default fallback notice.
pub fn render(template: &str, record: &FieldRecord, face: Face) -> String {
    render_with_config(template, record, face, &PreviewConfig::default())
}

/// Render one face of a card.
///
/// Placeholders are substituted first, then conditional sections are pruned
/// against the raw record. A front face that ends up blank is replaced by
/// the configured fallback notice.
pub fn render_with_config(
    template: &str,
    record: &FieldRecord,
    face: Face,
    config: &PreviewConfig,
) -> String {
    let html = evaluate(&substitute(template, record), record);

    if face.is_front() && html.trim().is_empty() {
        tracing::debug!("front face rendered blank, showing fallback notice");
        return config.fallback.to_html();
    }

    html
}

use thiserror::Error;

pub type CardResult<T> = Result<T, CardError>;

/// Errors raised while loading decks, designs and configuration.
///
/// Rendering itself never fails; these only come from the edges where
/// external data enters the crate.
#[derive(Error, Debug)]
pub enum CardError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid record '{key}': {reason}")]
    InvalidRecord { key: String, reason: String },

    #[error("Record index {index} is out of range for a deck of {count} records")]
    RecordOutOfRange { index: usize, count: usize },

    #[error("Deck has no records")]
    EmptyDeck,
}

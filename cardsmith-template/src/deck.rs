use crate::error::{CardError, CardResult};
use crate::record::FieldRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key reserved for the template's default values; never part of the deck.
pub const DEFAULT_KEY: &str = "default";

/// Step forward through a deck of `count` records, wrapping at the end.
/// An empty deck leaves the index as it is.
pub fn next(index: usize, count: usize) -> usize {
    if count == 0 {
        return index;
    }
    (index % count + 1) % count
}

/// Step backward through a deck of `count` records, wrapping at the start.
/// An empty deck leaves the index as it is.
pub fn previous(index: usize, count: usize) -> usize {
    if count == 0 {
        return index;
    }
    (index % count + count - 1) % count
}

/// Position of the record being previewed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCursor {
    index: usize,
}

impl DeckCursor {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn advance(&mut self, count: usize) -> usize {
        self.index = next(self.index, count);
        self.index
    }

    pub fn retreat(&mut self, count: usize) -> usize {
        self.index = previous(self.index, count);
        self.index
    }
}

/// Sample records available for previewing, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    entries: Vec<(String, FieldRecord)>,
    defaults: Option<FieldRecord>,
}

impl Deck {
    /// Load a deck from a JSON object of `key -> record`.
    ///
    /// The `default` entry is kept aside as [`Deck::defaults`].
    pub fn from_json(json: &str) -> CardResult<Self> {
        let raw: Map<String, Value> = serde_json::from_str(json)?;
        let records = raw
            .into_iter()
            .map(|(key, value)| match serde_json::from_value::<FieldRecord>(value) {
                Ok(record) => Ok((key, record)),
                Err(e) => Err(CardError::InvalidRecord {
                    key,
                    reason: e.to_string(),
                }),
            })
            .collect::<CardResult<Vec<_>>>()?;

        let deck = Self::from_records(records);
        tracing::debug!(records = deck.len(), "loaded deck");
        Ok(deck)
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, FieldRecord)>,
    {
        let mut deck = Deck::default();
        for (key, record) in records {
            if key == DEFAULT_KEY {
                deck.defaults = Some(record);
            } else {
                deck.entries.push((key, record));
            }
        }
        deck
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn defaults(&self) -> Option<&FieldRecord> {
        self.defaults.as_ref()
    }

    pub fn record(&self, index: usize) -> Option<&FieldRecord> {
        self.entries.get(index).map(|(_, record)| record)
    }

    pub fn key(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(key, _)| key.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// The record at `index`, or the defaults when the index is past the end.
    pub fn record_or_defaults(&self, index: usize) -> Option<&FieldRecord> {
        self.record(index).or(self.defaults.as_ref())
    }

    /// The record at `index`, as an error when there is none.
    pub fn require(&self, index: usize) -> CardResult<&FieldRecord> {
        if self.is_empty() {
            return Err(CardError::EmptyDeck);
        }
        self.record(index).ok_or(CardError::RecordOutOfRange {
            index,
            count: self.len(),
        })
    }
}

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// A single field value on a card record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Tags(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Tags(_) => None,
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Tags(tags) => tags.is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(tags: Vec<String>) -> Self {
        FieldValue::Tags(tags)
    }
}

/// One flashcard's data, keyed by field name.
///
/// JSON `null` values are treated as absent when deserializing. Fields are
/// kept sorted by name so serialized records are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Option<FieldValue>>")]
pub struct FieldRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.fields.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// The text value of a field, if present and textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// True when the field holds its own placeholder (`{{name}}`), which
    /// decks use to mark "no value provided".
    pub fn is_sentinel(&self, name: &str) -> bool {
        self.text(name)
            .and_then(|s| s.strip_prefix("{{"))
            .and_then(|s| s.strip_suffix("}}"))
            .is_some_and(|inner| inner == name)
    }

    /// Truthiness used by conditional blocks: present, not a sentinel, and non-empty.
    pub fn is_truthy(&self, name: &str) -> bool {
        match self.get(name) {
            Some(value) => !value.is_empty() && !self.is_sentinel(name),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<BTreeMap<String, Option<FieldValue>>> for FieldRecord {
    fn from(raw: BTreeMap<String, Option<FieldValue>>) -> Self {
        let fields = raw
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .collect();
        FieldRecord { fields }
    }
}

impl Serialize for FieldRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        FieldRecord { fields }
    }
}

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A value in the metadata header after coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetaValue {
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<String>),
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Bool(b) => write!(f, "{b}"),
            MetaValue::Number(n) => write!(f, "{n}"),
            MetaValue::String(s) => f.write_str(s),
            MetaValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// Document header: reserved keys as typed fields, everything else kept in
/// its original order so a save never drops unknown properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub id: String,
    pub title: String,
    /// Insertion-ordered, no duplicates.
    pub tags: Vec<String>,
    /// ISO-8601, opaque to the core.
    pub created_at: String,
    pub updated_at: String,
    pub always_on: bool,
    pub extra: Vec<(String, MetaValue)>,
}

impl Metadata {
    pub const RESERVED_KEYS: [&'static str; 6] =
        ["id", "title", "tags", "created_at", "updated_at", "always_on"];

    /// Defaults for a document without a header: fresh id, both timestamps now.
    pub fn fresh() -> Self {
        let now = timestamp(Utc::now());
        Self {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            tags: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
            always_on: false,
            extra: Vec::new(),
        }
    }

    pub fn is_reserved(key: &str) -> bool {
        Self::RESERVED_KEYS.contains(&key)
    }

    /// Adds a tag unless already present.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if tag.is_empty() || self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn get_extra(&self, key: &str) -> Option<&MetaValue> {
        self.extra.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Sets an unknown key, replacing an existing value in place.
    /// Reserved keys are ignored; use the typed fields for those.
    pub fn set_extra(&mut self, key: impl Into<String>, value: MetaValue) {
        let key = key.into();
        if Self::is_reserved(&key) {
            return;
        }
        match self.extra.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.extra.push((key, value)),
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::fresh()
    }
}

/// Formats a timestamp the way it is persisted in headers.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

//! Narrow, line-based metadata header parser.
//!
//! Not YAML: every `key: value` line is read on its own and anything
//! unexpected is skipped.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use uuid::Uuid;

use crate::models::{MetaValue, Metadata, timestamp};

pub const DELIMITER: &str = "---";

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)$").expect("valid number regex"));

/// Splits a leading header off `text`.
///
/// Returns the raw header lines (without delimiters) and the remaining body.
/// A header needs a `---` first line and a later `---` line; otherwise the
/// whole text is body.
pub fn split_header(text: &str) -> (Option<Vec<&str>>, &str) {
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return (None, text);
    };
    if trim_line(first) != DELIMITER {
        return (None, text);
    }

    let mut offset = first.len();
    let mut header = Vec::new();
    for line in lines {
        offset += line.len();
        let line = trim_line(line);
        if line.trim_end() == DELIMITER {
            return (Some(header), &text[offset..]);
        }
        header.push(line);
    }

    log::debug!("header delimiter never closed; treating it as body");
    (None, text)
}

/// Parses header lines into metadata, filling defaults for missing reserved keys.
pub fn parse_header(lines: &[&str]) -> Metadata {
    let mut meta = Metadata {
        id: String::new(),
        title: String::new(),
        tags: Vec::new(),
        created_at: String::new(),
        updated_at: String::new(),
        always_on: false,
        extra: Vec::new(),
    };

    for line in lines {
        let Some((key, raw)) = line.split_once(':') else {
            if !line.trim().is_empty() {
                log::debug!("skipping header line without a key: {line:?}");
            }
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let raw = raw.trim();
        let value = parse_value(raw);

        // Reserved text fields keep the raw text, so `007` stays `007`.
        match key {
            "id" => meta.id = unquote(raw).to_string(),
            "title" => meta.title = unquote(raw).to_string(),
            "tags" => {
                meta.tags.clear();
                let items = match value {
                    MetaValue::List(items) => items,
                    MetaValue::String(s) if s.is_empty() => vec![],
                    other => vec![other.to_string()],
                };
                for tag in items {
                    meta.add_tag(tag);
                }
            }
            "created_at" => meta.created_at = unquote(raw).to_string(),
            "updated_at" => meta.updated_at = unquote(raw).to_string(),
            "always_on" => meta.always_on = value == MetaValue::Bool(true),
            _ => meta.set_extra(key, value),
        }
    }

    if meta.id.is_empty() {
        meta.id = Uuid::new_v4().to_string();
    }
    let now = timestamp(Utc::now());
    if meta.created_at.is_empty() {
        meta.created_at = now.clone();
    }
    if meta.updated_at.is_empty() {
        meta.updated_at = now;
    }
    meta
}

/// Coerces a raw value: booleans, numbers, bracketed lists, then strings
/// with one layer of quotes removed.
pub fn parse_value(raw: &str) -> MetaValue {
    match raw {
        "true" => return MetaValue::Bool(true),
        "false" => return MetaValue::Bool(false),
        _ => {}
    }

    if NUMBER.is_match(raw)
        && let Ok(n) = raw.parse::<f64>()
    {
        return MetaValue::Number(n);
    }

    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        let items = inner
            .split(',')
            .map(|item| unquote(item.trim()).to_string())
            .filter(|item| !item.is_empty())
            .collect();
        return MetaValue::List(items);
    }

    MetaValue::String(unquote(raw).to_string())
}

fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

fn trim_line(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

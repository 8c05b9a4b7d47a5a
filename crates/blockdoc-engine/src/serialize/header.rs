use crate::models::{MetaValue, Metadata};
use crate::parsing::header::DELIMITER;

/// Writes the header: reserved keys in fixed order, then unknown keys in
/// their original order. `always_on` is omitted when false.
pub fn write_header(out: &mut Vec<String>, meta: &Metadata, updated_at: &str) {
    out.push(DELIMITER.to_string());
    out.push(entry("id", &meta.id));
    out.push(entry("title", &meta.title));
    out.push(entry(
        "tags",
        &MetaValue::List(meta.tags.clone()).to_string(),
    ));
    out.push(entry("created_at", &meta.created_at));
    out.push(entry("updated_at", updated_at));
    if meta.always_on {
        out.push(entry("always_on", "true"));
    }
    for (key, value) in &meta.extra {
        out.push(entry(key, &value.to_string()));
    }
    out.push(DELIMITER.to_string());
}

fn entry(key: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{key}:")
    } else {
        format!("{key}: {value}")
    }
}

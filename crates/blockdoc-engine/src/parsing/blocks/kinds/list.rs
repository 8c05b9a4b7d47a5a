use std::sync::LazyLock;

use regex::Regex;

use crate::models::HeadingLevel;

static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.(?: |$)").expect("valid ordered marker regex"));

/// Heading markers: `#`, `##`, `###` followed by a space.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';

    pub fn open(remainder: &str) -> Option<(HeadingLevel, &str)> {
        let hashes = remainder.bytes().take_while(|&b| b == Self::MARKER as u8).count();
        let level = HeadingLevel::from_hashes(hashes)?;
        let rest = &remainder[hashes..];
        if rest.is_empty() {
            return Some((level, ""));
        }
        rest.strip_prefix(' ').map(|text| (level, text))
    }
}

/// Checklist marker: `- [ ] ` or `- [x] `.
pub struct Checklist;

impl Checklist {
    pub const UNCHECKED: &'static str = "- [ ] ";
    pub const CHECKED: &'static str = "- [x] ";

    pub fn open(remainder: &str) -> Option<(bool, &str)> {
        let rest = remainder.strip_prefix("- [")?;
        let checked = match rest.as_bytes().first()? {
            b' ' => false,
            b'x' | b'X' => true,
            _ => return None,
        };
        let rest = rest[1..].strip_prefix(']')?;
        if rest.is_empty() {
            return Some((checked, ""));
        }
        rest.strip_prefix(' ').map(|text| (checked, text))
    }
}

/// Bullet marker: `- `.
pub struct Bullet;

impl Bullet {
    pub const MARKER: &'static str = "- ";

    pub fn open(remainder: &str) -> Option<&str> {
        if remainder == "-" {
            return Some("");
        }
        remainder.strip_prefix(Self::MARKER)
    }
}

/// Ordered marker: digits followed by `. `. The number itself is not kept;
/// labels are derived from position.
pub struct Ordered;

impl Ordered {
    pub fn open(remainder: &str) -> Option<&str> {
        let m = ORDERED_MARKER.find(remainder)?;
        Some(&remainder[m.end()..])
    }
}

/// Horizontal rule: three or more `-` and nothing else.
pub struct Divider;

impl Divider {
    pub const MARKER: &'static str = "---";

    pub fn matches(remainder: &str) -> bool {
        let t = remainder.trim_end();
        t.len() >= 3 && t.bytes().all(|b| b == b'-')
    }
}

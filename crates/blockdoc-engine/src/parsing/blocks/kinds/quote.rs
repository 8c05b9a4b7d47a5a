/// Quote lines (`> `), callout openers (`> [!NOTE]`) and toggle openers (`>> `).
///
/// All three share the `>` prefix, so the disambiguation lives in one place.
pub struct Quote;

impl Quote {
    pub const PREFIX: &'static str = "> ";

    /// Strips a quote prefix from a line, returning its content.
    ///
    /// A bare `>` is an empty quote line. Callout openers are not quote lines.
    pub fn strip(remainder: &str) -> Option<&str> {
        if remainder.trim_end() == ">" {
            return Some("");
        }
        if Callout::open(remainder).is_some() {
            return None;
        }
        remainder.strip_prefix(Self::PREFIX)
    }
}

pub struct Callout;

impl Callout {
    pub const OPEN: &'static str = "> [!";

    /// Parses `> [!VARIANT] optional title` into `(variant, title)`.
    pub fn open(remainder: &str) -> Option<(&str, &str)> {
        let rest = remainder.strip_prefix(Self::OPEN)?;
        let close = rest.find(']')?;
        let variant = &rest[..close];
        if variant.is_empty()
            || !variant
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return None;
        }
        Some((variant, rest[close + 1..].trim()))
    }
}

pub struct Toggle;

impl Toggle {
    pub const PREFIX: &'static str = ">> ";
    pub const COLLAPSED: &'static str = "[collapsed]";

    /// Parses `>> [collapsed] title` into `(collapsed, title)`.
    pub fn open(remainder: &str) -> Option<(bool, &str)> {
        let rest = if remainder.trim_end() == ">>" {
            ""
        } else {
            remainder.strip_prefix(Self::PREFIX)?
        };

        match rest.strip_prefix(Self::COLLAPSED) {
            Some("") => Some((true, "")),
            Some(after) => match after.strip_prefix(' ') {
                Some(title) => Some((true, title)),
                None => Some((false, rest)),
            },
            None => Some((false, rest)),
        }
    }
}

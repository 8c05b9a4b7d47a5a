/// Classification of a single body line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClass<'a> {
    /// The line without its trailing `\r`.
    pub raw: &'a str,
    /// Indent level derived from the leading whitespace run.
    pub indent: usize,
    /// Text after the leading whitespace run.
    pub remainder: &'a str,
    /// Whether the line is whitespace only.
    pub is_blank: bool,
}

/// Classifies individual lines for the block parsing phase.
pub struct LineClassifier;

impl LineClassifier {
    /// Spaces that make up one indent level when a line has no leading tabs.
    pub const SPACES_PER_LEVEL: usize = 2;

    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        let raw = line.strip_suffix('\r').unwrap_or(line);
        let (indent, offset) = Self::measure_indent(raw);
        LineClass {
            raw,
            indent,
            remainder: &raw[offset..],
            is_blank: raw.trim().is_empty(),
        }
    }

    /// Returns `(levels, byte_offset)` for the leading whitespace of `line`.
    ///
    /// A tab run counts one level per tab; without tabs, a space run counts
    /// one level per two spaces. The offset always skips the whole run.
    pub fn measure_indent(line: &str) -> (usize, usize) {
        let tabs = line.bytes().take_while(|&b| b == b'\t').count();
        let offset = line.len() - line.trim_start_matches([' ', '\t']).len();
        if tabs > 0 {
            (tabs, offset)
        } else {
            (offset / Self::SPACES_PER_LEVEL, offset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hello", 0, "hello")]
    #[case("\thello", 1, "hello")]
    #[case("\t\t- item", 2, "- item")]
    #[case("  two", 1, "two")]
    #[case("   three", 1, "three")]
    #[case("    four", 2, "four")]
    #[case("\t  mixed", 1, "mixed")]
    fn indent_levels(#[case] line: &str, #[case] indent: usize, #[case] remainder: &str) {
        let class = LineClassifier.classify(line);
        assert_eq!(class.indent, indent);
        assert_eq!(class.remainder, remainder);
    }

    #[test]
    fn strips_carriage_return() {
        let class = LineClassifier.classify("# Title\r");
        assert_eq!(class.raw, "# Title");
        assert_eq!(class.remainder, "# Title");
    }

    #[test]
    fn whitespace_only_is_blank() {
        assert!(LineClassifier.classify("").is_blank);
        assert!(LineClassifier.classify(" \t ").is_blank);
        assert!(!LineClassifier.classify(" x").is_blank);
    }
}

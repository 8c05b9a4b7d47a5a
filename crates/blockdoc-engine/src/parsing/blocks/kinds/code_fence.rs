pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";

    /// Returns the language tag if the line opens a fence.
    pub fn open(remainder: &str) -> Option<&str> {
        remainder
            .strip_prefix(Self::BACKTICKS)
            .map(|language| language.trim())
    }

    /// A fence closes only on a line that is exactly the marker.
    pub fn closes(raw: &str) -> bool {
        raw.trim() == Self::BACKTICKS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_fence_with_language() {
        assert_eq!(CodeFence::open("```rust"), Some("rust"));
        assert_eq!(CodeFence::open("``` python "), Some("python"));
        assert_eq!(CodeFence::open("```"), Some(""));
    }

    #[test]
    fn no_fence() {
        assert_eq!(CodeFence::open("hello"), None);
        assert_eq!(CodeFence::open("~~~"), None);
    }

    #[test]
    fn closes_only_on_bare_marker() {
        assert!(CodeFence::closes("```"));
        assert!(CodeFence::closes("\t```  "));
        assert!(!CodeFence::closes("```rust"));
        assert!(!CodeFence::closes("x ```"));
    }
}

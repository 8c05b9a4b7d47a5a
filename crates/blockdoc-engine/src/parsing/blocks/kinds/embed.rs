/// Wiki-style embeds: `![[target]]` or `![[target|alt]]`.
pub struct Embed;

/// A parsed embed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedRef<'a> {
    pub target: &'a str,
    pub alt: Option<&'a str>,
    pub is_image: bool,
}

impl Embed {
    pub const OPEN: &'static str = "![[";
    pub const CLOSE: &'static str = "]]";

    /// Extensions rendered inline as images; anything else is a file embed.
    pub const IMAGE_EXTENSIONS: [&'static str; 11] = [
        "png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "avif", "ico", "tif", "tiff",
    ];

    pub fn open(remainder: &str) -> Option<EmbedRef<'_>> {
        let inner = remainder
            .trim_end()
            .strip_prefix(Self::OPEN)?
            .strip_suffix(Self::CLOSE)?;
        if inner.contains(Self::CLOSE) {
            return None;
        }

        let (target, alt) = match inner.split_once('|') {
            Some((target, alt)) => (target.trim(), Some(alt.trim())),
            None => (inner.trim(), None),
        };
        if target.is_empty() {
            return None;
        }

        Some(EmbedRef {
            target,
            alt,
            is_image: Self::is_image(target),
        })
    }

    pub fn is_image(target: &str) -> bool {
        let file_name = target.rsplit('/').next().unwrap_or(target);
        file_name
            .rsplit_once('.')
            .map(|(_, ext)| {
                Self::IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

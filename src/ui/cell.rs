//! Per-column cell policies.
//!
//! Columns named `pic`/`pics` hold image paths, `link`/`links` hold URLs.
//! Everything else is shown verbatim.

use crate::data::Record;
use std::path::{Component, Path, PathBuf};

/// Label shown for a non-empty link.
pub const LINK_LABEL: &str = "click";

/// Text shown when an image cannot be found.
pub const NO_IMAGE: &str = "No Image";

/// Badge in front of an image's alt text.
pub const THUMBNAIL_GLYPH: &str = "▣";

const ABSOLUTE_SCHEMES: [&str; 4] = ["http://", "https://", "file://", "data:"];

/// How a column's cells are rendered. Column names match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Image reference.
    Thumbnail,
    /// External link.
    Link,
    /// Plain value.
    Text,
}

impl CellKind {
    /// Pick the policy for a column name.
    pub fn for_column(name: &str) -> Self {
        match name {
            "pic" | "pics" => CellKind::Thumbnail,
            "link" | "links" => CellKind::Link,
            _ => CellKind::Text,
        }
    }

    /// Compact columns are sized to their content, never widened for long text.
    pub fn is_compact(self) -> bool {
        !matches!(self, CellKind::Text)
    }
}

/// Where an image lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Absolute URL, used verbatim.
    Remote(String),
    /// Path under the picture base directory.
    Local(PathBuf),
}

impl ImageSource {
    /// Resolve a cell value against the picture base directory.
    ///
    /// A local value always lands under `pics_base`: root, prefix and `..`
    /// components are dropped before joining.
    pub fn resolve(value: &str, pics_base: &Path) -> Self {
        let lower = value.to_ascii_lowercase();
        if ABSOLUTE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
            return ImageSource::Remote(value.to_string());
        }
        let relative: PathBuf = Path::new(value)
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect();
        ImageSource::Local(pics_base.join(relative))
    }

    /// The URL or path handed to viewers.
    pub fn location(&self) -> String {
        match self {
            ImageSource::Remote(url) => url.clone(),
            ImageSource::Local(path) => path.display().to_string(),
        }
    }

    /// Whether the image can be shown.
    ///
    /// Local images must exist as files. Remote images are not fetched and
    /// count as available.
    pub fn is_available(&self) -> bool {
        match self {
            ImageSource::Remote(_) => true,
            ImageSource::Local(path) => path.is_file(),
        }
    }

    /// Size in bytes of a local image.
    pub fn file_size(&self) -> Option<u64> {
        match self {
            ImageSource::Remote(_) => None,
            ImageSource::Local(path) => std::fs::metadata(path).ok().map(|m| m.len()),
        }
    }
}

/// What one cell shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    /// An image badge.
    Thumbnail {
        /// Resolved image location.
        source: ImageSource,
        /// Caption: the row's `name`, or `Image`.
        alt: String,
    },
    /// A link labelled [`LINK_LABEL`].
    Link {
        /// Target URL.
        url: String,
    },
    /// A plain value.
    Text(String),
    /// Nothing (an empty link).
    Empty,
}

impl CellContent {
    /// Build the content of `record[header]`.
    pub fn for_cell(header: &str, record: &Record, pics_base: &Path) -> Self {
        let value = record.value(header);
        match CellKind::for_column(header) {
            CellKind::Thumbnail => CellContent::Thumbnail {
                source: ImageSource::resolve(value, pics_base),
                alt: alt_text(record),
            },
            CellKind::Link if value.is_empty() => CellContent::Empty,
            CellKind::Link => CellContent::Link {
                url: value.to_string(),
            },
            CellKind::Text => CellContent::Text(value.to_string()),
        }
    }

    /// Whether the cell's image can be shown. Always true for other cells.
    pub fn is_available(&self) -> bool {
        match self {
            CellContent::Thumbnail { source, .. } => source.is_available(),
            _ => true,
        }
    }

    /// Single-line text for the table.
    pub fn display(&self) -> String {
        self.label(self.is_available())
    }

    /// Single-line text for the table, given a precomputed [`is_available`].
    ///
    /// [`is_available`]: CellContent::is_available
    pub fn label(&self, available: bool) -> String {
        match self {
            CellContent::Thumbnail { alt, .. } => {
                if available {
                    format!("{} {}", THUMBNAIL_GLYPH, alt)
                } else {
                    NO_IMAGE.to_string()
                }
            },
            CellContent::Link { .. } => LINK_LABEL.to_string(),
            CellContent::Text(value) => single_line(value),
            CellContent::Empty => String::new(),
        }
    }
}

/// Caption for a row's image.
pub fn alt_text(record: &Record) -> String {
    match record.get("name") {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "Image".to_string(),
    }
}

/// Fold line breaks into a visible marker.
pub fn single_line(value: &str) -> String {
    if value.contains('\n') {
        value.replace("\r\n", " ↵ ").replace('\n', " ↵ ")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_exact_names() {
        assert_eq!(CellKind::for_column("pic"), CellKind::Thumbnail);
        assert_eq!(CellKind::for_column("pics"), CellKind::Thumbnail);
        assert_eq!(CellKind::for_column("link"), CellKind::Link);
        assert_eq!(CellKind::for_column("links"), CellKind::Link);
        assert_eq!(CellKind::for_column("Pics"), CellKind::Text);
        assert_eq!(CellKind::for_column("picture"), CellKind::Text);
        assert!(CellKind::Thumbnail.is_compact());
        assert!(!CellKind::Text.is_compact());
    }

    #[test]
    fn test_relative_image_uses_pics_base() {
        let source = ImageSource::resolve("cat.jpg", Path::new("data/pics"));
        assert_eq!(source, ImageSource::Local(PathBuf::from("data/pics/cat.jpg")));
    }

    #[test]
    fn test_rooted_path_stays_under_pics_base() {
        let base = Path::new("data/pics");
        assert_eq!(
            ImageSource::resolve("/cat.jpg", base),
            ImageSource::Local(PathBuf::from("data/pics/cat.jpg"))
        );
        assert_eq!(
            ImageSource::resolve("/etc/hostname", base),
            ImageSource::Local(PathBuf::from("data/pics/etc/hostname"))
        );
        assert_eq!(
            ImageSource::resolve("../../secret.png", base),
            ImageSource::Local(PathBuf::from("data/pics/secret.png"))
        );
        assert_eq!(
            ImageSource::resolve("people/./tom.jpg", base),
            ImageSource::Local(PathBuf::from("data/pics/people/tom.jpg"))
        );
    }

    #[test]
    fn test_label_uses_given_availability() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tom.jpg"), b"jpeg").unwrap();
        let record = Record::from_pairs([("name", "Tom"), ("pics", "tom.jpg")]);
        let content = CellContent::for_cell("pics", &record, dir.path());
        assert!(content.is_available());
        assert_eq!(content.label(true), "▣ Tom");
        assert_eq!(content.label(false), NO_IMAGE);

        let link = CellContent::Link {
            url: "https://example.com".to_string(),
        };
        assert!(link.is_available());
        assert_eq!(link.label(true), "click");
    }

    #[test]
    fn test_absolute_url_is_verbatim() {
        let source = ImageSource::resolve("https://x/y.png", Path::new("data/pics"));
        assert_eq!(source, ImageSource::Remote("https://x/y.png".to_string()));
        assert_eq!(source.location(), "https://x/y.png");
        assert!(source.is_available());

        let source = ImageSource::resolve("HTTP://x/y.png", Path::new("data/pics"));
        assert!(matches!(source, ImageSource::Remote(_)));
    }

    #[test]
    fn test_missing_local_image_shows_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let record = Record::from_pairs([("name", "Tom"), ("pics", "tom.jpg")]);
        let content = CellContent::for_cell("pics", &record, dir.path());
        assert_eq!(content.display(), NO_IMAGE);

        std::fs::write(dir.path().join("tom.jpg"), b"jpeg").unwrap();
        assert_eq!(content.display(), "▣ Tom");
    }

    #[test]
    fn test_empty_image_value_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let record = Record::from_pairs([("pic", "")]);
        let content = CellContent::for_cell("pic", &record, dir.path());
        assert_eq!(content.display(), NO_IMAGE);
    }

    #[test]
    fn test_alt_text_defaults_to_image() {
        let record = Record::from_pairs([("pics", "https://x/y.png")]);
        let content = CellContent::for_cell("pics", &record, Path::new("data/pics"));
        assert_eq!(content.display(), "▣ Image");
    }

    #[test]
    fn test_link_label_only_when_present() {
        let record = Record::from_pairs([("link", "https://example.com")]);
        let content = CellContent::for_cell("link", &record, Path::new("."));
        assert_eq!(
            content,
            CellContent::Link {
                url: "https://example.com".to_string()
            }
        );
        assert_eq!(content.display(), "click");

        let record = Record::from_pairs([("links", "")]);
        assert_eq!(
            CellContent::for_cell("links", &record, Path::new(".")),
            CellContent::Empty
        );
        assert_eq!(
            CellContent::for_cell("links", &Record::new(), Path::new(".")).display(),
            ""
        );
    }

    #[test]
    fn test_text_is_verbatim_on_one_line() {
        let record = Record::from_pairs([("bio", "two\nlines")]);
        let content = CellContent::for_cell("bio", &record, Path::new("."));
        assert_eq!(content, CellContent::Text("two\nlines".to_string()));
        assert_eq!(content.display(), "two ↵ lines");
        assert_eq!(
            CellContent::for_cell("absent", &record, Path::new(".")).display(),
            ""
        );
    }
}

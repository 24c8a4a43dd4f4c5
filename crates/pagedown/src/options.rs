//! Configuration options for conversion

/// Options for [`Converter`](crate::Converter)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Strip translation overlay elements before conversion
    pub remove_translations: bool,

    /// Render anchors as Markdown links instead of plain text
    pub keep_links: bool,

    /// Merge translation wrappers into a single "original translation" run
    pub include_translations: bool,
}

impl ConversionOptions {
    /// Options for bilingual output: overlays are merged, never stripped.
    pub fn bilingual() -> Self {
        Self {
            remove_translations: false,
            include_translations: true,
            ..Default::default()
        }
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            remove_translations: false,
            keep_links: true,
            include_translations: false,
        }
    }
}

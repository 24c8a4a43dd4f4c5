//! Image records and the resolver seam.

use once_cell::sync::Lazy;
use regex::Regex;

static SVG_EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.svg$").unwrap());

/// Resolved pixel data for an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageData {
    /// Encoded raster bytes, opaque to the converter
    Raster(Vec<u8>),
    /// GIFs are not re-encoded; the absolute URL is passed through so the
    /// animation survives
    Passthrough { url: String },
}

/// One `<img>` encountered during a conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// The `src` attribute, verbatim
    pub url: String,
    /// The `alt` attribute, or empty
    pub alt: String,
    /// `None` when resolution failed
    pub data: Option<ImageData>,
}

/// Why an image could not be resolved
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("image element not found for src: {0}")]
    NotFound(String),

    #[error("image not fully loaded: {0}")]
    NotLoaded(String),

    #[error("unsupported image format: {0}")]
    Unsupported(String),

    #[error("failed to rasterize {src}: {message}")]
    Rasterize { src: String, message: String },

    #[error("failed to read image {src}: {source}")]
    Io {
        src: String,
        #[source]
        source: std::io::Error,
    },
}

/// Looks up already-available pixel data for an image source.
///
/// Implementations must not block on the network; failures are reported and
/// the converter carries on.
pub trait ImageDataResolver {
    fn resolve(&self, src: &str) -> Result<ImageData, ResolveError>;
}

/// Resolver that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl ImageDataResolver for NullResolver {
    fn resolve(&self, src: &str) -> Result<ImageData, ResolveError> {
        Err(ResolveError::NotFound(src.to_string()))
    }
}

/// File name used in the Markdown reference for an image source.
///
/// Takes the last path segment, cuts the query string and renames `.svg` to
/// `.png` since SVGs are rasterized before they are saved.
pub fn image_filename(src: &str) -> String {
    let last = src.rsplit('/').next().unwrap_or(src);
    let name = last.split('?').next().unwrap_or(last);
    SVG_EXTENSION.replace(name, ".png").into_owned()
}

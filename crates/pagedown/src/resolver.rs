//! Filesystem image resolver for saved pages.
//!
//! A saved page keeps its images next to it, so "already loaded" means the
//! file exists under the page's directory and is not empty. Nothing is ever
//! fetched over the network. SVGs are rasterized to PNG with the `svg`
//! feature.

use std::fs;
use std::io;
use std::path::Path;

use url::Url;

use crate::image::{ImageData, ImageDataResolver, ResolveError};

/// Resolves image sources against a directory on disk
#[derive(Debug, Clone)]
pub struct FsResolver {
    base_url: Url,
}

impl FsResolver {
    /// Resolve relative sources against `base_dir`
    pub fn new(base_dir: impl AsRef<Path>) -> io::Result<Self> {
        let absolute = std::path::absolute(base_dir.as_ref())?;
        let base_url = Url::from_directory_path(&absolute).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a usable directory: {}", absolute.display()),
            )
        })?;
        Ok(Self { base_url })
    }

    /// Resolve relative sources against the directory holding `page`
    pub fn for_page(page: impl AsRef<Path>) -> io::Result<Self> {
        let dir = page.as_ref().parent().unwrap_or_else(|| Path::new("."));
        let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
        Self::new(dir)
    }

    /// The `file://` URL relative sources are joined onto
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl ImageDataResolver for FsResolver {
    fn resolve(&self, src: &str) -> Result<ImageData, ResolveError> {
        let not_found = || ResolveError::NotFound(src.to_string());

        let mut url = self.base_url.join(src).map_err(|_| not_found())?;
        if url.scheme() != "file" {
            return Err(not_found());
        }
        url.set_query(None);
        url.set_fragment(None);
        let path = url.to_file_path().map_err(|_| not_found())?;

        let metadata = match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => return Err(not_found()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Err(not_found()),
            Err(source) => {
                return Err(ResolveError::Io {
                    src: src.to_string(),
                    source,
                })
            }
        };
        if metadata.len() == 0 {
            return Err(ResolveError::NotLoaded(src.to_string()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("gif") => Ok(ImageData::Passthrough {
                url: url.to_string(),
            }),
            Some("svg") => rasterize_svg(src, &path),
            _ => fs::read(&path)
                .map(ImageData::Raster)
                .map_err(|source| ResolveError::Io {
                    src: src.to_string(),
                    source,
                }),
        }
    }
}

#[cfg(feature = "svg")]
fn rasterize_svg(src: &str, path: &Path) -> Result<ImageData, ResolveError> {
    use resvg::{tiny_skia, usvg};

    let failed = |message: String| ResolveError::Rasterize {
        src: src.to_string(),
        message,
    };

    let data = fs::read(path).map_err(|source| ResolveError::Io {
        src: src.to_string(),
        source,
    })?;
    let tree = usvg::Tree::from_data(&data, &usvg::Options::default())
        .map_err(|err| failed(err.to_string()))?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| failed(format!("cannot render {}x{}", size.width(), size.height())))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map(ImageData::Raster)
        .map_err(|err| failed(err.to_string()))
}

#[cfg(not(feature = "svg"))]
fn rasterize_svg(src: &str, _path: &Path) -> Result<ImageData, ResolveError> {
    Err(ResolveError::Unsupported(src.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2"><rect width="4" height="2" fill="red"/></svg>"#;

    fn page_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("img/photo.png"), [0x89, b'P', b'N', b'G']).unwrap();
        fs::write(dir.path().join("img/anim.gif"), b"GIF89a").unwrap();
        fs::write(dir.path().join("img/icon.svg"), SVG).unwrap();
        fs::write(dir.path().join("img/broken.svg"), b"not an svg").unwrap();
        fs::write(dir.path().join("img/empty.png"), b"").unwrap();
        dir
    }

    #[test]
    fn test_resolves_relative_raster() {
        let dir = page_dir();
        let resolver = FsResolver::new(dir.path()).unwrap();
        let data = resolver.resolve("img/photo.png?v=3").unwrap();
        assert_eq!(data, ImageData::Raster(vec![0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_gif_passes_through_as_absolute_url() {
        let dir = page_dir();
        let resolver = FsResolver::for_page(dir.path().join("index.html")).unwrap();
        match resolver.resolve("./img/anim.gif").unwrap() {
            ImageData::Passthrough { url } => {
                assert!(url.starts_with("file://"));
                assert!(url.ends_with("/img/anim.gif"));
            }
            other => panic!("expected passthrough, got {:?}", other),
        }
    }

    #[test]
    fn test_failures() {
        let dir = page_dir();
        let resolver = FsResolver::new(dir.path()).unwrap();
        assert!(matches!(resolver.resolve("img/missing.png"), Err(ResolveError::NotFound(_))));
        assert!(matches!(resolver.resolve("img"), Err(ResolveError::NotFound(_))));
        assert!(matches!(resolver.resolve("img/empty.png"), Err(ResolveError::NotLoaded(_))));
        assert!(matches!(
            resolver.resolve("https://example.com/img/photo.png"),
            Err(ResolveError::NotFound(_))
        ));
        assert!(matches!(
            resolver.resolve("data:image/png;base64,AAAA"),
            Err(ResolveError::NotFound(_))
        ));
    }

    #[cfg(feature = "svg")]
    #[test]
    fn test_svg_is_rasterized_to_png() {
        let dir = page_dir();
        let resolver = FsResolver::new(dir.path()).unwrap();
        match resolver.resolve("img/icon.svg").unwrap() {
            ImageData::Raster(bytes) => assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n")),
            other => panic!("expected raster, got {:?}", other),
        }
        assert!(matches!(
            resolver.resolve("img/broken.svg"),
            Err(ResolveError::Rasterize { .. })
        ));
    }

    #[cfg(not(feature = "svg"))]
    #[test]
    fn test_svg_unsupported_without_rasterizer() {
        let dir = page_dir();
        let resolver = FsResolver::new(dir.path()).unwrap();
        assert!(matches!(resolver.resolve("img/icon.svg"), Err(ResolveError::Unsupported(_))));
    }
}

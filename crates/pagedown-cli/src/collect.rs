//! Saving converted pages and their images.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jwalk::WalkDir;
use pagedown::{ConversionOptions, Converter, FsResolver, ImageData, ImageRecord};
use url::Url;

use crate::paths::{image_save_name, markdown_filename, menu_dir};
use crate::settings::Settings;

/// Converts pages and writes them under the save path.
///
/// An image is written once per output directory and source file. Pages
/// that would land on the same file name get a `_2`, `_3`, ... suffix.
pub struct Collector {
    options: ConversionOptions,
    selector: Option<String>,
    save_path: PathBuf,
    /// (output directory, resolved image source)
    written_images: HashSet<(PathBuf, String)>,
    written_pages: HashSet<PathBuf>,
}

impl Collector {
    pub fn new(settings: &Settings) -> Self {
        Self {
            options: ConversionOptions::from(&settings.conversion),
            selector: settings.conversion.selector().map(str::to_string),
            save_path: settings.output.save_path.clone(),
            written_images: HashSet::new(),
            written_pages: HashSet::new(),
        }
    }

    /// Convert one saved page and write it to the directory for `menu`.
    /// Returns the path of the Markdown file.
    pub fn save_page(&mut self, page: &Path, url: Option<&Url>, menu: &[String]) -> Result<PathBuf> {
        let html = fs::read_to_string(page)
            .with_context(|| format!("failed to read {}", page.display()))?;
        let resolver = FsResolver::for_page(page)
            .with_context(|| format!("failed to resolve the directory of {}", page.display()))?;
        let base_url = resolver.base_url().clone();
        let converter = Converter::with_options(self.options).with_resolver(resolver);

        let converted = converter
            .convert_page(&html, self.selector.as_deref())
            .with_context(|| format!("failed to convert {}", page.display()))?;

        let file_url = match url {
            Some(url) => Some(url.clone()),
            None => fs::canonicalize(page).ok().and_then(|p| Url::from_file_path(p).ok()),
        };
        let name = markdown_filename(
            converted.heading.as_deref(),
            file_url.as_ref(),
            converted.title.as_deref(),
        );

        let dir = menu_dir(&self.save_path, menu);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;

        let target = self.claim_page_path(&dir, &name);
        fs::write(&target, &converted.result.markdown)
            .with_context(|| format!("failed to write {}", target.display()))?;
        log::info!("saved {}", target.display());

        for (index, image) in converted.result.images.iter().enumerate() {
            let source = base_url
                .join(&image.url)
                .map(String::from)
                .unwrap_or_else(|_| image.url.clone());
            if let Err(err) = self.save_image(&dir, &source, image, index) {
                log::warn!("{:#}", err);
            }
        }

        Ok(target)
    }

    /// First unused `dir/name`, adding a numeric suffix to the stem
    fn claim_page_path(&mut self, dir: &Path, name: &str) -> PathBuf {
        let stem = name.strip_suffix(".md").unwrap_or(name);
        let mut target = dir.join(name);
        let mut n = 2;
        while !self.written_pages.insert(target.clone()) {
            target = dir.join(format!("{}_{}.md", stem, n));
            n += 1;
        }
        target
    }

    fn save_image(&mut self, dir: &Path, source: &str, image: &ImageRecord, index: usize) -> Result<()> {
        let key = (dir.to_path_buf(), source.to_string());
        if self.written_images.contains(&key) {
            log::debug!("image already saved: {}", source);
            return Ok(());
        }
        let Some(data) = &image.data else {
            log::warn!("no data for image {}, skipping", image.url);
            return Ok(());
        };

        let target = dir.join(image_save_name(image, index));
        match data {
            ImageData::Raster(bytes) => {
                fs::write(&target, bytes)
                    .with_context(|| format!("failed to write {}", target.display()))?;
            }
            ImageData::Passthrough { url } => {
                let from = Url::parse(url)
                    .ok()
                    .filter(|u| u.scheme() == "file")
                    .and_then(|u| u.to_file_path().ok());
                let Some(from) = from else {
                    log::warn!("cannot copy image from {}, skipping", url);
                    return Ok(());
                };
                fs::copy(&from, &target).with_context(|| {
                    format!("failed to copy {} to {}", from.display(), target.display())
                })?;
            }
        }

        log::debug!("saved image {}", target.display());
        self.written_images.insert(key);
        Ok(())
    }

    /// Convert every `.html` / `.htm` file under `root`. Relative parent
    /// directories become the menu path. Returns the Markdown files written.
    pub fn save_dir(&mut self, root: &Path) -> Result<Vec<PathBuf>> {
        let pages = find_pages(root)?;

        let mut saved = Vec::with_capacity(pages.len());
        for page in pages {
            let menu: Vec<String> = page
                .strip_prefix(root)
                .ok()
                .and_then(Path::parent)
                .map(|parent| {
                    parent
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy().into_owned())
                        .collect()
                })
                .unwrap_or_default();
            saved.push(self.save_page(&page, None, &menu)?);
        }
        Ok(saved)
    }
}

/// Saved pages under `root` in file-name order. Symbolic links are not
/// followed.
fn find_pages(root: &Path) -> Result<Vec<PathBuf>> {
    let mut pages = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).skip_hidden(false).sort(true) {
        let entry = entry.with_context(|| format!("failed to list {}", root.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && is_page(&path) {
            pages.push(path);
        }
    }
    Ok(pages)
}

fn is_page(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
        .unwrap_or(false)
}

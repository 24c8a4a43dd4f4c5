//! File and directory naming for saved output.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use pagedown::ImageRecord;
use regex::Regex;
use url::Url;

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SVG_EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.svg$").unwrap());

const MAX_FILENAME_CHARS: usize = 200;

/// Make `name` safe to use as a file name on common filesystems
pub fn sanitize_filename(name: &str) -> String {
    let replaced = UNSAFE_CHARS.replace_all(name, "_");
    let replaced = WHITESPACE.replace_all(&replaced, "_");
    replaced.chars().take(MAX_FILENAME_CHARS).collect()
}

fn non_empty(name: String) -> Option<String> {
    Some(name).filter(|n| !n.is_empty())
}

/// Name for a page's Markdown file.
///
/// Tries the first heading, then the last path segment of the page URL, then
/// the page title.
pub fn markdown_filename(heading: Option<&str>, url: Option<&Url>, title: Option<&str>) -> String {
    let stem = heading
        .map(str::trim)
        .map(sanitize_filename)
        .and_then(non_empty)
        .or_else(|| url.and_then(url_stem))
        .or_else(|| title.map(str::trim).map(sanitize_filename).and_then(non_empty))
        .unwrap_or_else(|| "document".to_string());
    format!("{}.md", stem)
}

fn url_stem(url: &Url) -> Option<String> {
    if url.scheme() == "file" {
        let path = url.to_file_path().ok()?;
        let stem = path.file_stem()?.to_string_lossy();
        return non_empty(sanitize_filename(&stem));
    }
    let segment = url.path_segments()?.rev().find(|s| !s.is_empty())?;
    non_empty(sanitize_filename(segment))
}

/// Name an image is saved under. `index` is its position in the page's
/// image list.
pub fn image_save_name(image: &ImageRecord, index: usize) -> String {
    let last = image.url.rsplit('/').next().unwrap_or("");

    if last.contains('.') {
        let without_query = last.split('?').next().unwrap_or(last);
        let name = sanitize_filename(without_query);
        if name.ends_with(".gif") {
            name
        } else {
            SVG_EXTENSION.replace(&name, ".png").into_owned()
        }
    } else if !image.alt.is_empty() {
        format!("{}.png", sanitize_filename(&image.alt))
    } else {
        format!("image_{}.png", index + 1)
    }
}

/// Output directory for a page filed under `menu`
pub fn menu_dir(save_path: &Path, menu: &[String]) -> PathBuf {
    menu.iter()
        .map(|part| sanitize_filename(part))
        .filter(|part| !part.is_empty())
        .fold(save_path.to_path_buf(), |dir, part| dir.join(part))
}

//! Whole-page conversion: pick the root, convert, collect page metadata.

use crate::convert::{ConversionResult, Converter};
use crate::html::Document;
use crate::locate::{find_main_content, first_heading_title, page_title};
use crate::node::Matcher;
use crate::{PagedownError, Result};

/// A converted page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// The document `<title>`
    pub title: Option<String>,
    /// Title taken from the first `h1` of the converted content
    pub heading: Option<String>,
    /// Markdown and images
    pub result: ConversionResult,
}

impl Converter {
    /// Convert a saved HTML page.
    ///
    /// With a non-blank `selector` the first matching element is converted
    /// and a miss is an error; otherwise the main content is located.
    pub fn convert_page(&self, html: &str, selector: Option<&str>) -> Result<Page> {
        let parsed = Document::parse(html);
        let document = parsed.root();
        let title = page_title(&document);

        let root = match selector.map(str::trim).filter(|s| !s.is_empty()) {
            Some(selector) => parsed
                .select_first(selector)?
                .ok_or_else(|| PagedownError::NoMatch(selector.to_string()))?,
            None => {
                let body = document
                    .select_first(&Matcher::Tag("body"))
                    .unwrap_or(&document);
                find_main_content(body)
            }
        };

        let heading = first_heading_title(&root);
        let result = self.convert(&root);

        Ok(Page {
            title,
            heading,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConversionOptions;

    const PAGE: &str = r##"<!doctype html>
<html><head><title>Guide - Docs</title></head>
<body>
<nav class="navbar"><a href="/">Home</a></nav>
<main><h1><a href="#start">Start</a></h1><p>Read <em>this</em>.</p>
<div class="pagination"><a href="/next">Next page</a></div></main>
<footer id="content">footer</footer>
</body></html>"##;

    #[test]
    fn test_convert_page_main_content() {
        let page = Converter::new().convert_page(PAGE, None).unwrap();
        assert_eq!(page.title.as_deref(), Some("Guide - Docs"));
        assert_eq!(page.heading.as_deref(), Some("Start"));
        assert_eq!(page.result.markdown, "# [Start](#start)\n\nRead *this*.\n\n\n");
    }

    #[test]
    fn test_convert_page_with_selector() {
        let converter = Converter::with_options(ConversionOptions {
            keep_links: false,
            ..Default::default()
        });
        let page = converter.convert_page(PAGE, Some(" footer ")).unwrap();
        assert_eq!(page.result.markdown, "footer");
        assert_eq!(page.heading, None);
    }

    #[test]
    fn test_selector_sees_whole_document() {
        let converter = Converter::new();
        let page = converter.convert_page(PAGE, Some("nav.navbar")).unwrap();
        assert_eq!(page.result.markdown, "[Home](/)");
        assert_eq!(page.title.as_deref(), Some("Guide - Docs"));
    }

    #[test]
    fn test_invalid_selector() {
        let err = Converter::new().convert_page(PAGE, Some("main[")).unwrap_err();
        assert!(matches!(err, PagedownError::InvalidSelector { .. }));
    }

    #[test]
    fn test_convert_page_selector_miss() {
        let err = Converter::new().convert_page(PAGE, Some("aside")).unwrap_err();
        assert!(matches!(err, PagedownError::NoMatch(ref s) if s == "aside"));
    }

    #[test]
    fn test_blank_selector_falls_back_to_main_content() {
        let page = Converter::new().convert_page(PAGE, Some("   ")).unwrap();
        assert!(page.result.markdown.starts_with("# [Start](#start)"));
    }
}

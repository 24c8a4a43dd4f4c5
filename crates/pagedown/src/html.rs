//! HTML parsing support.
//!
//! This module parses HTML strings with scraper and converts them to the
//! Node structure used by the converter.

use scraper::{ElementRef, Html, Node as ScraperNode, Selector};

use crate::node::Node;
use crate::{PagedownError, Result};

/// A parsed HTML document. Parse once, then take the whole tree or CSS
/// selections from it.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// The whole document as a Node tree rooted at `<html>`
    pub fn root(&self) -> Node {
        scraper_to_node(self.html.root_element())
    }

    /// First element matching a CSS selector
    pub fn select_first(&self, selector: &str) -> Result<Option<Node>> {
        let parsed = Selector::parse(selector).map_err(|err| PagedownError::InvalidSelector {
            selector: selector.to_string(),
            message: err.to_string(),
        })?;
        Ok(self.html.select(&parsed).next().map(scraper_to_node))
    }
}

/// Parse a full HTML document into a Node tree rooted at `<html>`.
///
/// # Example
///
/// ```rust
/// use pagedown::{parse_document, Converter};
///
/// let document = parse_document("<h1>Hello <em>World</em></h1>");
/// let markdown = Converter::new().convert(&document).markdown;
/// assert!(markdown.contains("# Hello *World*"));
/// ```
pub fn parse_document(html: &str) -> Node {
    Document::parse(html).root()
}

/// Parse an HTML fragment. The fragment's nodes are wrapped in an `<html>`
/// element, which renders as a transparent container.
pub fn parse_fragment(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    scraper_to_node(document.root_element())
}

/// Parse a document and return the first element matching a CSS selector.
pub fn select_first(html: &str, selector: &str) -> Result<Option<Node>> {
    Document::parse(html).select_first(selector)
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let tag = element.value().name();
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Node::element_with_attrs(tag, attrs);

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(&comment.comment));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}

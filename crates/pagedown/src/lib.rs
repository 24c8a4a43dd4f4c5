//! # pagedown
//!
//! Convert documentation pages to Markdown.
//!
//! The converter walks a DOM-style [`Node`] tree and renders a fixed table of
//! tag rules. Machine-translation overlays injected by translation
//! extensions can be stripped from the tree or merged inline as
//! "original translation" text, and every `<img>` is recorded together with
//! whatever pixel data an [`ImageDataResolver`] can supply.
//!
//! ## Design
//!
//! - **Tree in, text out**: the input tree is never mutated; each run works
//!   on its own copy and collects its own image list.
//! - **Parser agnostic**: any HTML parser can build the [`Node`] structure.
//!   The `html` feature (on by default) adds a scraper-based parser.
//! - **No network**: resolvers only report data that is already available.
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use pagedown::{Converter, Node};
//!
//! let mut h1 = Node::element("h1");
//! h1.add_child(Node::text("Hello World"));
//!
//! let result = Converter::new().convert(&h1);
//! assert_eq!(result.markdown, "# Hello World\n\n");
//! assert!(result.images.is_empty());
//! ```
//!
//! ## Example (HTML page)
//!
//! ```rust
//! use pagedown::Converter;
//!
//! let html = "<html><head><title>Guide</title></head>\
//!             <body><main><h1>Intro</h1><p>Hi</p></main></body></html>";
//! let page = Converter::new().convert_page(html, None).unwrap();
//! assert_eq!(page.title.as_deref(), Some("Guide"));
//! assert_eq!(page.result.markdown, "# Intro\n\nHi\n\n");
//! ```

mod convert;
#[cfg(feature = "html")]
pub mod html;
pub mod image;
pub mod locate;
pub mod node;
mod options;
#[cfg(feature = "html")]
mod page;
pub mod resolver;
mod rules;
pub mod sanitize;
mod utilities;

pub use convert::{convert, merge_translation, Conversion, ConversionResult, Converter};
#[cfg(feature = "html")]
pub use html::{parse_document, parse_fragment, select_first, Document};
pub use image::{image_filename, ImageData, ImageDataResolver, ImageRecord, NullResolver, ResolveError};
pub use node::{Matcher, Node, NodeType};
pub use options::ConversionOptions;
#[cfg(feature = "html")]
pub use page::Page;
pub use resolver::FsResolver;
pub use rules::{Filter, Replacement, ReplacementFn, Rule, Rules, StructureFn};
pub use sanitize::sanitize;
pub use utilities::*;

/// Error type for page-level operations
#[derive(Debug, thiserror::Error)]
pub enum PagedownError {
    #[error("invalid CSS selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("no element matches {0:?}")]
    NoMatch(String),
}

pub type Result<T> = std::result::Result<T, PagedownError>;

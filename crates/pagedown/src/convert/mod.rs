//! Converter - the main entry point for tree to Markdown conversion.

pub(crate) mod list;
pub(crate) mod table;
mod translation;

pub use translation::merge_translation;

use crate::image::{image_filename, ImageDataResolver, ImageRecord, NullResolver};
use crate::node::{Node, NodeType};
use crate::options::ConversionOptions;
use crate::rules::{Rule, Rules};
use crate::sanitize::{is_translation_wrapper, sanitize};

/// Output of a single conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionResult {
    /// The rendered Markdown
    pub markdown: String,
    /// Every image encountered, in document order
    pub images: Vec<ImageRecord>,
}

/// Converts node trees to Markdown.
///
/// The converter only holds immutable state; every call to
/// [`Converter::convert`] gets its own tree copy and image list.
pub struct Converter {
    options: ConversionOptions,
    rules: Rules,
    resolver: Box<dyn ImageDataResolver + Send + Sync>,
}

impl Converter {
    /// Create a new Converter with default options
    pub fn new() -> Self {
        Self::with_options(ConversionOptions::default())
    }

    /// Create a Converter with custom options
    pub fn with_options(options: ConversionOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
            resolver: Box::new(NullResolver),
        }
    }

    /// Use `resolver` to look up pixel data for images
    pub fn with_resolver<R>(mut self, resolver: R) -> Self
    where
        R: ImageDataResolver + Send + Sync + 'static,
    {
        self.resolver = Box::new(resolver);
        self
    }

    /// Add a custom rule, checked before the built-in table
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ConversionOptions {
        &mut self.options
    }

    /// Convert a node tree to Markdown
    pub fn convert(&self, root: &Node) -> ConversionResult {
        let tree = sanitize(root, self.options.remove_translations);

        let mut run = Conversion::new(self);
        let markdown = run.render(&tree);

        ConversionResult {
            markdown,
            images: run.images,
        }
    }

    /// Convert an optional root; an absent root yields an empty result
    pub fn convert_optional(&self, root: Option<&Node>) -> ConversionResult {
        root.map(|node| self.convert(node)).unwrap_or_default()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert `root` with `options` and no image resolver
pub fn convert(root: &Node, options: ConversionOptions) -> ConversionResult {
    Converter::with_options(options).convert(root)
}

/// State of one conversion run, handed to every rule.
pub struct Conversion<'a> {
    converter: &'a Converter,
    images: Vec<ImageRecord>,
}

impl<'a> Conversion<'a> {
    fn new(converter: &'a Converter) -> Self {
        Self {
            converter,
            images: Vec::new(),
        }
    }

    /// Options of the running conversion
    pub fn options(&self) -> &'a ConversionOptions {
        &self.converter.options
    }

    /// Images recorded so far
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    /// Render a single node
    pub fn render(&mut self, node: &Node) -> String {
        match node.node_type {
            NodeType::Text => node.node_value.clone().unwrap_or_default(),
            NodeType::Element => self.render_element(node),
            NodeType::Comment => String::new(),
        }
    }

    /// Render the children of a node, concatenated
    pub fn render_children(&mut self, node: &Node) -> String {
        self.render_nodes(node.children())
    }

    /// Render a sequence of nodes, concatenated
    pub fn render_nodes<'n, I>(&mut self, nodes: I) -> String
    where
        I: IntoIterator<Item = &'n Node>,
    {
        nodes.into_iter().map(|child| self.render(child)).collect()
    }

    fn render_element(&mut self, node: &Node) -> String {
        let converter = self.converter;

        if converter.options.include_translations && is_translation_wrapper(node) {
            return merge_translation(node);
        }

        match converter.rules.for_node(node, &converter.options) {
            Some(rule) if rule.wants_content() => {
                let content = self.render_children(node);
                rule.replace(node, &content, self)
            }
            Some(rule) => rule.replace(node, "", self),
            None => self.render_children(node),
        }
    }

    /// Record an `<img>` and return its Markdown reference.
    ///
    /// Resolution failures are logged; the image is still recorded, without
    /// data, and the reference is still emitted.
    pub fn image(&mut self, node: &Node) -> String {
        let src = node.attr("src").unwrap_or("");
        if src.is_empty() {
            return String::new();
        }
        let alt = node.attr("alt").unwrap_or("");

        let data = match self.converter.resolver.resolve(src) {
            Ok(data) => Some(data),
            Err(err) => {
                log::warn!("{}", err);
                None
            }
        };

        self.images.push(ImageRecord {
            url: src.to_string(),
            alt: alt.to_string(),
            data,
        });

        format!("![{}]({})\n\n", alt, image_filename(src))
    }
}

//! DOM-like node tree for HTML to Markdown conversion.
//!
//! Any parser (scraper, CDP, a browser bridge) can build this structure and
//! hand it to the converter. Parents own their children; there are no
//! back-references, so a `clone()` is always a full deep copy.

use indexmap::IndexMap;

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// Comment node (nodeType = 8)
    Comment = 8,
}

impl From<u32> for NodeType {
    fn from(value: u32) -> Self {
        match value {
            3 => NodeType::Text,
            8 => NodeType::Comment,
            _ => NodeType::Element,
        }
    }
}

/// A node in the page tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Node type (1 = Element, 3 = Text, 8 = Comment)
    pub node_type: NodeType,

    /// Node name (uppercase for elements, e.g., "DIV", "#text" for text nodes)
    pub node_name: String,

    /// Character data for text and comment nodes
    pub node_value: Option<String>,

    /// Attributes in document order, keys lowercased and unique.
    /// Only present for element nodes
    pub attributes: Option<IndexMap<String, String>>,

    /// Child nodes
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_uppercase(),
            node_value: None,
            attributes: Some(IndexMap::new()),
            children: Some(Vec::new()),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag_name);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            node_type: NodeType::Text,
            node_name: "#text".to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
        }
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Self {
            node_type: NodeType::Comment,
            node_name: "#comment".to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
        }
    }

    /// Builder-style `add_child`
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Builder-style `add_child` for a text node
    pub fn with_text(self, content: &str) -> Self {
        self.with_child(Node::text(content))
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> String {
        self.node_name.to_lowercase()
    }

    /// Case-insensitive tag comparison without allocating
    pub fn is_tag(&self, name: &str) -> bool {
        self.is_element() && self.node_name.eq_ignore_ascii_case(name)
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        let attrs = self.attributes.as_ref()?;
        attrs.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute, replacing any existing value under the same name
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes
            .get_or_insert_with(IndexMap::new)
            .insert(name.to_lowercase(), value.to_string());
    }

    /// Class tokens from the `class` attribute
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").into_iter().flat_map(str::split_whitespace)
    }

    /// Check for a single class token
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Child nodes as a slice
    pub fn child_nodes(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.child_nodes().iter()
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }

    /// All descendants in document order, excluding `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.child_nodes().iter().rev().collect(),
        }
    }

    /// Element descendants matching `matcher`, in document order
    pub fn select<'a>(&'a self, matcher: &'a Matcher<'a>) -> impl Iterator<Item = &'a Node> + 'a {
        self.descendants().filter(move |n| matcher.matches(n))
    }

    /// First element descendant matching `matcher`
    pub fn select_first(&self, matcher: &Matcher<'_>) -> Option<&Node> {
        self.descendants().find(|n| matcher.matches(n))
    }

    /// Remove every descendant for which `predicate` holds, together with its
    /// subtree. Returns the number of removed subtrees.
    pub fn remove_descendants<F>(&mut self, predicate: &F) -> usize
    where
        F: Fn(&Node) -> bool,
    {
        let Some(children) = self.children.as_mut() else {
            return 0;
        };

        let before = children.len();
        children.retain(|child| !predicate(child));
        let mut removed = before - children.len();

        for child in children.iter_mut() {
            removed += child.remove_descendants(predicate);
        }
        removed
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self.node_type {
            NodeType::Text => out.push_str(self.node_value.as_deref().unwrap_or("")),
            NodeType::Element => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
            NodeType::Comment => {}
        }
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        self.stack.extend(node.child_nodes().iter().rev());
        Some(node)
    }
}

/// A single simple selector, enough for the fixed selector lists used by the
/// sanitizer and the locators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher<'a> {
    /// `tag`
    Tag(&'a str),
    /// `.class`
    Class(&'a str),
    /// `[class*="fragment"]`, a substring of the raw class attribute
    ClassContains(&'a str),
    /// `#id`
    Id(&'a str),
    /// `[attr]`
    Attr(&'a str),
    /// `[attr="value"]`
    AttrEquals(&'a str, &'a str),
}

impl Matcher<'_> {
    /// Check if this matcher matches a node. Non-elements never match.
    pub fn matches(&self, node: &Node) -> bool {
        if !node.is_element() {
            return false;
        }
        match *self {
            Matcher::Tag(tag) => node.is_tag(tag),
            Matcher::Class(class) => node.has_class(class),
            Matcher::ClassContains(fragment) => {
                node.attr("class").is_some_and(|c| c.contains(fragment))
            }
            Matcher::Id(id) => node.attr("id") == Some(id),
            Matcher::Attr(name) => node.has_attr(name),
            Matcher::AttrEquals(name, value) => node.attr(name) == Some(value),
        }
    }

    /// Check if any matcher in `matchers` matches a node
    pub fn any(matchers: &[Matcher<'_>], node: &Node) -> bool {
        matchers.iter().any(|m| m.matches(node))
    }
}

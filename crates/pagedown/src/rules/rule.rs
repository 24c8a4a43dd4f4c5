//! Rule and Filter types for tag formatting.

use crate::convert::Conversion;
use crate::node::{Matcher, Node};
use crate::options::ConversionOptions;

/// Formats an element from its already rendered children
pub type ReplacementFn = Box<dyn Fn(&Node, &str, &mut Conversion<'_>) -> String + Send + Sync>;

/// Formats an element by walking its subtree itself (lists, tables, images)
pub type StructureFn = Box<dyn Fn(&Node, &mut Conversion<'_>) -> String + Send + Sync>;

/// Which elements a rule applies to. Tag names are compared lowercase.
pub enum Filter {
    TagName(String),
    TagNames(Vec<String>),
    /// Match anything a [`Matcher`] selects, e.g. a class
    Select(Matcher<'static>),
    /// Decide per element, with access to the run's options
    Predicate(Box<dyn Fn(&Node, &ConversionOptions) -> bool + Send + Sync>),
}

impl Filter {
    pub fn tag(name: &str) -> Self {
        Filter::TagName(name.to_lowercase())
    }

    pub fn tags(names: &[&str]) -> Self {
        Filter::TagNames(names.iter().map(|s| s.to_lowercase()).collect())
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Node, &ConversionOptions) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Check if this filter matches an element. Text and comments never match.
    pub fn matches(&self, node: &Node, options: &ConversionOptions) -> bool {
        if !node.is_element() {
            return false;
        }
        match self {
            Filter::TagName(t) => node.is_tag(t),
            Filter::TagNames(tags) => tags.iter().any(|t| node.is_tag(t)),
            Filter::Select(matcher) => matcher.matches(node),
            Filter::Predicate(f) => f(node, options),
        }
    }
}

/// How a matched element is turned into Markdown
pub enum Replacement {
    /// Children are rendered first and passed in as `content`
    Content(ReplacementFn),
    /// The rule owns the walk of the subtree; children are not pre-rendered
    Structure(StructureFn),
}

/// A rule defines how to convert a matched element to Markdown
pub struct Rule {
    /// Filter to determine which elements this rule applies to
    pub filter: Filter,
    /// Replacement function that generates Markdown
    pub replacement: Replacement,
}

impl Rule {
    /// Create a new rule
    pub fn new<F>(filter: Filter, replacement: F) -> Self
    where
        F: Fn(&Node, &str, &mut Conversion<'_>) -> String + Send + Sync + 'static,
    {
        Self {
            filter,
            replacement: Replacement::Content(Box::new(replacement)),
        }
    }

    /// Create a rule that renders the element's subtree on its own
    pub fn structural<F>(filter: Filter, replacement: F) -> Self
    where
        F: Fn(&Node, &mut Conversion<'_>) -> String + Send + Sync + 'static,
    {
        Self {
            filter,
            replacement: Replacement::Structure(Box::new(replacement)),
        }
    }

    /// Create a rule that matches a single tag
    pub fn for_tag<F>(tag: &str, replacement: F) -> Self
    where
        F: Fn(&Node, &str, &mut Conversion<'_>) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::tag(tag), replacement)
    }

    /// Create a rule that matches multiple tags
    pub fn for_tags<F>(tags: &[&str], replacement: F) -> Self
    where
        F: Fn(&Node, &str, &mut Conversion<'_>) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::tags(tags), replacement)
    }

    /// Whether children must be rendered before [`Rule::replace`] is called
    pub fn wants_content(&self) -> bool {
        matches!(self.replacement, Replacement::Content(_))
    }

    /// Apply this rule's replacement. `content` is ignored by structural rules.
    pub fn replace(&self, node: &Node, content: &str, run: &mut Conversion<'_>) -> String {
        match &self.replacement {
            Replacement::Content(f) => f(node, content, run),
            Replacement::Structure(f) => f(node, run),
        }
    }
}

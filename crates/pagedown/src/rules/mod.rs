//! Rule system for tag formatting.

mod rule;
mod standard;

pub use rule::{Filter, Replacement, ReplacementFn, Rule, StructureFn};
pub use standard::standard_rules;

use indexmap::IndexMap;

use crate::node::Node;
use crate::options::ConversionOptions;

/// Collection of rules for conversion
pub struct Rules {
    /// Custom rules added by the user (checked first)
    custom_rules: IndexMap<String, Rule>,
    /// Built-in tag formatting table
    standard_rules: Vec<Rule>,
}

impl Rules {
    /// Create a new Rules instance with the standard table
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            standard_rules: standard_rules(),
        }
    }

    /// Add a custom rule. A rule added under an existing key replaces it.
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Find the appropriate rule for a node
    pub fn for_node<'a>(&'a self, node: &Node, options: &ConversionOptions) -> Option<&'a Rule> {
        self.custom_rules
            .values()
            .chain(self.standard_rules.iter())
            .find(|rule| rule.filter.matches(node, options))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

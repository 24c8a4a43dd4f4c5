//! Bilingual merge of translation overlays.

use crate::node::{Matcher, Node};
use crate::sanitize::{INNER_CLASS, WRAPPER_CLASS};

/// Collapse a translation wrapper into one `"original translation"` run.
///
/// Only text survives; markup inside the wrapper is not rendered.
pub fn merge_translation(wrapper: &Node) -> String {
    let translation = translation_text(wrapper);
    let original = original_text(wrapper);

    match (original.is_empty(), translation.is_empty()) {
        (false, false) => format!("{} {}", original, translation),
        (true, false) => translation,
        _ => original,
    }
}

fn translation_text(wrapper: &Node) -> String {
    wrapper
        .select_first(&Matcher::Class(INNER_CLASS))
        .map(|inner| inner.text_content().trim().to_string())
        .unwrap_or_default()
}

fn original_text(wrapper: &Node) -> String {
    let mut copy = wrapper.clone();
    copy.remove_descendants(&|n: &Node| n.has_class(WRAPPER_CLASS) || n.has_class(INNER_CLASS));
    copy.text_content().trim().to_string()
}

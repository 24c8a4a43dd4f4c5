//! Translation-overlay sanitizer.
//!
//! Browser translation extensions inject wrapper elements next to the
//! original text. The converter works on a copy with those wrappers removed
//! unless it was asked to merge them.

use crate::node::{Matcher, Node};

/// Class of the outer wrapper element of a translation overlay
pub const WRAPPER_CLASS: &str = "immersive-translate-target-wrapper";

/// Class of the block-level wrapper variant
pub const BLOCK_WRAPPER_CLASS: &str = "immersive-translate-target-translation-block-wrapper";

/// Class of the element holding the translated text
pub const INNER_CLASS: &str = "immersive-translate-target-inner";

/// Every element matching one of these is part of an overlay.
pub const TRANSLATION_SELECTORS: &[Matcher<'static>] = &[
    Matcher::Class(WRAPPER_CLASS),
    Matcher::Class("immersive-translate-target-translation-theme-none"),
    Matcher::Class("immersive-translate-target-translation-block-wrapper-theme-none"),
    Matcher::Class(BLOCK_WRAPPER_CLASS),
    Matcher::Class(INNER_CLASS),
    Matcher::Class("immersive-translate-target-translation-theme-none-inner"),
    Matcher::Class("immersive-translate-target-translation-inline-wrapper-theme-none"),
    Matcher::Class("immersive-translate-target-translation-inline-wrapper"),
    Matcher::Attr("data-immersive-translate-translation-element-mark"),
];

/// Check if a node is part of a translation overlay
pub fn is_translation_element(node: &Node) -> bool {
    Matcher::any(TRANSLATION_SELECTORS, node)
}

/// Check if a node is the wrapper of a translation overlay
pub fn is_translation_wrapper(node: &Node) -> bool {
    node.is_element() && (node.has_class(WRAPPER_CLASS) || node.has_class(BLOCK_WRAPPER_CLASS))
}

/// Deep-copy `root`, dropping translation overlays from the copy when
/// `remove_translations` is set. The root itself is never removed.
pub fn sanitize(root: &Node, remove_translations: bool) -> Node {
    let mut copy = root.clone();
    if remove_translations {
        let removed = copy.remove_descendants(&is_translation_element);
        if removed > 0 {
            log::debug!("removed {} translation overlay elements", removed);
        }
    }
    copy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bilingual_paragraph() -> Node {
        let wrapper = Node::element_with_attrs("font", vec![("class", WRAPPER_CLASS)]).with_child(
            Node::element_with_attrs("font", vec![("class", INNER_CLASS)]).with_text("Hola"),
        );
        Node::element("p").with_text("Hello").with_child(wrapper)
    }

    #[test]
    fn test_sanitize_without_removal_is_deep_copy() {
        let root = bilingual_paragraph();
        let copy = sanitize(&root, false);
        assert_eq!(copy, root);
    }

    #[test]
    fn test_sanitize_removes_overlays() {
        let root = bilingual_paragraph();
        let copy = sanitize(&root, true);
        assert_eq!(copy.text_content(), "Hello");
        // the original is untouched
        assert_eq!(root.text_content(), "HelloHola");
    }

    #[test]
    fn test_sanitize_attribute_marker() {
        let root = Node::element("div").with_text("keep").with_child(
            Node::element_with_attrs(
                "span",
                vec![("data-immersive-translate-translation-element-mark", "1")],
            )
            .with_text("drop"),
        );
        assert_eq!(sanitize(&root, true).text_content(), "keep");
    }

    #[test]
    fn test_sanitize_theme_variants() {
        let root = Node::element("div")
            .with_child(
                Node::element_with_attrs(
                    "span",
                    vec![("class", "x immersive-translate-target-translation-inline-wrapper-theme-none")],
                )
                .with_text("a"),
            )
            .with_child(Node::element("span").with_text("b"));
        assert_eq!(sanitize(&root, true).text_content(), "b");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let root = Node::element("article")
            .with_child(bilingual_paragraph())
            .with_child(bilingual_paragraph());
        let once = sanitize(&root, true);
        let mut twice = sanitize(&once, true);
        assert_eq!(twice, once);
        assert_eq!(twice.remove_descendants(&is_translation_element), 0);
    }

    #[test]
    fn test_root_is_never_removed() {
        let root = Node::element_with_attrs("div", vec![("class", WRAPPER_CLASS)]).with_text("x");
        assert_eq!(sanitize(&root, true), root);
    }

    #[test]
    fn test_wrapper_predicate() {
        let block = Node::element_with_attrs("div", vec![("class", BLOCK_WRAPPER_CLASS)]);
        let inner = Node::element_with_attrs("div", vec![("class", INNER_CLASS)]);
        assert!(is_translation_wrapper(&block));
        assert!(!is_translation_wrapper(&inner));
        assert!(is_translation_element(&inner));
    }
}

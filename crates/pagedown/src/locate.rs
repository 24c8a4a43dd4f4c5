//! Locating the part of a page worth converting.

use crate::node::{Matcher, Node};

/// Breadcrumb and navigation chrome
pub const NAVIGATION_SELECTORS: &[Matcher<'static>] = &[
    Matcher::Class("ptcom-design__breadcrumbs__1gi647c"),
    Matcher::Class("breadcrumbs"),
    Matcher::ClassContains("breadcrumb"),
    Matcher::ClassContains("navigation"),
    Matcher::ClassContains("nav"),
];

/// Previous / next page links
pub const PAGINATION_SELECTORS: &[Matcher<'static>] = &[
    Matcher::ClassContains("previous"),
    Matcher::ClassContains("next"),
    Matcher::ClassContains("pagination"),
];

/// Elements whose whole text is one of these are pagination links
pub const PAGINATION_TEXTS: &[&str] = &["PREVIOUS", "NEXT", "Previous", "Next", "上一页", "下一个"];

/// Main content containers, highest priority first
pub const MAIN_CONTENT_SELECTORS: &[Matcher<'static>] = &[
    Matcher::AttrEquals("data-pagefind-body", "true"),
    Matcher::Tag("main"),
    Matcher::Tag("article"),
    Matcher::Class("content"),
    Matcher::Id("content"),
    Matcher::Class("main-content"),
    Matcher::Id("main-content"),
];

/// Pick the main content of a page body.
///
/// Works on a copy: navigation and pagination are stripped first, then the
/// first container from [`MAIN_CONTENT_SELECTORS`] wins. Falls back to the
/// whole stripped body.
pub fn find_main_content(body: &Node) -> Node {
    let mut copy = body.clone();

    let chrome = copy.remove_descendants(&|n: &Node| {
        Matcher::any(NAVIGATION_SELECTORS, n) || Matcher::any(PAGINATION_SELECTORS, n)
    });
    let labels = copy.remove_descendants(&|n: &Node| {
        n.is_element() && PAGINATION_TEXTS.contains(&n.text_content().trim())
    });
    log::debug!("stripped {} navigation elements and {} pagination links", chrome, labels);

    for matcher in MAIN_CONTENT_SELECTORS {
        if let Some(found) = copy.select_first(matcher) {
            log::debug!("main content matched {:?}", matcher);
            return found.clone();
        }
    }

    log::debug!("no main content container, using the whole body");
    copy
}

/// Title from the first `h1`: the text of its first link if that is not
/// empty, otherwise the heading's own text.
pub fn first_heading_title(node: &Node) -> Option<String> {
    let h1 = node.select_first(&Matcher::Tag("h1"))?;

    let link_text = h1
        .select_first(&Matcher::Tag("a"))
        .map(|a| a.text_content().trim().to_string())
        .filter(|text| !text.is_empty());

    link_text
        .or_else(|| Some(h1.text_content().trim().to_string()))
        .filter(|text| !text.is_empty())
}

/// Text of the document's `title` element
pub fn page_title(document: &Node) -> Option<String> {
    let title = if document.is_tag("title") {
        document
    } else {
        document.select_first(&Matcher::Tag("title"))?
    };
    Some(title.text_content().trim().to_string()).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_class(tag: &str, class: &str) -> Node {
        Node::element_with_attrs(tag, vec![("class", class)])
    }

    #[test]
    fn test_prefers_pagefind_body() {
        let body = Node::element("body")
            .with_child(Node::element("main").with_text("main"))
            .with_child(
                Node::element_with_attrs("div", vec![("data-pagefind-body", "true")])
                    .with_text("pagefind"),
            );
        assert_eq!(find_main_content(&body).text_content(), "pagefind");
    }

    #[test]
    fn test_priority_order() {
        let body = Node::element("body")
            .with_child(with_class("div", "content").with_text("by class"))
            .with_child(Node::element("article").with_text("article"));
        assert_eq!(find_main_content(&body).text_content(), "article");

        let body = Node::element("body")
            .with_child(Node::element_with_attrs("div", vec![("id", "main-content")]).with_text("id"))
            .with_child(with_class("div", "main-content").with_text("class"));
        assert_eq!(find_main_content(&body).text_content(), "class");
    }

    #[test]
    fn test_strips_navigation_and_pagination() {
        let main = Node::element("main")
            .with_child(with_class("ol", "breadcrumbs").with_text("Home / Docs"))
            .with_child(Node::element("p").with_text("Body"))
            .with_child(with_class("div", "pager-next").with_text("Go on"))
            .with_child(Node::element("a").with_text(" Next "))
            .with_child(Node::element("span").with_text("上一页"));
        let body = Node::element("body")
            .with_child(with_class("div", "sidenav").with_text("menu"))
            .with_child(main);

        let found = find_main_content(&body);
        assert!(found.is_tag("main"));
        assert_eq!(found.text_content(), "Body");
    }

    #[test]
    fn test_falls_back_to_stripped_body() {
        let body = Node::element("body")
            .with_child(with_class("nav", "top-navigation").with_text("menu"))
            .with_child(Node::element("p").with_text("text"));
        let found = find_main_content(&body);
        assert!(found.is_tag("body"));
        assert_eq!(found.text_content(), "text");
        // the input keeps its navigation
        assert_eq!(body.text_content(), "menutext");
    }

    #[test]
    fn test_first_heading_title() {
        let root = Node::element("div")
            .with_child(Node::element("h1").with_text(" Getting started "))
            .with_child(Node::element("h1").with_text("Other"));
        assert_eq!(first_heading_title(&root).as_deref(), Some("Getting started"));
    }

    #[test]
    fn test_first_heading_title_prefers_link_text() {
        let h1 = Node::element("h1")
            .with_text("#")
            .with_child(Node::element_with_attrs("a", vec![("href", "#intro")]).with_text(" Intro "));
        let root = Node::element("div").with_child(h1);
        assert_eq!(first_heading_title(&root).as_deref(), Some("Intro"));

        let h1 = Node::element("h1")
            .with_text("Intro")
            .with_child(Node::element_with_attrs("a", vec![("href", "#intro")]));
        let root = Node::element("div").with_child(h1);
        assert_eq!(first_heading_title(&root).as_deref(), Some("Intro"));
    }

    #[test]
    fn test_first_heading_title_absent_or_blank() {
        assert_eq!(first_heading_title(&Node::element("div")), None);
        let root = Node::element("div").with_child(Node::element("h1").with_text("  "));
        assert_eq!(first_heading_title(&root), None);
    }

    #[test]
    fn test_page_title() {
        let doc = Node::element("html")
            .with_child(Node::element("head").with_child(Node::element("title").with_text(" Docs ")))
            .with_child(Node::element("body"));
        assert_eq!(page_title(&doc).as_deref(), Some("Docs"));
        assert_eq!(page_title(&Node::element("html")), None);
    }
}

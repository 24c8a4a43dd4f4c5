//! `ul` / `ol` rendering.

use super::Conversion;
use crate::node::Node;
use crate::utilities::indent_lines;

const NESTED_INDENT: &str = "  ";

fn is_list(node: &Node) -> bool {
    node.is_tag("ul") || node.is_tag("ol")
}

/// Render a list element. Only direct `li` children are items; lists that
/// are direct children of an item are rendered under it, two spaces deeper.
pub fn render_list(list: &Node, ordered: bool, run: &mut Conversion<'_>) -> String {
    let mut out = render_items(list, ordered, run);
    out.push('\n');
    out
}

fn render_items(list: &Node, ordered: bool, run: &mut Conversion<'_>) -> String {
    let mut out = String::new();

    let items = list.element_children().filter(|c| c.is_tag("li"));
    for (index, item) in items.enumerate() {
        let content = run.render_nodes(item.children().filter(|c| !is_list(c)));
        let content = content.trim();

        if ordered {
            out.push_str(&format!("{}. {}\n", index + 1, content));
        } else {
            out.push_str(&format!("- {}\n", content));
        }

        for nested in item.element_children().filter(|c| is_list(c)) {
            let nested_items = render_items(nested, nested.is_tag("ol"), run);
            out.push_str(&indent_lines(&nested_items, NESTED_INDENT));
        }
    }

    out
}

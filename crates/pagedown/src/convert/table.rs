//! `table` rendering.
//!
//! Rows are gathered at any depth so `thead`/`tbody`/`tfoot` sections need no
//! special casing. Rows and cells of a nested table belong to that table and
//! are rendered when its cell is rendered.

use super::Conversion;
use crate::node::Node;

/// Render a table element. The first row is the header; every other row
/// contributes its `td` cells only. Rows are not padded to a common width.
pub fn render_table(table: &Node, run: &mut Conversion<'_>) -> String {
    let rows = collect_within_table(table, &["tr"]);
    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };

    let headers = render_cells(header, &["th", "td"], run);
    let mut out = row_line(&headers);
    out.push_str(&row_line(&vec!["---".to_string(); headers.len()]));

    for row in body {
        out.push_str(&row_line(&render_cells(row, &["td"], run)));
    }

    out.push('\n');
    out
}

fn render_cells(row: &Node, tags: &[&str], run: &mut Conversion<'_>) -> Vec<String> {
    collect_within_table(row, tags)
        .into_iter()
        .map(|cell| run.render(cell).trim().to_string())
        .collect()
}

fn row_line(cells: &[String]) -> String {
    format!("| {} |\n", cells.join(" | "))
}

/// Descendants with one of `tags`, in document order, without entering
/// nested tables
fn collect_within_table<'a>(node: &'a Node, tags: &[&str]) -> Vec<&'a Node> {
    let mut found = Vec::new();
    collect_into(node, tags, &mut found);
    found
}

fn collect_into<'a>(node: &'a Node, tags: &[&str], found: &mut Vec<&'a Node>) {
    for child in node.element_children() {
        if tags.iter().any(|tag| child.is_tag(tag)) {
            found.push(child);
        }
        if !child.is_tag("table") {
            collect_into(child, tags, found);
        }
    }
}

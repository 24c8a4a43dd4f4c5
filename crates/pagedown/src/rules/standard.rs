//! The built-in tag formatting table.

use super::{Filter, Rule};
use crate::convert::{list, table};
use crate::utilities::repeat;

/// Tags rendered as their children with no added markup
pub const PASS_THROUGH: &[&str] = &[
    "div", "span", "section", "article", "main", "header", "footer", "nav", "aside", "font", "li",
];

/// Create all built-in rules
pub fn standard_rules() -> Vec<Rule> {
    vec![
        heading_rule(),
        paragraph_rule(),
        line_break_rule(),
        strong_rule(),
        emphasis_rule(),
        code_rule(),
        fenced_code_block_rule(),
        link_rule(),
        list_rule(),
        blockquote_rule(),
        horizontal_rule(),
        image_rule(),
        table_rule(),
        pass_through_rule(),
    ]
}

fn heading_rule() -> Rule {
    Rule::for_tags(&["h1", "h2", "h3", "h4", "h5", "h6"], |node, content, _| {
        let level: usize = node.tag_name()[1..].parse().unwrap_or(1);
        format!("{} {}\n\n", repeat("#", level), content.trim())
    })
}

fn paragraph_rule() -> Rule {
    Rule::for_tag("p", |_, content, _| format!("{}\n\n", content.trim()))
}

fn line_break_rule() -> Rule {
    Rule::for_tag("br", |_, _, _| "\n".to_string())
}

fn strong_rule() -> Rule {
    Rule::for_tags(&["strong", "b"], |_, content, _| format!("**{}**", content))
}

fn emphasis_rule() -> Rule {
    Rule::for_tags(&["em", "i"], |_, content, _| format!("*{}*", content))
}

fn code_rule() -> Rule {
    Rule::for_tag("code", |_, content, _| format!("`{}`", content))
}

fn fenced_code_block_rule() -> Rule {
    Rule::for_tag("pre", |_, content, _| format!("```\n{}\n```\n\n", content.trim()))
}

fn link_rule() -> Rule {
    Rule::for_tag("a", |node, content, run| {
        match node.attr("href") {
            Some(href) if run.options().keep_links && !href.is_empty() => {
                format!("[{}]({})", content, href)
            }
            _ => content.to_string(),
        }
    })
}

fn list_rule() -> Rule {
    Rule::structural(Filter::tags(&["ul", "ol"]), |node, run| {
        list::render_list(node, node.is_tag("ol"), run)
    })
}

fn blockquote_rule() -> Rule {
    Rule::for_tag("blockquote", |_, content, _| {
        let quoted: Vec<String> = content
            .split('\n')
            .map(|line| {
                if line.trim().is_empty() {
                    ">".to_string()
                } else {
                    format!("> {}", line)
                }
            })
            .collect();
        format!("{}\n\n", quoted.join("\n"))
    })
}

fn horizontal_rule() -> Rule {
    Rule::for_tag("hr", |_, _, _| "---\n\n".to_string())
}

fn image_rule() -> Rule {
    Rule::structural(Filter::tag("img"), |node, run| run.image(node))
}

fn table_rule() -> Rule {
    Rule::structural(Filter::tag("table"), table::render_table)
}

fn pass_through_rule() -> Rule {
    Rule::for_tags(PASS_THROUGH, |_, content, _| content.to_string())
}

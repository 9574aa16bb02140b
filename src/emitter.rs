//! Hand-rolled YAML emitter for [`Document`] trees.
//!
//! Two spaces per nesting level, block style only, no quoting or escaping.
//! Strings spanning several lines are written as `|` block literals.

use crate::document::Document;

const INDENT: &str = "  ";

/// Renders a document into YAML lines.
pub fn render(doc: &Document) -> Vec<String> {
    let mut lines = Vec::new();
    render_node(doc, 0, &mut lines);
    lines
}

/// Renders a document into a complete YAML text with a trailing newline.
pub fn to_yaml(doc: &Document) -> String {
    let mut text = render(doc).join("\n");
    text.push('\n');
    text
}

fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}

fn render_node(doc: &Document, depth: usize, lines: &mut Vec<String>) {
    match doc {
        Document::Mapping(map) => {
            for (key, value) in map {
                render_entry(key, value, depth, lines);
            }
        }
        Document::Sequence(items) => {
            for item in items {
                render_item(item, depth, lines);
            }
        }
        Document::String(s) if s.contains('\n') => {
            lines.push(format!("{}|", indent(depth)));
            push_block_lines(s, depth + 1, lines);
        }
        scalar => push_trimmed(lines, format!("{}{}", indent(depth), inline_scalar(scalar))),
    }
}

fn render_entry(key: &str, value: &Document, depth: usize, lines: &mut Vec<String>) {
    let pad = indent(depth);

    match value {
        Document::Mapping(_) | Document::Sequence(_) => {
            lines.push(format!("{pad}{key}:"));
            if !is_empty_container(value) {
                render_node(value, depth + 1, lines);
            }
        }
        Document::String(s) if s.contains('\n') => {
            lines.push(format!("{pad}{key}: |"));
            push_block_lines(s, depth + 1, lines);
        }
        scalar => push_trimmed(lines, format!("{pad}{key}: {}", inline_scalar(scalar))),
    }
}

fn render_item(item: &Document, depth: usize, lines: &mut Vec<String>) {
    let pad = indent(depth);

    match item {
        Document::Mapping(map) if map.is_empty() => lines.push(format!("{pad}- {{}}")),
        Document::Sequence(items) if items.is_empty() => lines.push(format!("{pad}- []")),
        Document::Mapping(_) | Document::Sequence(_) => {
            // The nested rendering sits one level deeper, so everything after the
            // first line already lines up under the text following "- ".
            let mut nested = Vec::new();
            render_node(item, depth + 1, &mut nested);
            let mut nested = nested.into_iter();
            if let Some(first) = nested.next() {
                lines.push(format!("{pad}- {}", first.trim_start()));
            }
            lines.extend(nested);
        }
        Document::String(s) if s.contains('\n') => {
            lines.push(format!("{pad}- |"));
            push_block_lines(s, depth + 1, lines);
        }
        scalar => push_trimmed(lines, format!("{pad}- {}", inline_scalar(scalar))),
    }
}

fn push_block_lines(text: &str, depth: usize, lines: &mut Vec<String>) {
    let pad = indent(depth);
    for line in text.lines() {
        if line.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{pad}{line}"));
        }
    }
}

fn push_trimmed(lines: &mut Vec<String>, line: String) {
    lines.push(line.trim_end().to_string());
}

fn is_empty_container(doc: &Document) -> bool {
    match doc {
        Document::Mapping(map) => map.is_empty(),
        Document::Sequence(items) => items.is_empty(),
        _ => false,
    }
}

fn inline_scalar(doc: &Document) -> String {
    match doc {
        Document::String(s) => s.clone(),
        Document::Bool(b) => b.to_string(),
        Document::Integer(n) => n.to_string(),
        Document::Mapping(_) => "{}".to_string(),
        Document::Sequence(_) => "[]".to_string(),
    }
}

//! Cross-reference links.
//!
//! `[thm:main]{.ref}` is a reference to a label. LaTeX resolves it itself
//! through `\pref`; for HTML the label is looked up in the registry and
//! turned into an anchor like `<a href='chapter3.html#thm:main'>Theorem 3.2</a>`.

use bookfilter_ir::{stringify_all, Node, NodeKind, NodeTag, RawFormat};

use super::latex;
use crate::filter::{Replacement, Session, Target, Visit};
use crate::utils::FilterResult;

/// Link classes that mark a cross-reference.
pub const REFERENCE_CLASSES: [&str; 2] = ["ref", "eqref"];

const MISSING_LABEL: &str = "???";

fn reference_label(node: &Node) -> String {
    let text = stringify_all(&node.children);
    let label = text.strip_prefix('#').unwrap_or(&text);
    if label.is_empty() {
        MISSING_LABEL.to_string()
    } else {
        label.to_string()
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn handle(
    node: &Node,
    visit: &Visit<'_>,
    session: &mut Session,
) -> FilterResult<Option<Replacement>> {
    let NodeKind::Link { url, title } = &node.kind else {
        return Ok(None);
    };
    if node.classes().is_empty() {
        return Ok(None);
    }

    let is_reference = REFERENCE_CLASSES.iter().any(|c| node.attr.has_class(c));
    if is_reference {
        let label = reference_label(node);
        let raw = match session.target {
            Target::Latex => latex(format!("\\pref{{{}}}", label)),
            Target::Html => {
                let resolved = session.resolver.resolve(&label);
                Node::raw_inline(
                    RawFormat::Html,
                    format!(
                        "<a href='{}'>{}</a>",
                        escape_html(&resolved.link),
                        escape_html(&resolved.text)
                    ),
                )
            }
        };
        return Ok(Some(raw.into()));
    }

    let url = match session.target {
        Target::Latex => url.replace('_', "%5F"),
        Target::Html => url.clone(),
    };
    let children = visit.transform_children(NodeTag::Link, &node.children, session)?;
    Ok(Some(
        Node {
            kind: NodeKind::Link {
                url,
                title: title.clone(),
            },
            attr: node.attr.clone(),
            children,
        }
        .into(),
    ))
}

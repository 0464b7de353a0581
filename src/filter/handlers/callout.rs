//! Classed divs: theorems, proofs, remarks and friends.
//!
//! `::: {.theorem #thm:main title="Main"}` becomes
//! `\begin{theorem}[Main] \label{thm:main} ... \end{theorem}` for LaTeX. For
//! HTML the div is kept and gets a `name` attribute (`Theorem (Main) `) for
//! the renderer; `quote` divs become block quotes.

use bookfilter_ir::{Node, NodeTag};
use bookfilter_labels::capitalize;

use super::{label_ref, latex_block};
use crate::filter::unicode::math_to_unicode;
use crate::filter::{Replacement, Session, Target, Visit};
use crate::utils::FilterResult;

pub const QUOTE_CLASS: &str = "quote";

pub fn handle(
    node: &Node,
    visit: &Visit<'_>,
    session: &mut Session,
) -> FilterResult<Option<Replacement>> {
    if node.tag() != NodeTag::Div {
        return Ok(None);
    }
    let Some(class) = node.classes().first() else {
        return Ok(None);
    };

    let mut div = node.clone();
    let mut title = node.attr.get("title").unwrap_or_default().to_string();
    if !title.is_empty() && !session.is_latex() {
        title = math_to_unicode(&title);
        div.attr.attributes.insert("title".to_string(), title.clone());
    }

    let mut name = capitalize(class);
    if !title.is_empty() {
        name.push_str(&format!(" ({}) ", title));
    }
    div.attr.attributes.insert("name".to_string(), name);

    if !node.identifier().is_empty() {
        session.describe(node.identifier(), capitalize(class));
    }

    let children = visit.transform_children(NodeTag::Div, &node.children, session)?;

    match session.target {
        Target::Html => {
            div.children = children;
            if class == QUOTE_CLASS {
                Ok(Some(Node::block_quote(vec![div]).into()))
            } else {
                Ok(Some(div.into()))
            }
        }
        Target::Latex => {
            let label = label_ref(node);
            let mut before = if title.is_empty() {
                format!("\\begin{{{}}}", class)
            } else {
                format!("\\begin{{{}}}[{}]", class, title)
            };
            before.push_str(&format!(" \\label{{{}}}", label));

            let mut content = Vec::with_capacity(children.len() + 2);
            content.push(latex_block(before));
            content.extend(children);
            content.push(latex_block(format!("\\end{{{}}}", class)));
            div.children = content;
            Ok(Some(div.into()))
        }
    }
}

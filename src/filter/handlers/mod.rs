//! Node handlers of the standard pipeline.
//!
//! Each handler looks at one kind of node and declines everything else by
//! returning `Ok(None)`. See [`Pipeline::standard`](super::Pipeline::standard)
//! for the order in which they are consulted.

pub mod callout;
pub mod heading;
pub mod image;
pub mod link;
pub mod math;
pub mod paragraph;

use bookfilter_ir::{stringify, Node, RawFormat};

/// Longest label derived from a node's text.
pub const MAX_DERIVED_LABEL: usize = 25;

pub const FALLBACK_LABEL: &str = "temp-label";

/// Label of a node: its identifier, else a slug of its text (spaces become
/// dashes, anything but ASCII letters and dashes is dropped), else
/// [`FALLBACK_LABEL`].
pub fn label_ref(node: &Node) -> String {
    if !node.identifier().is_empty() {
        return node.identifier().to_string();
    }
    let slug: String = stringify(node)
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == '-')
        .take(MAX_DERIVED_LABEL)
        .collect();
    if slug.is_empty() {
        FALLBACK_LABEL.to_string()
    } else {
        slug
    }
}

pub(crate) fn latex(text: impl Into<String>) -> Node {
    Node::raw_inline(RawFormat::Latex, text)
}

pub(crate) fn latex_block(text: impl Into<String>) -> Node {
    Node::raw_block(RawFormat::Latex, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_identifier() {
        let node = Node::header(1, Node::words("Intro")).with_id("sec:intro");
        assert_eq!(label_ref(&node), "sec:intro");
    }

    #[test]
    fn test_label_from_text() {
        let node = Node::header(1, Node::words("Intro"));
        assert_eq!(label_ref(&node), "Intro");
        let node = Node::header(2, Node::words("The P vs. NP question, 2nd try"));
        assert_eq!(label_ref(&node), "The-P-vs-NP-question-nd-t");
    }

    #[test]
    fn test_label_fallback() {
        let node = Node::header(2, Node::words("1.2 $$"));
        assert_eq!(label_ref(&node), "-");
        let node = Node::header(2, vec![Node::text("42")]);
        assert_eq!(label_ref(&node), FALLBACK_LABEL);
    }
}

//! Standalone images become LaTeX figures (tufte-style placement).
//!
//! Image classes select the float:
//! - `full`: page-wide `figure*`
//! - `margin`: `marginfigure`
//! - otherwise a plain `figure`
//!
//! An `offset` attribute shifts the caption, or the whole float for margin
//! figures.

use bookfilter_ir::{Node, NodeKind, NodeTag};

use super::latex;
use crate::filter::{Replacement, Session, Visit};
use crate::utils::FilterResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Full,
    Margin,
    Default,
}

impl Placement {
    pub fn for_image(image: &Node) -> Self {
        if image.attr.has_class("full") {
            Placement::Full
        } else if image.attr.has_class("margin") {
            Placement::Margin
        } else {
            Placement::Default
        }
    }

    pub fn environment(self) -> &'static str {
        match self {
            Placement::Full => "figure*",
            Placement::Margin => "marginfigure",
            Placement::Default => "figure",
        }
    }

    pub fn scale(self) -> &'static str {
        match self {
            Placement::Full => "width=0.9\\paperwidth, height=0.3\\paperheight, keepaspectratio",
            Placement::Margin => "width=\\linewidth, height=1.5in, keepaspectratio",
            Placement::Default => "width=\\textwidth, height=0.25\\paperheight, keepaspectratio",
        }
    }
}

pub fn handle(
    node: &Node,
    visit: &Visit<'_>,
    session: &mut Session,
) -> FilterResult<Option<Replacement>> {
    if node.tag() != NodeTag::Para || !session.is_latex() {
        return Ok(None);
    }
    let [image] = node.children.as_slice() else {
        return Ok(None);
    };
    let NodeKind::Image { url, .. } = &image.kind else {
        return Ok(None);
    };

    let placement = Placement::for_image(image);
    let offset = image.attr.get("offset");
    let (figure_offset, caption_offset) = match (placement, offset) {
        (Placement::Margin, Some(offset)) => (format!("[{}]", offset), String::new()),
        (_, Some(offset)) => (String::new(), format!("[][{}]", offset)),
        (_, None) => (String::new(), String::new()),
    };
    let env = placement.environment();

    let before = format!(
        "\n\\begin{{{env}}}{figure_offset}\n\\centering\n\\includegraphics[{scale}]{{{url}}}\n\\caption{caption_offset}{{",
        scale = placement.scale(),
    );
    let mut end = format!("\n\\end{{{}}}\n", env);
    if !image.identifier().is_empty() {
        end = format!("\\label{{{}}}{}", image.identifier(), end);
    }

    let caption = visit.transform_nested(
        &[NodeTag::Para, NodeTag::Image],
        &image.children,
        session,
    )?;

    let mut inlines = Vec::with_capacity(caption.len() + 2);
    inlines.push(latex(before));
    inlines.extend(caption);
    inlines.push(latex(format!("}}\n{}", end)));
    Ok(Some(Node::para(inlines).into()))
}

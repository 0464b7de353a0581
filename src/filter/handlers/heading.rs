//! Headings map onto LaTeX sectioning commands and carry a label.

use bookfilter_ir::{stringify, Node, NodeKind, NodeTag};
use bookfilter_labels::capitalize;

use super::{label_ref, latex};
use crate::filter::{Replacement, Session, Visit};
use crate::utils::{FilterError, FilterResult};

pub fn handle(
    node: &Node,
    visit: &Visit<'_>,
    session: &mut Session,
) -> FilterResult<Option<Replacement>> {
    let NodeKind::Header { level } = node.kind else {
        return Ok(None);
    };
    if visit.within(NodeTag::BlockQuote) {
        return Ok(None);
    }

    let label = label_ref(node);
    let unit = session.headings.unit(level);
    if let Some(unit) = unit {
        session.describe(label.clone(), capitalize(unit));
    }

    if !session.is_latex() {
        return Ok(None);
    }

    let text = stringify(node);
    session.log.line(&format!("{} {}", level, text));
    let Some(unit) = unit else {
        return Err(FilterError::invalid_heading(level, text));
    };

    let mut inlines = vec![latex(format!("\\{}{{", unit))];
    inlines.extend(visit.transform_children(NodeTag::Header, &node.children, session)?);
    inlines.push(latex(format!("}}\\label{{{}}}", label)));
    Ok(Some(Node::para(inlines).into()))
}

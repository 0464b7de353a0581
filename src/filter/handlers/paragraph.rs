//! Bold run opening a top-level paragraph becomes `\paragraph{...}`.

use bookfilter_ir::{stringify, Node, NodeTag};

use super::latex;
use crate::filter::{Replacement, Session, Visit};
use crate::utils::FilterResult;

pub fn handle(
    node: &Node,
    visit: &Visit<'_>,
    session: &mut Session,
) -> FilterResult<Option<Replacement>> {
    if node.tag() != NodeTag::Strong || !session.is_latex() {
        return Ok(None);
    }
    if visit.ancestors != [NodeTag::Para] || visit.index != 0 {
        return Ok(None);
    }
    Ok(Some(latex(format!("\\paragraph{{{}}}", stringify(node))).into()))
}

//! Display equations carrying a `\label{eq:...}` get a numbered environment.

use bookfilter_ir::{MathMode, Node, NodeKind};
use lazy_static::lazy_static;
use regex::Regex;

use super::latex;
use crate::filter::{Replacement, Session, Target, Visit};
use crate::utils::{FilterError, FilterResult};

lazy_static! {
    static ref EQUATION_LABEL: Regex = Regex::new(r"\\label\{eq:[A-Za-z0-9:_-]+\}").unwrap();
}

pub fn handle(
    node: &Node,
    _visit: &Visit<'_>,
    session: &mut Session,
) -> FilterResult<Option<Replacement>> {
    let NodeKind::Math { mode, text } = &node.kind else {
        return Ok(None);
    };
    if *mode != MathMode::Display || !EQUATION_LABEL.is_match(text) {
        return Ok(Some(node.clone().into()));
    }

    match session.target {
        Target::Latex => Ok(Some(
            latex(format!("\\begin{{equation}}{}\\end{{equation}}", text)).into(),
        )),
        // TODO: number labelled equations for HTML, including align blocks.
        Target::Html => Err(FilterError::unsupported(
            "labelled display equation",
            session.target,
        )),
    }
}

//! First-match-wins handler dispatch over the document tree.
//!
//! The walk is a single pre-order pass. At every node the handlers are tried
//! in order; the first one returning a replacement wins and the replacement
//! is spliced in place of the node without being walked again. When no
//! handler matches, the node is kept and its children are walked.

use bookfilter_ir::{Document, Node, NodeTag};
use log::trace;

use super::handlers;
use super::session::Session;
use crate::utils::FilterResult;

/// What a handler puts in place of the node it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    Node(Node),
    Nodes(Vec<Node>),
}

impl Replacement {
    fn push_into(self, out: &mut Vec<Node>) {
        match self {
            Replacement::Node(node) => out.push(node),
            Replacement::Nodes(nodes) => out.extend(nodes),
        }
    }
}

impl From<Node> for Replacement {
    fn from(node: Node) -> Self {
        Replacement::Node(node)
    }
}

impl From<Vec<Node>> for Replacement {
    fn from(nodes: Vec<Node>) -> Self {
        Replacement::Nodes(nodes)
    }
}

/// A rewrite rule: `Ok(None)` declines the node.
pub type Handler = fn(&Node, &Visit<'_>, &mut Session) -> FilterResult<Option<Replacement>>;

/// Where the current node sits in the tree.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pipeline: &'a Pipeline,
    /// Ancestor kinds, outermost first. Empty for top-level blocks.
    pub ancestors: &'a [NodeTag],
    /// Position among its siblings.
    pub index: usize,
}

impl<'a> Visit<'a> {
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    pub fn within(&self, tag: NodeTag) -> bool {
        self.ancestors.contains(&tag)
    }

    /// Walk `children` as if they were the content of a node of kind
    /// `parent` at the current position. Handlers use this for content they
    /// re-emit, since replacements are not walked by the dispatcher.
    pub fn transform_children(
        &self,
        parent: NodeTag,
        children: &[Node],
        session: &mut Session,
    ) -> FilterResult<Vec<Node>> {
        self.transform_nested(&[parent], children, session)
    }

    /// Like [`transform_children`](Self::transform_children) for content
    /// that sits several levels below the current node.
    pub fn transform_nested(
        &self,
        parents: &[NodeTag],
        children: &[Node],
        session: &mut Session,
    ) -> FilterResult<Vec<Node>> {
        let mut path = self.ancestors.to_vec();
        path.extend_from_slice(parents);
        self.pipeline.walk_nodes(children, &mut path, session)
    }
}

#[derive(Clone)]
pub struct Pipeline {
    handlers: Vec<(&'static str, Handler)>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|(name, _)| name))
            .finish()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl Pipeline {
    pub fn empty() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// The book filter handlers, in the order they get first refusal.
    pub fn standard() -> Self {
        Self::empty()
            .with("paragraph", handlers::paragraph::handle)
            .with("link-ref", handlers::link::handle)
            .with("heading", handlers::heading::handle)
            .with("callout", handlers::callout::handle)
            .with("image", handlers::image::handle)
            .with("math", handlers::math::handle)
    }

    pub fn with(mut self, name: &'static str, handler: Handler) -> Self {
        self.handlers.push((name, handler));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|(name, _)| *name).collect()
    }

    pub fn transform_document(
        &self,
        doc: Document,
        session: &mut Session,
    ) -> FilterResult<Document> {
        let mut path = Vec::new();
        let blocks = self.walk_nodes(&doc.blocks, &mut path, session)?;
        Ok(Document {
            meta: doc.meta,
            blocks,
        })
    }

    /// Transform one top-level node.
    pub fn transform(&self, node: &Node, session: &mut Session) -> FilterResult<Vec<Node>> {
        let mut path = Vec::new();
        let mut out = Vec::new();
        self.walk_node(node, 0, &mut path, session, &mut out)?;
        Ok(out)
    }

    fn walk_nodes(
        &self,
        nodes: &[Node],
        path: &mut Vec<NodeTag>,
        session: &mut Session,
    ) -> FilterResult<Vec<Node>> {
        let mut out = Vec::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            self.walk_node(node, index, path, session, &mut out)?;
        }
        Ok(out)
    }

    fn walk_node(
        &self,
        node: &Node,
        index: usize,
        path: &mut Vec<NodeTag>,
        session: &mut Session,
        out: &mut Vec<Node>,
    ) -> FilterResult<()> {
        let visit = Visit {
            pipeline: self,
            ancestors: path.as_slice(),
            index,
        };
        for (name, handler) in &self.handlers {
            if let Some(replacement) = handler(node, &visit, session)? {
                trace!("{} handled {:?} at depth {}", name, node.tag(), path.len());
                replacement.push_into(out);
                return Ok(());
            }
        }

        if node.children.is_empty() {
            out.push(node.clone());
            return Ok(());
        }
        path.push(node.tag());
        let children = self.walk_nodes(&node.children, path, session);
        path.pop();
        out.push(Node {
            kind: node.kind.clone(),
            attr: node.attr.clone(),
            children: children?,
        });
        Ok(())
    }
}

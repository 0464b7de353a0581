//! Document tree exchanged with the markup parser and the renderer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub meta: IndexMap<String, String>,
    #[serde(default)]
    pub blocks: Vec<Node>,
}

impl Document {
    pub fn new(blocks: Vec<Node>) -> Self {
        Self {
            meta: IndexMap::new(),
            blocks,
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attr {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
}

impl Attr {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathMode {
    Inline,
    Display,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawFormat {
    Latex,
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    // Blocks
    Para,
    Plain,
    Header { level: u8 },
    Div,
    BlockQuote,
    RawBlock { format: RawFormat, text: String },
    // Inlines
    Str { text: String },
    Space,
    SoftBreak,
    LineBreak,
    Strong,
    Emph,
    Span,
    Code { text: String },
    Link {
        url: String,
        #[serde(default)]
        title: String,
    },
    Image {
        url: String,
        #[serde(default)]
        title: String,
    },
    Math { mode: MathMode, text: String },
    RawInline { format: RawFormat, text: String },
    Other { name: String },
}

/// Payload-free discriminant of [`NodeKind`], used to describe ancestry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Para,
    Plain,
    Header,
    Div,
    BlockQuote,
    RawBlock,
    Str,
    Space,
    SoftBreak,
    LineBreak,
    Strong,
    Emph,
    Span,
    Code,
    Link,
    Image,
    Math,
    RawInline,
    Other,
}

impl NodeKind {
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Para => NodeTag::Para,
            NodeKind::Plain => NodeTag::Plain,
            NodeKind::Header { .. } => NodeTag::Header,
            NodeKind::Div => NodeTag::Div,
            NodeKind::BlockQuote => NodeTag::BlockQuote,
            NodeKind::RawBlock { .. } => NodeTag::RawBlock,
            NodeKind::Str { .. } => NodeTag::Str,
            NodeKind::Space => NodeTag::Space,
            NodeKind::SoftBreak => NodeTag::SoftBreak,
            NodeKind::LineBreak => NodeTag::LineBreak,
            NodeKind::Strong => NodeTag::Strong,
            NodeKind::Emph => NodeTag::Emph,
            NodeKind::Span => NodeTag::Span,
            NodeKind::Code { .. } => NodeTag::Code,
            NodeKind::Link { .. } => NodeTag::Link,
            NodeKind::Image { .. } => NodeTag::Image,
            NodeKind::Math { .. } => NodeTag::Math,
            NodeKind::RawInline { .. } => NodeTag::RawInline,
            NodeKind::Other { .. } => NodeTag::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    #[serde(default)]
    pub attr: Attr,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            attr: Attr::default(),
            children,
        }
    }

    pub fn leaf(kind: NodeKind) -> Self {
        Self::new(kind, Vec::new())
    }

    pub fn tag(&self) -> NodeTag {
        self.kind.tag()
    }

    pub fn with_id(mut self, identifier: impl Into<String>) -> Self {
        self.attr.identifier = identifier.into();
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.attr.classes.push(class.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attr.attributes.insert(key.into(), value.into());
        self
    }

    pub fn identifier(&self) -> &str {
        &self.attr.identifier
    }

    pub fn classes(&self) -> &[String] {
        &self.attr.classes
    }

    pub fn para(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Para, children)
    }

    pub fn header(level: u8, children: Vec<Node>) -> Self {
        Self::new(NodeKind::Header { level }, children)
    }

    pub fn div(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Div, children)
    }

    pub fn block_quote(children: Vec<Node>) -> Self {
        Self::new(NodeKind::BlockQuote, children)
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Str { text: s.into() })
    }

    pub fn space() -> Self {
        Self::leaf(NodeKind::Space)
    }

    pub fn strong(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Strong, children)
    }

    pub fn emph(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Emph, children)
    }

    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(
            NodeKind::Link {
                url: url.into(),
                title: String::new(),
            },
            children,
        )
    }

    pub fn image(url: impl Into<String>, caption: Vec<Node>) -> Self {
        Self::new(
            NodeKind::Image {
                url: url.into(),
                title: String::new(),
            },
            caption,
        )
    }

    pub fn math(mode: MathMode, text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Math {
            mode,
            text: text.into(),
        })
    }

    pub fn raw_inline(format: RawFormat, text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::RawInline {
            format,
            text: text.into(),
        })
    }

    pub fn raw_block(format: RawFormat, text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::RawBlock {
            format,
            text: text.into(),
        })
    }

    /// Split a plain sentence into `Str`/`Space` runs.
    pub fn words(s: &str) -> Vec<Node> {
        let mut out = Vec::new();
        for (i, word) in s.split(' ').filter(|w| !w.is_empty()).enumerate() {
            if i > 0 {
                out.push(Node::space());
            }
            out.push(Node::text(word));
        }
        out
    }
}

/// Flatten a node to its plain text.
pub fn stringify(node: &Node) -> String {
    let mut out = String::new();
    push_text(node, &mut out);
    out
}

pub fn stringify_all(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        push_text(node, &mut out);
    }
    out
}

fn push_text(node: &Node, out: &mut String) {
    match &node.kind {
        NodeKind::Str { text } | NodeKind::Code { text } | NodeKind::Math { text, .. } => {
            out.push_str(text)
        }
        NodeKind::RawInline { text, .. } | NodeKind::RawBlock { text, .. } => out.push_str(text),
        NodeKind::Space | NodeKind::SoftBreak | NodeKind::LineBreak => out.push(' '),
        _ => {
            for child in &node.children {
                push_text(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stringify_nested_inlines() {
        let node = Node::header(
            1,
            vec![
                Node::text("Main"),
                Node::space(),
                Node::emph(vec![Node::text("result")]),
                Node::leaf(NodeKind::SoftBreak),
                Node::math(MathMode::Inline, "x^2"),
            ],
        );
        assert_eq!(stringify(&node), "Main result x^2");
    }

    #[test]
    fn test_words_splits_on_spaces() {
        let nodes = Node::words("a  b");
        assert_eq!(nodes, vec![Node::text("a"), Node::space(), Node::text("b")]);
    }

    #[test]
    fn test_tag_ignores_payload() {
        assert_eq!(Node::header(3, vec![]).tag(), NodeTag::Header);
        assert_eq!(
            Node::raw_inline(RawFormat::Latex, "x").tag(),
            NodeTag::RawInline
        );
    }

    #[test]
    fn test_attr_lookup() {
        let node = Node::div(vec![])
            .with_class("theorem")
            .with_attribute("title", "Main");
        assert!(node.attr.has_class("theorem"));
        assert!(!node.attr.has_class("proof"));
        assert_eq!(node.attr.get("title"), Some("Main"));
    }
}

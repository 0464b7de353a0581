use bookfilter_ir::{stringify_all, Document, MathMode, Node, NodeKind};
use pretty_assertions::assert_eq;

#[test]
fn parses_document_from_json() {
    let input = r##"{
        "meta": {"filename": "ch1", "chapternum": "1"},
        "blocks": [
            {"kind": {"header": {"level": 1}}, "attr": {"identifier": "intro"},
             "children": [{"kind": {"str": {"text": "Intro"}}}]},
            {"kind": "para", "children": [
                {"kind": {"str": {"text": "See"}}},
                {"kind": "space"},
                {"kind": {"link": {"url": "#thm:main"}}, "attr": {"classes": ["ref"]},
                 "children": [{"kind": {"str": {"text": "thm:main"}}}]},
                {"kind": {"math": {"mode": "display", "text": "x"}}}
            ]}
        ]
    }"##;
    let doc: Document = serde_json::from_str(input).expect("valid document");

    assert_eq!(doc.meta("filename"), Some("ch1"));
    assert_eq!(doc.blocks.len(), 2);
    assert_eq!(doc.blocks[0].kind, NodeKind::Header { level: 1 });
    assert_eq!(doc.blocks[0].identifier(), "intro");

    let para = &doc.blocks[1];
    assert_eq!(para.children[2].classes().to_vec(), vec!["ref".to_string()]);
    assert_eq!(para.children[3], Node::math(MathMode::Display, "x"));
    assert_eq!(stringify_all(&para.children), "See thm:mainx");
}

#[test]
fn serialized_tree_reads_back_identically() {
    let doc = Document::new(vec![Node::div(vec![Node::para(Node::words("a proof"))])
        .with_id("p1")
        .with_class("proof")
        .with_attribute("title", "Sketch")])
    .with_meta("filename", "ch2");

    let json = serde_json::to_string(&doc).expect("serializable");
    let back: Document = serde_json::from_str(&json).expect("deserializable");
    assert_eq!(back, doc);
}

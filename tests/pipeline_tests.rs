use std::fs;

use bookfilter::ir::{Document, MathMode, Node, NodeKind, RawFormat};
use bookfilter::labels::{parse_aux_str, save_registry, LabelRegistry};
use bookfilter::{filter_document, filter_json, FilterError, LogSink, RunConfig, Session, Target};
use pretty_assertions::assert_eq;

const CHAPTER3_AUX: &str = r"\relax
\newlabel{thm:main@pref}{{[Theorem][3][2,1. ]3.2}{}}
\newlabel{sec:bounds@pref}{{[section][1][3]3.1}{}}
";

fn registry() -> LabelRegistry {
    let mut registry = parse_aux_str("chapter3", CHAPTER3_AUX);
    registry.merge(parse_aux_str(
        "chapter1",
        r"\newlabel{eq:local@pref}{{[equation][1][]1.4}{}}",
    ));
    registry
}

fn session(target: Target) -> Session {
    let config = RunConfig {
        filename: "chapter1".to_string(),
        ..RunConfig::default()
    };
    Session::new(target, config, registry()).with_log(LogSink::memory())
}

fn reference(label: &str) -> Node {
    Node::link(format!("#{}", label), vec![Node::text(label)]).with_class("ref")
}

fn chapter() -> Document {
    Document::new(vec![
        Node::header(1, Node::words("Intro")),
        Node::para(vec![
            Node::strong(Node::words("Setting.")),
            Node::space(),
            Node::text("See"),
            Node::space(),
            reference("thm:main"),
        ]),
        Node::div(vec![Node::para(vec![
            Node::text("By"),
            Node::space(),
            reference("eq:local"),
        ])])
        .with_id("t1")
        .with_class("theorem"),
        Node::para(vec![Node::math(
            MathMode::Display,
            "a^2 + b^2 = c^2 \\label{eq:pyth}",
        )]),
    ])
    .with_meta("filename", "chapter1")
}

fn latex(text: &str) -> Node {
    Node::raw_inline(RawFormat::Latex, text)
}

#[test]
fn latex_chapter_is_rewritten() {
    let mut session = session(Target::Latex);
    let out = filter_document(chapter(), &mut session).unwrap();

    assert_eq!(
        out.blocks[0],
        Node::para(vec![
            latex("\\chapter{"),
            Node::text("Intro"),
            latex("}\\label{Intro}"),
        ])
    );
    assert_eq!(
        out.blocks[1].children,
        vec![
            latex("\\paragraph{Setting.}"),
            Node::space(),
            Node::text("See"),
            Node::space(),
            latex("\\pref{thm:main}"),
        ]
    );

    let theorem = &out.blocks[2];
    assert_eq!(
        theorem.children.first(),
        Some(&Node::raw_block(RawFormat::Latex, "\\begin{theorem} \\label{t1}"))
    );
    assert_eq!(
        theorem.children[1].children[2],
        latex("\\pref{eq:local}"),
        "content of a callout is rewritten too"
    );
    assert_eq!(
        theorem.children.last(),
        Some(&Node::raw_block(RawFormat::Latex, "\\end{theorem}"))
    );

    assert_eq!(
        out.blocks[3].children,
        vec![latex(
            "\\begin{equation}a^2 + b^2 = c^2 \\label{eq:pyth}\\end{equation}"
        )]
    );

    assert_eq!(session.label_descriptions["Intro"], "Chapter");
    assert_eq!(session.label_descriptions["t1"], "Theorem");
}

#[test]
fn html_chapter_resolves_references() {
    let mut doc = chapter();
    doc.blocks.pop();
    let mut session = session(Target::Html);
    let out = filter_document(doc, &mut session).unwrap();

    assert_eq!(out.blocks[0].kind, NodeKind::Header { level: 1 });
    assert_eq!(
        out.blocks[1].children[0],
        Node::strong(Node::words("Setting."))
    );
    assert_eq!(
        out.blocks[1].children[4],
        Node::raw_inline(
            RawFormat::Html,
            "<a href='chapter3.html#thm:main'>Theorem 3.2</a>"
        )
    );
    assert_eq!(
        out.blocks[2].children[0].children[2],
        Node::raw_inline(RawFormat::Html, "<a href='#eq:local'>Equation 1.4</a>")
    );
    assert_eq!(out.blocks[2].attr.get("name"), Some("Theorem"));
}

#[test]
fn html_labelled_equation_aborts_the_run() {
    let mut session = session(Target::Html);
    let err = filter_document(chapter(), &mut session).unwrap_err();
    assert!(matches!(err, FilterError::Unsupported { .. }));
}

#[test]
fn unresolved_reference_degrades_to_placeholder() {
    let doc = Document::new(vec![Node::para(vec![reference("thm:nowhere")])]);
    let out = filter_document(doc, &mut session(Target::Html)).unwrap();
    assert_eq!(
        out.blocks[0].children,
        vec![Node::raw_inline(
            RawFormat::Html,
            "<a href='#thm:nowhere'>?? ??</a>"
        )]
    );
}

#[test]
fn json_round_trip_through_filter() {
    let input = serde_json::to_string(&chapter()).unwrap();
    let first = filter_json(&input, &mut session(Target::Latex)).unwrap();
    let second = filter_json(&input, &mut session(Target::Latex)).unwrap();
    assert_eq!(first, second);

    let doc: Document = serde_json::from_str(&first).unwrap();
    assert_eq!(doc.meta("filename"), Some("chapter1"));
    assert!(first.contains("\\\\chapter{"));
}

#[test]
fn invalid_json_is_reported() {
    let err = filter_json("{\"blocks\": 3}", &mut session(Target::Latex)).unwrap_err();
    assert!(matches!(err, FilterError::Json(_)));
}

#[test]
fn prepared_session_reads_registry_and_writes_log() {
    let dir = tempfile::tempdir().unwrap();
    let auxfile = dir.path().join("bookaux.yaml");
    save_registry(&registry(), &auxfile).unwrap();
    fs::write(
        dir.path().join("refs.bib"),
        "@book{knuth, title = {The TeXbook}, year = 1984}\n",
    )
    .unwrap();

    let doc = chapter()
        .with_meta("auxfile", auxfile.to_string_lossy())
        .with_meta("logdir", dir.path().to_string_lossy())
        .with_meta("sourcedir", dir.path().to_string_lossy())
        .with_meta("bibfile", "refs.bib");
    let config = RunConfig::from_meta(&doc.meta);
    let meta = doc.meta.clone();
    let mut session =
        Session::prepare(Target::Latex, config, &meta, &["bookfilter".to_string()]).unwrap();
    assert_eq!(session.resolver.registry().len(), 3);
    assert_eq!(
        session.bibliography.get("knuth").and_then(|e| e.field("year")),
        Some("1984")
    );

    filter_document(doc, &mut session).unwrap();
    session.finish().unwrap();

    let log = fs::read_to_string(dir.path().join("chapter1.log")).unwrap();
    assert!(log.starts_with("Created at "));
    assert!(log.contains("latex\n"));
    assert!(log.contains("1 Intro\n"));
}

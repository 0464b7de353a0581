//! Book filter - rewrites a parsed book chapter for its LaTeX and HTML builds
//!
//! The input is the document tree produced by the markup parser (as JSON).
//! Headings, classed divs, figures, labelled equations and `.ref` links are
//! rewritten for the requested target, and cross-references are resolved
//! against the label registry collected from a previous LaTeX build.
//!
//! ```ignore
//! use bookfilter::{filter_document, RunConfig, Session, Target};
//!
//! let config = RunConfig::from_meta(&doc.meta);
//! let mut session = Session::prepare(Target::Html, config, &doc.meta, &args)?;
//! let doc = filter_document(doc, &mut session)?;
//! ```

pub mod bib;
pub mod config;
pub mod filter;
pub mod utils;

pub use bookfilter_ir as ir;
pub use bookfilter_labels as labels;

pub use bib::{BibEntry, Bibliography};
pub use config::RunConfig;
pub use filter::{Pipeline, Replacement, Session, Target, Visit};
pub use utils::{FilterError, FilterResult, LogSink};

use bookfilter_ir::Document;

/// Run the standard handler pipeline over a document.
pub fn filter_document(doc: Document, session: &mut Session) -> FilterResult<Document> {
    Pipeline::standard().transform_document(doc, session)
}

/// Parse a JSON document tree, filter it and serialize the result.
pub fn filter_json(input: &str, session: &mut Session) -> FilterResult<String> {
    let doc: Document = serde_json::from_str(input)?;
    let out = filter_document(doc, session)?;
    Ok(serde_json::to_string(&out)?)
}

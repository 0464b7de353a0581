//! Cross-reference labels: the registry built from compiled `.aux` output and
//! the resolver that turns a label id into display text and a link.

pub mod error;
pub mod resolve;
pub mod store;

pub use error::{LabelError, LabelResult};
pub use resolve::{capitalize, ClassNames, FullLabel, ResolvedLabel, Resolver};
pub use store::{
    load_all_aux_files, load_registry, parse_aux_file, parse_aux_str, save_registry, LabelRecord,
    LabelRegistry, AUX_SUFFIX, DEFAULT_REGISTRY_PATH,
};

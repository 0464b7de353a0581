//! Document tree rewriting for the LaTeX and HTML builds of the book.

pub mod dispatch;
pub mod handlers;
pub mod session;
pub mod unicode;

use std::fmt;
use std::str::FromStr;

use crate::utils::FilterError;

pub use dispatch::{Handler, Pipeline, Replacement, Visit};
pub use session::{HeadingTable, Session};

/// Output target of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Latex,
    Html,
}

impl Target {
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Latex => "latex",
            Target::Html => "html",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latex" => Ok(Target::Latex),
            "html" => Ok(Target::Html),
            other => Err(FilterError::unknown_target(other)),
        }
    }
}

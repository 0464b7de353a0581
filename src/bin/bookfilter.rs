//! bookfilter CLI - rewrite a JSON document tree for the LaTeX or HTML build

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use bookfilter::ir::Document;
use bookfilter::{filter_document, FilterResult, RunConfig, Session, Target};
use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "bookfilter")]
#[command(version)]
#[command(about = "Rewrite a parsed book chapter for its LaTeX or HTML build", long_about = None)]
struct Cli {
    /// Output target
    #[arg(value_enum, default_value_t = TargetArg::Latex)]
    target: TargetArg,

    /// Input JSON file (reads from stdin if not provided)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output JSON file (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Current document name, overrides the `filename` metadata
    #[arg(long)]
    filename: Option<String>,

    /// Label registry, overrides the `auxfile` metadata
    #[arg(long)]
    auxfile: Option<PathBuf>,

    /// Log directory, overrides the `logdir` metadata
    #[arg(long)]
    logdir: Option<PathBuf>,

    /// Pretty print the output
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    Latex,
    Html,
}

impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Latex => Target::Latex,
            TargetArg::Html => Target::Html,
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&PathBuf>, content: &str) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, content),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")
        }
    }
}

fn run(cli: Cli) -> FilterResult<()> {
    let input = read_input(cli.input.as_ref())?;
    let doc: Document = serde_json::from_str(&input)?;

    let mut config = RunConfig::from_meta(&doc.meta);
    if let Some(filename) = cli.filename {
        config.filename = filename;
    }
    if let Some(auxfile) = cli.auxfile {
        config.auxfile = auxfile;
    }
    if let Some(logdir) = cli.logdir {
        config.log_dir = logdir;
    }

    let args: Vec<String> = std::env::args().collect();
    let meta = doc.meta.clone();
    let mut session = Session::prepare(cli.target.into(), config, &meta, &args)?;
    let out = filter_document(doc, &mut session)?;
    let labels = session.finish()?;
    log::debug!("{} labels described", labels.len());

    let json = if cli.pretty {
        serde_json::to_string_pretty(&out)?
    } else {
        serde_json::to_string(&out)?
    };
    write_output(cli.output.as_ref(), &json)?;
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("bookfilter: {}", e);
        process::exit(1);
    }
}

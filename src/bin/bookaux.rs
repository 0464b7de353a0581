//! bookaux CLI - collect `\newlabel` records from a LaTeX build into a registry

use std::path::PathBuf;
use std::process;

use bookfilter::labels::{load_all_aux_files, save_registry, LabelResult, DEFAULT_REGISTRY_PATH};
use clap::Parser;

#[derive(Parser)]
#[command(name = "bookaux")]
#[command(version)]
#[command(about = "Merge the labels of every .aux file in a directory into a YAML registry", long_about = None)]
struct Cli {
    /// Directory holding the .aux files
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Registry file to write
    #[arg(default_value = DEFAULT_REGISTRY_PATH)]
    output: PathBuf,
}

fn run(cli: &Cli) -> LabelResult<usize> {
    let registry = load_all_aux_files(&cli.dir)?;
    save_registry(&registry, &cli.output)?;
    Ok(registry.len())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(count) => log::info!("wrote {} labels to {}", count, cli.output.display()),
        Err(e) => {
            eprintln!("bookaux: {}", e);
            process::exit(1);
        }
    }
}

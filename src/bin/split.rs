use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use pdf_reduce::cli::{exit_code, init_logging, SplitArgs};
use pdf_reduce::config::SplitSettings;
use pdf_reduce::split::split_document;

fn run(settings: &SplitSettings) -> Result<Vec<PathBuf>> {
    split_document(settings)
        .with_context(|| format!("Failed to split {}", settings.input.display()))
}

fn main() -> ExitCode {
    let args = SplitArgs::parse();
    init_logging(args.verbose);

    let settings = SplitSettings::from_args(&args);
    match run(&settings) {
        Ok(parts) => {
            println!("Created:");
            for part in &parts {
                println!("  {}", part.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

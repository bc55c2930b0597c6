use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use pdf_reduce::cli::{exit_code, init_logging, RecompressArgs};
use pdf_reduce::compress::{compress_document, CompressionOutcome};
use pdf_reduce::config::RecompressSettings;
use pdf_reduce::model::ResolvedMethod;

fn run(settings: &RecompressSettings) -> Result<CompressionOutcome> {
    compress_document(settings).with_context(|| {
        format!(
            "Failed to compress {} into {}",
            settings.input.display(),
            settings.output.display()
        )
    })
}

fn report(outcome: &CompressionOutcome) {
    let method = match outcome.method {
        ResolvedMethod::External => "external",
        ResolvedMethod::InProcess if outcome.fell_back => "in-process (fallback)",
        ResolvedMethod::InProcess => "in-process",
    };
    println!("Method: {}", method);
    println!("Input size:  {} bytes", outcome.input_bytes);
    println!("Output size: {} bytes", outcome.output_bytes);
    println!("Reduction:   {:.1}%", outcome.achieved_percent());

    if let Some(images) = &outcome.images {
        println!(
            "Images: {} replaced, {} kept, {} skipped, {} failed",
            images.replaced,
            images.kept_original,
            images.skipped_encoded + images.skipped_shared,
            images.failed
        );
    }
}

fn main() -> ExitCode {
    let args = RecompressArgs::parse();
    init_logging(args.verbose);

    let settings = RecompressSettings::from_args(&args);
    match run(&settings) {
        Ok(outcome) => {
            report(&outcome);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Arguments for the `recompress` binary
#[derive(Parser, Debug)]
#[command(name = "recompress")]
#[command(
    author,
    version,
    about = "Reduce PDF file size by a given percent",
    after_help = "Methods:\n  \
        auto        - external tool if available and percent >= 35, otherwise in-process\n  \
        external    - Ghostscript over the whole file\n  \
        in-process  - recompress embedded images only\n\n\
        Pages format: '1,3,5-8' (1-indexed). If omitted, compresses all pages."
)]
pub struct RecompressArgs {
    /// Input PDF file path
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output PDF file path
    #[arg(required = true)]
    pub output: PathBuf,

    /// Target size reduction in percent (0-100)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub percent: u32,

    /// Pages to compress, e.g. "3,5,7-10"
    #[arg(long)]
    pub pages: Option<String>,

    /// Compression method
    #[arg(short, long, value_enum, default_value = "auto")]
    pub method: Method,

    /// Also recompress images that are already JPEG-encoded
    #[arg(long, alias = "recompress-jpeg")]
    pub recompress_encoded: bool,

    /// Override the external tool's target DPI
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub tool_dpi: Option<u32>,

    /// Override the external tool's JPEG quality (1-95)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub tool_quality: Option<u8>,

    /// Override the external tool's preset
    #[arg(long, value_enum)]
    pub tool_preset: Option<ToolPreset>,

    /// Overwrite the output file if present
    #[arg(long)]
    pub overwrite: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for the `split` binary
#[derive(Parser, Debug)]
#[command(name = "split")]
#[command(
    author,
    version,
    about = "Split a PDF into N separate parts",
    after_help = "Pages are distributed as evenly as possible across parts.\n\
        Outputs are named '<name>_part_<i>of<N>.pdf' in the selected directory."
)]
pub struct SplitArgs {
    /// Input PDF file path
    #[arg(required = true)]
    pub input: PathBuf,

    /// Number of parts to split into
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub parts: u32,

    /// Directory to place output PDFs (defaults to the input's directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Base name for output files (defaults to the input file stem)
    #[arg(long)]
    pub output_prefix: Option<String>,

    /// Overwrite existing output files if present
    #[arg(long)]
    pub overwrite: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Compression method requested on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum Method {
    /// External tool when available and worthwhile, in-process otherwise
    #[default]
    Auto,
    /// Whole-document compression with Ghostscript
    External,
    /// Recompress embedded images only
    InProcess,
}

/// Ghostscript `-dPDFSETTINGS` preset
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ToolPreset {
    #[value(alias = "/screen")]
    Screen,
    #[value(alias = "/ebook")]
    Ebook,
    #[value(alias = "/printer")]
    Printer,
    #[value(alias = "/prepress")]
    Prepress,
}

impl ToolPreset {
    /// Value as Ghostscript expects it
    pub fn as_gs_setting(&self) -> &'static str {
        match self {
            ToolPreset::Screen => "/screen",
            ToolPreset::Ebook => "/ebook",
            ToolPreset::Printer => "/printer",
            ToolPreset::Prepress => "/prepress",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolPreset::Screen => "Lower quality (screen)",
            ToolPreset::Ebook => "Medium quality (ebook)",
            ToolPreset::Printer => "Good quality (printer)",
            ToolPreset::Prepress => "High quality (prepress)",
        }
    }
}

use crate::cli::ToolPreset;

/// Highest JPEG quality used for in-process recompression
pub const MAX_JPEG_QUALITY: u8 = 95;

/// Lowest JPEG quality; below this output becomes unusable
pub const MIN_JPEG_QUALITY: u8 = 10;

/// `auto` only picks the external tool from this percent upward
pub const AUTO_EXTERNAL_MIN_PERCENT: u32 = 35;

/// Bounds for an explicit `--tool-quality`
pub const TOOL_QUALITY_RANGE: (u8, u8) = (1, 95);

/// Extension used for split parts when the input has none
pub const DEFAULT_EXTENSION: &str = "pdf";

/// Ghostscript executables to look for, in order
#[cfg(windows)]
pub const TOOL_BINARIES: &[&str] = &["gswin64c", "gswin32c", "gs"];
#[cfg(not(windows))]
pub const TOOL_BINARIES: &[&str] = &["gs"];

/// Preset and resolution by upper percent bound; the last row catches the rest.
pub const TOOL_SETTINGS_TABLE: &[(u32, ToolPreset, u32)] = &[
    (20, ToolPreset::Prepress, 300),
    (40, ToolPreset::Printer, 300),
    (60, ToolPreset::Ebook, 150),
    (100, ToolPreset::Screen, 72),
];

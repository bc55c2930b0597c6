//! Whole-document compression through Ghostscript.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::cli::ToolPreset;
use crate::config::defaults::{TOOL_BINARIES, TOOL_QUALITY_RANGE, TOOL_SETTINGS_TABLE};
use crate::config::ToolOverrides;
use crate::error::{Error, Result};
use crate::model::ToolSettings;

/// A Ghostscript executable found on PATH
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTool {
    pub name: String,
    pub path: PathBuf,
}

impl ExternalTool {
    /// Pre-flight lookup; `None` if no known executable is on PATH.
    pub fn locate() -> Option<Self> {
        TOOL_BINARIES.iter().find_map(|name| {
            which::which(name).ok().map(|path| Self {
                name: name.to_string(),
                path,
            })
        })
    }
}

/// Map a reduction percent to tool settings, then apply overrides.
pub fn tool_settings(percent: u32, overrides: &ToolOverrides) -> ToolSettings {
    let (preset, dpi) = TOOL_SETTINGS_TABLE
        .iter()
        .find(|(upper, _, _)| percent <= *upper)
        .map(|(_, preset, dpi)| (*preset, *dpi))
        .unwrap_or((ToolPreset::Screen, 72));

    let (min_q, max_q) = TOOL_QUALITY_RANGE;
    ToolSettings {
        preset: overrides.preset.unwrap_or(preset),
        dpi: overrides.dpi.unwrap_or(dpi),
        jpeg_quality: overrides.quality.map(|q| q.clamp(min_q, max_q)),
    }
}

/// Command-line arguments for a `pdfwrite` run.
pub fn build_args(settings: &ToolSettings, input: &Path, output: &Path) -> Vec<OsString> {
    let dpi = settings.dpi;
    let mut args: Vec<OsString> = [
        "-sDEVICE=pdfwrite".to_string(),
        "-dCompatibilityLevel=1.4".to_string(),
        format!("-dPDFSETTINGS={}", settings.preset.as_gs_setting()),
        "-dNOPAUSE".to_string(),
        "-dQUIET".to_string(),
        "-dBATCH".to_string(),
        "-dSAFER".to_string(),
        format!("-r{}", dpi),
        "-dCompressFonts=true".to_string(),
        "-dSubsetFonts=true".to_string(),
        "-dDownsampleColorImages=true".to_string(),
        "-dDownsampleGrayImages=true".to_string(),
        "-dDownsampleMonoImages=true".to_string(),
        "-dColorImageDownsampleType=/Bicubic".to_string(),
        "-dGrayImageDownsampleType=/Bicubic".to_string(),
        "-dMonoImageDownsampleType=/Bicubic".to_string(),
        format!("-dColorImageResolution={}", dpi),
        format!("-dGrayImageResolution={}", dpi),
        format!("-dMonoImageResolution={}", dpi),
        "-dAutoFilterColorImages=false".to_string(),
        "-dAutoFilterGrayImages=false".to_string(),
        "-dEncodeColorImages=true".to_string(),
        "-dEncodeGrayImages=true".to_string(),
        "-sColorImageFilter=/DCTEncode".to_string(),
        "-sGrayImageFilter=/DCTEncode".to_string(),
    ]
    .into_iter()
    .map(OsString::from)
    .collect();

    if let Some(quality) = settings.jpeg_quality {
        args.push(format!("-dJPEGQ={}", quality).into());
    }

    let mut output_arg = OsString::from("-sOutputFile=");
    output_arg.push(output);
    args.push(output_arg);
    args.push(input.as_os_str().to_owned());
    args
}

/// Run the tool, writing the compressed document to `output`.
pub fn run(
    tool: &ExternalTool,
    settings: &ToolSettings,
    input: &Path,
    output: &Path,
) -> Result<()> {
    log::info!(
        "{}: preset={} ({}), dpi={}, jpegq={}",
        tool.name,
        settings.preset.as_gs_setting(),
        settings.preset.description(),
        settings.dpi,
        settings
            .jpeg_quality
            .map(|q| q.to_string())
            .unwrap_or_else(|| "default".to_string())
    );

    let result = Command::new(&tool.path)
        .args(build_args(settings, input, output))
        .output()
        .map_err(|e| Error::ToolFailed {
            tool: tool.name.clone(),
            message: format!("failed to execute: {}", e),
        })?;

    if result.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&result.stderr);
        Err(Error::ToolFailed {
            tool: tool.name.clone(),
            message: format!(
                "exit code {}: {}",
                result
                    .status
                    .code()
                    .map_or_else(|| "unknown".to_string(), |c| c.to_string()),
                stderr.trim()
            ),
        })
    }
}

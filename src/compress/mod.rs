//! Reducing a document's size toward a target percentage.

pub mod external;
pub mod in_process;
pub mod method;
pub mod quality;

pub use external::{tool_settings, ExternalTool};
pub use in_process::{recompress_images, ImageReport};
pub use method::resolve_method;
pub use quality::quality_for_percent;

use std::fs;
use std::path::Path;

use crate::cli::Method;
use crate::config::RecompressSettings;
use crate::error::{Error, Result};
use crate::model::{CompressionPlan, ResolvedMethod};
use crate::parser::parse_page_list;
use crate::pdf::output::{persist, temp_beside};
use crate::pdf::{ensure_writable, write_output, PdfFile};

/// Result of a finished compression run
#[derive(Debug, Clone)]
pub struct CompressionOutcome {
    pub method: ResolvedMethod,
    /// `auto` tried the external tool and fell back to in-process
    pub fell_back: bool,
    pub input_bytes: u64,
    pub output_bytes: u64,
    /// Present when images were recompressed in-process
    pub images: Option<ImageReport>,
}

impl CompressionOutcome {
    /// Measured file size reduction in percent; negative if the file grew
    pub fn achieved_percent(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        (self.input_bytes as f64 - self.output_bytes as f64) / self.input_bytes as f64 * 100.0
    }
}

/// Work out everything the run needs before touching the output.
pub fn plan(
    settings: &RecompressSettings,
    page_count: u32,
    tool_available: bool,
) -> Result<CompressionPlan> {
    if settings.percent > 100 {
        return Err(Error::PercentOutOfRange(settings.percent));
    }

    let selection = match settings.pages.as_deref() {
        Some(spec) => {
            let selection = parse_page_list(spec)?;
            selection.validate(page_count)?;
            Some(selection)
        }
        None => None,
    };

    let method = resolve_method(
        settings.method,
        settings.percent,
        selection.is_some(),
        tool_available,
    )?;

    Ok(CompressionPlan {
        percent: settings.percent,
        method,
        quality: quality_for_percent(settings.percent),
        tool: tool_settings(settings.percent, &settings.tool),
        selection,
        recompress_encoded: settings.recompress_encoded,
    })
}

fn compress_in_process(
    file: &mut PdfFile,
    plan: &CompressionPlan,
    output: &Path,
    overwrite: bool,
) -> Result<ImageReport> {
    let report = recompress_images(file, plan);
    let bytes = file.to_bytes()?;
    write_output(output, &bytes, overwrite)?;
    Ok(report)
}

fn compress_external(
    tool: &ExternalTool,
    plan: &CompressionPlan,
    input: &Path,
    output: &Path,
    overwrite: bool,
) -> Result<()> {
    let temp = temp_beside(output)?;
    external::run(tool, &plan.tool, input, temp.path())?;
    persist(temp, output, overwrite)
}

/// Compress `settings.input` into `settings.output`.
///
/// The external tool is looked up once up front. When `auto` picked it and it
/// fails, the run falls back to in-process recompression; an explicit
/// `external` request fails instead. Nothing is written on error.
pub fn compress_document(settings: &RecompressSettings) -> Result<CompressionOutcome> {
    let tool = match settings.method {
        Method::InProcess => None,
        Method::Auto | Method::External => ExternalTool::locate(),
    };
    compress_with_tool(settings, tool)
}

fn compress_with_tool(
    settings: &RecompressSettings,
    tool: Option<ExternalTool>,
) -> Result<CompressionOutcome> {
    if settings.percent > 100 {
        return Err(Error::PercentOutOfRange(settings.percent));
    }
    ensure_writable(&settings.output, settings.overwrite)?;

    if settings.method == Method::External && tool.is_none() {
        // Fail before reading the input
        resolve_method(
            settings.method,
            settings.percent,
            settings.pages.is_some(),
            false,
        )?;
    }

    let mut file = PdfFile::open(&settings.input)?;
    let input_bytes = fs::metadata(&settings.input)?.len();
    let plan = plan(settings, file.page_count(), tool.is_some())?;

    log::info!(
        "{}: target reduction {}% on {} pages, method {:?}",
        file.path().display(),
        plan.percent,
        plan.selection
            .as_ref()
            .map(|s| s.len())
            .unwrap_or(file.page_count() as usize),
        plan.method
    );

    let mut method = plan.method;
    let mut fell_back = false;
    let mut images = None;

    if let (ResolvedMethod::External, Some(tool)) = (plan.method, tool.as_ref()) {
        let result = compress_external(
            tool,
            &plan,
            &settings.input,
            &settings.output,
            settings.overwrite,
        );
        match result {
            Ok(()) => {}
            Err(e @ Error::ToolFailed { .. }) if settings.method == Method::Auto => {
                log::warn!("{}; falling back to in-process compression", e);
                method = ResolvedMethod::InProcess;
                fell_back = true;
            }
            Err(e) => return Err(e),
        }
    }

    if method == ResolvedMethod::InProcess {
        images = Some(compress_in_process(
            &mut file,
            &plan,
            &settings.output,
            settings.overwrite,
        )?);
    }

    let output_bytes = fs::metadata(&settings.output)?.len();
    Ok(CompressionOutcome {
        method,
        fell_back,
        input_bytes,
        output_bytes,
        images,
    })
}

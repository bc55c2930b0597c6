use std::path::{Path, PathBuf};

use crate::cli::{Method, RecompressArgs, SplitArgs, ToolPreset};

use super::defaults::DEFAULT_EXTENSION;

/// Manual overrides for the external tool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOverrides {
    pub dpi: Option<u32>,
    pub quality: Option<u8>,
    pub preset: Option<ToolPreset>,
}

/// Runtime settings for one `recompress` run
#[derive(Debug, Clone)]
pub struct RecompressSettings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub percent: u32,
    /// Raw `--pages` expression, parsed once the page count is known
    pub pages: Option<String>,
    pub method: Method,
    pub recompress_encoded: bool,
    pub tool: ToolOverrides,
    pub overwrite: bool,
}

impl RecompressSettings {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, percent: u32) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            percent,
            pages: None,
            method: Method::Auto,
            recompress_encoded: false,
            tool: ToolOverrides::default(),
            overwrite: false,
        }
    }

    pub fn from_args(args: &RecompressArgs) -> Self {
        Self {
            input: args.input.clone(),
            output: args.output.clone(),
            percent: args.percent,
            pages: args.pages.clone(),
            method: args.method,
            recompress_encoded: args.recompress_encoded,
            tool: ToolOverrides {
                dpi: args.tool_dpi,
                quality: args.tool_quality,
                preset: args.tool_preset,
            },
            overwrite: args.overwrite,
        }
    }

    pub fn with_pages(mut self, pages: impl Into<String>) -> Self {
        self.pages = Some(pages.into());
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Runtime settings for one `split` run
#[derive(Debug, Clone)]
pub struct SplitSettings {
    pub input: PathBuf,
    pub parts: u32,
    pub output_dir: Option<PathBuf>,
    pub output_prefix: Option<String>,
    pub overwrite: bool,
}

impl SplitSettings {
    pub fn new(input: impl Into<PathBuf>, parts: u32) -> Self {
        Self {
            input: input.into(),
            parts,
            output_dir: None,
            output_prefix: None,
            overwrite: false,
        }
    }

    pub fn from_args(args: &SplitArgs) -> Self {
        Self {
            input: args.input.clone(),
            parts: args.parts,
            output_dir: args.output_dir.clone(),
            output_prefix: args.output_prefix.clone(),
            overwrite: args.overwrite,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = Some(prefix.into());
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Directory the parts are written to
    pub fn resolved_output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => self
                .input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Base name shared by all parts
    pub fn resolved_prefix(&self) -> String {
        self.output_prefix.clone().unwrap_or_else(|| {
            self.input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "document".to_string())
        })
    }

    pub fn extension(&self) -> String {
        self.input
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
    }
}

use crate::cli::ToolPreset;

use super::PageSelection;

/// Settings passed to the external whole-document tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    pub preset: ToolPreset,
    pub dpi: u32,
    /// JPEG quality, only passed when explicitly overridden
    pub jpeg_quality: Option<u8>,
}

/// Method chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedMethod {
    External,
    InProcess,
}

/// Everything decided before a compression run starts
#[derive(Debug, Clone)]
pub struct CompressionPlan {
    pub percent: u32,
    pub method: ResolvedMethod,
    /// JPEG quality for in-process recompression
    pub quality: u8,
    pub tool: ToolSettings,
    /// `None` means every page is eligible
    pub selection: Option<PageSelection>,
    pub recompress_encoded: bool,
}

impl CompressionPlan {
    pub fn page_selected(&self, page: u32) -> bool {
        self.selection
            .as_ref()
            .map(|s| s.contains(page))
            .unwrap_or(true)
    }
}

use crate::cli::Method;
use crate::config::defaults::{AUTO_EXTERNAL_MIN_PERCENT, TOOL_BINARIES};
use crate::error::{Error, Result};
use crate::model::ResolvedMethod;

/// Decide, once per run, which method compresses the document.
///
/// `tool_available` comes from the pre-flight lookup. A page filter keeps
/// `auto` in-process; an explicit `external` run ignores it, because the
/// external tool always rewrites every page.
pub fn resolve_method(
    method: Method,
    percent: u32,
    has_page_filter: bool,
    tool_available: bool,
) -> Result<ResolvedMethod> {
    match method {
        Method::InProcess => Ok(ResolvedMethod::InProcess),
        Method::External if !tool_available => Err(Error::ToolUnavailable {
            tool: TOOL_BINARIES.join("/"),
        }),
        Method::External => {
            if has_page_filter {
                log::warn!("--pages is ignored by the external method; all pages are compressed");
            }
            Ok(ResolvedMethod::External)
        }
        Method::Auto => {
            if tool_available && !has_page_filter && percent >= AUTO_EXTERNAL_MIN_PERCENT {
                Ok(ResolvedMethod::External)
            } else {
                Ok(ResolvedMethod::InProcess)
            }
        }
    }
}

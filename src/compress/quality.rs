use crate::config::defaults::{MAX_JPEG_QUALITY, MIN_JPEG_QUALITY};

/// JPEG quality for a requested reduction: `clamp(100 - percent, 10, 95)`.
///
/// 0% maps to 95, 50% to 50, 90% and above to 10.
pub fn quality_for_percent(percent: u32) -> u8 {
    let raw = 100u32.saturating_sub(percent);
    raw.clamp(MIN_JPEG_QUALITY as u32, MAX_JPEG_QUALITY as u32) as u8
}

//! Splitting a document into evenly sized, page-ordered parts.

use std::fs;
use std::path::PathBuf;

use crate::config::SplitSettings;
use crate::error::{Error, Result};
use crate::model::PageRange;
use crate::pdf::{ensure_writable, save_to_bytes, write_output, PdfFile};

/// Divide `total_pages` into `parts` contiguous ranges whose sizes differ by
/// at most one page; the larger parts come first.
///
/// Asking for more parts than pages yields one single-page part per page.
pub fn partition(total_pages: u32, parts: u32) -> Result<Vec<PageRange>> {
    if parts == 0 {
        return Err(Error::InvalidPartCount);
    }
    if total_pages == 0 {
        return Err(Error::EmptyDocument);
    }

    let parts = if parts > total_pages {
        log::warn!(
            "Requested {} parts but document has only {} pages; creating {} parts",
            parts,
            total_pages,
            total_pages
        );
        total_pages
    } else {
        parts
    };

    let base = total_pages / parts;
    let extra = total_pages % parts;

    let mut ranges = Vec::with_capacity(parts as usize);
    let mut start = 1;
    for i in 0..parts {
        let size = base + u32::from(i < extra);
        let end = start + size - 1;
        ranges.push(PageRange::new(start, end));
        start = end + 1;
    }
    Ok(ranges)
}

/// File name of part `index` (1-based) out of `count`
pub fn part_file_name(prefix: &str, index: usize, count: usize, extension: &str) -> String {
    format!("{}_part_{}of{}.{}", prefix, index, count, extension)
}

/// Split the input document and write one file per part.
///
/// Every destination is checked before anything is written, so a refusal to
/// overwrite never leaves some parts behind.
pub fn split_document(settings: &SplitSettings) -> Result<Vec<PathBuf>> {
    if settings.parts == 0 {
        return Err(Error::InvalidPartCount);
    }

    let file = PdfFile::open(&settings.input)?;
    let ranges = partition(file.page_count(), settings.parts)?;

    let out_dir = settings.resolved_output_dir();
    fs::create_dir_all(&out_dir)?;

    let prefix = settings.resolved_prefix();
    let extension = settings.extension();
    let targets: Vec<PathBuf> = (1..=ranges.len())
        .map(|i| out_dir.join(part_file_name(&prefix, i, ranges.len(), &extension)))
        .collect();

    for target in &targets {
        ensure_writable(target, settings.overwrite)?;
    }

    for (range, target) in ranges.iter().zip(&targets) {
        let mut part = file.extract_range(*range);
        let bytes = save_to_bytes(&mut part)?;
        write_output(target, &bytes, settings.overwrite)?;
        log::info!("Wrote pages {} to {}", range, target.display());
    }

    Ok(targets)
}

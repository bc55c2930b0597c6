//! Image-level recompression inside the document.

use std::collections::HashSet;

use lopdf::{Document, Object, ObjectId};

use crate::error::ImageError;
use crate::model::{CompressionPlan, ImageInfo};
use crate::pdf::{decode_image, encode_jpeg, page_images, PdfFile};

/// What happened to the images of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageReport {
    pub pages_compressed: u32,
    pub pages_kept: u32,
    /// Images re-encoded and replaced
    pub replaced: usize,
    /// Images re-encoded but kept because the result was not smaller
    pub kept_original: usize,
    /// Already JPEG and `recompress_encoded` not set
    pub skipped_encoded: usize,
    /// Also drawn on an unselected page
    pub skipped_shared: usize,
    /// Could not be decoded or encoded; original bytes kept
    pub failed: usize,
    /// Stored size of all re-encoded images before the run
    pub bytes_before: u64,
    /// Stored size of the same images after the run
    pub bytes_after: u64,
}

impl ImageReport {
    /// Byte savings over the re-encoded images, in percent
    pub fn achieved_percent(&self) -> f64 {
        if self.bytes_before == 0 {
            return 0.0;
        }
        (self.bytes_before - self.bytes_after) as f64 / self.bytes_before as f64 * 100.0
    }
}

enum ImageOutcome {
    Replaced { before: usize, after: usize },
    KeptOriginal { size: usize },
    SkippedEncoded,
}

/// Re-encode one image, replacing it only if the result is strictly smaller.
fn recompress_image(
    doc: &mut Document,
    id: ObjectId,
    quality: u8,
    recompress_encoded: bool,
) -> Result<ImageOutcome, ImageError> {
    let stream = doc.get_object(id)?.as_stream()?;
    let info = ImageInfo::from_stream(stream);
    if info.encoding.is_jpeg() && !recompress_encoded {
        return Ok(ImageOutcome::SkippedEncoded);
    }

    let decoded = decode_image(doc, stream)?;
    let jpeg = encode_jpeg(&decoded.pixels, quality)?;
    if jpeg.len() >= info.stored_len {
        return Ok(ImageOutcome::KeptOriginal {
            size: info.stored_len,
        });
    }

    let after = jpeg.len();
    let stream = doc.get_object_mut(id)?.as_stream_mut()?;
    stream.set_content(jpeg);
    stream.dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
    stream.dict.set("BitsPerComponent", Object::Integer(8));
    stream.dict.remove(b"DecodeParms");
    if let Some(color_space) = decoded.color_space {
        stream.dict.set("ColorSpace", Object::Name(color_space.to_vec()));
    }

    Ok(ImageOutcome::Replaced {
        before: info.stored_len,
        after,
    })
}

/// Recompress images on the selected pages of `file` following `plan`.
///
/// Images also used by an unselected page are left alone so that those pages
/// stay byte-identical. Per-image failures are logged and counted, never
/// returned.
pub fn recompress_images(file: &mut PdfFile, plan: &CompressionPlan) -> ImageReport {
    let mut report = ImageReport::default();
    let mut candidates = Vec::new();
    let mut seen = HashSet::new();
    let mut protected = HashSet::new();

    for (number, page_id) in file.pages() {
        let images = page_images(file.document(), page_id);
        if plan.page_selected(number) {
            report.pages_compressed += 1;
            candidates.extend(images.into_iter().filter(|id| seen.insert(*id)));
        } else {
            report.pages_kept += 1;
            protected.extend(images);
        }
    }

    let doc = file.document_mut();
    for id in candidates {
        if protected.contains(&id) {
            log::debug!("Image {:?} is shared with an unselected page, skipping", id);
            report.skipped_shared += 1;
            continue;
        }

        match recompress_image(doc, id, plan.quality, plan.recompress_encoded) {
            Ok(ImageOutcome::Replaced { before, after }) => {
                log::debug!("Image {:?}: {} -> {} bytes", id, before, after);
                report.replaced += 1;
                report.bytes_before += before as u64;
                report.bytes_after += after as u64;
            }
            Ok(ImageOutcome::KeptOriginal { size }) => {
                log::debug!("Image {:?}: re-encoding did not shrink it, kept", id);
                report.kept_original += 1;
                report.bytes_before += size as u64;
                report.bytes_after += size as u64;
            }
            Ok(ImageOutcome::SkippedEncoded) => {
                log::debug!("Image {:?} is already JPEG, skipping", id);
                report.skipped_encoded += 1;
            }
            Err(e) => {
                log::warn!("Image {:?} left unchanged: {}", id, e);
                report.failed += 1;
            }
        }
    }

    log::info!(
        "Compressed pages={}, kept original pages={}, images replaced={}",
        report.pages_compressed,
        report.pages_kept,
        report.replaced
    );
    report
}

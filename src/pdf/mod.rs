//! PDF access on top of lopdf

pub mod codec;
pub mod document;
pub mod images;
pub mod output;

#[cfg(test)]
pub(crate) mod testing;

pub use codec::{decode_image, encode_jpeg, DecodedImage};
pub use document::{save_to_bytes, PdfFile};
pub use images::page_images;
pub use output::{ensure_writable, write_output};

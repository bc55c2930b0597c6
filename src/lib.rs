//! Size reduction and splitting for PDF documents.
//!
//! Two entry points back the `recompress` and `split` binaries:
//!
//! ```no_run
//! use pdf_reduce::{compress_document, split_document, RecompressSettings, SplitSettings};
//!
//! let settings = RecompressSettings::new("scan.pdf", "scan_small.pdf", 60).with_pages("2-5");
//! let outcome = compress_document(&settings).unwrap();
//! println!("saved {:.1}%", outcome.achieved_percent());
//!
//! let parts = split_document(&SplitSettings::new("scan.pdf", 3)).unwrap();
//! assert_eq!(parts.len(), 3);
//! ```

pub mod cli;
pub mod compress;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod pdf;
pub mod split;

pub use compress::{compress_document, CompressionOutcome};
pub use config::{RecompressSettings, SplitSettings};
pub use error::{Error, ErrorCategory, ImageError, Result};
pub use model::{PageRange, PageSelection};
pub use parser::parse_page_list;
pub use split::{partition, split_document};

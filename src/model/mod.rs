pub mod image;
pub mod plan;
pub mod range;
pub mod selection;

pub use image::{ImageEncoding, ImageInfo};
pub use plan::{CompressionPlan, ResolvedMethod, ToolSettings};
pub use range::PageRange;
pub use selection::PageSelection;

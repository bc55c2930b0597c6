pub mod defaults;
pub mod settings;

pub use settings::{RecompressSettings, SplitSettings, ToolOverrides};

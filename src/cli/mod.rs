pub mod args;

pub use args::{Method, RecompressArgs, SplitArgs, ToolPreset};

use crate::error::{Error, ErrorCategory};

/// Initialize logging from the `-v` count
pub fn init_logging(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();
}

/// Exit code for an error bubbled up to `main`.
///
/// The library error may sit anywhere in the context chain; anything
/// without one is treated as an I/O failure.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<Error>())
        .map(Error::category)
        .unwrap_or(ErrorCategory::IoFailure)
        .exit_code()
}

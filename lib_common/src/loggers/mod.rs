/// Console and rotated file logging built on `tracing`.
pub mod loggerlocal;

pub use loggerlocal::{level_directive, rotate_logs, setup_logging};

pub mod logging;
pub mod vec2;

pub use logging::{init_stdout_logger, parse_level, StdoutLogger};
pub use vec2::Vec2;

// Re-export log crate so downstream crates can use base::log::*
pub use log;

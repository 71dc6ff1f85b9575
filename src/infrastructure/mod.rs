//! Infrastructure: configuration, logging, and stack wiring.

pub mod config;
pub mod logging;
pub mod setup;

pub use config::{ConfigError, ConfigLoader};
pub use logging::init_logging;
pub use setup::{build_stack, build_stack_from_env, RagStack};

//! # botapi-cli
//!
//! Argument parsing, config loading and message building for the `botapi` binary.

pub mod cli;

pub use cli::{build_message, load_config, Cli, Commands};
pub use botapi_telegram::TelegramConfig;

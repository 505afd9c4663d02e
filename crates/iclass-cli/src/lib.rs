//! iClass QR command-line front end
//!
//! - [`AppConfig`]: TOML configuration with defaults
//! - [`App`]: one handler per subcommand over a saved-item store
//! - [`Language`]: English and Chinese notices
//! - [`command`]: the clap command tree for `iclass-qr`

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod app;
pub mod cli;
pub mod config;
pub mod i18n;

pub use app::{App, AppError, ImportReport};
pub use cli::command;
pub use config::{AppConfig, ConfigError, ImageFormat};
pub use i18n::{Language, Message};

//! pageflash-core: configuration, errors, logging and locale formatting
//! shared by the pageflash runtime and CLI.

pub mod config;
pub mod error;
pub mod format;
pub mod logging;

pub use config::{Config, ConfigLoadResult};
pub use error::{Error, Result};
pub use format::{NumberLocale, format_number};

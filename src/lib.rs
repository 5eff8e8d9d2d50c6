pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::{ConfigDocument, ConfigFormat, ConfigLoader, RawConfigDocument};
pub use crate::core::{matches, normalize};
pub use domain::model::{CourseReference, RawReferenceEntry};
pub use domain::ports::ReferencePattern;
pub use utils::error::{ConfigError, Result};

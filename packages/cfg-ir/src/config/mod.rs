//! Inlining configuration
//!
//! Two levels:
//! - Preset: one-liner defaults
//! - YAML (versioned schema) or builder overrides on top of a preset
//!
//! # Examples
//!
//! ```rust,ignore
//! use cfg_ir::config::{InlineConfig, Preset};
//!
//! let config = InlineConfig::from_preset(Preset::Conservative).max_callee_blocks(16);
//! config.validate()?;
//!
//! let config = InlineConfig::from_yaml_file("inline.yaml")?;
//! ```

pub mod error;
pub mod inline_config;
pub mod io;
pub mod preset;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use inline_config::InlineConfig;
pub use io::{ConfigExportV1, ConfigOverrides};
pub use preset::Preset;
pub use validation::Validatable;

//! Configuration I/O (YAML)
//!
//! Schema v1:
//!
//! ```yaml
//! version: 1
//! preset: balanced
//! overrides:
//!   max_callee_blocks: 64
//! ```

use super::error::{ConfigError, ConfigResult};
use super::inline_config::InlineConfig;
use super::preset::Preset;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1); optional only so a missing field
    /// can be reported as such
    #[serde(default)]
    pub version: Option<u32>,

    /// Base preset
    pub preset: String,

    /// Fine-grained overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

/// Per-field overrides applied on top of the preset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_callee_blocks: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_callee_instructions: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_yield_sites: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prune_unreachable: Option<bool>,
}

impl InlineConfig {
    /// Load from a YAML document (v1 schema) and validate
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = Preset::from_str(&export.preset)
            .map_err(|_| ConfigError::UnknownPreset(export.preset.clone()))?;
        let mut config = Self::from_preset(preset);

        if let Some(overrides) = export.overrides {
            if let Some(v) = overrides.max_callee_blocks {
                config.max_callee_blocks = v;
            }
            if let Some(v) = overrides.max_callee_instructions {
                config.max_callee_instructions = v;
            }
            if let Some(v) = overrides.record_yield_sites {
                config.record_yield_sites = v;
            }
            if let Some(v) = overrides.prune_unreachable {
                config.prune_unreachable = v;
            }
        }

        config.validate()?;
        debug!("Loaded inline config from preset '{}': {:?}", preset, config);
        Ok(config)
    }

    /// Load from a YAML file (v1 schema)
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Export to YAML
    ///
    /// Every field is written as an override on the balanced preset, so the
    /// document reloads to an equal configuration.
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            preset: Preset::Balanced.to_string(),
            overrides: Some(ConfigOverrides {
                max_callee_blocks: Some(self.max_callee_blocks),
                max_callee_instructions: Some(self.max_callee_instructions),
                record_yield_sites: Some(self.record_yield_sites),
                prune_unreachable: Some(self.prune_unreachable),
            }),
        };

        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }
}

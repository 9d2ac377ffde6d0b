//! Inlining configuration
//!
//! Limits and switches for the inlining use cases. Build from a preset, then
//! adjust with the builder methods or load a YAML document.

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Limits and switches for method and closure inlining
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineConfig {
    /// Callees with more live blocks are not inlined (1..=10000)
    pub max_callee_blocks: usize,

    /// Callees with more live instructions are not inlined (1..=1000000)
    pub max_callee_instructions: usize,

    /// Log cloned closure invocations as linkage sites
    pub record_yield_sites: bool,

    /// Mark blocks unreachable from the entry as dead after a transformation
    pub prune_unreachable: bool,
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl InlineConfig {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Conservative => Self {
                max_callee_blocks: 8,
                max_callee_instructions: 64,
                record_yield_sites: true,
                prune_unreachable: true,
            },
            Preset::Balanced => Self {
                max_callee_blocks: 32,
                max_callee_instructions: 512,
                record_yield_sites: true,
                prune_unreachable: true,
            },
            Preset::Aggressive => Self {
                max_callee_blocks: 256,
                max_callee_instructions: 8192,
                record_yield_sites: true,
                prune_unreachable: false,
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_callee_blocks == 0 || self.max_callee_blocks > 10_000 {
            return Err(ConfigError::range_with_hint(
                "max_callee_blocks",
                self.max_callee_blocks,
                1,
                10_000,
                "A callee has at least one block",
            ));
        }

        if self.max_callee_instructions == 0 || self.max_callee_instructions > 1_000_000 {
            return Err(ConfigError::range_with_hint(
                "max_callee_instructions",
                self.max_callee_instructions,
                1,
                1_000_000,
                "Instruction limit must be positive and bounded",
            ));
        }

        Ok(())
    }

    /// Builder: Set max_callee_blocks
    pub fn max_callee_blocks(mut self, v: usize) -> Self {
        self.max_callee_blocks = v;
        self
    }

    /// Builder: Set max_callee_instructions
    pub fn max_callee_instructions(mut self, v: usize) -> Self {
        self.max_callee_instructions = v;
        self
    }

    /// Builder: Set record_yield_sites
    pub fn record_yield_sites(mut self, v: bool) -> Self {
        self.record_yield_sites = v;
        self
    }

    /// Builder: Set prune_unreachable
    pub fn prune_unreachable(mut self, v: bool) -> Self {
        self.prune_unreachable = v;
        self
    }
}

impl Validatable for InlineConfig {
    fn validate(&self) -> ConfigResult<()> {
        InlineConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "InlineConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for preset in [Preset::Conservative, Preset::Balanced, Preset::Aggressive] {
            InlineConfig::from_preset(preset).validate().unwrap();
        }
    }

    #[test]
    fn test_presets_widen_limits() {
        let conservative = InlineConfig::from_preset(Preset::Conservative);
        let aggressive = InlineConfig::from_preset(Preset::Aggressive);
        assert!(conservative.max_callee_blocks < aggressive.max_callee_blocks);
        assert!(conservative.max_callee_instructions < aggressive.max_callee_instructions);
    }

    #[test]
    fn test_zero_blocks_rejected() {
        let err = InlineConfig::default().max_callee_blocks(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Range { ref field, .. } if field == "max_callee_blocks"));
    }

    #[test]
    fn test_instruction_limit_upper_bound() {
        let config = InlineConfig::default().max_callee_instructions(1_000_001);
        assert!(config.validate().is_err());
        assert_eq!(config.config_name(), "InlineConfig");
    }
}

//! Preset configurations
//!
//! Presets provide complete default inlining limits for common use cases.

use serde::{Deserialize, Serialize};

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Small leaf methods only
    ///
    /// - Callees: <= 8 blocks, <= 64 instructions
    Conservative,

    /// Default limits
    ///
    /// - Callees: <= 32 blocks, <= 512 instructions
    Balanced,

    /// Large callees, no pruning
    ///
    /// - Callees: <= 256 blocks, <= 8192 instructions
    /// - Unreachable blocks are left live for later passes
    Aggressive,
}

impl Preset {
    /// Parse preset from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "balanced" => Ok(Self::Balanced),
            "aggressive" => Ok(Self::Aggressive),
            _ => Err(format!(
                "Unknown preset '{}'. Valid presets: conservative, balanced, aggressive",
                s
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Balanced
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

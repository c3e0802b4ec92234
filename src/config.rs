use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Deepest search the engine accepts; beyond this a single move can take minutes.
pub const MAX_DEPTH: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    /// Plies searched, counting the root move.
    pub depth: u8,
    /// Probability of skipping the search and playing a random legal move.
    pub error_rate: f64,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            error_rate: 0.30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaBetaConfig {
    pub depth: u8,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self { depth: 4 }
    }
}

/// Tunables for the search tiers. Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub minimax: MinimaxConfig,
    pub alphabeta: AlphaBetaConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_depth("minimax.depth", self.minimax.depth)?;
        validate_depth("alphabeta.depth", self.alphabeta.depth)?;
        let rate = self.minimax.error_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::Invalid(format!(
                "minimax.error_rate must be within 0.0..=1.0, got {rate}"
            )));
        }
        Ok(())
    }

    /// Builder: set the bounded-minimax depth.
    pub fn with_minimax_depth(mut self, depth: u8) -> Self {
        self.minimax.depth = depth;
        self
    }

    /// Builder: set the bounded-minimax random-move probability.
    pub fn with_error_rate(mut self, rate: f64) -> Self {
        self.minimax.error_rate = rate;
        self
    }

    /// Builder: set the alpha-beta depth.
    pub fn with_alphabeta_depth(mut self, depth: u8) -> Self {
        self.alphabeta.depth = depth;
        self
    }
}

fn validate_depth(name: &str, depth: u8) -> Result<(), ConfigError> {
    if depth == 0 || depth > MAX_DEPTH {
        return Err(ConfigError::Invalid(format!(
            "{name} must be within 1..={MAX_DEPTH}, got {depth}"
        )));
    }
    Ok(())
}

/// Load and validate an engine config from a JSON file.
pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: EngineConfig = serde_json::from_str(&data)?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_difficulty_tiers() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.minimax.depth, 3);
        assert!((cfg.minimax.error_rate - 0.30).abs() < 1e-12);
        assert_eq!(cfg.alphabeta.depth, 4);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_and_validation() {
        let cfg = EngineConfig::default().with_minimax_depth(0);
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
        let cfg = EngineConfig::default().with_error_rate(1.5);
        assert!(cfg.validate().is_err());
        let cfg = EngineConfig::default()
            .with_alphabeta_depth(2)
            .with_error_rate(0.0);
        assert!(cfg.validate().is_ok());
    }
}

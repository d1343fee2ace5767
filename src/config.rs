//! Engine configuration.
//!
//! Loaded from TOML; every section falls back to its defaults, so an empty
//! document is a valid configuration.
//!
//! ```toml
//! [matching]
//! service = 0.5
//! keyword = 0.3
//!
//! [estimation]
//! default_duration_hours = 4.0
//!
//! [booking]
//! role_tag = "designer"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, Result};

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub matching: MatchingConfig,
    pub estimation: EstimationConfig,
    pub recommendation: RecommendationConfig,
    pub booking: BookingConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        tracing::debug!(?config, "loaded engine config");
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let m = &self.matching;
        let weights = [m.service, m.keyword, m.language, m.history];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(invalid("matching weights must be finite and >= 0"));
        }
        if weights.iter().all(|w| *w == 0.0) {
            return Err(invalid("at least one matching weight must be > 0"));
        }
        if m.min_token_len == 0 {
            return Err(invalid("matching.min_token_len must be >= 1"));
        }

        let e = &self.estimation;
        if !(e.default_duration_hours > 0.0 && e.default_duration_hours.is_finite()) {
            return Err(invalid("estimation.default_duration_hours must be > 0"));
        }
        if !(e.hours_per_work_unit > 0.0 && e.hours_per_work_unit.is_finite()) {
            return Err(invalid("estimation.hours_per_work_unit must be > 0"));
        }

        let r = &self.recommendation;
        if !(2..=3).contains(&r.alternates) {
            return Err(invalid("recommendation.alternates must be 2 or 3"));
        }
        if r.fallbacks == 0 {
            return Err(invalid("recommendation.fallbacks must be >= 1"));
        }

        let b = &self.booking;
        if b.role_tag.trim().is_empty() {
            return Err(invalid("booking.role_tag must not be empty"));
        }
        if b.roster_fetch_attempts == 0 {
            return Err(invalid("booking.roster_fetch_attempts must be >= 1"));
        }

        Ok(())
    }
}

fn invalid(msg: &str) -> crate::error::EngineError {
    ConfigError::Invalid(msg.to_string()).into()
}

/// Skill matcher rule weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Weight of exact service-category matches.
    pub service: f64,
    /// Weight of specificity-weighted keyword overlap.
    pub keyword: f64,
    /// Weight of required-language coverage.
    pub language: f64,
    /// Weight of similarity to past task descriptions.
    pub history: f64,
    /// Tokens shorter than this are ignored.
    pub min_token_len: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            service: 0.5,
            keyword: 0.25,
            language: 0.1,
            history: 0.15,
            min_token_len: 3,
        }
    }
}

/// Duration estimation when a task declares no explicit effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    pub default_duration_hours: f64,
    /// Hours of work per declared unit (e.g. one slide, one page).
    pub hours_per_work_unit: f64,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            default_duration_hours: 4.0,
            hours_per_work_unit: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// Available designers listed after the primary pick.
    pub alternates: usize,
    /// Unavailable designers surfaced when nobody is free.
    pub fallbacks: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            alternates: 3,
            fallbacks: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Role label written on every booking.
    pub role_tag: String,
    /// Attempts for the roster fetch before the upstream is declared unreachable.
    pub roster_fetch_attempts: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            role_tag: "designer".to_string(),
            roster_fetch_attempts: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = EngineConfig::from_str("").unwrap();
        assert_eq!(config.recommendation.alternates, 3);
        assert_eq!(config.booking.role_tag, "designer");
        assert!((config.estimation.default_duration_hours - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_str(
            r#"
            [matching]
            service = 0.8

            [recommendation]
            alternates = 2
            "#,
        )
        .unwrap();
        assert!((config.matching.service - 0.8).abs() < 1e-10);
        assert!((config.matching.keyword - 0.25).abs() < 1e-10);
        assert_eq!(config.recommendation.alternates, 2);
    }

    #[test]
    fn test_rejects_alternates_out_of_range() {
        let err = EngineConfig::from_str("[recommendation]\nalternates = 5").unwrap_err();
        assert!(matches!(err, EngineError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_all_zero_weights() {
        let err = EngineConfig::from_str(
            "[matching]\nservice = 0.0\nkeyword = 0.0\nlanguage = 0.0\nhistory = 0.0",
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = EngineConfig::from_str("[matching\nservice = ").unwrap_err();
        assert!(matches!(err, EngineError::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file("/nonexistent/designer-schedule.toml").unwrap_err();
        assert!(matches!(err, EngineError::Config(ConfigError::ReadFile(_))));
    }
}

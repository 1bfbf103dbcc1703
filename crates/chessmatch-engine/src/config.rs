//! Match configuration loading.
//!
//! A [`MatchConfig`] selects the rule variants used for checkmate and
//! stalemate detection and the promotion applied when the caller does not name
//! one. It is read from a TOML file:
//!
//! ```toml
//! checkmate_rule = "single-attacker"
//! stalemate_rule = "king-only"
//! default_promotion = "knight"
//! ```

use crate::rules::{CheckmateRule, StalemateRule};
use chessmatch_core::PieceKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The default promotion does not name a piece a pawn can become.
    #[error("Invalid default promotion: {0:?}")]
    InvalidPromotion(String),
}

/// Rule selection for a match.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatchConfig {
    /// How checkmate is decided. Defaults to a full legal-move search.
    #[serde(default)]
    pub checkmate_rule: CheckmateRule,
    /// How stalemate is detected. Defaults to checking every piece after each
    /// move.
    #[serde(default)]
    pub stalemate_rule: StalemateRule,
    /// Piece name used for promotion when none is given. Matched
    /// case-insensitively. Defaults to "queen".
    #[serde(default = "default_promotion")]
    pub default_promotion: String,
}

fn default_promotion() -> String {
    "queen".to_string()
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            checkmate_rule: CheckmateRule::default(),
            stalemate_rule: StalemateRule::default(),
            default_promotion: default_promotion(),
        }
    }
}

impl MatchConfig {
    /// Default configuration file name.
    pub const FILE_NAME: &'static str = "chessmatch.toml";

    /// Loads the configuration from `path`.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if it is not valid TOML, or
    /// [`ConfigError::InvalidPromotion`] if the default promotion is not a
    /// promotable piece.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the default promotion names a promotable piece.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.default_promotion.parse::<PieceKind>() {
            Ok(kind) if kind.is_promotable() => Ok(()),
            _ => Err(ConfigError::InvalidPromotion(self.default_promotion.clone())),
        }
    }
}

//! Model tier selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which model family a request is routed to.
///
/// `Flash` is the fast default; `Pro` trades latency for quality on
/// complex geometry or selection logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    #[default]
    Flash,
    Pro,
}

impl ModelTier {
    /// The model identifier sent to the API.
    pub fn model_id(self) -> &'static str {
        match self {
            ModelTier::Flash => "gemini-2.5-flash",
            ModelTier::Pro => "gemini-2.5-pro",
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelTier::Flash => write!(f, "flash"),
            ModelTier::Pro => write!(f, "pro"),
        }
    }
}

/// Error for unrecognized tier names.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown model tier '{0}', expected 'flash' or 'pro'")]
pub struct ParseModelTierError(String);

impl FromStr for ModelTier {
    type Err = ParseModelTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flash" => Ok(ModelTier::Flash),
            "pro" => Ok(ModelTier::Pro),
            _ => Err(ParseModelTierError(s.to_string())),
        }
    }
}

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RecommendError;

/// Settings for a [`crate::recommender::Recommender`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommenderConfig {
    /// Emit the preference vector and projected scores at TRACE level.
    pub log_vectors: bool,
}

impl RecommenderConfig {

    pub fn from_json(json: &str) -> Result<Self, RecommendError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RecommendError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

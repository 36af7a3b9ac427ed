//! Slider configuration loaded from TOML.
//!
//! ```toml
//! [weight]
//! label = "Weight"
//! unit = "kg"
//! min = 40
//! max = 150
//! initial = 70
//! ```
//!
//! Missing tables fall back to the defaults ([Props::weight], [Props::height], [Props::radius]).

use std::path::{Path, PathBuf};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::components::labeled_slider::Props;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },
    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid props for `{name}`: {reason}")]
    InvalidProps {
        name: String,
        reason: String
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub weight: Props,
    pub height: Props,
    pub radius: Props
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            weight: Props::weight(),
            height: Props::height(),
            radius: Props::radius()
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("config: loading {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_props("weight", &self.weight)?;
        validate_props("height", &self.height)?;
        validate_props("radius", &self.radius)
    }
}

fn validate_props(name: &str, props: &Props) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidProps {
        name: name.to_string(),
        reason
    };
    if ![props.min, props.max, props.initial].iter().all(|number| number.is_finite()) {
        return Err(invalid("bounds and initial value must be finite".to_string()));
    }
    if props.min > props.max {
        return Err(invalid(format!("min {} is above max {}", props.min, props.max)));
    }
    if props.initial < props.min || props.initial > props.max {
        return Err(invalid(format!("initial {} is outside {}..={}", props.initial, props.min, props.max)));
    }
    Ok(())
}

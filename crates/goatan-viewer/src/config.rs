//! Viewer configuration, read from the environment once at start-up.

use goatan_core::{LayoutError, TileDimensions};
use std::path::PathBuf;
use thiserror::Error;

pub const INPUT_VAR: &str = "GOATAN_INPUT";
pub const TILE_WIDTH_VAR: &str = "GOATAN_TILE_WIDTH";
pub const TILE_HEIGHT_VAR: &str = "GOATAN_TILE_HEIGHT";
pub const TILE_HORIZONTAL_WIDTH_VAR: &str = "GOATAN_TILE_HORIZONTAL_WIDTH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error(transparent)]
    Dimensions(#[from] LayoutError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// File to read protocol lines from; stdin when unset
    pub input: Option<PathBuf>,
    pub dimensions: TileDimensions,
}

impl ViewerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |var: &'static str, default: f64| -> Result<f64, ConfigError> {
            match lookup(var) {
                None => Ok(default),
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber { var, value }),
            }
        };

        let dimensions = TileDimensions::new(
            number(TILE_WIDTH_VAR, TileDimensions::TILE_WIDTH)?,
            number(TILE_HEIGHT_VAR, TileDimensions::TILE_HEIGHT)?,
            number(TILE_HORIZONTAL_WIDTH_VAR, TileDimensions::TILE_HORIZONTAL_WIDTH)?,
        )?;

        Ok(Self {
            input: lookup(INPUT_VAR).filter(|p| !p.is_empty()).map(PathBuf::from),
            dimensions,
        })
    }
}

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::camera::{GeoPoint, MercatorCamera};

const DEFAULT_INTERVAL: Duration = Duration::from_millis(600);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("bad interval {0}: {1}")]
    Interval(String, String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayConfig {
    pub dataset: PathBuf,
    /// Pacing between fixes, humantime syntax ("600ms", "1s").
    pub interval: Option<String>,
    #[serde(default)]
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default = "default_width_px")]
    pub width_px: f32,
    #[serde(default = "default_height_px")]
    pub height_px: f32,
}

fn default_latitude() -> f64 {
    45.06069
}

fn default_longitude() -> f64 {
    7.64506
}

fn default_zoom() -> f64 {
    12.0
}

fn default_width_px() -> f32 {
    1080.0
}

fn default_height_px() -> f32 {
    1920.0
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            zoom: default_zoom(),
            width_px: default_width_px(),
            height_px: default_height_px(),
        }
    }
}

impl ReplayConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ReplayConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn interval(&self) -> Result<Duration, ConfigError> {
        match &self.interval {
            Some(s) => humantime::parse_duration(s.trim())
                .map_err(|e| ConfigError::Interval(s.clone(), e.to_string())),
            None => Ok(DEFAULT_INTERVAL),
        }
    }
}

impl CameraConfig {
    pub fn to_camera(&self) -> MercatorCamera {
        MercatorCamera::new(
            GeoPoint::new(self.longitude, self.latitude),
            self.zoom,
            self.width_px,
            self.height_px,
        )
    }
}

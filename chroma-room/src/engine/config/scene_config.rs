use bevy::prelude::*;
use constants::media::{
    AUDIO_PATH, AUDIO_REFERENCE_DISTANCE, VIDEO_FRAME_RATE, VIDEO_FRAMES_DIR, VIDEO_URL,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::camera::orbit_camera::OrbitBounds;
use crate::engine::shaders::chroma_key::ChromaKeyParams;

/// Media collaborators bound to the character plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub video_url: String,
    pub video_frames_dir: String,
    pub frame_rate: f32,
    pub audio_path: String,
    pub audio_reference_distance: f32,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            video_url: VIDEO_URL.to_string(),
            video_frames_dir: VIDEO_FRAMES_DIR.to_string(),
            frame_rate: VIDEO_FRAME_RATE,
            audio_path: AUDIO_PATH.to_string(),
            audio_reference_distance: AUDIO_REFERENCE_DISTANCE,
        }
    }
}

/// Whole-scene configuration, fixed for the lifetime of the process once loaded.
#[derive(Resource, Asset, TypePath, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub chroma_key: ChromaKeyParams,
    pub orbit: OrbitBounds,
    pub media: MediaConfig,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("chroma key threshold must be a non-negative number, got {0}")]
    Threshold(f32),
    #[error("tint strength must be finite, got {0}")]
    TintStrength(f32),
    #[error("key colour channel {channel} must lie in [0, 1], got {value}")]
    KeyColour { channel: usize, value: f32 },
    #[error("{axis} range is inverted: min {min} > max {max}")]
    OrbitRange {
        axis: &'static str,
        min: f32,
        max: f32,
    },
    #[error("frame rate must be positive, got {0}")]
    FrameRate(f32),
    #[error("audio reference distance must be positive, got {0}")]
    ReferenceDistance(f32),
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = &self.chroma_key;
        if !key.threshold.is_finite() || key.threshold < 0.0 {
            return Err(ConfigError::Threshold(key.threshold));
        }
        if !key.tint_strength.is_finite() {
            return Err(ConfigError::TintStrength(key.tint_strength));
        }
        for (channel, value) in key.key_colour.iter().copied().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::KeyColour { channel, value });
            }
        }

        let orbit = &self.orbit;
        if !(orbit.min_polar <= orbit.max_polar) {
            return Err(ConfigError::OrbitRange {
                axis: "polar",
                min: orbit.min_polar,
                max: orbit.max_polar,
            });
        }
        if !(orbit.min_azimuth <= orbit.max_azimuth) {
            return Err(ConfigError::OrbitRange {
                axis: "azimuth",
                min: orbit.min_azimuth,
                max: orbit.max_azimuth,
            });
        }

        let media = &self.media;
        if !(media.frame_rate > 0.0) {
            return Err(ConfigError::FrameRate(media.frame_rate));
        }
        if !(media.audio_reference_distance > 0.0) {
            return Err(ConfigError::ReferenceDistance(
                media.audio_reference_distance,
            ));
        }

        Ok(())
    }
}

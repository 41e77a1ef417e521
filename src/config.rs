//! Application configuration
//!
//! Every field has a default, so a JSON file only needs the values it changes.

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::camera::RotationMode;
use crate::core::KeyBindings;
use crate::error::Result;

/// Camera construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view, degrees
    pub fov_deg: f32,
    pub near_clip: f32,
    pub far_clip: f32,
    /// Degrees of rotation per pixel of pointer motion
    pub rotation_speed: f32,
    /// World units per second
    pub move_speed: f32,
    pub position: [f32; 3],
    pub forward: [f32; 3],
    pub rotation: RotationMode,
    pub fov_mutable: bool,
    pub fov_step: f32,
    pub fov_min: f32,
    pub fov_max: f32,
    pub max_pitch_deg: f32,
    pub ray_cache: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 60.0,
            near_clip: 0.1,
            far_clip: 100.0,
            rotation_speed: 0.3,
            move_speed: 5.0,
            position: [0.0, 0.0, 3.0],
            forward: [0.0, 0.0, -1.0],
            rotation: RotationMode::Composed,
            fov_mutable: true,
            fov_step: 3.0,
            fov_min: 10.0,
            fov_max: 120.0,
            max_pitch_deg: 89.0,
            ray_cache: true,
        }
    }
}

/// Progressive accumulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccumulationConfig {
    pub bounces: i32,
    pub samples: i32,
    /// Lower bound for the sample target, 0 or 1
    pub min_samples: i32,
}

impl Default for AccumulationConfig {
    fn default() -> Self {
        Self {
            bounces: 16,
            samples: 8,
            min_samples: 1,
        }
    }
}

/// Window parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub show_ui: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            title: "Progressive Tracer".to_string(),
            show_ui: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub accumulation: AccumulationConfig,
    pub bindings: KeyBindings,
}

impl AppConfig {
    /// Load from a JSON file, then sanitize
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse JSON text, then sanitize
    pub fn from_json(text: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(text)?;
        config.sanitize();
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Pull out-of-range values back into range, warning about each correction
    pub fn sanitize(&mut self) {
        let window = &mut self.window;
        if window.width == 0 || window.height == 0 {
            warn!("Window size {}x{} is empty, using 1 pixel minimum", window.width, window.height);
            window.width = window.width.max(1);
            window.height = window.height.max(1);
        }

        let camera = &mut self.camera;
        if !(camera.fov_min > 0.0 && camera.fov_min <= camera.fov_max && camera.fov_max < 180.0) {
            warn!(
                "FOV range [{}, {}] is unusable, using defaults",
                camera.fov_min, camera.fov_max
            );
            let defaults = CameraConfig::default();
            camera.fov_min = defaults.fov_min;
            camera.fov_max = defaults.fov_max;
        }
        if !(camera.fov_min..=camera.fov_max).contains(&camera.fov_deg) {
            let clamped = camera.fov_deg.clamp(camera.fov_min, camera.fov_max);
            warn!("FOV {} outside [{}, {}], using {}", camera.fov_deg, camera.fov_min, camera.fov_max, clamped);
            camera.fov_deg = clamped;
        }
        if !(camera.near_clip > 0.0 && camera.far_clip > camera.near_clip) {
            warn!(
                "Clip planes near={} far={} are invalid, using defaults",
                camera.near_clip, camera.far_clip
            );
            let defaults = CameraConfig::default();
            camera.near_clip = defaults.near_clip;
            camera.far_clip = defaults.far_clip;
        }
        if !(camera.max_pitch_deg > 0.0 && camera.max_pitch_deg < 90.0) {
            warn!("Pitch limit {} must be inside (0, 90), using 89", camera.max_pitch_deg);
            camera.max_pitch_deg = 89.0;
        }

        let accumulation = &mut self.accumulation;
        let min_samples = accumulation.min_samples.clamp(0, 1);
        if min_samples != accumulation.min_samples {
            warn!("min_samples {} must be 0 or 1, using {}", accumulation.min_samples, min_samples);
            accumulation.min_samples = min_samples;
        }
        accumulation.bounces = accumulation.bounces.max(1);
        accumulation.samples = accumulation.samples.max(accumulation.min_samples);
    }
}

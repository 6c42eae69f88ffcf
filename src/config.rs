//! Viewer configuration.
//!
//! Every field has a default, so an empty (or partial) TOML file is a valid
//! configuration:
//!
//! ```toml
//! [window]
//! title = "lights"
//!
//! [animation]
//! spin_y = 0.2
//!
//! [lights.point]
//! intensity = 20.0
//!
//! [lights.rect_area]
//! enabled = false
//! ```

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::data_structures::light::LightSlot;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub animation: AnimationConfig,
    pub lights: LightsConfig,
}

impl ViewerConfig {
    /// Environment variable naming an optional TOML configuration file.
    pub const ENV_VAR: &'static str = "SCENE_VIEWER_CONFIG";

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that parse but cannot drive the viewer.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.controls.validate().context("Invalid [controls] section")
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads the file named by [`Self::ENV_VAR`] or falls back to the defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var(Self::ENV_VAR) {
            Ok(path) if !path.is_empty() => {
                log::info!("Loading config from {}", path);
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Id of the canvas element to draw into on the web.
    pub canvas_id: String,
    pub width: u32,
    pub height: u32,
    pub clear_colour: [f64; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "scene-viewer".to_string(),
            canvas_id: "webgl".to_string(),
            width: 1280,
            height: 720,
            clear_colour: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            position: [1.0, 1.0, 2.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per frame.
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl ControlsConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        let (min, max) = (self.min_distance, self.max_distance);
        if min.is_nan() || max.is_nan() {
            anyhow::bail!("min_distance and max_distance must be numbers");
        }
        if min < 0.0 {
            anyhow::bail!("min_distance must not be negative, got {}", min);
        }
        if min > max {
            anyhow::bail!(
                "min_distance ({}) is greater than max_distance ({})",
                min,
                max
            );
        }
        Ok(())
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
        }
    }
}

/// Angular speeds (radians per second) of the rotating meshes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub spin_y: f32,
    pub spin_x: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            spin_y: 0.1,
            spin_x: 0.15,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSetting {
    pub enabled: bool,
    /// `None` keeps the light's documented default.
    pub intensity: Option<f32>,
}

impl Default for LightSetting {
    fn default() -> Self {
        Self {
            enabled: true,
            intensity: None,
        }
    }
}

/// A [`LightSetting`] resolved against its slot's defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedLight {
    pub enabled: bool,
    pub intensity: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightsConfig {
    pub ambient: LightSetting,
    pub hemisphere: LightSetting,
    pub directional: LightSetting,
    pub point: LightSetting,
    pub rect_area: LightSetting,
    pub spot: LightSetting,
}

impl LightsConfig {
    pub fn setting(&self, slot: LightSlot) -> ResolvedLight {
        let setting = match slot {
            LightSlot::Ambient => &self.ambient,
            LightSlot::Hemisphere => &self.hemisphere,
            LightSlot::Directional => &self.directional,
            LightSlot::Point => &self.point,
            LightSlot::RectArea => &self.rect_area,
            LightSlot::Spot => &self.spot,
        };
        ResolvedLight {
            enabled: setting.enabled,
            intensity: setting
                .intensity
                .unwrap_or_else(|| default_intensity(slot)),
        }
    }
}

pub fn default_intensity(slot: LightSlot) -> f32 {
    match slot {
        LightSlot::Ambient => 1.5,
        LightSlot::Hemisphere => 0.9,
        LightSlot::Directional => 0.9,
        LightSlot::Point => 50.0,
        LightSlot::RectArea => 6.0,
        LightSlot::Spot => 4.5,
    }
}

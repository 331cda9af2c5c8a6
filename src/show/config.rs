//! Show configuration
//!
//! Photo assets and their camera moves. Loaded once at page load and
//! read-only afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FADE_IN_DURATION, FADE_OUT_DURATION, FLASH_DURATION};

/// Camera move for a single photo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotoStep {
    /// Seconds the camera move lasts (the photo's screen time)
    pub duration: f32,
    /// Target scale, 1.0 = no zoom
    #[serde(rename = "zoom")]
    pub zoom_factor: f32,
    /// Horizontal pan in pixels
    #[serde(rename = "moveX", default)]
    pub translate_x: f32,
    /// Vertical pan in pixels
    #[serde(rename = "moveY", default)]
    pub translate_y: f32,
    #[serde(rename = "rotate", default)]
    pub rotate_degrees: f32,
    /// Fire flash and camera shake when this photo starts
    #[serde(rename = "flash", default)]
    pub flash_enabled: bool,
}

impl PhotoStep {
    pub const fn new(
        duration: f32,
        zoom_factor: f32,
        translate_x: f32,
        translate_y: f32,
        rotate_degrees: f32,
        flash_enabled: bool,
    ) -> Self {
        Self {
            duration,
            zoom_factor,
            translate_x,
            translate_y,
            rotate_degrees,
            flash_enabled,
        }
    }
}

/// Built-in reel, tuned to the soundtrack's beats
const DEFAULT_STEPS: [PhotoStep; 6] = [
    PhotoStep::new(3.5, 1.2, 30.0, 0.0, 2.0, true),
    PhotoStep::new(3.2, 1.15, -20.0, 15.0, -1.0, false),
    PhotoStep::new(3.8, 1.25, 15.0, -20.0, 1.5, true),
    PhotoStep::new(3.0, 1.18, -25.0, 10.0, -2.0, false),
    PhotoStep::new(3.5, 1.22, 20.0, -15.0, 1.0, true),
    PhotoStep::new(3.3, 1.17, -15.0, 20.0, -1.5, false),
];

/// Configuration validation failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid show config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{photos} photos configured but no photo timings")]
    NoSteps { photos: usize },
    #[error("photo timing {index}: duration must be positive, got {value}")]
    InvalidDuration { index: usize, value: f32 },
    #[error("photo timing {index}: zoom must be at least 1, got {value}")]
    InvalidZoom { index: usize, value: f32 },
    #[error("{name} must be positive, got {value}")]
    InvalidTiming { name: &'static str, value: f32 },
}

fn default_fade_in() -> f32 {
    FADE_IN_DURATION
}

fn default_fade_out() -> f32 {
    FADE_OUT_DURATION
}

fn default_flash() -> f32 {
    FLASH_DURATION
}

/// Ordered photos, their camera moves and global transition timings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowConfig {
    /// Photo asset URLs, in presentation order
    pub photo_paths: Vec<String>,
    /// Camera moves, parallel to `photo_paths`. May be shorter.
    #[serde(rename = "photoTimings")]
    pub photo_steps: Vec<PhotoStep>,
    #[serde(default = "default_fade_in")]
    pub fade_in_duration: f32,
    #[serde(default = "default_fade_out")]
    pub fade_out_duration: f32,
    /// Rise time of the flash pulse; the decay takes twice as long
    #[serde(default = "default_flash")]
    pub flash_duration: f32,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            photo_paths: (1..=DEFAULT_STEPS.len())
                .map(|i| format!("images/photo{}.jpg", i))
                .collect(),
            photo_steps: DEFAULT_STEPS.to_vec(),
            fade_in_duration: FADE_IN_DURATION,
            fade_out_duration: FADE_OUT_DURATION,
            flash_duration: FLASH_DURATION,
        }
    }
}

impl ShowConfig {
    /// Number of photos in the reel
    pub fn photo_count(&self) -> usize {
        self.photo_paths.len()
    }

    /// Camera move for `index`. Photos beyond the configured timings reuse
    /// the first one.
    pub fn step_for(&self, index: usize) -> Option<&PhotoStep> {
        self.photo_steps
            .get(index)
            .or_else(|| self.photo_steps.first())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.photo_paths.is_empty() && self.photo_steps.is_empty() {
            return Err(ConfigError::NoSteps {
                photos: self.photo_paths.len(),
            });
        }
        for (index, step) in self.photo_steps.iter().enumerate() {
            if !(step.duration > 0.0) {
                return Err(ConfigError::InvalidDuration {
                    index,
                    value: step.duration,
                });
            }
            if !(step.zoom_factor >= 1.0) {
                return Err(ConfigError::InvalidZoom {
                    index,
                    value: step.zoom_factor,
                });
            }
        }
        for (name, value) in [
            ("fadeInDuration", self.fade_in_duration),
            ("fadeOutDuration", self.fade_out_duration),
            ("flashDuration", self.flash_duration),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidTiming { name, value });
            }
        }
        Ok(())
    }

    /// DOM element holding an optional JSON config
    #[cfg(target_arch = "wasm32")]
    const CONFIG_ELEMENT_ID: &'static str = "show-config";

    /// Load config from the page's `<script id="show-config">` (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded show config ({} photos)", config.photo_count());
                    return config;
                }
                Err(e) => log::warn!("Ignoring page show config: {}", e),
            }
        }

        log::info!("Using built-in show config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/handcast.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HandcastConfig {
    /// Cursor easing rate; higher snaps faster.
    pub cursor_smoothing: f32,
    /// Forward distance from the camera where the cursor lives.
    pub cursor_depth: f32,
    /// Reach of the click ray cast from the cursor.
    pub click_ray_distance: f32,
    /// Reach of the touch ray cast from the hand.
    pub touch_ray_distance: f32,
    /// Whether a near-miss still counts as touching the pet.
    pub proximity_fallback: bool,
    /// Ray-to-pet distance that still counts as a touch.
    pub fallback_distance: f32,
    /// Handover pause between turns, in seconds.
    pub turn_delay_seconds: f32,
    /// Delay before the board resets after a finished round, in seconds.
    pub reset_delay_seconds: f32,
    /// Virtual screen width used for pointer-event projection.
    pub screen_width: u32,
    /// Virtual screen height used for pointer-event projection.
    pub screen_height: u32,
    /// Promote per-click diagnostics to info level.
    pub log_interactions: bool,
    /// Animation cues the pet picks from when touched.
    pub pet_cues: Vec<String>,
}

impl Default for HandcastConfig {
    fn default() -> Self {
        Self {
            // Easing of 5.0 settles the cursor in roughly half a second
            cursor_smoothing: 5.0,
            cursor_depth: 2.0,
            click_ray_distance: 10.0,
            touch_ray_distance: 5.0,
            proximity_fallback: true,
            fallback_distance: 0.5,
            turn_delay_seconds: 2.0,
            reset_delay_seconds: 2.0,
            screen_width: 1280,
            screen_height: 720,
            log_interactions: false,
            pet_cues: vec!["wag_tail".into(), "bark".into(), "spin".into()],
        }
    }
}

impl HandcastConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<HandcastConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    HandcastConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH) {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Config not found at {}. Using defaults",
                        path.display()
                    );
                }
                HandcastConfig::default()
            }
        }
    }

    /// Virtual screen size as a tuple.
    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }
}

//! Data-driven game balance
//!
//! Every gameplay constant and UI string lives here so a page can override
//! them without a rebuild. Missing fields fall back to the defaults in
//! [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Asset URLs requested by preload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub logo: String,
    pub sky: String,
    /// Pointer cursor image (referenced by URL only, never preloaded)
    pub cursor: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            logo: "/static/main/assets/phaser-logo.png".to_string(),
            sky: "/static/main/assets/sky.png".to_string(),
            cursor: "/static/main/assets/martillo.png".to_string(),
        }
    }
}

/// Game balance and presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    pub background_color: String,

    // === Clicking ===
    pub score_increment: u64,
    /// Multiplier applied to the logo scale per hit (0 < f <= 1)
    pub logo_shrink_factor: f64,
    pub initial_max_velocity: u32,
    pub velocity_step: u32,
    pub spawn_margin: u32,
    pub logo_bounce: f32,

    // === Idle taunt ===
    pub inactivity_delay_ms: u32,

    // === Text ===
    pub score_label: String,
    pub idle_message: String,
    pub hint_text: String,

    pub assets: AssetPaths,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            background_color: BACKGROUND_COLOR.to_string(),

            score_increment: SCORE_INCREMENT,
            logo_shrink_factor: LOGO_SHRINK_FACTOR,
            initial_max_velocity: INITIAL_MAX_VELOCITY,
            velocity_step: VELOCITY_STEP,
            spawn_margin: SPAWN_MARGIN,
            logo_bounce: LOGO_BOUNCE,

            inactivity_delay_ms: INACTIVITY_DELAY_MS,

            score_label: "Puntuación: ".to_string(),
            idle_message: "ya no puedes seguir?\njejejejeje".to_string(),
            hint_text: "Haz clic en el logo!".to_string(),

            assets: AssetPaths::default(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Clamp values that would break gameplay invariants
    ///
    /// The shrink factor stays in (0, 1] so the logo never grows or vanishes,
    /// and the spawn margin never exceeds half the world so the respawn
    /// range is never empty.
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        if !(self.world_width.is_finite() && self.world_width >= 1.0) {
            self.world_width = defaults.world_width;
        }
        if !(self.world_height.is_finite() && self.world_height >= 1.0) {
            self.world_height = defaults.world_height;
        }
        if !(self.logo_shrink_factor > 0.0 && self.logo_shrink_factor <= 1.0) {
            log::warn!(
                "Shrink factor {} out of range, using {}",
                self.logo_shrink_factor,
                defaults.logo_shrink_factor
            );
            self.logo_shrink_factor = defaults.logo_shrink_factor;
        }
        if !(self.logo_bounce.is_finite() && self.logo_bounce >= 0.0) {
            self.logo_bounce = defaults.logo_bounce;
        }

        // Half the (integer) world, and never past half the i32 range so
        // both ends of the respawn range stay representable
        let max_margin = ((self.world_width.min(self.world_height) / 2.0).floor() as u32)
            .min(i32::MAX as u32 / 2);
        self.spawn_margin = self.spawn_margin.min(max_margin);
        // Keep the bound representable as a signed range
        self.initial_max_velocity = self.initial_max_velocity.min(i32::MAX as u32 / 2);

        self
    }

    /// Score text for a given score
    pub fn score_text(&self, score: u64) -> String {
        format!("{}{}", self.score_label, score)
    }

    /// Inclusive respawn range on the x axis
    pub fn spawn_range_x(&self) -> (i32, i32) {
        spawn_range(self.world_width, self.spawn_margin)
    }

    /// Inclusive respawn range on the y axis
    pub fn spawn_range_y(&self) -> (i32, i32) {
        spawn_range(self.world_height, self.spawn_margin)
    }

    /// Pointer cursor CSS value
    pub fn cursor(&self) -> String {
        format!("url({}), pointer", self.assets.cursor)
    }

    /// Element ID of the optional inline tuning document (used only in wasm32)
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "game-tuning";

    /// Load tuning from an inline `<script type="application/json">` (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from #{}", Self::ELEMENT_ID);
                    return tuning;
                }
                Err(e) => log::warn!("Ignoring malformed tuning: {}", e),
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Load tuning from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Inset `[0, extent]` by `margin`, saturating at the i32 range
fn spawn_range(extent: f32, margin: u32) -> (i32, i32) {
    let margin = margin.min(i32::MAX as u32) as i32;
    let extent = extent as i32;
    (margin, extent.saturating_sub(margin).max(margin))
}

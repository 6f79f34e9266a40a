//! Click controller state
//!
//! Everything the controller remembers between host events lives in one
//! record. Handles point into the host; the host owns the entities.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::host::{EntityId, TimerHandle};
use crate::tuning::Tuning;

/// Lifecycle phase of the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScenePhase {
    /// Assets requested, waiting for load-complete
    Loading,
    /// Scene created, accepting clicks
    Running,
}

/// The lazily created taunt shown after an idle window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdleMessage {
    pub entity: EntityId,
    pub visible: bool,
}

/// Complete controller state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: ScenePhase,
    pub score: u64,
    /// Current logo scale (starts at 1.0, only shrinks)
    ///
    /// Kept in double precision; narrowed only when handed to the host.
    pub logo_scale: f64,
    /// Per-axis velocity bound for the next respawn (only grows)
    pub max_velocity: u32,
    /// Number of accepted logo hits
    pub hits: u32,
    /// Number of idle windows that ran out
    pub idle_windows: u32,
    pub logo: Option<EntityId>,
    pub score_text: Option<EntityId>,
    pub idle_message: Option<IdleMessage>,
    /// The single pending inactivity timer
    pub inactivity_timer: Option<TimerHandle>,
    #[serde(skip)]
    pub tuning: Tuning,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh state with the given tuning and seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        Self {
            seed,
            phase: ScenePhase::Loading,
            score: 0,
            logo_scale: 1.0,
            max_velocity: tuning.initial_max_velocity,
            hits: 0,
            idle_windows: 0,
            logo: None,
            score_text: None,
            idle_message: None,
            inactivity_timer: None,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_idle_message_visible(&self) -> bool {
        self.idle_message.is_some_and(|m| m.visible)
    }
}

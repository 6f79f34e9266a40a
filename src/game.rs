//! Fixed timestep driver
//!
//! Owns the scene and the controller state, steps bodies and timers at
//! `SIM_DT`, and routes pointer and timer events to the controller.

use glam::Vec2;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{self, GameState, Pointer, Scene, ScenePhase};
use crate::tuning::Tuning;

/// A running game: scene, controller state and loop bookkeeping
pub struct Game {
    pub state: GameState,
    pub scene: Scene,
    accumulator: f32,
    /// Simulation ticks executed since creation
    ticks: u64,
}

impl Game {
    /// Create a game and request its assets
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        let world = Vec2::new(tuning.world_width, tuning.world_height);
        let mut scene = Scene::new(world, &tuning.background_color);
        let state = GameState::new(tuning, seed);
        sim::preload(&state, &mut scene);

        Self {
            state,
            scene,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Asset keys and URLs the platform has to fetch before `start`
    pub fn pending_assets(&self) -> Vec<(String, String)> {
        self.scene
            .textures()
            .filter(|(_, t)| t.size.is_none())
            .map(|(key, t)| (key.to_string(), t.url.clone()))
            .collect()
    }

    /// Record a decoded image's natural size
    pub fn asset_loaded(&mut self, key: &str, width: f32, height: f32) {
        self.scene.set_texture_size(key, Vec2::new(width, height));
    }

    /// Load complete: build the scene
    pub fn start(&mut self) {
        sim::create(&mut self.state, &mut self.scene);
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == ScenePhase::Running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Deliver a pointer-down at a world position
    ///
    /// Returns true if the logo was struck.
    pub fn pointer_down(&mut self, pointer: Pointer) -> bool {
        let target = self.scene.hit_test(pointer.pos);
        sim::on_pointer_down(&mut self.state, &mut self.scene, &pointer, target)
    }

    /// Advance by a frame delta in seconds
    pub fn update(&mut self, dt: f32) {
        if !self.is_running() {
            return;
        }

        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            for handle in self.scene.step(SIM_DT) {
                sim::on_timer_expired(&mut self.state, &mut self.scene, handle);
            }
            self.accumulator -= SIM_DT;
            self.ticks += 1;
            substeps += 1;
        }

        sim::update(&mut self.state, &mut self.scene);
    }
}

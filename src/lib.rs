//! Logo Clicker - click the bouncing logo before it gets away
//!
//! Core modules:
//! - `sim`: Click controller, host capabilities and the in-process scene
//! - `game`: Fixed timestep driver wiring input and timers to the controller
//! - `renderer`: DOM mirror of the scene (wasm only)
//! - `tuning`: Data-driven game balance and UI strings

pub mod game;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted before clamping (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    pub const BACKGROUND_COLOR: &str = "#1d212d";

    /// Points awarded per logo hit
    pub const SCORE_INCREMENT: u64 = 10;
    /// Logo scale multiplier applied on every hit
    pub const LOGO_SHRINK_FACTOR: f64 = 0.9;
    /// Starting velocity bound (pixels/s per axis)
    pub const INITIAL_MAX_VELOCITY: u32 = 200;
    /// Velocity bound growth per hit
    pub const VELOCITY_STEP: u32 = 20;
    /// Respawn inset from every edge
    pub const SPAWN_MARGIN: u32 = 100;
    /// Restitution against the world bounds
    pub const LOGO_BOUNCE: f32 = 0.8;

    /// Idle time before the taunt appears (milliseconds)
    pub const INACTIVITY_DELAY_MS: u32 = 10_000;

    /// Score text anchor
    pub const SCORE_TEXT_POS: (f32, f32) = (16.0, 16.0);
    /// Distance of the hint text from the bottom edge
    pub const HINT_BOTTOM_OFFSET: f32 = 30.0;
    /// Idle message wrap width as a fraction of the world width
    pub const MESSAGE_WRAP_FRACTION: f32 = 0.8;
}

/// Texture keys shared by preload and create
pub mod textures {
    pub const LOGO: &str = "logo";
    pub const SKY: &str = "sky";
}

//! Click game simulation
//!
//! Gameplay logic lives in `controller` and only talks to the world through
//! the `Host` trait. `Scene` is the in-process host:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Entities kept in creation (draw) order
//! - No rendering or platform dependencies

pub mod body;
pub mod controller;
pub mod host;
pub mod scene;
pub mod state;
pub mod timer;

pub use body::Body;
pub use controller::{
    create, on_pointer_down, on_timer_expired, preload, restart_inactivity_timer, update,
};
pub use host::{EntityId, Host, Pointer, TextAlign, TextStyle, TimerHandle};
pub use scene::{Entity, EntityKind, Scene, Texture};
pub use state::{GameState, IdleMessage, ScenePhase};
pub use timer::TimerClock;

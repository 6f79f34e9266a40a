//! Host capabilities consumed by the click controller
//!
//! The controller never owns entities, bodies or timers. It asks a host for
//! them through this trait and keeps only the returned handles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Handle to an entity created by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Handle to a pending single-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u32);

/// Horizontal alignment of multi-line text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Text styling options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub font_size: u32,
    /// CSS fill color
    pub fill: String,
    pub bold: bool,
    pub align: TextAlign,
    /// Wrap lines longer than this width (pixels)
    pub word_wrap_width: Option<f32>,
}

impl TextStyle {
    pub fn new(font_size: u32, fill: &str) -> Self {
        Self {
            font_size,
            fill: fill.to_string(),
            bold: false,
            align: TextAlign::Left,
            word_wrap_width: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn word_wrap(mut self, width: f32) -> Self {
        self.word_wrap_width = Some(width);
        self
    }
}

/// Pointer state delivered with a pointer-down event
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    /// World-space position
    pub pos: Vec2,
}

impl Pointer {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}

/// Rendering, physics, input and timer capabilities supplied by the host
///
/// Operations on unknown handles are ignored by implementations.
pub trait Host {
    /// Request an image resource under `key`
    fn load_image(&mut self, key: &str, url: &str);

    /// Set the CSS cursor shown over the playfield
    fn set_default_cursor(&mut self, cursor: &str);

    /// Add a static image centred at `pos`
    fn add_image(&mut self, pos: Vec2, texture: &str) -> EntityId;

    /// Add an image with an arcade body
    fn add_physics_image(&mut self, pos: Vec2, texture: &str) -> EntityId;

    /// Add a text entity anchored at `pos` (top-left origin)
    fn add_text(&mut self, pos: Vec2, text: &str, style: &TextStyle) -> EntityId;

    fn set_text(&mut self, id: EntityId, text: &str);
    fn set_visible(&mut self, id: EntityId, visible: bool);
    /// Normalized anchor: (0, 0) top-left, (0.5, 0.5) centre
    fn set_origin(&mut self, id: EntityId, origin: Vec2);
    fn set_position(&mut self, id: EntityId, pos: Vec2);
    fn set_scale(&mut self, id: EntityId, scale: f32);

    // === Arcade bodies ===
    fn set_velocity(&mut self, id: EntityId, vel: Vec2);
    fn set_bounce(&mut self, id: EntityId, bounce: f32);
    fn set_collide_world_bounds(&mut self, id: EntityId, collide: bool);

    /// Make the entity a pointer-down target
    fn set_interactive(&mut self, id: EntityId);

    // === Timers ===
    /// Schedule a single-shot timer firing after `delay_ms`
    fn add_timer(&mut self, delay_ms: u32) -> TimerHandle;
    /// Cancel a pending timer (no-op if it already fired or was removed)
    fn remove_timer(&mut self, handle: TimerHandle);
}

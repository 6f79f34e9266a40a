//! In-process host
//!
//! Owns the entity table, arcade bodies and timer clock of the single game
//! scene. Platform code reads entities back out for display and feeds pointer
//! positions in for hit-testing.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::Serialize;

use super::body::Body;
use super::host::{EntityId, Host, TextStyle, TimerHandle};
use super::timer::TimerClock;

/// A requested image resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Texture {
    pub url: String,
    /// Natural size, known once the platform has decoded the image
    pub size: Option<Vec2>,
}

/// What an entity displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EntityKind {
    Image { texture: String },
    Text { text: String, style: TextStyle },
}

/// A display object in the scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Position of the origin point
    pub pos: Vec2,
    /// Normalized anchor within the entity's box
    pub origin: Vec2,
    pub scale: f32,
    pub visible: bool,
    pub interactive: bool,
    pub body: Option<Body>,
}

impl Entity {
    fn new(id: EntityId, kind: EntityKind, pos: Vec2, origin: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            origin,
            scale: 1.0,
            visible: true,
            interactive: false,
            body: None,
        }
    }

    pub fn texture(&self) -> Option<&str> {
        match &self.kind {
            EntityKind::Image { texture } => Some(texture),
            EntityKind::Text { .. } => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            EntityKind::Text { text, .. } => Some(text),
            EntityKind::Image { .. } => None,
        }
    }
}

/// The game scene
#[derive(Debug, Clone)]
pub struct Scene {
    world: Vec2,
    background_color: String,
    cursor: Option<String>,
    textures: BTreeMap<String, Texture>,
    /// Draw order: later entities are on top
    entities: Vec<Entity>,
    timers: TimerClock,
    next_id: u32,
}

impl Scene {
    pub fn new(world: Vec2, background_color: &str) -> Self {
        Self {
            world,
            background_color: background_color.to_string(),
            cursor: None,
            textures: BTreeMap::new(),
            entities: Vec::new(),
            timers: TimerClock::new(),
            next_id: 0,
        }
    }

    pub fn world(&self) -> Vec2 {
        self.world
    }

    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn textures(&self) -> impl Iterator<Item = (&str, &Texture)> {
        self.textures.iter().map(|(k, t)| (k.as_str(), t))
    }

    pub fn texture(&self, key: &str) -> Option<&Texture> {
        self.textures.get(key)
    }

    /// Record a decoded image's natural size
    pub fn set_texture_size(&mut self, key: &str, size: Vec2) {
        match self.textures.get_mut(key) {
            Some(texture) => texture.size = Some(size),
            None => log::warn!("Size reported for unknown texture '{}'", key),
        }
    }

    /// Entities in draw order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn timers(&self) -> &TimerClock {
        &self.timers
    }

    /// Unscaled box size of an entity (zero for text and unknown textures)
    pub fn frame_size(&self, entity: &Entity) -> Vec2 {
        entity
            .texture()
            .and_then(|key| self.textures.get(key))
            .and_then(|t| t.size)
            .unwrap_or(Vec2::ZERO)
    }

    /// Scaled box size of an entity
    pub fn display_size(&self, entity: &Entity) -> Vec2 {
        self.frame_size(entity) * entity.scale
    }

    /// Top-most visible interactive entity under `point`
    pub fn hit_test(&self, point: Vec2) -> Option<EntityId> {
        self.entities
            .iter()
            .rev()
            .filter(|e| e.visible && e.interactive)
            .find(|e| {
                let size = self.display_size(e);
                let top_left = e.pos - e.origin * size;
                let bottom_right = top_left + size;
                point.x >= top_left.x
                    && point.x <= bottom_right.x
                    && point.y >= top_left.y
                    && point.y <= bottom_right.y
            })
            .map(|e| e.id)
    }

    /// Advance bodies and timers by `dt` seconds, returning timers that fired
    pub fn step(&mut self, dt: f32) -> Vec<TimerHandle> {
        let world = self.world;
        let sizes: Vec<Vec2> = self
            .entities
            .iter()
            .map(|e| self.display_size(e))
            .collect();

        for (entity, size) in self.entities.iter_mut().zip(sizes) {
            let Some(body) = entity.body.as_mut() else {
                continue;
            };
            // Bodies are boxes around the entity centre, not its origin point
            let center_offset = (Vec2::splat(0.5) - entity.origin) * size;
            let center = body.step(entity.pos + center_offset, size * 0.5, world, dt);
            entity.pos = center - center_offset;
        }

        self.timers.advance(dt as f64 * 1000.0)
    }

    fn next_entity_id(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId(self.next_id)
    }

    fn spawn(&mut self, kind: EntityKind, pos: Vec2, origin: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push(Entity::new(id, kind, pos, origin));
        id
    }

    fn entity_mut(&mut self, id: EntityId, op: &str) -> Option<&mut Entity> {
        let entity = self.entities.iter_mut().find(|e| e.id == id);
        if entity.is_none() {
            log::warn!("{} on unknown entity {:?}", op, id);
        }
        entity
    }

    fn body_mut(&mut self, id: EntityId, op: &str) -> Option<&mut Body> {
        let body = self.entity_mut(id, op)?.body.as_mut();
        if body.is_none() {
            log::warn!("{} on entity {:?} without a body", op, id);
        }
        body
    }
}

impl Host for Scene {
    fn load_image(&mut self, key: &str, url: &str) {
        log::debug!("Loading image '{}' from {}", key, url);
        self.textures.insert(
            key.to_string(),
            Texture {
                url: url.to_string(),
                size: None,
            },
        );
    }

    fn set_default_cursor(&mut self, cursor: &str) {
        self.cursor = Some(cursor.to_string());
    }

    fn add_image(&mut self, pos: Vec2, texture: &str) -> EntityId {
        if !self.textures.contains_key(texture) {
            log::warn!("Image added with texture '{}' that was never loaded", texture);
        }
        let kind = EntityKind::Image {
            texture: texture.to_string(),
        };
        self.spawn(kind, pos, Vec2::splat(0.5))
    }

    fn add_physics_image(&mut self, pos: Vec2, texture: &str) -> EntityId {
        let id = self.add_image(pos, texture);
        if let Some(entity) = self.entity_mut(id, "add_physics_image") {
            entity.body = Some(Body::default());
        }
        id
    }

    fn add_text(&mut self, pos: Vec2, text: &str, style: &TextStyle) -> EntityId {
        let kind = EntityKind::Text {
            text: text.to_string(),
            style: style.clone(),
        };
        self.spawn(kind, pos, Vec2::ZERO)
    }

    fn set_text(&mut self, id: EntityId, new_text: &str) {
        if let Some(entity) = self.entity_mut(id, "set_text") {
            match &mut entity.kind {
                EntityKind::Text { text, .. } => *text = new_text.to_string(),
                EntityKind::Image { .. } => log::warn!("set_text on image {:?}", id),
            }
        }
    }

    fn set_visible(&mut self, id: EntityId, visible: bool) {
        if let Some(entity) = self.entity_mut(id, "set_visible") {
            entity.visible = visible;
        }
    }

    fn set_origin(&mut self, id: EntityId, origin: Vec2) {
        if let Some(entity) = self.entity_mut(id, "set_origin") {
            entity.origin = origin;
        }
    }

    fn set_position(&mut self, id: EntityId, pos: Vec2) {
        if let Some(entity) = self.entity_mut(id, "set_position") {
            entity.pos = pos;
        }
    }

    fn set_scale(&mut self, id: EntityId, scale: f32) {
        if let Some(entity) = self.entity_mut(id, "set_scale") {
            entity.scale = scale;
        }
    }

    fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        if let Some(body) = self.body_mut(id, "set_velocity") {
            body.vel = vel;
        }
    }

    fn set_bounce(&mut self, id: EntityId, bounce: f32) {
        if let Some(body) = self.body_mut(id, "set_bounce") {
            body.bounce = bounce;
        }
    }

    fn set_collide_world_bounds(&mut self, id: EntityId, collide: bool) {
        if let Some(body) = self.body_mut(id, "set_collide_world_bounds") {
            body.collide_world_bounds = collide;
        }
    }

    fn set_interactive(&mut self, id: EntityId) {
        if let Some(entity) = self.entity_mut(id, "set_interactive") {
            entity.interactive = true;
        }
    }

    fn add_timer(&mut self, delay_ms: u32) -> TimerHandle {
        self.timers.schedule(delay_ms)
    }

    fn remove_timer(&mut self, handle: TimerHandle) {
        self.timers.cancel(handle);
    }
}

//! Click controller
//!
//! Scene lifecycle hooks and event handlers. Each handler takes the state
//! record and the host explicitly and runs to completion synchronously.

use glam::Vec2;
use rand::Rng;

use super::host::{EntityId, Host, Pointer, TextAlign, TextStyle, TimerHandle};
use super::state::{GameState, IdleMessage, ScenePhase};
use crate::consts::{HINT_BOTTOM_OFFSET, MESSAGE_WRAP_FRACTION, SCORE_TEXT_POS};
use crate::textures;

/// Request the scene's image resources (load-assets hook)
pub fn preload<H: Host>(state: &GameState, host: &mut H) {
    let assets = &state.tuning.assets;
    host.load_image(textures::LOGO, &assets.logo);
    host.load_image(textures::SKY, &assets.sky);
}

/// Build the scene once assets are loaded (initialize-scene hook)
pub fn create<H: Host>(state: &mut GameState, host: &mut H) {
    if state.phase == ScenePhase::Running {
        log::warn!("Scene already created, ignoring");
        return;
    }

    let tuning = state.tuning.clone();
    let center = Vec2::new(tuning.world_width / 2.0, tuning.world_height / 2.0);

    host.add_image(center, textures::SKY);
    host.set_default_cursor(&tuning.cursor());

    let logo = host.add_physics_image(center, textures::LOGO);
    host.set_collide_world_bounds(logo, true);
    host.set_bounce(logo, tuning.logo_bounce);
    host.set_interactive(logo);
    state.logo = Some(logo);

    let score_style = TextStyle::new(32, "#FFF").bold();
    let score_text = host.add_text(
        Vec2::new(SCORE_TEXT_POS.0, SCORE_TEXT_POS.1),
        &tuning.score_text(state.score),
        &score_style,
    );
    state.score_text = Some(score_text);

    restart_inactivity_timer(state, host);

    let hint = host.add_text(
        Vec2::new(center.x, tuning.world_height - HINT_BOTTOM_OFFSET),
        &tuning.hint_text,
        &TextStyle::new(24, "#FF0"),
    );
    host.set_origin(hint, Vec2::splat(0.5));

    state.phase = ScenePhase::Running;
    log::info!("Scene created (seed {})", state.seed);
}

/// Per-frame hook; all motion is owned by the host's bodies
pub fn update<H: Host>(_state: &mut GameState, _host: &mut H) {}

/// Handle a pointer-down on `target`
///
/// Returns true if the click struck the logo and was applied.
pub fn on_pointer_down<H: Host>(
    state: &mut GameState,
    host: &mut H,
    pointer: &Pointer,
    target: Option<EntityId>,
) -> bool {
    let Some(logo) = state.logo else {
        return false;
    };
    if target != Some(logo) {
        return false;
    }

    restart_inactivity_timer(state, host);

    if let Some(message) = state.idle_message.as_mut() {
        host.set_visible(message.entity, false);
        message.visible = false;
    }

    let tuning = &state.tuning;

    state.score += tuning.score_increment;
    state.hits += 1;
    if let Some(score_text) = state.score_text {
        host.set_text(score_text, &tuning.score_text(state.score));
    }

    state.logo_scale *= tuning.logo_shrink_factor;
    host.set_scale(logo, state.logo_scale as f32);

    state.max_velocity = state.max_velocity.saturating_add(tuning.velocity_step);

    let (x_min, x_max) = tuning.spawn_range_x();
    let (y_min, y_max) = tuning.spawn_range_y();
    let pos = Vec2::new(
        state.rng.random_range(x_min..=x_max) as f32,
        state.rng.random_range(y_min..=y_max) as f32,
    );
    host.set_position(logo, pos);

    let bound = state.max_velocity.min(i32::MAX as u32) as i32;
    let vel = Vec2::new(
        state.rng.random_range(-bound..=bound) as f32,
        state.rng.random_range(-bound..=bound) as f32,
    );
    host.set_velocity(logo, vel);

    log::debug!(
        "Hit #{} at ({:.0}, {:.0}): score {}, scale {:.3}, bound {}",
        state.hits,
        pointer.pos.x,
        pointer.pos.y,
        state.score,
        state.logo_scale,
        state.max_velocity
    );
    true
}

/// Handle an expired timer
///
/// Only the currently pending inactivity timer reveals the message.
pub fn on_timer_expired<H: Host>(state: &mut GameState, host: &mut H, handle: TimerHandle) {
    if state.inactivity_timer != Some(handle) {
        log::debug!("Ignoring stale timer {:?}", handle);
        return;
    }
    state.inactivity_timer = None;
    state.idle_windows += 1;

    let message = match state.idle_message {
        Some(mut message) => {
            host.set_visible(message.entity, true);
            message.visible = true;
            message
        }
        None => {
            let tuning = &state.tuning;
            let center = Vec2::new(tuning.world_width / 2.0, tuning.world_height / 2.0);
            let style = TextStyle::new(48, "#FF0000")
                .bold()
                .align(TextAlign::Center)
                .word_wrap(tuning.world_width * MESSAGE_WRAP_FRACTION);
            let entity = host.add_text(center, &tuning.idle_message, &style);
            host.set_origin(entity, Vec2::splat(0.5));
            IdleMessage {
                entity,
                visible: true,
            }
        }
    };
    state.idle_message = Some(message);

    log::info!("Idle for {} ms, showing taunt", state.tuning.inactivity_delay_ms);
}

/// Cancel any pending inactivity timer and schedule a fresh one
pub fn restart_inactivity_timer<H: Host>(state: &mut GameState, host: &mut H) {
    if let Some(handle) = state.inactivity_timer.take() {
        host.remove_timer(handle);
    }
    state.inactivity_timer = Some(host.add_timer(state.tuning.inactivity_delay_ms));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scene::Scene;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    /// Host that records every call and hands out sequential handles
    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<String>,
        next_entity: u32,
        next_timer: u32,
    }

    impl RecordingHost {
        fn entity(&mut self) -> EntityId {
            self.next_entity += 1;
            EntityId(self.next_entity)
        }

        fn clear(&mut self) {
            self.calls.clear();
        }

        fn ops(&self) -> Vec<&str> {
            self.calls
                .iter()
                .map(|c| c.split(' ').next().unwrap_or_default())
                .collect()
        }
    }

    impl Host for RecordingHost {
        fn load_image(&mut self, key: &str, url: &str) {
            self.calls.push(format!("load_image {} {}", key, url));
        }
        fn set_default_cursor(&mut self, cursor: &str) {
            self.calls.push(format!("set_default_cursor {}", cursor));
        }
        fn add_image(&mut self, _pos: Vec2, texture: &str) -> EntityId {
            self.calls.push(format!("add_image {}", texture));
            self.entity()
        }
        fn add_physics_image(&mut self, _pos: Vec2, texture: &str) -> EntityId {
            self.calls.push(format!("add_physics_image {}", texture));
            self.entity()
        }
        fn add_text(&mut self, _pos: Vec2, text: &str, _style: &TextStyle) -> EntityId {
            self.calls.push(format!("add_text {}", text));
            self.entity()
        }
        fn set_text(&mut self, id: EntityId, text: &str) {
            self.calls.push(format!("set_text {} {}", id.0, text));
        }
        fn set_visible(&mut self, id: EntityId, visible: bool) {
            self.calls.push(format!("set_visible {} {}", id.0, visible));
        }
        fn set_origin(&mut self, id: EntityId, _origin: Vec2) {
            self.calls.push(format!("set_origin {}", id.0));
        }
        fn set_position(&mut self, id: EntityId, _pos: Vec2) {
            self.calls.push(format!("set_position {}", id.0));
        }
        fn set_scale(&mut self, id: EntityId, scale: f32) {
            self.calls.push(format!("set_scale {} {}", id.0, scale));
        }
        fn set_velocity(&mut self, id: EntityId, _vel: Vec2) {
            self.calls.push(format!("set_velocity {}", id.0));
        }
        fn set_bounce(&mut self, id: EntityId, bounce: f32) {
            self.calls.push(format!("set_bounce {} {}", id.0, bounce));
        }
        fn set_collide_world_bounds(&mut self, id: EntityId, collide: bool) {
            self.calls
                .push(format!("set_collide_world_bounds {} {}", id.0, collide));
        }
        fn set_interactive(&mut self, id: EntityId) {
            self.calls.push(format!("set_interactive {}", id.0));
        }
        fn add_timer(&mut self, delay_ms: u32) -> TimerHandle {
            self.next_timer += 1;
            self.calls
                .push(format!("add_timer {} {}", self.next_timer, delay_ms));
            TimerHandle(self.next_timer)
        }
        fn remove_timer(&mut self, handle: TimerHandle) {
            self.calls.push(format!("remove_timer {}", handle.0));
        }
    }

    fn running(seed: u64) -> (GameState, Scene) {
        let mut state = GameState::new(Tuning::default(), seed);
        let mut scene = Scene::new(Vec2::new(800.0, 600.0), "#1d212d");
        preload(&state, &mut scene);
        scene.set_texture_size(textures::LOGO, Vec2::new(200.0, 60.0));
        create(&mut state, &mut scene);
        (state, scene)
    }

    fn click_logo(state: &mut GameState, scene: &mut Scene) -> bool {
        let logo = state.logo;
        on_pointer_down(state, scene, &Pointer::default(), logo)
    }

    /// Step the scene 1 ms at a time, routing fired timers to the controller
    fn idle(state: &mut GameState, scene: &mut Scene, ms: u32) {
        for _ in 0..ms {
            for handle in scene.step(0.001) {
                on_timer_expired(state, scene, handle);
            }
        }
    }

    #[test]
    fn test_preload_requests_two_images() {
        let state = GameState::new(Tuning::default(), 1);
        let mut host = RecordingHost::default();
        preload(&state, &mut host);
        assert_eq!(
            host.calls,
            vec![
                "load_image logo /static/main/assets/phaser-logo.png",
                "load_image sky /static/main/assets/sky.png",
            ]
        );
    }

    #[test]
    fn test_create_builds_scene_in_order() {
        let mut state = GameState::new(Tuning::default(), 1);
        let mut host = RecordingHost::default();
        create(&mut state, &mut host);

        assert_eq!(
            host.ops(),
            vec![
                "add_image",
                "set_default_cursor",
                "add_physics_image",
                "set_collide_world_bounds",
                "set_bounce",
                "set_interactive",
                "add_text",
                "add_timer",
                "add_text",
                "set_origin",
            ]
        );
        assert_eq!(host.calls[6], "add_text Puntuación: 0");
        assert_eq!(host.calls[7], "add_timer 1 10000");
        assert_eq!(state.phase, ScenePhase::Running);
        assert_eq!(state.logo, Some(EntityId(2)));
        assert_eq!(state.inactivity_timer, Some(TimerHandle(1)));
    }

    #[test]
    fn test_create_twice_is_ignored() {
        let mut state = GameState::new(Tuning::default(), 1);
        let mut host = RecordingHost::default();
        create(&mut state, &mut host);
        host.clear();
        create(&mut state, &mut host);
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_click_effects_happen_in_order() {
        let mut state = GameState::new(Tuning::default(), 1);
        let mut host = RecordingHost::default();
        create(&mut state, &mut host);
        let logo = state.logo;

        // Reveal the message so the click has to hide it
        on_timer_expired(&mut state, &mut host, TimerHandle(1));
        host.clear();

        assert!(on_pointer_down(&mut state, &mut host, &Pointer::default(), logo));
        assert_eq!(
            host.ops(),
            vec![
                "add_timer",
                "set_visible",
                "set_text",
                "set_scale",
                "set_position",
                "set_velocity",
            ]
        );
        assert_eq!(host.calls[2], "set_text 3 Puntuación: 10");
    }

    #[test]
    fn test_restart_cancels_pending_timer_first() {
        let mut state = GameState::new(Tuning::default(), 1);
        let mut host = RecordingHost::default();
        create(&mut state, &mut host);
        host.clear();

        restart_inactivity_timer(&mut state, &mut host);
        assert_eq!(host.calls, vec!["remove_timer 1", "add_timer 2 10000"]);
        assert_eq!(state.inactivity_timer, Some(TimerHandle(2)));
    }

    #[test]
    fn test_restart_without_pending_timer_only_schedules() {
        let mut state = GameState::new(Tuning::default(), 1);
        let mut host = RecordingHost::default();
        restart_inactivity_timer(&mut state, &mut host);
        assert_eq!(host.calls, vec!["add_timer 1 10000"]);
    }

    #[test]
    fn test_single_click_scenario() {
        let (mut state, mut scene) = running(7);
        assert!(click_logo(&mut state, &mut scene));

        assert_eq!(state.score, 10);
        assert!((state.logo_scale - 0.9).abs() < 1e-6);
        assert_eq!(state.max_velocity, 220);

        let logo = scene.entity(state.logo.unwrap()).unwrap();
        assert!((logo.scale - 0.9).abs() < 1e-6);
        let score_text = scene.entity(state.score_text.unwrap()).unwrap();
        assert_eq!(score_text.text(), Some("Puntuación: 10"));
    }

    #[test]
    fn test_idle_window_reveals_message() {
        let (mut state, mut scene) = running(7);
        idle(&mut state, &mut scene, 9_999);
        assert!(state.idle_message.is_none());

        idle(&mut state, &mut scene, 1);
        assert!(state.is_idle_message_visible());
        let message = scene.entity(state.idle_message.unwrap().entity).unwrap();
        assert!(message.visible);
        assert_eq!(message.text(), Some("ya no puedes seguir?\njejejejeje"));
        assert_eq!(message.origin, Vec2::splat(0.5));
        assert_eq!(message.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_message_appears_once_per_idle_window() {
        let (mut state, mut scene) = running(7);
        idle(&mut state, &mut scene, 10_000);
        idle(&mut state, &mut scene, 60_000);
        assert_eq!(state.idle_windows, 1);
        assert!(state.inactivity_timer.is_none());
        assert_eq!(scene.timers().pending_count(), 0);
    }

    #[test]
    fn test_click_before_delay_cancels_reveal() {
        let (mut state, mut scene) = running(7);
        idle(&mut state, &mut scene, 6_000);
        click_logo(&mut state, &mut scene);
        idle(&mut state, &mut scene, 6_000);
        click_logo(&mut state, &mut scene);
        idle(&mut state, &mut scene, 9_000);

        assert_eq!(state.score, 20);
        assert!(state.idle_message.is_none());
        assert_eq!(state.idle_windows, 0);
        assert_eq!(scene.timers().pending_count(), 1);
    }

    #[test]
    fn test_click_hides_message_and_reuses_it() {
        let (mut state, mut scene) = running(7);
        idle(&mut state, &mut scene, 10_000);
        let first = state.idle_message.unwrap().entity;

        click_logo(&mut state, &mut scene);
        assert!(!state.is_idle_message_visible());
        assert!(!scene.entity(first).unwrap().visible);

        idle(&mut state, &mut scene, 10_000);
        let message = state.idle_message.unwrap();
        assert_eq!(message.entity, first);
        assert!(message.visible);
        assert!(scene.entity(first).unwrap().visible);
        assert_eq!(state.idle_windows, 2);
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let (mut state, mut scene) = running(7);
        let stale = state.inactivity_timer.unwrap();
        click_logo(&mut state, &mut scene);

        on_timer_expired(&mut state, &mut scene, stale);
        assert!(state.idle_message.is_none());
        assert!(state.inactivity_timer.is_some());
    }

    #[test]
    fn test_clicks_elsewhere_change_nothing() {
        let (mut state, mut scene) = running(7);
        let logo = state.logo.unwrap();
        let before = scene.entity(logo).unwrap().clone();
        let timer = state.inactivity_timer;

        let sky = scene.entities()[0].id;
        assert!(!on_pointer_down(&mut state, &mut scene, &Pointer::default(), Some(sky)));
        assert!(!on_pointer_down(&mut state, &mut scene, &Pointer::default(), None));
        assert!(!on_pointer_down(
            &mut state,
            &mut scene,
            &Pointer::default(),
            Some(EntityId(999))
        ));

        assert_eq!(state.score, 0);
        assert_eq!(state.logo_scale, 1.0);
        assert_eq!(state.max_velocity, 200);
        assert_eq!(state.inactivity_timer, timer);
        assert_eq!(scene.entity(logo).unwrap(), &before);
    }

    #[test]
    fn test_clicks_before_create_are_ignored() {
        let mut state = GameState::new(Tuning::default(), 1);
        let mut host = RecordingHost::default();
        assert!(!on_pointer_down(
            &mut state,
            &mut host,
            &Pointer::default(),
            Some(EntityId(1))
        ));
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_same_seed_same_respawns() {
        let (mut a, mut scene_a) = running(42);
        let (mut b, mut scene_b) = running(42);
        for _ in 0..5 {
            click_logo(&mut a, &mut scene_a);
            click_logo(&mut b, &mut scene_b);
        }
        let logo_a = scene_a.entity(a.logo.unwrap()).unwrap();
        let logo_b = scene_b.entity(b.logo.unwrap()).unwrap();
        assert_eq!(logo_a.pos, logo_b.pos);
        assert_eq!(logo_a.body, logo_b.body);
    }

    #[test]
    fn test_scale_keeps_shrinking_over_long_sessions() {
        let (mut state, mut scene) = running(9);
        let mut prev = state.logo_scale;

        for n in 1..=1000 {
            assert!(click_logo(&mut state, &mut scene));
            assert!(state.logo_scale > 0.0, "scale hit zero at click {}", n);
            assert!(state.logo_scale < prev, "scale stalled at click {}", n);
            prev = state.logo_scale;
        }

        let expected = 0.9f64.powi(1000);
        assert!((state.logo_scale - expected).abs() <= expected * 1e-9);
    }

    proptest! {
        #[test]
        fn prop_clicks_accumulate(seed in any::<u64>(), clicks in 0u32..60) {
            let (mut state, mut scene) = running(seed);
            let mut prev_scale = state.logo_scale;

            for _ in 0..clicks {
                prop_assert!(click_logo(&mut state, &mut scene));
                prop_assert!(state.logo_scale < prev_scale);
                prop_assert!(state.logo_scale > 0.0);
                prev_scale = state.logo_scale;
            }

            prop_assert_eq!(state.score, 10 * clicks as u64);
            prop_assert_eq!(state.max_velocity, 200 + 20 * clicks);
            let expected = 0.9f64.powi(clicks as i32);
            prop_assert!((state.logo_scale - expected).abs() <= expected * 1e-9);
        }

        #[test]
        fn prop_respawn_stays_in_bounds(seed in any::<u64>(), clicks in 1u32..40) {
            let (mut state, mut scene) = running(seed);
            let logo = state.logo.unwrap();

            for _ in 0..clicks {
                click_logo(&mut state, &mut scene);
                let entity = scene.entity(logo).unwrap();
                let bound = state.max_velocity as f32;
                let vel = entity.body.unwrap().vel;

                prop_assert!(entity.pos.x >= 100.0 && entity.pos.x <= 700.0);
                prop_assert!(entity.pos.y >= 100.0 && entity.pos.y <= 500.0);
                prop_assert!(vel.x.abs() <= bound && vel.y.abs() <= bound);
            }
        }
    }
}

//! Logo Clicker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlElement, HtmlImageElement, MouseEvent, TouchEvent};

    use logo_clicker::consts::SIM_DT;
    use logo_clicker::renderer::{DomRenderer, client_to_world};
    use logo_clicker::sim::Pointer;
    use logo_clicker::{Game, Tuning};

    /// Game instance plus browser-side bookkeeping
    struct Client {
        game: Game,
        renderer: DomRenderer,
        last_time: f64,
    }

    impl Client {
        /// Convert a client-space position to world coordinates
        fn to_world(&self, client_x: f32, client_y: f32) -> Vec2 {
            let rect = self.renderer.container().get_bounding_client_rect();
            client_to_world(
                Vec2::new(client_x, client_y),
                Vec2::new(rect.left() as f32, rect.top() as f32),
                Vec2::new(rect.width() as f32, rect.height() as f32),
                self.game.scene.world(),
            )
        }

        fn pointer_down(&mut self, client_x: f32, client_y: f32) {
            let pos = self.to_world(client_x, client_y);
            self.game.pointer_down(Pointer { pos });
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            self.game.update(dt);
            self.renderer.sync(&self.game.scene);
        }
    }

    /// Fetch and decode every requested image, reporting natural sizes
    async fn load_assets(game: &mut Game) {
        for (key, url) in game.pending_assets() {
            let img = match HtmlImageElement::new() {
                Ok(img) => img,
                Err(e) => {
                    log::error!("Cannot create image element: {:?}", e);
                    continue;
                }
            };
            img.set_src(&url);

            match JsFuture::from(img.decode()).await {
                Ok(_) => {
                    let (w, h) = (img.natural_width() as f32, img.natural_height() as f32);
                    log::info!("Loaded '{}' ({}x{})", key, w, h);
                    game.asset_loaded(&key, w, h);
                }
                Err(e) => log::error!("Failed to load '{}' from {}: {:?}", key, url, e),
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Logo Clicker starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let container: HtmlElement = document
            .get_element_by_id("game-container")
            .expect("no game container")
            .dyn_into()
            .expect("game container is not an HTML element");

        let tuning = Tuning::load();
        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(tuning, seed);
        log::info!("Game initialized with seed: {}", seed);

        load_assets(&mut game).await;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let renderer = DomRenderer::new(document, container, &game.scene);
        game.start();

        let client = Rc::new(RefCell::new(Client {
            game,
            renderer,
            last_time: 0.0,
        }));

        setup_input_handlers(client.clone());

        // Start game loop
        request_animation_frame(client);

        log::info!("Logo Clicker running!");
    }

    fn setup_input_handlers(client: Rc<RefCell<Client>>) {
        let container = client.borrow().renderer.container().clone();

        // Mouse down
        {
            let client = client.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                client
                    .borrow_mut()
                    .pointer_down(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = container
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (suppresses the emulated mousedown)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let touches = event.changed_touches();
                let mut c = client.borrow_mut();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        c.pointer_down(touch.client_x() as f32, touch.client_y() as f32);
                    }
                }
            });
            let _ = container
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(client: Rc<RefCell<Client>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(client, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(client: Rc<RefCell<Client>>, time: f64) {
        client.borrow_mut().frame(time);
        request_animation_frame(client);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Logo Clicker (native) starting...");
    log::info!("Native mode runs a scripted headless session - run with `trunk serve` to play");

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let tuning = logo_clicker::Tuning::load_from_path(path.as_deref());
    headless_session(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Click the logo a few times, then idle until the taunt appears
#[cfg(not(target_arch = "wasm32"))]
fn headless_session(tuning: logo_clicker::Tuning) {
    use logo_clicker::sim::Pointer;
    use logo_clicker::{Game, textures};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const CLICKS: u32 = 5;

    let idle_frames = (tuning.inactivity_delay_ms as f32 / 1000.0 / FRAME_DT).ceil() as u32 + 60;
    let mut game = Game::new(tuning, 0x5eed);

    // No decoder natively; stand-in sizes for the two textures
    game.asset_loaded(textures::LOGO, 320.0, 100.0);
    game.asset_loaded(textures::SKY, 800.0, 600.0);
    game.start();

    for _ in 0..CLICKS {
        for _ in 0..90 {
            game.update(FRAME_DT);
        }
        let Some(logo) = game.state.logo.and_then(|id| game.scene.entity(id)) else {
            log::error!("Logo missing after start");
            return;
        };
        let pos = logo.pos;
        if game.pointer_down(Pointer::at(pos.x, pos.y)) {
            log::info!(
                "Hit at ({:.0}, {:.0}): score {}, scale {:.3}, bound {}",
                pos.x,
                pos.y,
                game.state.score,
                game.state.logo_scale,
                game.state.max_velocity
            );
        } else {
            log::warn!("Missed the logo at ({:.0}, {:.0})", pos.x, pos.y);
        }
    }

    for _ in 0..idle_frames {
        game.update(FRAME_DT);
    }
    log::info!(
        "After idling: taunt visible = {}",
        game.state.is_idle_message_visible()
    );

    match serde_json::to_string_pretty(&game.state) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize state: {}", e),
    }
}

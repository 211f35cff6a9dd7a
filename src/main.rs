//! Astro Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use astro_shooter::Settings;
    use astro_shooter::consts::*;
    use astro_shooter::platform::KeyState;
    use astro_shooter::platform::assets::load_sprites;
    use astro_shooter::renderer::CanvasRenderer;
    use astro_shooter::sim::{Session, tick};

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: Option<CanvasRenderer>,
        keys: KeyState,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            Self {
                session: Session::new(settings, seed),
                renderer: None,
                keys: KeyState::new(),
                accumulator: 0.0,
                last_time: 0.0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.keys.take_input();
                tick(&mut self.session, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                renderer.render(&self.session.snapshot());
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Astro Shooter starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load(&canvas);
        canvas.set_width(settings.playfield_width as u32);
        canvas.set_height(settings.playfield_height as u32);

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));
        log::info!("Game initialized with seed: {}", seed);

        // All sprites must settle before the first tick
        let sprites = load_sprites().await;
        match CanvasRenderer::new(&canvas, sprites) {
            Ok(renderer) => game.borrow_mut().renderer = Some(renderer),
            Err(e) => log::error!("Rendering disabled: {}", e),
        }

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(game.clone());

        request_animation_frame(game);

        log::info!("Astro Shooter running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if code == "Space" || code.starts_with("Arrow") {
                    event.prevent_default();
                }
                game.borrow_mut().keys.key_down(&code, event.repeat());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (key-ups are lost while unfocused)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.release_all();
                log::info!("Input released (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use astro_shooter::Settings;
    use astro_shooter::consts::TICKS_PER_SECOND;
    use astro_shooter::renderer::build_frame;
    use astro_shooter::sim::{GameEvent, Session, tick};

    env_logger::init();
    log::info!("Astro Shooter (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or(NATIVE_SEED);
    let mut session = Session::new(settings, seed);

    let max_ticks = HEADLESS_SECONDS * TICKS_PER_SECOND;
    let mut kills = 0u32;
    while session.time_ticks < max_ticks && !session.is_game_over() {
        let input = autopilot::input_for(&session);
        tick(&mut session, &input);
        kills += session
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
            .count() as u32;
    }

    let snapshot = session.snapshot();
    log::info!(
        "Finished after {} ticks: level {}, score {}, lives {}, {} kills, {} draw commands",
        session.time_ticks,
        snapshot.level,
        snapshot.score,
        snapshot.lives,
        kills,
        build_frame(&snapshot).len()
    );

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
const NATIVE_SEED: u64 = 0x5EED;

#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_SECONDS: u64 = 120;

/// Simple bot used by the headless build
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use astro_shooter::sim::{Session, TickInput};

    /// Track the lowest enemy and fire every few ticks
    pub fn input_for(session: &Session) -> TickInput {
        let player_center = session.player.pos.x + session.player.size.x / 2.0;
        let target = session
            .enemies
            .iter()
            .max_by(|a, b| {
                a.pos
                    .y
                    .partial_cmp(&b.pos.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|e| e.pos.x + e.size.x / 2.0);

        let (left, right) = match target {
            Some(x) if x < player_center - 4.0 => (true, false),
            Some(x) if x > player_center + 4.0 => (false, true),
            _ => (false, false),
        };

        TickInput {
            left,
            right,
            fire: session.time_ticks % 8 == 0,
            restart: false,
        }
    }
}

//! Flap Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flap_dash::sim::autopilot::should_flap;
    use flap_dash::sim::{Command, GameEvent, GamePhase, GameState, Snapshot, apply_command, tick};
    use flap_dash::{Difficulty, Settings, World};

    mod colors {
        pub const BACKGROUND: &str = "#70c5ce";
        pub const FLYER: &str = "#f7d51d";
        pub const BARRIER: &str = "#3a9d23";
        pub const TEXT: &str = "#ffffff";
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        ctx: CanvasRenderingContext2d,
        /// Canvas pixels per world unit
        scale: (f64, f64),
        /// Autopilot flaps for the player
        demo_mode: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(ctx: CanvasRenderingContext2d, settings: Settings, seed: u64) -> Self {
            Self {
                state: GameState::new(World::default(), settings.tuning(), seed),
                settings,
                ctx,
                scale: (1.0, 1.0),
                demo_mode: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn set_canvas_size(&mut self, w: u32, h: u32) {
            self.scale = (
                w as f64 / self.state.world.width as f64,
                h as f64 / self.state.world.height as f64,
            );
        }

        fn command(&mut self, command: Command) {
            apply_command(&mut self.state, command);
        }

        /// Rebuild the game with a new preset; only allowed from the menu
        fn set_difficulty(&mut self, difficulty: Difficulty) {
            if self.state.phase != GamePhase::Idle {
                return;
            }
            self.settings.set_difficulty(difficulty);
            self.settings.save();

            let high_scores = std::mem::take(&mut self.state.high_scores);
            let seed = js_sys::Date::now() as u64;
            self.state = GameState::new(self.state.world, self.settings.tuning(), seed);
            self.state.high_scores = high_scores;
            log::info!("Difficulty set to {}", difficulty.as_str());
        }

        /// One tick per frame
        fn update(&mut self, time: f64) {
            if self.demo_mode && should_flap(&self.state) {
                self.command(Command::Flap);
            }
            tick(&mut self.state);

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Draw the current frame
        fn render(&self) {
            let snapshot = self.state.snapshot();
            let ctx = &self.ctx;
            let _ = ctx.set_transform(self.scale.0, 0.0, 0.0, self.scale.1, 0.0, 0.0);

            ctx.set_fill_style_str(colors::BACKGROUND);
            ctx.fill_rect(
                0.0,
                0.0,
                self.state.world.width as f64,
                self.state.world.height as f64,
            );

            ctx.set_fill_style_str(colors::BARRIER);
            for segment in &snapshot.barriers {
                ctx.fill_rect(
                    segment.x as f64,
                    segment.y as f64,
                    segment.width as f64,
                    segment.height as f64,
                );
            }

            let flyer = snapshot.flyer;
            ctx.set_fill_style_str(colors::FLYER);
            ctx.fill_rect(flyer.x as f64, flyer.y as f64, flyer.width as f64, flyer.height as f64);

            self.render_hud(&snapshot);
        }

        fn render_hud(&self, snapshot: &Snapshot) {
            if snapshot.phase != GamePhase::Running {
                return;
            }
            let ctx = &self.ctx;
            ctx.set_fill_style_str(colors::TEXT);
            ctx.set_font("32px sans-serif");
            let _ = ctx.fill_text(&snapshot.score.to_string(), 20.0, 48.0);
            if self.settings.show_fps {
                ctx.set_font("14px monospace");
                let _ = ctx.fill_text(&format!("{} fps", self.fps), 20.0, 72.0);
            }
        }

        /// React to simulation events (overlay visibility, score text)
        fn handle_events(&mut self) {
            let document = match web_sys::window().and_then(|w| w.document()) {
                Some(document) => document,
                None => return,
            };

            for event in self.state.drain_events() {
                match event {
                    GameEvent::PhaseChanged { to, .. } => {
                        set_visible(&document, "menu", to == GamePhase::Idle);
                        set_visible(&document, "game-over", to == GamePhase::GameOver);
                    }
                    GameEvent::GameOver { score, best } => {
                        set_text(&document, "final-score", &score.to_string());
                        set_text(&document, "best-score", &best.to_string());
                    }
                    GameEvent::BarrierPassed { score } => {
                        set_text(&document, "hud-score", &score.to_string());
                    }
                    GameEvent::RunStarted => {
                        set_text(&document, "hud-score", "0");
                    }
                    GameEvent::BarrierSpawned => {}
                }
            }
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_text(document: &web_sys::Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Flap Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        // Match backing store to device pixels
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(ctx, settings, seed)));
        game.borrow_mut().set_canvas_size(width, height);

        log::info!("Game initialized with seed: {}", seed);

        set_visible(&document, "menu", true);
        set_visible(&document, "game-over", false);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Flap Dash running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click - context dependent action
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                let command = Command::primary_for(g.state.phase);
                g.command(command);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let command = Command::primary_for(g.state.phase);
                g.command(command);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" | "w" | "W" => {
                        event.prevent_default();
                        let command = Command::primary_for(g.state.phase);
                        g.command(command);
                    }
                    "Enter" => {
                        let command = match g.state.phase {
                            GamePhase::GameOver => Command::Restart,
                            _ => Command::Start,
                        };
                        g.command(command);
                    }
                    "Escape" => g.command(Command::Menu),
                    "1" => g.set_difficulty(Difficulty::Easy),
                    "2" => g.set_difficulty(Difficulty::Medium),
                    "3" => g.set_difficulty(Difficulty::Hard),
                    "f" | "F" => {
                        g.settings.show_fps = !g.settings.show_fps;
                        g.settings.save();
                    }
                    "i" | "I" => {
                        g.demo_mode = !g.demo_mode;
                        log::info!("Demo mode: {}", g.demo_mode);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let bindings = [
            ("start-btn", Command::Start),
            ("restart-btn", Command::Restart),
            ("menu-btn", Command::Menu),
        ];
        for (id, command) in bindings {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().command(command);
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.handle_events();
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Tick cap for the headless demo (about five minutes at 60 fps)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_MAX_TICKS: u64 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flap_dash::sim::autopilot::should_flap;
    use flap_dash::sim::{Command, GameEvent, GamePhase, GameState, apply_command, tick};
    use flap_dash::{Settings, World};

    env_logger::init();
    log::info!("Flap Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);

    let settings = Settings::load();
    let mut state = GameState::new(World::default(), settings.tuning(), seed);
    apply_command(&mut state, Command::Start);

    while state.phase == GamePhase::Running && state.time_ticks() < DEMO_MAX_TICKS {
        if should_flap(&state) {
            apply_command(&mut state, Command::Flap);
        }
        tick(&mut state);

        for event in state.drain_events() {
            if let GameEvent::BarrierPassed { score } = event {
                log::debug!("Passed barrier #{} at tick {}", score, state.time_ticks());
            }
        }
    }

    let snapshot = state.snapshot();
    println!(
        "Autopilot run (seed {}): score {} in {} ticks ({:?})",
        seed, snapshot.score, snapshot.time_ticks, snapshot.phase
    );
    if let Ok(json) = serde_json::to_string(&snapshot) {
        log::info!("Final frame: {}", json);
    }
}

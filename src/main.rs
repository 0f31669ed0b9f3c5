//! Tap Jump entry point
//!
//! Browser: wires requestAnimationFrame and input events to the game and
//! publishes a JSON snapshot for the page to draw. Native: plays one
//! headless run with a simple autopilot and reports the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, PointerEvent};

    use tap_jump::platform::LocalStorageStore;
    use tap_jump::sim::TickToken;
    use tap_jump::{Game, Tuning};

    type SharedGame = Rc<RefCell<Game<LocalStorageStore>>>;

    /// Window property the page reads each frame
    const SNAPSHOT_KEY: &str = "tapJumpSnapshot";

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialised".into());
        }

        log::info!("Tap Jump starting...");

        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let game = Rc::new(RefCell::new(Game::new(
            Tuning::load(),
            seed,
            LocalStorageStore::new(),
        )));

        publish_snapshot(&game.borrow());
        setup_input_handlers(game);
    }

    /// Run a command and (re)start the frame loop if it opened a new clock run
    fn dispatch(game: &SharedGame, command: impl FnOnce(&mut Game<LocalStorageStore>)) {
        let (before, after) = {
            let mut g = game.borrow_mut();
            let before = g.tick_token();
            command(&mut g);
            publish_snapshot(&g);
            (before, g.tick_token())
        };

        if let Some(token) = after {
            if Some(token) != before {
                request_animation_frame(game.clone(), token);
            }
        }
    }

    fn setup_input_handlers(game: SharedGame) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; input disabled");
            return;
        };

        // Tap/click anywhere
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(PointerEvent)>::new(move |e: PointerEvent| {
                e.prevent_default();
                dispatch(&game, |g| g.jump());
            });
            let _ = window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                match e.code().as_str() {
                    "Space" | "ArrowUp" => {
                        e.prevent_default();
                        dispatch(&game, |g| g.jump());
                    }
                    "KeyP" => dispatch(&game, |g| g.toggle_pause()),
                    "Enter" => dispatch(&game, |g| {
                        if g.phase() != tap_jump::sim::GamePhase::Running {
                            g.start_game();
                        }
                    }),
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: SharedGame, token: TickToken) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, token, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: SharedGame, token: TickToken, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let keep_going = g.frame(token, time);
            for event in g.drain_events() {
                log::debug!("{:?}", event);
            }
            publish_snapshot(&g);
            keep_going
        };

        // A stale token simply lets this loop die; the new run has its own
        if keep_going {
            request_animation_frame(game, token);
        }
    }

    fn publish_snapshot(game: &Game<LocalStorageStore>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        match serde_json::to_string(&game.snapshot()) {
            Ok(json) => {
                let _ = js_sys::Reflect::set(&window, &SNAPSHOT_KEY.into(), &json.into());
            }
            Err(e) => log::warn!("Snapshot serialization failed: {}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use tap_jump::persistence::FileStore;
    use tap_jump::sim::{GameEvent, GamePhase};
    use tap_jump::{Game, MemoryStore, ScoreStore, Tuning};

    /// Synthetic display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Stop the demo after this much simulated time
    const MAX_RUN_MS: f64 = 3.0 * 60.0 * 1000.0;
    /// Seconds of travel ahead of the player at which the autopilot jumps
    const JUMP_LEAD_SECS: f32 = 0.16;

    pub fn run() {
        let tuning = Tuning::load();
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);

        let path = std::env::var("TAP_JUMP_SAVE").unwrap_or_else(|_| "tap_jump_best.json".into());
        match FileStore::open(&path) {
            Ok(store) => play(Game::new(tuning, seed, store)),
            Err(e) => {
                log::warn!("Best score file {} unusable ({}); not persisting", path, e);
                play(Game::new(tuning, seed, MemoryStore::new()));
            }
        }
    }

    fn play<S: ScoreStore>(mut game: Game<S>) {
        log::info!("Headless run, best so far {}", game.best());
        game.start_game();

        let mut now = 0.0;
        while let Some(token) = game.tick_token() {
            if should_jump(&game) {
                game.jump();
            }
            if !game.frame(token, now) {
                break;
            }
            for event in game.drain_events() {
                if let GameEvent::ObstaclesPassed { score, .. } = event {
                    log::debug!("score {}", score);
                }
            }
            now += FRAME_MS;
            if now > MAX_RUN_MS {
                log::info!("Time limit reached, pausing");
                game.pause_game();
            }
        }

        for event in game.drain_events() {
            if let GameEvent::GameOver { new_best: true, best, .. } = event {
                log::info!("New best score: {}", best);
            }
        }

        let phase = match game.phase() {
            GamePhase::GameOver => "game over",
            _ => "stopped",
        };
        println!(
            "{} after {:.1}s at speed {:.0}: score {}, best {}",
            phase,
            game.elapsed(),
            game.speed(),
            game.score(),
            game.best()
        );
    }

    /// Jump when the nearest obstacle ahead is about to reach the player
    fn should_jump<S: ScoreStore>(game: &Game<S>) -> bool {
        let player = game.player_rect();
        let lead = game.speed() * JUMP_LEAD_SECS;
        game.obstacles()
            .filter(|o| o.x + o.w > player.min.x)
            .min_by(|a, b| a.x.total_cmp(&b.x))
            .is_some_and(|o| o.x - player.max().x <= lead)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tap Jump (native) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

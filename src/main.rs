//! MindWhack entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use mindwhack::audio::WebAudioCues;
    use mindwhack::consts::*;
    use mindwhack::cues::{Cue, CueSink, ResultSink, SessionReport};
    use mindwhack::level::{GameType, builtin_level};
    use mindwhack::library::LevelLibrary;
    use mindwhack::profile::Profile;
    use mindwhack::session::{Outcome, Session, SessionPhase};
    use mindwhack::settings::Settings;

    /// Routes session cues into the shared Web Audio renderer.
    ///
    /// The session owns its cue sink, but the sound toggle lives in the shell,
    /// so both sides hold the renderer through one `Rc`.
    struct SharedCues(Rc<RefCell<WebAudioCues>>);

    impl CueSink for SharedCues {
        fn cue(&mut self, cue: Cue) {
            self.0.borrow_mut().cue(cue);
        }
    }

    /// Folds finished runs into the stored player profile.
    struct BrowserResults {
        profile: Rc<RefCell<Profile>>,
    }

    impl ResultSink for BrowserResults {
        fn session_over(&mut self, report: &SessionReport) {
            let mut profile = self.profile.borrow_mut();
            profile.record_whacks(report.hits);
            profile.save();
            log::info!(
                "Session over: level={} {:?} score={} hits={}",
                report.level_id,
                report.outcome,
                report.score,
                report.hits
            );
        }
    }

    /// Game instance holding all state the event handlers mutate
    struct Game {
        session: Session,
        settings: Settings,
        library: LevelLibrary,
        audio: Rc<RefCell<WebAudioCues>>,
    }

    impl Game {
        /// Update target cells and flash markers in the DOM grid
        fn render_board(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            for cell in 0..self.session.board().cell_count() {
                if let Some(el) = document.get_element_by_id(&format!("cell-{cell}")) {
                    if let Some(target) = self.session.board().target_at(cell) {
                        el.set_text_content(Some(target.kind.icon()));
                        let _ = el.set_attribute("class", "cell active");
                    } else if self.session.is_flashing(cell) {
                        el.set_text_content(Some("💥"));
                        let _ = el.set_attribute("class", "cell flash");
                    } else {
                        el.set_text_content(None);
                        let _ = el.set_attribute("class", "cell");
                    }
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            // Update score
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.session.score().to_string()));
            }

            // Goal counts toward a score win; Catch runs on lives instead
            let catch_mode = self.session.game_type() == GameType::Catch;
            if let Some(el) = document.get_element_by_id("hud-goal") {
                let _ = el.set_attribute(
                    "class",
                    if catch_mode { "hud-item hidden" } else { "hud-item" },
                );
                if let Some(val) = document.query_selector("#hud-goal .hud-value").ok().flatten() {
                    val.set_text_content(Some(&self.session.win_goal().to_string()));
                }
            }
            if let Some(el) = document.get_element_by_id("hud-lives") {
                let _ = el.set_attribute(
                    "class",
                    if catch_mode { "hud-item" } else { "hud-item hidden" },
                );
                if let Some(val) = document.query_selector("#hud-lives .hud-value").ok().flatten()
                {
                    val.set_text_content(Some(&self.session.lives().to_string()));
                }
            }

            // Update time, highlighted once the warning window starts
            if let Some(el) = document.get_element_by_id("hud-time") {
                let low = self.session.phase() == SessionPhase::Playing
                    && self.session.time_left_secs() <= LOW_TIME_WARNING_SECS;
                let _ = el.set_attribute(
                    "class",
                    if low { "hud-item low-time" } else { "hud-item" },
                );
                if let Some(val) = document.query_selector("#hud-time .hud-value").ok().flatten() {
                    val.set_text_content(Some(&self.session.time_left_secs().to_string()));
                }
            }

            // Option button labels
            if let Some(el) = document.get_element_by_id("difficulty-btn") {
                el.set_text_content(Some(self.session.difficulty().label()));
            }
            if let Some(el) = document.get_element_by_id("sound-btn") {
                let on = self.audio.borrow().is_enabled();
                el.set_text_content(Some(if on { "🔊" } else { "🔇" }));
            }

            // Show/hide countdown overlay
            if let Some(el) = document.get_element_by_id("countdown-overlay") {
                if self.session.phase() == SessionPhase::Countdown {
                    let _ = el.set_attribute("class", "");
                    if let Some(val) = document.get_element_by_id("countdown-value") {
                        val.set_text_content(Some(&self.session.countdown().to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Show/hide pause menu
            if let Some(el) = document.get_element_by_id("pause-menu") {
                if self.session.phase() == SessionPhase::Paused {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Show/hide game over
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.session.phase() == SessionPhase::Ended {
                    let _ = el.set_attribute("class", "");
                    if let Some(title) = document.get_element_by_id("end-title") {
                        let text = match self.session.outcome() {
                            Some(Outcome::Won) => "You Win!",
                            Some(Outcome::Lost) => "Game Over",
                            None => "Session Ended",
                        };
                        title.set_text_content(Some(text));
                    }
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.session.score().to_string()));
                    }
                    if let Some(hits_el) = document.get_element_by_id("final-hits") {
                        hits_el.set_text_content(Some(&self.session.hits().to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    fn toggle_pause(g: &mut Game) {
        match g.session.phase() {
            SessionPhase::Playing | SessionPhase::Countdown => g.session.pause(),
            SessionPhase::Paused => g.session.resume(),
            SessionPhase::Ended => {}
        }
    }

    fn restart_run(g: &mut Game) {
        g.session.restart();
        let id = g.session.level_id().to_string();
        g.library.record_play(&id);
        log::info!("Run restarted on level {}", id);
    }

    fn apply_theme(dark: bool) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(body) = document.body() {
            let _ = body.set_attribute("class", if dark { "dark" } else { "" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("MindWhack starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let profile = Rc::new(RefCell::new(Profile::load()));
        apply_theme(settings.dark_theme);

        let audio = Rc::new(RefCell::new(WebAudioCues::new()));
        audio.borrow_mut().set_enabled(settings.sound_enabled);

        let mut library = LevelLibrary::with_builtin();
        let level = library
            .get("builtin-classic")
            .cloned()
            .unwrap_or_else(builtin_level);

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(
            &level,
            settings.difficulty,
            seed,
            Box::new(SharedCues(audio.clone())),
            Box::new(BrowserResults {
                profile: profile.clone(),
            }),
        );
        library.record_play(&level.id);

        log::info!("Session ready: level={} seed={}", level.id, seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            settings,
            library,
            audio,
        }));

        build_board(&document, &game);
        setup_pause_menu(game.clone());
        setup_restart_buttons(game.clone());
        setup_option_buttons(game.clone());
        setup_keyboard(game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("MindWhack running!");
    }

    /// Create the tappable cell grid under `#board`
    fn build_board(document: &web_sys::Document, game: &Rc<RefCell<Game>>) {
        let board = document.get_element_by_id("board").expect("no board element");
        board.set_inner_html("");

        let grid = game.borrow().session.grid_size();
        let _ = board.set_attribute(
            "style",
            &format!("grid-template-columns: repeat({grid}, 1fr)"),
        );

        for cell in 0..grid * grid {
            let el = document.create_element("button").expect("create cell");
            let _ = el.set_attribute("id", &format!("cell-{cell}"));
            let _ = el.set_attribute("class", "cell");

            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PointerEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.borrow().resume();
                g.session.tap(cell);
            });
            let _ =
                el.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();

            let _ = board.append_child(&el);
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
            g.session.advance(time);
            g.render_board();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_pause_menu(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Pause / resume toggle
        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.borrow().click();
                toggle_pause(&mut g);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resume button on the pause menu
        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.borrow().click();
                g.session.resume();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Quit the run without a result
        if let Some(btn) = document.get_element_by_id("exit-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.borrow().click();
                g.session.abandon();
                log::info!("Run abandoned");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        for id in ["restart-btn", "play-again-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    let mut g = game.borrow_mut();
                    g.audio.borrow().click();
                    restart_run(&mut g);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_option_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Difficulty cycles Easy -> Medium -> Hard; changing it restarts the run
        if let Some(btn) = document.get_element_by_id("difficulty-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.borrow().click();
                let next = g.session.difficulty().cycle();
                g.session.set_difficulty(next);
                g.settings.difficulty = next;
                g.settings.save();
                log::info!("Difficulty: {}", next.label());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Sound toggle
        if let Some(btn) = document.get_element_by_id("sound-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                let enabled = !g.audio.borrow().is_enabled();
                g.audio.borrow_mut().set_enabled(enabled);
                g.settings.sound_enabled = enabled;
                g.settings.save();
                if enabled {
                    g.audio.borrow().click();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Theme toggle
        if let Some(btn) = document.get_element_by_id("theme-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.borrow().click();
                g.settings.dark_theme = !g.settings.dark_theme;
                g.settings.save();
                apply_theme(g.settings.dark_theme);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "Escape" | "p" | "P" => toggle_pause(&mut g),
                "r" | "R" => restart_run(&mut g),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    let phase = g.session.phase();
                    if phase == SessionPhase::Playing || phase == SessionPhase::Countdown {
                        g.session.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let phase = g.session.phase();
                if phase == SessionPhase::Playing || phase == SessionPhase::Countdown {
                    g.session.pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("MindWhack (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive one session with a synthetic clock, whacking the first occupied
/// cell on each step. Exercises the full engine without a browser.
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use mindwhack::cues::{LoggingResults, NullCues};
    use mindwhack::level::builtin_level;
    use mindwhack::session::{Difficulty, Session, SessionPhase};

    let level = builtin_level();
    let mut session = Session::new(
        &level,
        Difficulty::Medium,
        42,
        Box::new(NullCues),
        Box::new(LoggingResults),
    );

    let mut now = 0.0;
    session.advance(now);
    while session.phase() != SessionPhase::Ended {
        now += 250.0;
        session.advance(now);
        let occupied = (0..session.board().cell_count())
            .find(|&cell| session.board().target_at(cell).is_some());
        if let Some(cell) = occupied {
            session.tap(cell);
        }
    }

    log::info!(
        "Demo finished: outcome={:?} score={} hits={}",
        session.outcome(),
        session.score(),
        session.hits()
    );
}

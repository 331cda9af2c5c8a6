//! Photo Reel entry point
//!
//! Handles platform-specific initialization and drives the show.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_show {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use photo_reel::audio::MusicPlayer;
    use photo_reel::consts::*;
    use photo_reel::platform::{
        self, CanvasPainter, DomSurface, create_photo_slides, preload_images, request_fullscreen,
    };
    use photo_reel::show::CancelToken;
    use photo_reel::{Show, ShowConfig, ShowEvent};

    /// Show instance plus everything it renders into
    struct Presenter {
        show: Show,
        surface: DomSurface,
        painter: Option<CanvasPainter>,
        music: MusicPlayer,
        accumulator: f32,
        last_time: f64,
        confetti_token: CancelToken,
    }

    impl Presenter {
        /// Run fixed animation steps for `dt` seconds of wall time
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SHOW_DT && substeps < MAX_SUBSTEPS {
                self.show.tick(SHOW_DT, &mut self.surface);
                self.accumulator -= SHOW_DT;
                substeps += 1;
            }
        }

        /// React to what the show emitted. Returns `true` when the confetti
        /// loop should be started.
        fn handle_events(&mut self) -> bool {
            let mut start_confetti = false;
            for event in self.show.drain_events() {
                log::debug!("Show event: {:?}", event);
                match event {
                    ShowEvent::MusicRequested => self.music.play(),
                    ShowEvent::FullscreenRequested => {
                        request_fullscreen();
                    }
                    ShowEvent::ConfettiStarted => {
                        if let Some(painter) = &self.painter {
                            let (w, h) = self.show.confetti().size();
                            painter.resize(w, h);
                        }
                        start_confetti = true;
                    }
                    ShowEvent::SequenceComplete => log::info!("All photos shown"),
                    _ => {}
                }
            }
            start_confetti
        }

        fn render_confetti(&mut self) {
            if let Some(painter) = self.painter.as_mut() {
                self.show.confetti().render(painter);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Photo Reel starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let config = ShowConfig::load();
        if let Err(e) = create_photo_slides(&document, &config.photo_paths) {
            log::error!("Could not build photo slides: {:?}", e);
        }
        preload_images(&config.photo_paths);

        let mut surface = DomSurface::new(&document, config.photo_count());
        let painter = match CanvasPainter::from_document(&document) {
            Ok(painter) => Some(painter),
            Err(e) => {
                log::warn!("Confetti disabled: {:?}", e);
                None
            }
        };

        let seed = js_sys::Date::now() as u64;
        let mut show = Show::new(config, seed, platform::viewport_size());
        show.prepare(&mut surface);
        let presenter = Rc::new(RefCell::new(Presenter {
            show,
            surface,
            painter,
            music: MusicPlayer::from_document(&document),
            accumulator: 0.0,
            last_time: 0.0,
            confetti_token: CancelToken::new(),
        }));

        log::info!("Show initialized with seed: {}", seed);

        setup_start_button(&document, presenter.clone());
        setup_resize(presenter.clone());

        request_animation_frame(presenter);

        log::info!("Photo Reel waiting for start");
    }

    fn setup_start_button(document: &web_sys::Document, presenter: Rc<RefCell<Presenter>>) {
        let Some(button) = document.get_element_by_id(platform::dom::START_BUTTON_ID) else {
            log::error!("No start button; the show cannot begin");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            presenter.borrow_mut().show.start();
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(presenter: Rc<RefCell<Presenter>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (w, h) = platform::viewport_size();
            let mut p = presenter.borrow_mut();
            if p.show.resize(w, h) {
                if let Some(painter) = &p.painter {
                    painter.resize(w, h);
                }
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(presenter: Rc<RefCell<Presenter>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            show_loop(presenter, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn show_loop(presenter: Rc<RefCell<Presenter>>, time: f64) {
        let start_confetti = {
            let mut p = presenter.borrow_mut();

            let dt = if p.last_time > 0.0 {
                ((time - p.last_time) / 1000.0) as f32
            } else {
                SHOW_DT
            };
            p.last_time = time;

            p.update(dt);
            p.handle_events()
        };

        if start_confetti {
            request_confetti_frame(presenter.clone());
        }
        request_animation_frame(presenter);
    }

    fn request_confetti_frame(presenter: Rc<RefCell<Presenter>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            confetti_loop(presenter);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One particle step and draw per display frame until cancelled
    fn confetti_loop(presenter: Rc<RefCell<Presenter>>) {
        {
            let mut p = presenter.borrow_mut();
            if p.confetti_token.is_cancelled() {
                log::info!("Confetti loop stopped");
                return;
            }
            p.show.frame();
            p.render_confetti();
        }
        request_confetti_frame(presenter);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_show::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Photo Reel (native) starting...");
    log::info!("Native mode is a headless dry run - run with `trunk serve` for the web version");

    dry_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play the default show against an in-memory scene and log its timeline
#[cfg(not(target_arch = "wasm32"))]
fn dry_run() {
    use photo_reel::consts::SHOW_DT;
    use photo_reel::show::ShowPhase;
    use photo_reel::{Scene, Show, ShowConfig};

    const CONFETTI_FRAMES: usize = 60;
    const TIME_LIMIT: f32 = 120.0;

    let mut scene = Scene::new();
    let mut show = Show::new(ShowConfig::load(), 0, (1280.0, 720.0));
    show.prepare(&mut scene);
    show.start();

    let mut clock = 0.0_f32;
    while clock < TIME_LIMIT {
        show.tick(SHOW_DT, &mut scene);
        clock += SHOW_DT;
        for event in show.drain_events() {
            log::info!("{:>7.3}s  {:?}", clock, event);
        }
        if show.phase() == ShowPhase::Finale && show.is_confetti_visible() {
            break;
        }
    }

    for _ in 0..CONFETTI_FRAMES {
        show.frame();
    }
    log::info!(
        "Dry run finished at {:.3}s: {} style writes, {} confetti frames",
        clock,
        scene.writes(),
        show.confetti().frames()
    );
}

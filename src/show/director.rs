//! Presentation driver
//!
//! [`Show`] owns every piece of run state and advances it from a single
//! `tick`. The phases run strictly in order:
//! waiting for the start gate, fading the start screen, a short pause, the
//! photo reel, and the finale (which never ends).

use glam::Vec2;

use super::ShowEvent;
use super::config::ShowConfig;
use super::confetti::Confetti;
use super::delay::Delay;
use super::effects::EffectTriggers;
use super::finale::Finale;
use super::sequencer::{PhotoSequencer, SequenceState};
use crate::anim::{Ease, Position, Progress, Prop, Surface, Target, Timeline, Tween};
use crate::consts::*;

/// Top-level presentation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowPhase {
    /// Start screen up, button pulsing
    #[default]
    Waiting,
    /// Start screen fading out
    Intro,
    /// Pause between the start screen and the first photo
    Gap,
    /// Photo reel running
    Playing,
    /// Closing message (and later confetti)
    Finale,
}

/// Idle "press me" pulse on the start button
fn button_pulse() -> Timeline {
    Timeline::new().with(
        Tween::to(Target::StartButton, Prop::Scale, BUTTON_PULSE_SCALE, BUTTON_PULSE_DURATION)
            .with_ease(Ease::SineInOut)
            .yoyo_forever(),
        Position::At(0.0),
    )
}

/// Squash-and-release feedback when the start button is pressed
fn button_press() -> Timeline {
    Timeline::new()
        .with(
            Tween::to(Target::StartButton, Prop::Scale, BUTTON_PRESS_SCALE, BUTTON_PRESS_DOWN),
            Position::Append,
        )
        .with(
            Tween::to(Target::StartButton, Prop::Scale, 1.0, BUTTON_PRESS_UP),
            Position::Append,
        )
}

fn start_screen_fade() -> Timeline {
    Timeline::new().with(
        Tween::to(Target::StartScreen, Prop::Opacity, 0.0, START_FADE_DURATION)
            .with_ease(Ease::Power2InOut),
        Position::Append,
    )
}

/// One presentation run
#[derive(Debug, Clone)]
pub struct Show {
    config: ShowConfig,
    phase: ShowPhase,
    started: bool,
    button: Option<Timeline>,
    intro: Option<Timeline>,
    gap: Option<Delay>,
    sequencer: PhotoSequencer,
    effects: EffectTriggers,
    finale: Finale,
    confetti: Confetti,
    confetti_visible: bool,
    viewport: Vec2,
    events: Vec<ShowEvent>,
}

impl Show {
    /// Create a run. `seed` drives the confetti; `viewport` is the initial
    /// window size in pixels.
    pub fn new(config: ShowConfig, seed: u64, viewport: (f32, f32)) -> Self {
        Self {
            config,
            phase: ShowPhase::Waiting,
            started: false,
            button: None,
            intro: None,
            gap: None,
            sequencer: PhotoSequencer::new(),
            effects: EffectTriggers::new(),
            finale: Finale::new(),
            confetti: Confetti::new(seed),
            confetti_visible: false,
            viewport: Vec2::new(viewport.0, viewport.1),
            events: Vec::new(),
        }
    }

    /// Put every element in its page-load state and start the button pulse
    pub fn prepare(&mut self, surface: &mut dyn Surface) {
        for index in 0..self.config.photo_count() {
            surface.set(Target::Slide(index), Prop::Opacity, 0.0);
        }
        surface.set(Target::Flash, Prop::Opacity, 0.0);
        surface.set(Target::Message, Prop::Opacity, 0.0);
        surface.set_visible(Target::Confetti, false);
        self.button = Some(button_pulse());
        log::info!("Show ready: {} photos", self.config.photo_count());
    }

    /// The start gate. Returns `false` (and does nothing) if the show has
    /// already started.
    pub fn start(&mut self) -> bool {
        if self.started {
            log::debug!("Start ignored: show already started");
            return false;
        }
        self.started = true;
        self.button = Some(button_press());
        self.events.push(ShowEvent::MusicRequested);
        self.events.push(ShowEvent::FullscreenRequested);
        self.intro = Some(start_screen_fade());
        self.phase = ShowPhase::Intro;
        log::info!("Show started");
        true
    }

    /// Advance animations and phase transitions by `dt` seconds
    pub fn tick(&mut self, dt: f32, surface: &mut dyn Surface) {
        self.effects.tick(dt, surface);
        let button_done = self
            .button
            .as_mut()
            .is_some_and(|button| matches!(button.advance(dt, surface), Progress::Complete { .. }));
        if button_done {
            self.button = None;
        }

        let mut dt = dt;
        loop {
            match self.phase {
                ShowPhase::Waiting | ShowPhase::Finale => break,
                ShowPhase::Intro => {
                    let Some(intro) = self.intro.as_mut() else { break };
                    match intro.advance(dt, surface) {
                        Progress::Running => break,
                        Progress::Complete { overflow } => {
                            surface.set_visible(Target::StartScreen, false);
                            self.events.push(ShowEvent::StartScreenHidden);
                            self.intro = None;
                            self.gap = Some(Delay::new(START_DELAY));
                            self.phase = ShowPhase::Gap;
                            dt = overflow;
                        }
                    }
                }
                ShowPhase::Gap => {
                    let Some(overflow) = self.gap.as_mut().and_then(|gap| gap.advance(dt)) else {
                        break;
                    };
                    self.gap = None;
                    dt = overflow;
                    let state = self.sequencer.advance(
                        0,
                        dt,
                        &self.config,
                        &mut self.effects,
                        surface,
                        &mut self.events,
                    );
                    if state == SequenceState::Finished {
                        self.begin_finale(surface);
                    } else {
                        self.phase = ShowPhase::Playing;
                    }
                }
                ShowPhase::Playing => {
                    match self.sequencer.tick(
                        dt,
                        &self.config,
                        &mut self.effects,
                        surface,
                        &mut self.events,
                    ) {
                        None => break,
                        Some(overflow) => {
                            dt = overflow;
                            self.begin_finale(surface);
                        }
                    }
                }
            }
        }

        if self.phase == ShowPhase::Finale && self.finale.tick(dt, surface) {
            self.start_confetti(surface);
        }
    }

    fn begin_finale(&mut self, surface: &mut dyn Surface) {
        self.phase = ShowPhase::Finale;
        self.finale.begin(surface);
        self.events.push(ShowEvent::FinaleStarted);
    }

    fn start_confetti(&mut self, surface: &mut dyn Surface) {
        surface.set_visible(Target::Confetti, true);
        self.confetti_visible = true;
        self.confetti.start(self.viewport.x, self.viewport.y);
        self.events.push(ShowEvent::ConfettiStarted);
    }

    /// One display frame of the particle simulation
    pub fn frame(&mut self) {
        self.confetti.tick();
    }

    /// Viewport changed. Returns `true` if the confetti surface was resized.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.viewport = Vec2::new(width, height);
        if !self.confetti_visible {
            return false;
        }
        self.confetti.resize(width, height);
        true
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<ShowEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> ShowPhase {
        self.phase
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn config(&self) -> &ShowConfig {
        &self.config
    }

    pub fn sequencer(&self) -> &PhotoSequencer {
        &self.sequencer
    }

    pub fn effects(&self) -> &EffectTriggers {
        &self.effects
    }

    pub fn finale(&self) -> &Finale {
        &self.finale
    }

    pub fn confetti(&self) -> &Confetti {
        &self.confetti
    }

    pub fn is_confetti_visible(&self) -> bool {
        self.confetti_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::Scene;
    use crate::show::PhotoStep;
    use crate::show::effects::EffectKind;

    /// Tick until `done` holds, collecting (tick index, event) pairs
    fn run_until(
        show: &mut Show,
        scene: &mut Scene,
        max_ticks: usize,
        done: impl Fn(&Show) -> bool,
    ) -> Vec<(usize, ShowEvent)> {
        let mut log = Vec::new();
        for tick in 0..max_ticks {
            show.tick(SHOW_DT, scene);
            log.extend(show.drain_events().into_iter().map(|e| (tick, e)));
            if done(show) {
                return log;
            }
        }
        panic!("condition not reached in {} ticks", max_ticks);
    }

    fn started_show(config: ShowConfig) -> (Show, Scene) {
        let mut scene = Scene::new();
        let mut show = Show::new(config, 1234, (1280.0, 720.0));
        show.prepare(&mut scene);
        assert!(show.start());
        (show, scene)
    }

    #[test]
    fn test_waits_for_start_gate() {
        let mut scene = Scene::new();
        let mut show = Show::new(ShowConfig::default(), 1, (800.0, 600.0));
        show.prepare(&mut scene);
        for _ in 0..1000 {
            show.tick(SHOW_DT, &mut scene);
        }
        assert_eq!(show.phase(), ShowPhase::Waiting);
        assert!(show.drain_events().is_empty());
        assert_eq!(show.sequencer().state(), SequenceState::Idle);
        // Button pulse keeps running
        let scale = scene.get(Target::StartButton, Prop::Scale);
        assert!(scale >= 1.0 && scale <= BUTTON_PULSE_SCALE);
    }

    #[test]
    fn test_second_start_is_noop() {
        let (mut show, mut scene) = started_show(ShowConfig::default());
        assert_eq!(
            show.drain_events(),
            vec![ShowEvent::MusicRequested, ShowEvent::FullscreenRequested]
        );
        show.tick(SHOW_DT, &mut scene);

        assert!(!show.start());
        assert!(show.drain_events().is_empty());
        assert_eq!(show.phase(), ShowPhase::Intro);
    }

    #[test]
    fn test_start_screen_fades_then_first_photo_after_gap() {
        let (mut show, mut scene) = started_show(ShowConfig::default());
        show.drain_events();

        let log = run_until(&mut show, &mut scene, 10_000, |s| s.phase() == ShowPhase::Playing);
        let hidden = log
            .iter()
            .find(|(_, e)| *e == ShowEvent::StartScreenHidden)
            .map(|(t, _)| *t)
            .unwrap();
        let first = log
            .iter()
            .find(|(_, e)| *e == ShowEvent::PhotoStarted(0))
            .map(|(t, _)| *t)
            .unwrap();

        let fade_secs = (hidden + 1) as f32 * SHOW_DT;
        assert!((fade_secs - START_FADE_DURATION).abs() <= SHOW_DT);
        let gap_secs = (first - hidden) as f32 * SHOW_DT;
        assert!((gap_secs - START_DELAY).abs() <= SHOW_DT);
        assert_eq!(scene.visibility(Target::StartScreen), Some(false));
        assert_eq!(scene.get(Target::StartScreen, Prop::Opacity), 0.0);
    }

    #[test]
    fn test_full_reel_scenario() {
        let (mut show, mut scene) = started_show(ShowConfig::default());
        let mut log: Vec<(usize, ShowEvent)> =
            show.drain_events().into_iter().map(|e| (0, e)).collect();
        log.extend(run_until(&mut show, &mut scene, 100_000, |s| {
            s.confetti().is_running()
        }));
        let events: Vec<ShowEvent> = log.iter().map(|(_, e)| *e).collect();

        let started: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                ShowEvent::PhotoStarted(i) => Some(*i),
                _ => None,
            })
            .collect();
        assert_eq!(started, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(show.effects().fired(EffectKind::Flash), 3);
        assert_eq!(show.effects().fired(EffectKind::Shake), 3);

        let position = |event: ShowEvent| events.iter().position(|e| *e == event).unwrap();
        assert!(position(ShowEvent::PhotoStarted(5)) < position(ShowEvent::SequenceComplete));
        assert_eq!(
            position(ShowEvent::SequenceComplete) + 1,
            position(ShowEvent::FinaleStarted)
        );
        assert!(position(ShowEvent::FinaleStarted) < position(ShowEvent::ConfettiStarted));
        assert_eq!(events.iter().filter(|e| **e == ShowEvent::FinaleStarted).count(), 1);

        let tick_of = |event: ShowEvent| log.iter().find(|(_, e)| *e == event).unwrap().0;
        let cue = (tick_of(ShowEvent::ConfettiStarted) - tick_of(ShowEvent::FinaleStarted)) as f32
            * SHOW_DT;
        assert!((cue - CONFETTI_DELAY).abs() <= 2.0 * SHOW_DT);

        assert!(show.is_confetti_visible());
        assert_eq!(scene.visibility(Target::Confetti), Some(true));
        assert!(scene.is_visible(Target::Message));
        assert_eq!(show.confetti().particles().len(), CONFETTI_COUNT);
        assert_eq!(show.confetti().size(), (1280.0, 720.0));

        for _ in 0..10 {
            show.frame();
        }
        assert_eq!(show.confetti().frames(), 10);
    }

    #[test]
    fn test_empty_reel_goes_straight_to_finale() {
        let config = ShowConfig {
            photo_paths: Vec::new(),
            photo_steps: Vec::new(),
            ..ShowConfig::default()
        };
        let (mut show, mut scene) = started_show(config);
        let log = run_until(&mut show, &mut scene, 10_000, |s| s.phase() == ShowPhase::Finale);
        let events: Vec<ShowEvent> = log.into_iter().map(|(_, e)| e).collect();
        assert_eq!(
            events,
            vec![
                ShowEvent::MusicRequested,
                ShowEvent::FullscreenRequested,
                ShowEvent::StartScreenHidden,
                ShowEvent::SequenceComplete,
                ShowEvent::FinaleStarted,
            ]
        );
    }

    #[test]
    fn test_resize_only_applies_while_confetti_visible() {
        let config = ShowConfig {
            photo_paths: vec!["only.jpg".to_string()],
            photo_steps: vec![PhotoStep::new(1.0, 1.1, 0.0, 0.0, 0.0, false)],
            ..ShowConfig::default()
        };
        let (mut show, mut scene) = started_show(config);

        assert!(!show.resize(1024.0, 768.0));
        assert_eq!(show.confetti().size(), (0.0, 0.0));

        run_until(&mut show, &mut scene, 100_000, |s| s.confetti().is_running());
        // The confetti picks up the latest viewport when it starts
        assert_eq!(show.confetti().size(), (1024.0, 768.0));

        assert!(show.resize(1920.0, 1080.0));
        assert_eq!(show.confetti().size(), (1920.0, 1080.0));
        assert_eq!(show.confetti().particles().len(), CONFETTI_COUNT);
    }

    #[test]
    fn test_effects_start_with_their_photo() {
        let config = ShowConfig {
            photo_paths: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            photo_steps: vec![
                PhotoStep::new(1.0, 1.1, 0.0, 0.0, 0.0, false),
                PhotoStep::new(1.0, 1.1, 0.0, 0.0, 0.0, true),
            ],
            ..ShowConfig::default()
        };
        let (mut show, mut scene) = started_show(config);
        let log = run_until(&mut show, &mut scene, 100_000, |s| {
            s.sequencer().state() == SequenceState::Playing(1)
        });
        assert!(log.iter().any(|(_, e)| *e == ShowEvent::FlashFired(1)));

        let photo = show.sequencer().timeline().map(|t| t.elapsed());
        assert!(photo.is_some());
        assert_eq!(show.effects().elapsed(EffectKind::Flash), photo);
        assert_eq!(show.effects().elapsed(EffectKind::Shake), photo);
    }

    #[test]
    fn test_frame_before_confetti_is_noop() {
        let (mut show, _) = started_show(ShowConfig::default());
        show.frame();
        assert_eq!(show.confetti().frames(), 0);
    }
}

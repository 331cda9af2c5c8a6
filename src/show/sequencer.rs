//! Photo sequencer
//!
//! Walks the reel one photo at a time. Each photo gets one composed
//! timeline (fade in, camera move, fade out); when it completes the cursor
//! moves to the next photo. Reaching the end of the reel is terminal.

use super::ShowEvent;
use super::config::{PhotoStep, ShowConfig};
use super::effects::{EffectKind, EffectTriggers};
use crate::anim::{Ease, Position, Progress, Prop, Surface, Target, Timeline, Tween};
use crate::consts::SLIDE_BASE_Z;

/// Where the sequencer is in the reel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceState {
    /// Not started
    #[default]
    Idle,
    /// Animating the photo at this index
    Playing(usize),
    /// Every photo has been shown
    Finished,
}

/// Build the composed animation for one photo.
///
/// The fade-out is anchored to the camera move so both end together.
pub fn photo_timeline(index: usize, step: &PhotoStep, fade_in: f32, fade_out: f32) -> Timeline {
    let slide = Target::Slide(index);
    let photo = Target::Photo(index);
    let camera = Ease::Power1InOut;

    let mut timeline = Timeline::new().with(
        Tween::to(slide, Prop::Opacity, 1.0, fade_in).with_ease(Ease::Power2Out),
        Position::Append,
    );
    for (prop, value) in [
        (Prop::Scale, step.zoom_factor),
        (Prop::X, step.translate_x),
        (Prop::Y, step.translate_y),
        (Prop::Rotation, step.rotate_degrees),
    ] {
        timeline.push(
            Tween::to(photo, prop, value, step.duration).with_ease(camera),
            Position::WithPrevious,
        );
    }
    timeline.with(
        Tween::to(slide, Prop::Opacity, 0.0, fade_out).with_ease(Ease::Power2In),
        Position::OverlapPrevious(fade_out),
    )
}

/// Owns the reel cursor and the current photo's timeline
#[derive(Debug, Clone, Default)]
pub struct PhotoSequencer {
    state: SequenceState,
    cursor: usize,
    timeline: Option<Timeline>,
}

impl PhotoSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    /// Index of the photo being shown; equals the photo count once finished
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Timeline of the photo currently on screen
    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    /// Show the photo at `index`, or finish if the reel is exhausted.
    /// `lead` is how far the clock already is past the photo's start; effects
    /// fired here are advanced by it so they stay in step with the photo.
    pub fn advance(
        &mut self,
        index: usize,
        lead: f32,
        config: &ShowConfig,
        effects: &mut EffectTriggers,
        surface: &mut dyn Surface,
        events: &mut Vec<ShowEvent>,
    ) -> SequenceState {
        let count = config.photo_count();
        if index >= count {
            self.cursor = count;
            self.timeline = None;
            self.state = SequenceState::Finished;
            log::info!("Photo sequence complete ({} photos)", count);
            events.push(ShowEvent::SequenceComplete);
            return self.state;
        }

        let Some(step) = config.step_for(index).copied() else {
            // Only reachable with an unvalidated config that has photos but no timings
            log::warn!("No timing for photo {}; skipping", index);
            return self.advance(index + 1, lead, config, effects, surface, events);
        };

        if step.flash_enabled {
            effects.fire(EffectKind::Flash, config.flash_duration);
            events.push(ShowEvent::FlashFired(index));
            effects.fire(EffectKind::Shake, config.flash_duration);
            events.push(ShowEvent::ShakeFired(index));
            effects.tick(lead, surface);
        }

        let slide = Target::Slide(index);
        let photo = Target::Photo(index);
        surface.set(slide, Prop::Opacity, 0.0);
        surface.set(slide, Prop::ZIndex, SLIDE_BASE_Z + index as f32);
        for prop in [Prop::Scale, Prop::X, Prop::Y, Prop::Rotation] {
            surface.set(photo, prop, prop.neutral());
        }

        log::debug!("Photo {} for {:.2}s", index, step.duration);
        self.cursor = index;
        self.timeline = Some(photo_timeline(
            index,
            &step,
            config.fade_in_duration,
            config.fade_out_duration,
        ));
        self.state = SequenceState::Playing(index);
        events.push(ShowEvent::PhotoStarted(index));
        self.state
    }

    /// Advance the current photo by `dt`, chaining into the next photo when it
    /// completes. Returns the unused part of `dt` if the reel finished during
    /// this call.
    pub fn tick(
        &mut self,
        dt: f32,
        config: &ShowConfig,
        effects: &mut EffectTriggers,
        surface: &mut dyn Surface,
        events: &mut Vec<ShowEvent>,
    ) -> Option<f32> {
        let mut dt = dt;
        while let SequenceState::Playing(index) = self.state {
            let timeline = self.timeline.as_mut()?;
            match timeline.advance(dt, surface) {
                Progress::Running => return None,
                Progress::Complete { overflow } => {
                    dt = overflow;
                    if self.advance(index + 1, dt, config, effects, surface, events)
                        == SequenceState::Finished
                    {
                        return Some(dt);
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::Scene;
    use crate::consts::SHOW_DT;
    use proptest::prelude::*;

    fn config_with(photos: usize, steps: Vec<PhotoStep>) -> ShowConfig {
        ShowConfig {
            photo_paths: (0..photos).map(|i| format!("p{}.jpg", i)).collect(),
            photo_steps: steps,
            ..ShowConfig::default()
        }
    }

    /// Run the reel to completion, returning every event emitted
    fn run_reel(config: &ShowConfig) -> (Vec<ShowEvent>, Scene) {
        let mut sequencer = PhotoSequencer::new();
        let mut effects = EffectTriggers::new();
        let mut scene = Scene::new();
        let mut events = Vec::new();

        sequencer.advance(0, 0.0, config, &mut effects, &mut scene, &mut events);
        let mut ticks = 0;
        while sequencer.state() != SequenceState::Finished {
            sequencer.tick(SHOW_DT, config, &mut effects, &mut scene, &mut events);
            effects.tick(SHOW_DT, &mut scene);
            ticks += 1;
            assert!(ticks < 1_000_000, "sequence never finished");
        }
        (events, scene)
    }

    #[test]
    fn test_fade_out_ends_with_camera_move() {
        let config = ShowConfig::default();
        for (index, step) in config.photo_steps.iter().enumerate() {
            let timeline =
                photo_timeline(index, step, config.fade_in_duration, config.fade_out_duration);
            assert_eq!(timeline.len(), 6);

            let (fade_in_start, fade_in_end) = timeline.span(0).unwrap();
            assert_eq!(fade_in_start, 0.0);
            assert!((fade_in_end - config.fade_in_duration).abs() < 1e-5);

            for camera in 1..=4 {
                assert_eq!(timeline.span(camera), Some((0.0, step.duration)));
            }

            let (fade_out_start, fade_out_end) = timeline.span(5).unwrap();
            assert!((fade_out_end - step.duration).abs() < 1e-5);
            assert!((fade_out_start - (step.duration - config.fade_out_duration)).abs() < 1e-5);
            assert!((timeline.duration() - step.duration).abs() < 1e-5);
        }
    }

    #[test]
    fn test_fade_out_clamps_to_timeline_start() {
        let step = PhotoStep::new(0.5, 1.1, 0.0, 0.0, 0.0, false);
        let timeline = photo_timeline(0, &step, 0.8, 0.6);
        let (start, end) = timeline.span(5).unwrap();
        assert_eq!(start, 0.0);
        assert!((end - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_step_shorter_than_fade_in_ends_hidden() {
        let config = config_with(1, vec![PhotoStep::new(0.7, 1.1, 0.0, 0.0, 0.0, false)]);
        assert!(config.validate().is_ok());

        let (events, scene) = run_reel(&config);
        assert_eq!(events.last(), Some(&ShowEvent::SequenceComplete));
        assert_eq!(scene.get(Target::Slide(0), Prop::Opacity), 0.0);
    }

    #[test]
    fn test_advance_resets_photo_to_neutral() {
        let config = ShowConfig::default();
        let mut sequencer = PhotoSequencer::new();
        let mut effects = EffectTriggers::new();
        let mut scene = Scene::new();
        let mut events = Vec::new();

        scene.set(Target::Photo(1), Prop::Scale, 3.0);
        scene.set(Target::Photo(1), Prop::X, 99.0);
        scene.set(Target::Photo(1), Prop::Rotation, 45.0);

        sequencer.advance(1, 0.0, &config, &mut effects, &mut scene, &mut events);
        assert_eq!(sequencer.state(), SequenceState::Playing(1));
        assert_eq!(scene.get(Target::Photo(1), Prop::Scale), 1.0);
        assert_eq!(scene.get(Target::Photo(1), Prop::X), 0.0);
        assert_eq!(scene.get(Target::Photo(1), Prop::Rotation), 0.0);
        assert_eq!(scene.get(Target::Slide(1), Prop::Opacity), 0.0);
        assert_eq!(scene.get(Target::Slide(1), Prop::ZIndex), SLIDE_BASE_Z + 1.0);
    }

    #[test]
    fn test_camera_move_lands_on_step_values() {
        let config = ShowConfig::default();
        let (_, scene) = run_reel(&config);
        for (index, step) in config.photo_steps.iter().enumerate() {
            let photo = Target::Photo(index);
            assert!((scene.get(photo, Prop::Scale) - step.zoom_factor).abs() < 1e-5);
            assert!((scene.get(photo, Prop::X) - step.translate_x).abs() < 1e-5);
            assert!((scene.get(photo, Prop::Y) - step.translate_y).abs() < 1e-5);
            assert!((scene.get(photo, Prop::Rotation) - step.rotate_degrees).abs() < 1e-5);
            assert_eq!(scene.get(Target::Slide(index), Prop::Opacity), 0.0);
        }
    }

    #[test]
    fn test_later_photos_stack_above_earlier() {
        let config = ShowConfig::default();
        let (_, scene) = run_reel(&config);
        for index in 1..config.photo_count() {
            assert!(
                scene.get(Target::Slide(index), Prop::ZIndex)
                    > scene.get(Target::Slide(index - 1), Prop::ZIndex)
            );
        }
    }

    #[test]
    fn test_empty_reel_finishes_immediately() {
        let config = config_with(0, Vec::new());
        let mut sequencer = PhotoSequencer::new();
        let mut effects = EffectTriggers::new();
        let mut scene = Scene::new();
        let mut events = Vec::new();

        let state = sequencer.advance(0, 0.0, &config, &mut effects, &mut scene, &mut events);
        assert_eq!(state, SequenceState::Finished);
        assert_eq!(events, vec![ShowEvent::SequenceComplete]);
        assert_eq!(sequencer.cursor(), 0);
        assert_eq!(scene.writes(), 0);
    }

    #[test]
    fn test_flash_only_on_flash_steps() {
        let config = ShowConfig::default();
        let (events, _) = run_reel(&config);
        for (index, step) in config.photo_steps.iter().enumerate() {
            let flashes = events.iter().filter(|e| **e == ShowEvent::FlashFired(index)).count();
            let shakes = events.iter().filter(|e| **e == ShowEvent::ShakeFired(index)).count();
            let expected = usize::from(step.flash_enabled);
            assert_eq!(flashes, expected, "flash count for photo {}", index);
            assert_eq!(shakes, expected, "shake count for photo {}", index);
        }
    }

    #[test]
    fn test_effects_fire_before_photo_starts() {
        let config = ShowConfig::default();
        let mut sequencer = PhotoSequencer::new();
        let mut effects = EffectTriggers::new();
        let mut scene = Scene::new();
        let mut events = Vec::new();

        sequencer.advance(0, 0.0, &config, &mut effects, &mut scene, &mut events);
        assert_eq!(
            events,
            vec![
                ShowEvent::FlashFired(0),
                ShowEvent::ShakeFired(0),
                ShowEvent::PhotoStarted(0),
            ]
        );
        assert!(effects.is_active(EffectKind::Flash));
        assert!(effects.is_active(EffectKind::Shake));
    }

    #[test]
    fn test_total_time_matches_step_durations() {
        let config = ShowConfig::default();
        let mut sequencer = PhotoSequencer::new();
        let mut effects = EffectTriggers::new();
        let mut scene = Scene::new();
        let mut events = Vec::new();

        sequencer.advance(0, 0.0, &config, &mut effects, &mut scene, &mut events);
        let mut elapsed = 0.0;
        let overflow = loop {
            elapsed += SHOW_DT;
            if let Some(overflow) =
                sequencer.tick(SHOW_DT, &config, &mut effects, &mut scene, &mut events)
            {
                break overflow;
            }
        };
        let expected: f32 = config.photo_steps.iter().map(|s| s.duration).sum();
        assert!(((elapsed - overflow) - expected).abs() < 0.01);
    }

    proptest! {
        #[test]
        fn prop_every_photo_once_in_order(photos in 0usize..10, steps in 1usize..4) {
            let steps = (0..steps)
                .map(|i| PhotoStep::new(1.0 + 0.25 * i as f32, 1.1, 5.0, -5.0, 1.0, i == 0))
                .collect();
            let config = config_with(photos, steps);
            let (events, _) = run_reel(&config);

            let started: Vec<usize> = events
                .iter()
                .filter_map(|e| match e {
                    ShowEvent::PhotoStarted(i) => Some(*i),
                    _ => None,
                })
                .collect();
            prop_assert_eq!(started, (0..photos).collect::<Vec<_>>());

            let completions = events.iter().filter(|e| **e == ShowEvent::SequenceComplete).count();
            prop_assert_eq!(completions, 1);
            prop_assert_eq!(events.last(), Some(&ShowEvent::SequenceComplete));
        }

        #[test]
        fn prop_fallback_step_drives_extra_photos(photos in 2usize..8) {
            let first = PhotoStep::new(1.0, 1.3, 12.0, -7.0, 3.0, false);
            let config = config_with(photos, vec![first]);
            let (_, scene) = run_reel(&config);
            for index in 0..photos {
                prop_assert!((scene.get(Target::Photo(index), Prop::Scale) - first.zoom_factor).abs() < 1e-5);
                prop_assert!((scene.get(Target::Photo(index), Prop::X) - first.translate_x).abs() < 1e-5);
                prop_assert!((scene.get(Target::Photo(index), Prop::Y) - first.translate_y).abs() < 1e-5);
                prop_assert!((scene.get(Target::Photo(index), Prop::Rotation) - first.rotate_degrees).abs() < 1e-5);
            }
        }
    }
}

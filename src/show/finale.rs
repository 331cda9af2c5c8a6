//! Closing message and confetti cue
//!
//! Runs once, when the photo sequence completes: the message fades in, its
//! headline springs into place and then glows forever, and after a fixed
//! delay the confetti canvas is revealed.

use super::delay::Delay;
use crate::anim::{Ease, Position, Prop, Surface, Target, Timeline, Tween};
use crate::consts::*;

/// Elastic curve for the headline entrance
pub const ENTRANCE_EASE: Ease = Ease::ElasticOut {
    amplitude: 1.0,
    period: 0.6,
};

/// Message fade, headline entrance and the endless glow pulse
pub fn finale_timeline() -> Timeline {
    let text = Target::MessageText;
    let entrance = Position::At(FINALE_ENTRANCE_DELAY);

    Timeline::new()
        .with(
            Tween::to(Target::Message, Prop::Opacity, 1.0, FINALE_FADE_DURATION)
                .with_ease(Ease::Power2InOut),
            Position::At(0.0),
        )
        .with(
            Tween::from_to(text, Prop::Scale, FINALE_ENTRANCE_SCALE, 1.0, FINALE_ENTRANCE_DURATION)
                .with_ease(ENTRANCE_EASE),
            entrance,
        )
        .with(
            Tween::from_to(text, Prop::Opacity, 0.0, 1.0, FINALE_ENTRANCE_DURATION)
                .with_ease(ENTRANCE_EASE),
            entrance,
        )
        .with(
            Tween::from_to(text, Prop::Y, FINALE_ENTRANCE_OFFSET_Y, 0.0, FINALE_ENTRANCE_DURATION)
                .with_ease(ENTRANCE_EASE),
            entrance,
        )
        .with(
            Tween::to(text, Prop::Glow, 1.0, GLOW_HALF_CYCLE)
                .with_ease(Ease::SineInOut)
                .yoyo_forever(),
            Position::At(0.0),
        )
}

/// Finale controller
#[derive(Debug, Clone, Default)]
pub struct Finale {
    timeline: Option<Timeline>,
    confetti_cue: Option<Delay>,
}

impl Finale {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_begun(&self) -> bool {
        self.timeline.is_some()
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    /// Start the finale. A second call is ignored.
    pub fn begin(&mut self, surface: &mut dyn Surface) {
        if self.has_begun() {
            log::warn!("Finale already running");
            return;
        }
        log::info!("Finale begins");
        surface.set_visible(Target::Message, true);
        self.timeline = Some(finale_timeline());
        self.confetti_cue = Some(Delay::new(CONFETTI_DELAY));
    }

    /// Advance the finale animations. Returns `true` on the tick the confetti
    /// should start.
    pub fn tick(&mut self, dt: f32, surface: &mut dyn Surface) -> bool {
        let Some(timeline) = self.timeline.as_mut() else {
            return false;
        };
        // The glow pulse repeats forever, so the timeline never completes
        timeline.advance(dt, surface);
        self.confetti_cue
            .as_mut()
            .is_some_and(|cue| cue.advance(dt).is_some())
    }
}

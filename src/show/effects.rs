//! Flash and camera-shake effects
//!
//! Fire-and-forget timelines that run alongside the photo chain. Each
//! effect owns at most one timeline; firing an effect that is still running
//! restarts it from the property's current value, so rapid re-triggers never
//! stack and every run still settles on neutral.

use crate::anim::{Ease, Position, Progress, Prop, Surface, Target, Timeline, Tween};
use crate::consts::{FLASH_PEAK_OPACITY, SHAKE_PATTERN, SHAKE_STEP_DURATION};

/// Which effect fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Flash,
    Shake,
}

/// Flash overlay pulse: rise over `rise`, decay over twice that
pub fn flash_timeline(rise: f32) -> Timeline {
    Timeline::new()
        .with(
            Tween::to(Target::Flash, Prop::Opacity, FLASH_PEAK_OPACITY, rise).with_ease(Ease::Power2Out),
            Position::Append,
        )
        .with(
            Tween::to(Target::Flash, Prop::Opacity, 0.0, rise * 2.0).with_ease(Ease::Power2In),
            Position::Append,
        )
}

/// Horizontal micro-displacement of the stage, ending at rest
pub fn shake_timeline() -> Timeline {
    SHAKE_PATTERN
        .iter()
        .fold(Timeline::new(), |timeline, &x| {
            timeline.with(
                Tween::to(Target::Stage, Prop::X, x, SHAKE_STEP_DURATION).with_ease(Ease::Power1InOut),
                Position::Append,
            )
        })
}

/// Active flash/shake timelines
#[derive(Debug, Clone, Default)]
pub struct EffectTriggers {
    flash: Option<Timeline>,
    shake: Option<Timeline>,
    flash_count: usize,
    shake_count: usize,
}

impl EffectTriggers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fire(&mut self, kind: EffectKind, flash_rise: f32) {
        let (slot, count, timeline) = match kind {
            EffectKind::Flash => (&mut self.flash, &mut self.flash_count, flash_timeline(flash_rise)),
            EffectKind::Shake => (&mut self.shake, &mut self.shake_count, shake_timeline()),
        };
        if slot.is_some() {
            log::debug!("{:?} re-triggered while running; restarting", kind);
        }
        *slot = Some(timeline);
        *count += 1;
    }

    /// Advance running effects, dropping the ones that finished
    pub fn tick(&mut self, dt: f32, surface: &mut dyn Surface) {
        for slot in [&mut self.flash, &mut self.shake] {
            let finished = match slot {
                Some(timeline) => matches!(timeline.advance(dt, surface), Progress::Complete { .. }),
                None => false,
            };
            if finished {
                *slot = None;
            }
        }
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        match kind {
            EffectKind::Flash => self.flash.is_some(),
            EffectKind::Shake => self.shake.is_some(),
        }
    }

    /// Seconds into the running `kind` effect
    pub fn elapsed(&self, kind: EffectKind) -> Option<f32> {
        match kind {
            EffectKind::Flash => self.flash.as_ref().map(Timeline::elapsed),
            EffectKind::Shake => self.shake.as_ref().map(Timeline::elapsed),
        }
    }

    /// How many times `kind` has fired this run
    pub fn fired(&self, kind: EffectKind) -> usize {
        match kind {
            EffectKind::Flash => self.flash_count,
            EffectKind::Shake => self.shake_count,
        }
    }
}

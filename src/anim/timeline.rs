//! Composed animations
//!
//! A [`Timeline`] holds tweens placed at absolute offsets, resolved from
//! relative [`Position`]s when each tween is added. Advancing the timeline
//! samples every tween whose window has opened and writes the result to a
//! [`Surface`].

use super::easing::Ease;
use super::surface::{Prop, Surface, Target};
use crate::lerp;

/// Slack for float drift when comparing accumulated time against ends
const TIME_EPSILON: f64 = 1e-5;

/// Where a tween starts relative to what is already on the timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// After everything currently on the timeline has finished
    Append,
    /// At the same instant as the previously added tween
    WithPrevious,
    /// This many seconds before the previously added tween ends
    OverlapPrevious(f32),
    /// Absolute offset from the timeline start
    At(f32),
}

/// How a tween behaves after reaching its end value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    #[default]
    Once,
    /// Bounce between start and end forever; each half-cycle lasts `duration`
    YoyoForever,
}

/// Interpolation of one property on one target
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub target: Target,
    pub prop: Prop,
    /// Explicit start value. `None` captures the live value when the tween opens.
    pub from: Option<f32>,
    pub to: f32,
    /// Seconds
    pub duration: f32,
    pub ease: Ease,
    pub repeat: Repeat,
}

impl Tween {
    /// Tween from whatever the property holds when the tween starts
    pub fn to(target: Target, prop: Prop, to: f32, duration: f32) -> Self {
        Self {
            target,
            prop,
            from: None,
            to,
            duration: duration.max(0.0),
            ease: Ease::default(),
            repeat: Repeat::Once,
        }
    }

    /// Tween between two explicit values. The start value is applied as soon
    /// as the owning timeline first advances, even if the tween is delayed.
    pub fn from_to(target: Target, prop: Prop, from: f32, to: f32, duration: f32) -> Self {
        Self {
            from: Some(from),
            ..Self::to(target, prop, to, duration)
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn yoyo_forever(mut self) -> Self {
        self.repeat = Repeat::YoyoForever;
        self
    }

    /// Total active time (infinite for repeating tweens)
    pub fn total_duration(&self) -> f32 {
        match self.repeat {
            Repeat::Once => self.duration,
            Repeat::YoyoForever => f32::INFINITY,
        }
    }

    /// Value at `local` seconds after the tween opened
    fn sample(&self, local: f32, from: f32) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = local / self.duration;
        let progress = match self.repeat {
            Repeat::Once => t.min(1.0),
            Repeat::YoyoForever => {
                let cycle = t.floor();
                let frac = t - cycle;
                if (cycle as u64) % 2 == 0 { frac } else { 1.0 - frac }
            }
        };
        lerp(from, self.to, self.ease.apply(progress))
    }
}

/// A tween pinned to an absolute start offset
#[derive(Debug, Clone)]
struct Placed {
    tween: Tween,
    start: f32,
    /// Start value in use (explicit or captured)
    from: Option<f32>,
    done: bool,
}

impl Placed {
    fn end(&self) -> f32 {
        self.start + self.tween.total_duration()
    }

    fn is_open(&self, time: f64) -> bool {
        time + TIME_EPSILON >= self.start as f64
    }

    fn animates(&self, target: Target, prop: Prop) -> bool {
        self.tween.target == target && self.tween.prop == prop
    }

    fn render(&mut self, time: f64, surface: &mut dyn Surface) {
        if self.done || !self.is_open(time) {
            return;
        }
        let tween = &self.tween;
        let from = *self
            .from
            .get_or_insert_with(|| surface.get(tween.target, tween.prop));
        let mut local = (time - self.start as f64).max(0.0);

        match tween.repeat {
            Repeat::Once if time + TIME_EPSILON >= (self.start + tween.duration) as f64 => {
                surface.set(tween.target, tween.prop, tween.to);
                self.done = true;
            }
            Repeat::Once => surface.set(tween.target, tween.prop, tween.sample(local as f32, from)),
            Repeat::YoyoForever => {
                // Keep the local clock within one full cycle
                if tween.duration > 0.0 {
                    local %= 2.0 * tween.duration as f64;
                }
                surface.set(tween.target, tween.prop, tween.sample(local as f32, from));
            }
        }
    }
}

/// Result of advancing a timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    Running,
    /// Every tween has finished; `overflow` is the part of the step past the end
    Complete { overflow: f32 },
}

/// A group of tweens with defined relative start offsets
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    placed: Vec<Placed>,
    /// Playhead; never-ending timelines run for days
    time: f64,
    primed: bool,
    complete: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Timeline::push`]
    pub fn with(mut self, tween: Tween, position: Position) -> Self {
        self.push(tween, position);
        self
    }

    /// Place a tween on the timeline
    pub fn push(&mut self, tween: Tween, position: Position) {
        let start = self.resolve(position);
        self.placed.push(Placed {
            from: tween.from,
            tween,
            start,
            done: false,
        });
    }

    fn resolve(&self, position: Position) -> f32 {
        let previous = self.placed.last();
        match position {
            Position::Append => self.finite_end(),
            Position::WithPrevious => previous.map_or(0.0, |p| p.start),
            Position::OverlapPrevious(secs) => previous.map_or(0.0, |p| (p.end() - secs).max(0.0)),
            Position::At(secs) => secs.max(0.0),
        }
    }

    /// End of the last finite tween
    fn finite_end(&self) -> f32 {
        self.placed
            .iter()
            .map(Placed::end)
            .filter(|end| end.is_finite())
            .fold(0.0, f32::max)
    }

    /// Time at which every tween has finished (infinite if any repeats forever)
    pub fn duration(&self) -> f32 {
        self.placed.iter().map(Placed::end).fold(0.0, f32::max)
    }

    /// Start and end offsets of the tween added at `index`
    pub fn span(&self, index: usize) -> Option<(f32, f32)> {
        self.placed.get(index).map(|p| (p.start, p.end()))
    }

    /// The tween added at `index`
    pub fn tween(&self, index: usize) -> Option<&Tween> {
        self.placed.get(index).map(|p| &p.tween)
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Seconds advanced so far
    pub fn elapsed(&self) -> f32 {
        self.time as f32
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Move the playhead forward by `dt` seconds and render every open tween
    pub fn advance(&mut self, dt: f32, surface: &mut dyn Surface) -> Progress {
        if self.complete {
            return Progress::Complete { overflow: dt };
        }
        if !self.primed {
            // Explicit start values show immediately, even for delayed tweens
            for placed in &self.placed {
                if let Some(from) = placed.tween.from {
                    surface.set(placed.tween.target, placed.tween.prop, from);
                }
            }
            self.primed = true;
        }

        self.time += dt as f64;
        for i in 0..self.placed.len() {
            self.placed[i].render(self.time, surface);

            // A later tween on the same property takes over once it opens
            let (target, prop) = (self.placed[i].tween.target, self.placed[i].tween.prop);
            let superseded = self.placed[i + 1..]
                .iter()
                .any(|later| later.animates(target, prop) && later.is_open(self.time));
            if superseded {
                self.placed[i].done = true;
            }
        }

        let end = self.duration() as f64;
        if self.time + TIME_EPSILON >= end {
            self.complete = true;
            Progress::Complete {
                overflow: (self.time - end).max(0.0) as f32,
            }
        } else {
            Progress::Running
        }
    }
}

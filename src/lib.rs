//! Photo Reel - A cinematic birthday slideshow for the browser
//!
//! Core modules:
//! - `anim`: Tween primitive (easing, timelines, animatable surfaces)
//! - `show`: Deterministic presentation state machine (photo reel, effects, finale, confetti)
//! - `platform`: Browser DOM/canvas bindings
//! - `audio`: Soundtrack playback

pub mod anim;
#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod show;

pub use anim::{Scene, Surface};
pub use show::{Show, ShowConfig, ShowEvent};

/// Presentation timing constants
pub mod consts {
    /// Fixed animation timestep (120 Hz)
    pub const SHOW_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default photo transition timings (seconds)
    pub const FADE_IN_DURATION: f32 = 0.8;
    pub const FADE_OUT_DURATION: f32 = 0.6;
    /// Flash rise time; the decay takes twice as long
    pub const FLASH_DURATION: f32 = 0.15;
    pub const FLASH_PEAK_OPACITY: f32 = 0.7;

    /// Camera shake stage offsets in pixels, ending at rest
    pub const SHAKE_PATTERN: [f32; 4] = [5.0, -5.0, 3.0, 0.0];
    pub const SHAKE_STEP_DURATION: f32 = 0.05;

    /// Stacking order of the first slide; later slides stack above
    pub const SLIDE_BASE_Z: f32 = 10.0;

    /// Start gate
    pub const START_FADE_DURATION: f32 = 1.0;
    /// Pause between the start screen disappearing and the first photo
    pub const START_DELAY: f32 = 0.3;
    pub const BUTTON_PULSE_SCALE: f32 = 1.05;
    pub const BUTTON_PULSE_DURATION: f32 = 1.2;
    pub const BUTTON_PRESS_SCALE: f32 = 0.9;
    pub const BUTTON_PRESS_DOWN: f32 = 0.1;
    pub const BUTTON_PRESS_UP: f32 = 0.2;

    /// Finale
    pub const FINALE_FADE_DURATION: f32 = 2.0;
    pub const FINALE_ENTRANCE_DELAY: f32 = 0.5;
    pub const FINALE_ENTRANCE_DURATION: f32 = 1.5;
    pub const FINALE_ENTRANCE_SCALE: f32 = 0.5;
    /// Headline starts this many pixels below its resting place
    pub const FINALE_ENTRANCE_OFFSET_Y: f32 = 100.0;
    /// Glow pulse half-cycle
    pub const GLOW_HALF_CYCLE: f32 = 1.5;
    /// Seconds from finale start until the confetti appears
    pub const CONFETTI_DELAY: f32 = 1.2;

    /// Confetti pool size
    pub const CONFETTI_COUNT: usize = 150;
    /// Where recycled pieces re-enter, just above the top edge
    pub const CONFETTI_RESPAWN_Y: f32 = -20.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

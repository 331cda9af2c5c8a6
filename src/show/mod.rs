//! Presentation state machine
//!
//! Everything that decides what happens when. This module must stay
//! deterministic and platform-free:
//! - Time advances only through `tick(dt)`
//! - Seeded RNG only
//! - Rendering goes through the `Surface` and `ConfettiCanvas` traits

pub mod config;
pub mod confetti;
pub mod delay;
pub mod director;
pub mod effects;
pub mod finale;
pub mod sequencer;

pub use config::{ConfigError, PhotoStep, ShowConfig};
pub use confetti::{CancelToken, Confetti, ConfettiCanvas, ConfettiState, PALETTE, Particle};
pub use director::{Show, ShowPhase};
pub use effects::{EffectKind, EffectTriggers};
pub use finale::Finale;
pub use sequencer::{PhotoSequencer, SequenceState};

/// Something the host may need to react to, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowEvent {
    /// Start gate fired: try to play the soundtrack
    MusicRequested,
    /// Start gate fired: try to go fullscreen
    FullscreenRequested,
    /// Start screen finished fading and was removed
    StartScreenHidden,
    FlashFired(usize),
    ShakeFired(usize),
    PhotoStarted(usize),
    /// Every photo has been shown
    SequenceComplete,
    FinaleStarted,
    /// Confetti canvas revealed and the particle pool is live
    ConfettiStarted,
}

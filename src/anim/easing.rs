//! Easing curves
//!
//! Named mappings from normalized time to normalized progress. The power
//! family follows the usual web animation naming: `Power1` is quadratic,
//! `Power2` is cubic.

use std::f32::consts::{PI, TAU};

/// Easing curve applied to a tween's normalized time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Ease {
    #[default]
    Linear,
    /// Quadratic, slow at both ends
    Power1InOut,
    /// Cubic, accelerating
    Power2In,
    /// Cubic, decelerating
    Power2Out,
    /// Cubic, slow at both ends
    Power2InOut,
    SineInOut,
    /// Springy overshoot that settles on the target
    ElasticOut { amplitude: f32, period: f32 },
}

impl Ease {
    /// Map `t` in [0, 1] to eased progress. Input is clamped.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Ease::Linear => t,
            Ease::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::Power2In => t * t * t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Ease::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }
}

/// Elastic ease-out. Amplitudes below 1 stretch the period instead of
/// shrinking the overshoot.
fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let amp = amplitude.max(1.0);
    let period = period / amplitude.min(1.0);
    let shift = period / TAU * (1.0 / amp).asin();
    amp * 2.0_f32.powf(-10.0 * t) * ((t - shift) * TAU / period).sin() + 1.0
}

//! Tween primitive
//!
//! Renderer-agnostic property animation:
//! - `easing`: named easing curves
//! - `surface`: the property store animations write into
//! - `timeline`: tweens composed with relative start offsets

pub mod easing;
pub mod surface;
pub mod timeline;

pub use easing::Ease;
pub use surface::{Prop, Scene, Surface, Target};
pub use timeline::{Position, Progress, Repeat, Timeline, Tween};

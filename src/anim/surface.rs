//! Renderable surface abstraction
//!
//! Animations never touch the DOM directly. They read and write numeric
//! properties on named targets through [`Surface`]; the browser host maps
//! these onto element styles, tests and the native dry run use [`Scene`].

use std::collections::HashMap;

/// A visual element the show animates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Full-page overlay holding the start button
    StartScreen,
    StartButton,
    /// Container every photo slide lives in (shaken by the shake effect)
    Stage,
    /// Photo slide container at the given index (faded in/out)
    Slide(usize),
    /// Image inside the slide at the given index (zoomed/panned/rotated)
    Photo(usize),
    /// White flash overlay
    Flash,
    /// Closing message container
    Message,
    /// Headline text inside the closing message
    MessageText,
    /// Confetti canvas
    Confetti,
}

/// An animatable numeric property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prop {
    Opacity,
    /// Horizontal offset in pixels
    X,
    /// Vertical offset in pixels
    Y,
    Scale,
    /// Rotation in degrees
    Rotation,
    /// Stacking order
    ZIndex,
    /// Text glow intensity (0 = resting, 1 = full)
    Glow,
}

impl Prop {
    /// Value of the property on an untouched element
    pub fn neutral(self) -> f32 {
        match self {
            Prop::Opacity | Prop::Scale => 1.0,
            Prop::X | Prop::Y | Prop::Rotation | Prop::ZIndex | Prop::Glow => 0.0,
        }
    }
}

/// Something animations can read from and write to
pub trait Surface {
    /// Current value of `prop` on `target`
    fn get(&self, target: Target, prop: Prop) -> f32;

    /// Set `prop` on `target` immediately
    fn set(&mut self, target: Target, prop: Prop, value: f32);

    /// Toggle the target's visible state (CSS-driven presentation)
    fn set_visible(&mut self, target: Target, visible: bool);
}

/// In-memory surface that records the latest value of every property
#[derive(Debug, Clone, Default)]
pub struct Scene {
    values: HashMap<(Target, Prop), f32>,
    visible: HashMap<Target, bool>,
    writes: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visibility last assigned to `target`, if any
    pub fn visibility(&self, target: Target) -> Option<bool> {
        self.visible.get(&target).copied()
    }

    pub fn is_visible(&self, target: Target) -> bool {
        self.visibility(target).unwrap_or(false)
    }

    /// Total number of property writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Surface for Scene {
    fn get(&self, target: Target, prop: Prop) -> f32 {
        self.values
            .get(&(target, prop))
            .copied()
            .unwrap_or_else(|| prop.neutral())
    }

    fn set(&mut self, target: Target, prop: Prop, value: f32) {
        self.values.insert((target, prop), value);
        self.writes += 1;
    }

    fn set_visible(&mut self, target: Target, visible: bool) {
        self.visible.insert(target, visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_defaults_to_neutral() {
        let scene = Scene::new();
        assert_eq!(scene.get(Target::Photo(0), Prop::Scale), 1.0);
        assert_eq!(scene.get(Target::Photo(0), Prop::Rotation), 0.0);
        assert_eq!(scene.get(Target::Flash, Prop::Opacity), 1.0);
        assert_eq!(scene.visibility(Target::Confetti), None);
    }

    #[test]
    fn test_scene_records_writes() {
        let mut scene = Scene::new();
        scene.set(Target::Stage, Prop::X, 5.0);
        scene.set(Target::Stage, Prop::X, -5.0);
        scene.set_visible(Target::Message, true);

        assert_eq!(scene.get(Target::Stage, Prop::X), -5.0);
        assert_eq!(scene.writes(), 2);
        assert!(scene.is_visible(Target::Message));
        assert!(!scene.is_visible(Target::Confetti));
    }
}

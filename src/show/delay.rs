//! One-shot countdown driven by the show clock

/// Fires once after a fixed number of seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delay {
    remaining: f32,
    fired: bool,
}

impl Delay {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds.max(0.0),
            fired: false,
        }
    }

    /// Count down by `dt`. Returns the time past the deadline on the tick the
    /// delay fires, `None` before and after.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if self.fired {
            return None;
        }
        self.remaining -= dt;
        if self.remaining <= 1e-5 {
            self.fired = true;
            Some((-self.remaining).max(0.0))
        } else {
            None
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_with_overflow() {
        let mut delay = Delay::new(0.3);
        assert_eq!(delay.advance(0.2), None);
        let overflow = delay.advance(0.25).unwrap();
        assert!((overflow - 0.15).abs() < 1e-5);
        assert!(delay.has_fired());
        assert_eq!(delay.advance(1.0), None);
    }

    #[test]
    fn test_zero_delay_fires_on_first_tick() {
        let mut delay = Delay::new(0.0);
        assert_eq!(delay.advance(0.0), Some(0.0));
    }
}

/// Animation snapshot produced by [`AnimationClock::tick`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationTime {
    /// Accumulated animation angle, in radians.
    pub angle: f32,

    /// Monotonic tick counter (0 for the first tick).
    pub frame_index: u64,
}

/// Fixed-step animation clock.
///
/// Each `tick()` adds `step` to the accumulated angle before returning the
/// snapshot, so the first frame already renders at `step`.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    angle: f32,
    step: f32,
    frame_index: u64,
}

impl AnimationClock {
    /// Default step: 0.002 rad per frame.
    pub const DEFAULT_STEP: f32 = 0.002;

    pub fn new(step: f32) -> Self {
        debug_assert!(step.is_finite());
        Self {
            angle: 0.0,
            step,
            frame_index: 0,
        }
    }

    /// Current angle without advancing.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advances the clock by one step and returns the new snapshot.
    pub fn tick(&mut self) -> AnimationTime {
        self.angle += self.step;

        let t = AnimationTime {
            angle: self.angle,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        t
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_advances_before_returning() {
        let mut clock = AnimationClock::default();
        let t = clock.tick();
        assert_eq!(t.frame_index, 0);
        assert!((t.angle - 0.002).abs() < 1e-7);
    }

    #[test]
    fn angle_is_frame_counted() {
        let mut clock = AnimationClock::new(0.5);
        for _ in 0..9 {
            clock.tick();
        }
        let t = clock.tick();
        assert_eq!(t.frame_index, 9);
        assert_eq!(t.angle, 5.0);
        assert_eq!(clock.angle(), 5.0);
    }
}

pub const DEGREES_PER_REVOLUTION: u16 = 360;

/// Bearing of the rotating radar arm. Advances one degree per frame.
#[derive(Debug, Clone, Default)]
pub struct SweepClock {
    angle: u16,
    revolutions: u64,
}

impl SweepClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn angle(&self) -> u16 {
        self.angle
    }

    /// Number of completed revolutions (wraps from 359 to 0).
    pub fn revolutions(&self) -> u64 {
        self.revolutions
    }

    /// Advances the arm by one degree. Returns `true` when the arm crossed
    /// from 359 back to 0.
    pub fn tick(&mut self) -> bool {
        self.angle = (self.angle + 1) % DEGREES_PER_REVOLUTION;
        let wrapped = self.angle == 0;
        if wrapped {
            self.revolutions += 1;
        }
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_one_degree() {
        let mut clock = SweepClock::new();
        assert_eq!(clock.angle(), 0);
        assert!(!clock.tick());
        assert_eq!(clock.angle(), 1);
    }

    #[test]
    fn test_wraps_once_per_revolution() {
        let mut clock = SweepClock::new();
        let wraps: Vec<usize> = (1..=720).filter(|_| clock.tick()).collect();

        assert_eq!(wraps, vec![360, 720]);
        assert_eq!(clock.angle(), 0);
        assert_eq!(clock.revolutions(), 2);
    }

    #[test]
    fn test_angle_stays_in_domain() {
        let mut clock = SweepClock::new();
        for _ in 0..1000 {
            clock.tick();
            assert!(clock.angle() < DEGREES_PER_REVOLUTION);
        }
    }
}

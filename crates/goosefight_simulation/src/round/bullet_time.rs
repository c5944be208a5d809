//! Global slow motion: combat bullet time + round-over "expelled" ramp.
//!
//! Оба таймера живут в реальном времени, а не в замедленном, поэтому
//! длительность замедления не зависит от коэффициента.

/// Countdown armed by landed hits.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BulletTime {
    remaining: f32,
}

impl BulletTime {
    pub fn is_armed(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// (Re)starts the countdown. Never accumulates: two hits in one tick or
    /// a hit during slow motion both leave exactly `duration` on the clock.
    pub fn arm(&mut self, duration: f32) {
        self.remaining = duration;
    }

    /// Consumes real time; returns the slow-down divisor for this tick.
    pub fn tick(&mut self, real_delta: f32, factor: f32) -> f32 {
        if !self.is_armed() {
            return 1.0;
        }

        self.remaining = (self.remaining - real_delta).max(0.0);
        if self.is_armed() {
            factor
        } else {
            1.0
        }
    }

    pub fn reset(&mut self) {
        self.remaining = 0.0;
    }
}

/// Divisor during the round-over beat: linear 1 → `factor` over `ramp` seconds.
pub fn expelled_divisor(elapsed: f32, ramp: f32, factor: f32) -> f32 {
    let progress = if ramp > 0.0 {
        (elapsed / ramp).clamp(0.0, 1.0)
    } else {
        1.0
    };
    1.0 + (factor - 1.0) * progress
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_is_wall_clock() {
        for factor in [2.0, 10.0, 100.0] {
            let mut bullet_time = BulletTime::default();
            bullet_time.arm(1.0);

            let mut real_elapsed = 0.0;
            let mut slowed = 0.0;
            while bullet_time.is_armed() {
                let divisor = bullet_time.tick(0.125, factor);
                real_elapsed += 0.125;
                slowed += 0.125 / divisor;
            }

            assert_eq!(real_elapsed, 1.0);
            // Последний тик уже не замедлен
            assert!((slowed - (0.875 / factor + 0.125)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_rearm_does_not_stack() {
        let mut bullet_time = BulletTime::default();
        bullet_time.arm(1.0);
        bullet_time.tick(0.5, 10.0);
        bullet_time.arm(1.0);
        bullet_time.arm(1.0);
        assert_eq!(bullet_time.remaining(), 1.0);
    }

    #[test]
    fn test_idle_bullet_time_is_neutral() {
        let mut bullet_time = BulletTime::default();
        assert_eq!(bullet_time.tick(0.016, 10.0), 1.0);
        assert!(!bullet_time.is_armed());
    }

    #[test]
    fn test_expelled_ramp() {
        assert_eq!(expelled_divisor(0.0, 1.0, 20.0), 1.0);
        assert_eq!(expelled_divisor(0.5, 1.0, 20.0), 10.5);
        assert_eq!(expelled_divisor(3.0, 1.0, 20.0), 20.0);
        assert_eq!(expelled_divisor(0.0, 0.0, 20.0), 20.0);
    }
}

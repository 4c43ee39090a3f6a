use tracing::debug;

/// Owns the scroll clock that feeds the `time` uniform.
///
/// `time` grows by `delta * speed` per frame and is never wrapped. The
/// displacement map tiles with period 1 in `time`, so one full cycle takes
/// `1 / speed` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDriver {
    time: f64,
    speed: f32,
}

impl AnimationDriver {
    pub fn new(speed: f32) -> Self {
        Self { time: 0.0, speed }
    }

    /// Advance by `delta_secs` of wall time and return the new `time`.
    pub fn advance(&mut self, delta_secs: f32) -> f32 {
        self.time += f64::from(delta_secs) * f64::from(self.speed);
        self.time as f32
    }

    pub fn time(&self) -> f32 {
        self.time as f32
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Change the scroll rate without disturbing the current `time`.
    pub fn set_speed(&mut self, speed: f32) {
        if speed != self.speed {
            debug!(from = self.speed, to = speed, "animation speed changed");
            self.speed = speed;
        }
    }
}

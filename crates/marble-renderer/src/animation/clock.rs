//! Frame timing.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Longest frame delta handed to the animation, so a stalled window does
/// not jump the marble forward.
const MAX_DELTA: Duration = Duration::from_millis(250);

/// Measures the time between frames and keeps a rolling FPS window.
pub struct FrameClock {
    frame_times: VecDeque<Duration>,
    last_frame: Option<Instant>,
    max_samples: usize,
}

impl FrameClock {
    /// Create a clock with a 120-sample rolling window.
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::new(),
            last_frame: None,
            max_samples: 120,
        }
    }

    /// Mark the start of a frame and return seconds since the previous one.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// [`tick`](Self::tick) with an explicit timestamp. The first tick
    /// returns 0.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let Some(last) = self.last_frame.replace(now) else {
            return 0.0;
        };
        let dt = now.saturating_duration_since(last);
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.max_samples {
            self.frame_times.pop_front();
        }
        dt.min(MAX_DELTA).as_secs_f32()
    }

    /// Average frames per second over the sample window.
    pub fn fps(&self) -> f64 {
        let total: f64 = self.frame_times.iter().map(|d| d.as_secs_f64()).sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.frame_times.len() as f64 / total
    }

    /// Average frame time in milliseconds.
    pub fn frame_time_ms(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let total: f64 = self.frame_times.iter().map(|d| d.as_secs_f64()).sum();
        (total / self.frame_times.len() as f64) * 1000.0
    }

    pub fn sample_count(&self) -> usize {
        self.frame_times.len()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.fps(), 0.0);
        assert_eq!(clock.frame_time_ms(), 0.0);
    }

    #[test]
    fn delta_between_ticks() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        let dt = clock.tick_at(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
        assert_eq!(clock.sample_count(), 1);
    }

    #[test]
    fn fps_over_window() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        for i in 0..=60u32 {
            clock.tick_at(start + Duration::from_micros(16_667) * i);
        }
        assert!((clock.fps() - 60.0).abs() < 0.1);
        assert!((clock.frame_time_ms() - 16.667).abs() < 0.01);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        let dt = clock.tick_at(start + Duration::from_secs(5));
        assert_eq!(dt, MAX_DELTA.as_secs_f32());
    }

    #[test]
    fn max_samples_respected() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        for i in 0..200u32 {
            clock.tick_at(start + Duration::from_millis(10) * i);
        }
        assert_eq!(clock.sample_count(), 120);
    }
}

//! Slide animation for fields that appear or disappear

use std::time::{Duration, Instant};

/// Which way a field is sliding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealDirection {
    Show,
    Hide,
}

/// Animation state for one field's show/hide transition
#[derive(Debug, Clone)]
pub struct RevealState {
    /// When the transition started
    pub start_time: Instant,
    pub direction: RevealDirection,
    pub duration: Duration,
    /// Fraction of the field's height currently on screen (0.0 to 1.0)
    pub visible_fraction: f32,
}

impl RevealState {
    /// Default slide duration
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(150);

    pub fn new(direction: RevealDirection, duration: Duration) -> Self {
        let mut state = Self {
            start_time: Instant::now(),
            direction,
            duration,
            visible_fraction: 0.0,
        };
        state.advance(Duration::ZERO);
        state
    }

    /// Update animation state based on elapsed time
    pub fn update(&mut self) {
        let elapsed = self.start_time.elapsed();
        self.advance(elapsed);
    }

    /// Set the state as if `elapsed` had passed since the start
    pub fn advance(&mut self, elapsed: Duration) {
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        // Cubic ease-out: fast start, gentle landing
        let eased = simple_easing::cubic_out(progress);
        self.visible_fraction = match self.direction {
            RevealDirection::Show => eased,
            RevealDirection::Hide => 1.0 - eased,
        };
    }

    /// Check if animation is complete
    pub fn is_complete(&self) -> bool {
        self.start_time.elapsed() >= self.duration
    }

    /// Rows to draw for a field that is `full_height` rows tall
    pub fn rows(&self, full_height: u16) -> u16 {
        (self.visible_fraction * full_height as f32).round() as u16
    }
}

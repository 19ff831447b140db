//! Opacity fade animation.
//!
//! The appear/hide animation is a plain progress source: a function from
//! elapsed time to an opacity in [0, 1], polled once per tick. No callback
//! machinery; the visibility state machine advances it and reads the value.

use std::time::{Duration, Instant};

/// Easing applied to the fade progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing).
    #[default]
    Linear,
    /// Quadratic ease-out (starts fast, decelerates).
    EaseOut,
}

/// Apply an easing function to a progress value.
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        Easing::Linear => t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
    }
}

/// An in-flight opacity fade.
#[derive(Debug, Clone, Copy)]
pub struct FadeAnimation {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
    easing: Easing,
}

impl FadeAnimation {
    /// Start a fade from `from` to `to` at `now`.
    pub fn new(now: Instant, from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            started: now,
            duration,
            easing,
        }
    }

    /// The fade target.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Raw progress in [0, 1] at `now`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Opacity at `now`.
    pub fn value(&self, now: Instant) -> f32 {
        let t = ease(self.easing, self.progress(now));
        self.from + (self.to - self.from) * t
    }

    /// Whether the fade has reached its target.
    pub fn finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

//! The show/hide visibility state machine.
//!
//! Governs the Hidden → Appearing → Shown → Hiding lifecycle with an
//! animated opacity and a deferred-hide deadline. The machine is advanced
//! by [`Visibility::animate`] once per tick; [`Visibility::fast_hide`] is
//! the cancellation primitive that lands in `Hidden` synchronously.

use std::time::{Duration, Instant};

use horizon_suggest_core::Timeout;

use crate::fade::{Easing, FadeAnimation};

/// Current phase of the popup's animated visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    /// Not shown; the idle initial and terminal state.
    #[default]
    Hidden,
    /// Opacity animating 0 → 1. Already intercepts input.
    Appearing,
    /// Steady state; fully opaque, fully interactive.
    Shown,
    /// Opacity animating → 0.
    Hiding,
}

/// The animated show/hide machine.
#[derive(Debug, Clone, Copy)]
pub struct Visibility {
    state: VisibilityState,
    fade: Option<FadeAnimation>,
    hide_deadline: Timeout,
    duration: Duration,
    easing: Easing,
}

impl Visibility {
    /// Create a hidden machine with the given fade duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            state: VisibilityState::Hidden,
            fade: None,
            hide_deadline: Timeout::new(),
            duration,
            easing: Easing::Linear,
        }
    }

    /// Current state.
    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// Whether the popup is fully hidden.
    pub fn is_hidden(&self) -> bool {
        self.state == VisibilityState::Hidden
    }

    /// Whether the popup takes input.
    ///
    /// True already while appearing: the popup must intercept input
    /// mid-animation to avoid focus loss.
    pub fn is_interactive(&self) -> bool {
        matches!(self.state, VisibilityState::Appearing | VisibilityState::Shown)
    }

    /// Opacity in [0, 1] at `now`.
    pub fn opacity(&self, now: Instant) -> f32 {
        match self.state {
            VisibilityState::Hidden => 0.0,
            VisibilityState::Shown => 1.0,
            VisibilityState::Appearing | VisibilityState::Hiding => {
                self.fade.map_or(0.0, |fade| fade.value(now))
            }
        }
    }

    /// Begin showing.
    ///
    /// From `Hidden` the appear fade starts at zero; from `Hiding` it
    /// resumes from the current opacity. Re-entrant calls while appearing
    /// or shown do not restart the animation; any deferred hide is
    /// cancelled in all cases.
    pub fn show_start(&mut self, now: Instant) {
        self.hide_deadline.cancel();
        match self.state {
            VisibilityState::Hidden => {
                self.state = VisibilityState::Appearing;
                self.fade = Some(FadeAnimation::new(now, 0.0, 1.0, self.duration, self.easing));
                tracing::debug!(target: "horizon_suggest::visibility", "appearing");
            }
            VisibilityState::Hiding => {
                let opacity = self.opacity(now);
                self.state = VisibilityState::Appearing;
                self.fade = Some(FadeAnimation::new(
                    now,
                    opacity,
                    1.0,
                    self.duration,
                    self.easing,
                ));
            }
            VisibilityState::Appearing | VisibilityState::Shown => {}
        }
    }

    /// Begin hiding with a fade from the current opacity.
    ///
    /// No-op when already hidden or hiding.
    pub fn hide_start(&mut self, now: Instant) {
        self.hide_deadline.cancel();
        match self.state {
            VisibilityState::Appearing | VisibilityState::Shown => {
                let opacity = self.opacity(now);
                self.state = VisibilityState::Hiding;
                self.fade = Some(FadeAnimation::new(
                    now,
                    opacity,
                    0.0,
                    self.duration,
                    self.easing,
                ));
                tracing::debug!(target: "horizon_suggest::visibility", "hiding");
            }
            VisibilityState::Hidden | VisibilityState::Hiding => {}
        }
    }

    /// Arm the deferred-hide deadline; [`Visibility::animate`] starts the
    /// hide fade once it passes. Cancelled by any show.
    pub fn hide_after(&mut self, now: Instant, delay: Duration) {
        if !self.is_hidden() {
            self.hide_deadline.arm(now, delay);
        }
    }

    /// Whether a deferred hide is pending.
    pub fn hide_pending(&self) -> bool {
        self.hide_deadline.is_armed()
    }

    /// Force `Hidden` synchronously, cancelling the in-flight fade and any
    /// deferred deadline.
    ///
    /// Returns whether the popup was not already hidden (the caller tears
    /// down the candidate store in that case).
    pub fn fast_hide(&mut self) -> bool {
        self.hide_deadline.cancel();
        self.fade = None;
        let was_visible = self.state != VisibilityState::Hidden;
        self.state = VisibilityState::Hidden;
        if was_visible {
            tracing::debug!(target: "horizon_suggest::visibility", "fast hide");
        }
        was_visible
    }

    /// Advance the machine one tick.
    ///
    /// Fires the deferred hide when due and promotes finished fades
    /// (`Appearing` → `Shown`, `Hiding` → `Hidden`). Returns `true` while
    /// further ticks are needed (a fade is running or a deadline is armed).
    pub fn animate(&mut self, now: Instant) -> bool {
        if self.hide_deadline.fire(now) {
            self.hide_start(now);
        }
        if let Some(fade) = self.fade
            && fade.finished(now)
        {
            self.fade = None;
            self.state = match self.state {
                VisibilityState::Appearing => VisibilityState::Shown,
                VisibilityState::Hiding => VisibilityState::Hidden,
                state => state,
            };
        }
        self.fade.is_some() || self.hide_deadline.is_armed()
    }
}

//! Pointer hit-testing and preview timing.
//!
//! Positions are in inner-content coordinates: `y` measured from the top of
//! the full row list (not the viewport), so hit-testing needs no knowledge
//! of the current scroll offset.

use std::time::Instant;

use horizon_suggest_core::{Point, Size, Timeout};

use crate::cursor::GridLayout;

/// Row index under a point in single-column list geometry.
pub fn hit_test_list(point: Point, width: f32, row_height: f32, len: usize) -> Option<usize> {
    if point.x < 0.0 || point.x >= width || point.y < 0.0 || row_height <= 0.0 {
        return None;
    }
    let index = (point.y / row_height) as usize;
    (index < len).then_some(index)
}

/// Row index under a point in sticker-grid geometry.
///
/// Padding cells (the tail of the recent-inline-bot block's last visual
/// row) hit nothing.
pub fn hit_test_grid(point: Point, layout: &GridLayout, cell: Size, len: usize) -> Option<usize> {
    if point.x < 0.0 || point.y < 0.0 || cell.is_empty() {
        return None;
    }
    let row = (point.y / cell.height) as usize;
    let col = (point.x / cell.width) as usize;
    layout.index_at(row, col, len)
}

/// Mouse-interaction state: the last hover position and the pending
/// sticker-preview timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    last_position: Option<Point>,
    preview: Timeout,
    /// Latched once a preview fired; release must not commit afterwards.
    preview_shown: bool,
    /// The row the pending preview is armed for.
    preview_row: Option<usize>,
}

impl PointerState {
    /// Create an idle pointer state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last observed hover position.
    pub fn last_position(&self) -> Option<Point> {
        self.last_position
    }

    /// Record a hover position; returns whether it moved.
    pub fn record_position(&mut self, point: Point) -> bool {
        let moved = self.last_position != Some(point);
        self.last_position = Some(point);
        moved
    }

    /// Arm (or re-arm) the preview timer for a row.
    pub fn arm_preview(&mut self, now: Instant, delay: std::time::Duration, row: usize) {
        self.preview.arm(now, delay);
        self.preview_row = Some(row);
    }

    /// Cancel the pending preview timer without touching the latch.
    pub fn cancel_preview(&mut self) {
        self.preview.cancel();
        self.preview_row = None;
    }

    /// Whether a preview timer is armed.
    pub fn preview_armed(&self) -> bool {
        self.preview.is_armed()
    }

    /// Poll the preview timer; returns the row to preview when it fires.
    pub fn fire_preview(&mut self, now: Instant) -> Option<usize> {
        if self.preview.fire(now) {
            let row = self.preview_row.take();
            if row.is_some() {
                self.preview_shown = true;
            }
            row
        } else {
            None
        }
    }

    /// Whether a preview has fired and not been dismissed yet.
    pub fn preview_shown(&self) -> bool {
        self.preview_shown
    }

    /// Dismiss the fired-preview latch.
    pub fn dismiss_preview(&mut self) {
        self.preview_shown = false;
    }

    /// Reset everything (teardown on hide).
    pub fn reset(&mut self) {
        self.last_position = None;
        self.cancel_preview();
        self.preview_shown = false;
    }
}

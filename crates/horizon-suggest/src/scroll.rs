//! Scroll synchronization.
//!
//! Given the selected row, the row geometry and the visible viewport, this
//! module computes the scroll request keeping the selection fully visible.
//! Nothing is emitted when the selection already fits; otherwise the host
//! receives the row extent and scrolls the minimum distance.

use crate::cursor::GridLayout;

/// The vertical extent of a row inside the scrollable content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowExtent {
    pub top: f32,
    pub bottom: f32,
}

/// The currently visible slice of the scrollable content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub top: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport.
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    /// Bottom edge of the viewport.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Whether an extent is already fully visible.
    pub fn fully_contains(&self, extent: RowExtent) -> bool {
        extent.top >= self.top && extent.bottom <= self.bottom()
    }

    /// The viewport top after a minimum-distance scroll to `extent`.
    pub fn scrolled_to(&self, extent: RowExtent) -> f32 {
        if extent.top < self.top {
            extent.top
        } else if extent.bottom > self.bottom() {
            extent.bottom - self.height
        } else {
            self.top
        }
    }
}

/// Extent of a row in single-column list geometry.
pub fn list_row_extent(index: usize, row_height: f32) -> RowExtent {
    RowExtent {
        top: index as f32 * row_height,
        bottom: (index + 1) as f32 * row_height,
    }
}

/// Extent of a cell's visual row in sticker-grid geometry.
pub fn grid_row_extent(index: usize, layout: &GridLayout, cell_height: f32) -> RowExtent {
    let (row, _) = layout.position(index);
    RowExtent {
        top: row as f32 * cell_height,
        bottom: (row + 1) as f32 * cell_height,
    }
}

/// The scroll request for an extent, or `None` when already fully visible.
///
/// The returned pair is the `(scroll_to_top, scroll_to_bottom)` extent the
/// host must bring into view, matching the outbound scroll-to signal.
pub fn scroll_target(extent: RowExtent, viewport: Viewport) -> Option<(f32, f32)> {
    if viewport.height <= 0.0 || viewport.fully_contains(extent) {
        None
    } else {
        Some((extent.top, extent.bottom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_request_when_fully_visible() {
        let viewport = Viewport::new(50.0, 100.0);
        let extent = list_row_extent(3, 25.0); // 75..100
        assert_eq!(scroll_target(extent, viewport), None);
    }

    #[test]
    fn test_request_above_viewport() {
        let viewport = Viewport::new(50.0, 100.0);
        let extent = list_row_extent(1, 25.0); // 25..50
        assert_eq!(scroll_target(extent, viewport), Some((25.0, 50.0)));
        assert_eq!(viewport.scrolled_to(extent), 25.0);
    }

    #[test]
    fn test_request_below_viewport() {
        let viewport = Viewport::new(0.0, 100.0);
        let extent = list_row_extent(5, 25.0); // 125..150
        assert_eq!(scroll_target(extent, viewport), Some((125.0, 150.0)));
        // Minimum distance: bottom-aligned.
        assert_eq!(viewport.scrolled_to(extent), 50.0);
    }

    #[test]
    fn test_grid_extent_uses_visual_rows() {
        let layout = GridLayout::new(4, 2);
        // Index 6 sits on visual row 2 (recent block pads row 0).
        let extent = grid_row_extent(6, &layout, 64.0);
        assert_eq!(extent, RowExtent { top: 128.0, bottom: 192.0 });
    }

    #[test]
    fn test_zero_viewport_never_requests() {
        let extent = list_row_extent(10, 25.0);
        assert_eq!(scroll_target(extent, Viewport::default()), None);
    }
}

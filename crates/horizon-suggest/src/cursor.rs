//! Selection cursor and keyboard navigation.
//!
//! The cursor tracks which row is selected and pressed, and whether the
//! selection was established by the mouse. Navigation is linear for the
//! list modes (mentions, hashtags, bot commands) and two-dimensional for
//! the sticker grid.

use static_assertions::assert_impl_all;

/// Navigation direction for [`SelectionCursor::move_list`] and
/// [`SelectionCursor::move_grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
}

/// How a suggestion was committed.
///
/// The host may insert differently for Tab vs Enter; the cursor itself
/// behaves the same for all methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooseMethod {
    ByEnter,
    ByTab,
    ByClick,
}

/// Snapshot of the cursor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    /// The selected row, always a valid index or `None`.
    pub selected: Option<usize>,
    /// The row a mouse button went down on, if any.
    pub pressed: Option<usize>,
    /// Whether the current selection came from the mouse.
    pub mouse_driven: bool,
}

assert_impl_all!(SelectionState: Copy, Send, Sync);

/// Sticker-grid geometry for navigation.
///
/// Rows are laid out `per_row` columns wide. The leading
/// `recent_inline_bots` entries occupy their own visual rows (the last one
/// padded), so the regular sticker block always starts on a fresh row;
/// vertical navigation across the boundary adjusts indices accordingly
/// without changing row identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub per_row: usize,
    pub recent_inline_bots: usize,
}

impl GridLayout {
    /// Create a layout; `per_row` is clamped to at least one column.
    pub fn new(per_row: usize, recent_inline_bots: usize) -> Self {
        Self {
            per_row: per_row.max(1),
            recent_inline_bots,
        }
    }

    /// Number of visual rows occupied by the recent-inline-bot block.
    fn recent_rows(&self) -> usize {
        self.recent_inline_bots.div_ceil(self.per_row)
    }

    /// Visual (row, column) position of an index.
    pub fn position(&self, index: usize) -> (usize, usize) {
        if index < self.recent_inline_bots {
            (index / self.per_row, index % self.per_row)
        } else {
            let rest = index - self.recent_inline_bots;
            (
                self.recent_rows() + rest / self.per_row,
                rest % self.per_row,
            )
        }
    }

    /// Index at a visual (row, column) cell, or `None` for an empty cell.
    pub fn index_at(&self, row: usize, col: usize, len: usize) -> Option<usize> {
        if col >= self.per_row {
            return None;
        }
        let recent_rows = self.recent_rows();
        let index = if row < recent_rows {
            let index = row * self.per_row + col;
            if index >= self.recent_inline_bots.min(len) {
                return None;
            }
            index
        } else {
            self.recent_inline_bots + (row - recent_rows) * self.per_row + col
        };
        (index < len).then_some(index)
    }

    /// Total number of visual rows for `len` entries.
    pub fn row_count(&self, len: usize) -> usize {
        let recent = self.recent_inline_bots.min(len);
        let rest = len - recent;
        self.recent_rows().min(recent.div_ceil(self.per_row)) + rest.div_ceil(self.per_row)
    }

    /// The last occupied column of a visual row, or `None` for an empty row.
    fn last_col(&self, row: usize, len: usize) -> Option<usize> {
        (0..self.per_row)
            .rev()
            .find(|&col| self.index_at(row, col, len).is_some())
    }
}

/// Tracks the highlighted row and applies the navigation rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionCursor {
    state: SelectionState,
}

impl SelectionCursor {
    /// Create a cursor with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state snapshot.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// The selected row, if any.
    pub fn selected(&self) -> Option<usize> {
        self.state.selected
    }

    /// The pressed row, if any.
    pub fn pressed(&self) -> Option<usize> {
        self.state.pressed
    }

    /// Whether the current selection came from the mouse.
    pub fn is_mouse_driven(&self) -> bool {
        self.state.mouse_driven
    }

    /// Select `index`, rejecting out-of-range values.
    ///
    /// Returns whether the selection changed.
    pub fn select(&mut self, index: usize, len: usize, mouse_driven: bool) -> bool {
        if index >= len {
            return false;
        }
        let changed = self.state.selected != Some(index);
        self.state.selected = Some(index);
        self.state.mouse_driven = mouse_driven;
        changed
    }

    /// Reset to the default selection for a fresh row set: the first row
    /// when non-empty, nothing otherwise.
    pub fn reset(&mut self, len: usize) {
        self.state.selected = (len > 0).then_some(0);
        self.state.pressed = None;
        self.state.mouse_driven = false;
    }

    /// Explicitly clear the selection.
    pub fn clear(&mut self) {
        self.state.selected = None;
        self.state.pressed = None;
        self.state.mouse_driven = false;
    }

    /// Clamp the selection into a shrunken row set (never wraps).
    pub fn clamp_to(&mut self, len: usize) {
        if len == 0 {
            self.state.selected = None;
        } else if let Some(selected) = self.state.selected
            && selected >= len
        {
            self.state.selected = Some(len - 1);
        }
        // Pressed rows refer to the previous row set.
        self.state.pressed = None;
    }

    /// Record a mouse press on a row.
    pub fn press(&mut self, index: Option<usize>) {
        self.state.pressed = index;
    }

    /// Forget the pressed row.
    pub fn release(&mut self) {
        self.state.pressed = None;
    }

    /// Clear a mouse-driven selection, keeping one established by keyboard.
    pub fn clear_mouse_selection(&mut self) {
        if self.state.mouse_driven {
            self.state.selected = None;
            self.state.mouse_driven = false;
        }
    }

    /// Move the selection in a single-column list.
    ///
    /// Up/Down move by one and wrap at the ends; PageUp/PageDown move by
    /// `page` rows and clamp. Returns whether the selection changed.
    pub fn move_list(&mut self, direction: Direction, len: usize, page: usize) -> bool {
        if len == 0 {
            return false;
        }
        let current = self.state.selected;
        let next = match direction {
            Direction::Up => Some(match current {
                Some(0) | None => len - 1,
                Some(i) => i - 1,
            }),
            Direction::Down => Some(match current {
                Some(i) if i + 1 < len => i + 1,
                Some(_) => 0,
                None => 0,
            }),
            Direction::PageUp => Some(current.map_or(0, |i| i.saturating_sub(page.max(1)))),
            Direction::PageDown => {
                Some(current.map_or(len - 1, |i| (i + page.max(1)).min(len - 1)))
            }
            // Horizontal keys mean nothing in a single column.
            Direction::Left | Direction::Right => return false,
        };
        let changed = next != current;
        if changed {
            self.state.selected = next;
            self.state.mouse_driven = false;
        }
        changed
    }

    /// Move the selection in a sticker grid.
    ///
    /// Left/Right move by one cell, crossing row boundaries, and clamp at
    /// the first/last entry of the whole set. Up/Down move by one visual
    /// row, preserving the column where possible, and clamp at the
    /// first/last row. Returns whether the selection changed.
    pub fn move_grid(
        &mut self,
        direction: Direction,
        layout: &GridLayout,
        len: usize,
        page: usize,
    ) -> bool {
        if len == 0 {
            return false;
        }
        let current = match self.state.selected {
            Some(i) => i,
            // Nothing selected yet: enter the grid at an end.
            None => {
                let entry = match direction {
                    Direction::Down | Direction::Right | Direction::PageDown => 0,
                    Direction::Up | Direction::Left | Direction::PageUp => len - 1,
                };
                self.state.selected = Some(entry);
                self.state.mouse_driven = false;
                return true;
            }
        };

        let next = match direction {
            Direction::Left => current.checked_sub(1),
            Direction::Right => (current + 1 < len).then_some(current + 1),
            Direction::Up | Direction::Down | Direction::PageUp | Direction::PageDown => {
                let rows = match direction {
                    Direction::Up | Direction::Down => 1,
                    _ => page.max(1),
                };
                let (row, col) = layout.position(current);
                let target_row = match direction {
                    Direction::Up | Direction::PageUp => row.checked_sub(rows),
                    _ => {
                        let target = row + rows;
                        (target < layout.row_count(len)).then_some(target)
                    }
                };
                target_row.and_then(|target| {
                    let col = layout.last_col(target, len).map_or(col, |last| col.min(last));
                    layout.index_at(target, col, len)
                })
            }
        };

        match next {
            Some(next) if next != current => {
                self.state.selected = Some(next);
                self.state.mouse_driven = false;
                true
            }
            _ => false,
        }
    }
}

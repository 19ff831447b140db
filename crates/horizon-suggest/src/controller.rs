//! The autocomplete controller.
//!
//! [`SuggestPopup`] is the top-level orchestrator: it owns mode, query and
//! scope state, drives candidate filtering, owns the visibility state
//! machine, positions the popup within caller-supplied bounds, and exposes
//! the commit ("choose") operation to the host.
//!
//! # Signals
//!
//! - `mention_chosen(UserId, ChooseMethod)`
//! - `hashtag_chosen(String, ChooseMethod)`: the hashtag text without `#`
//! - `bot_command_chosen(String, ChooseMethod)`: the full command text,
//!   qualified as `/command@bot` in group and channel scopes
//! - `sticker_chosen(DocumentId, ChooseMethod)`
//! - `must_scroll_to(f32, f32)`: the row extent to bring into view
//! - `preview_requested(DocumentId)`: long-hover sticker preview
//!
//! Signals are emitted only after all internal state has settled, so a
//! handler that re-enters the controller never observes a half-rebuilt
//! candidate store.

use std::time::{Duration, Instant};

use horizon_suggest_core::{Point, Rect, Signal, Size};

use crate::cursor::{ChooseMethod, Direction, GridLayout, SelectionCursor};
use crate::filter::{FilterKey, build_rows, should_reset_scroll};
use crate::pointer::{PointerState, hit_test_grid, hit_test_list};
use crate::rows::{CandidateStore, ChannelId, ChatId, DocumentId, Mode, Row, UserId};
use crate::scope::Scope;
use crate::scroll::{Viewport, grid_row_extent, list_row_extent, scroll_target};
use crate::source::SuggestionSource;
use crate::visibility::{Visibility, VisibilityState};

/// A key event delivered to [`SuggestPopup::handle_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Enter,
    Tab,
    /// Any other key, forwarded so the moderate-key filter can see it.
    Char(char),
}

/// Geometry and timing configuration for the popup.
#[derive(Debug, Clone, Copy)]
pub struct SuggestConfig {
    /// Height of one list row in pixels.
    pub row_height: f32,
    /// Size of one sticker grid cell in pixels.
    pub sticker_cell: Size,
    /// Duration of the appear/hide opacity fade.
    pub fade_duration: Duration,
    /// Long-hover delay before a sticker preview is requested.
    pub preview_delay: Duration,
    /// Delay used by [`SuggestPopup::hide_with_delay`].
    pub hide_delay: Duration,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            row_height: 36.0,
            sticker_cell: Size::new(64.0, 64.0),
            fade_duration: Duration::from_millis(150),
            preview_delay: Duration::from_millis(1000),
            hide_delay: Duration::from_millis(300),
        }
    }
}

/// The suggestion popup engine.
///
/// See the [module documentation](self) for the signal surface. Geometry is
/// bottom-anchored inside the caller-supplied boundings; pointer positions
/// are in inner-content coordinates (y from the top of the full row list).
pub struct SuggestPopup {
    source: Box<dyn SuggestionSource>,
    config: SuggestConfig,

    store: CandidateStore,
    cursor: SelectionCursor,
    visibility: Visibility,
    pointer: PointerState,

    mode: Mode,
    scope: Scope,
    filter: String,
    trigger_emoji: String,
    last_key: Option<FilterKey>,

    boundings: Rect,
    origin: Point,
    size: Size,
    stickers_per_row: usize,
    viewport: Viewport,

    moderate_filter: Option<Box<dyn Fn(&KeyPress) -> bool + Send + Sync>>,

    /// A mention was committed.
    pub mention_chosen: Signal<(UserId, ChooseMethod)>,
    /// A hashtag was committed (text without the `#` sigil).
    pub hashtag_chosen: Signal<(String, ChooseMethod)>,
    /// A bot command was committed (full `/command` text).
    pub bot_command_chosen: Signal<(String, ChooseMethod)>,
    /// A sticker was committed.
    pub sticker_chosen: Signal<(DocumentId, ChooseMethod)>,
    /// The host must scroll the given extent into view.
    pub must_scroll_to: Signal<(f32, f32)>,
    /// A long-hovered sticker wants an enlarged preview.
    pub preview_requested: Signal<DocumentId>,
}

impl SuggestPopup {
    /// Create a popup over a data source with default configuration.
    pub fn new(source: Box<dyn SuggestionSource>) -> Self {
        Self::with_config(source, SuggestConfig::default())
    }

    /// Create a popup with explicit configuration.
    pub fn with_config(source: Box<dyn SuggestionSource>, config: SuggestConfig) -> Self {
        Self {
            source,
            store: CandidateStore::new(),
            cursor: SelectionCursor::new(),
            visibility: Visibility::new(config.fade_duration),
            pointer: PointerState::new(),
            mode: Mode::Mentions,
            scope: Scope::None,
            filter: String::new(),
            trigger_emoji: String::new(),
            last_key: None,
            boundings: Rect::ZERO,
            origin: Point::ZERO,
            size: Size::ZERO,
            stickers_per_row: 1,
            viewport: Viewport::default(),
            moderate_filter: None,
            config,
            mention_chosen: Signal::new(),
            hashtag_chosen: Signal::new(),
            bot_command_chosen: Signal::new(),
            sticker_chosen: Signal::new(),
            must_scroll_to: Signal::new(),
            preview_requested: Signal::new(),
        }
    }

    // =========================================================================
    // Showing and filtering
    // =========================================================================

    /// Show filtered suggestions for a typed query.
    ///
    /// The leading character selects the mode: `@` mentions, `#` hashtags,
    /// `/` bot commands (anything else is treated as a mention query). The
    /// candidate store is rebuilt synchronously; when the result is
    /// non-empty the popup starts appearing (re-entrant calls while already
    /// visible do not restart the animation). An empty result leaves
    /// visibility untouched; the host decides whether to hide.
    pub fn show_filtered(&mut self, scope: Scope, query: &str, allow_inline_bots: bool) {
        let (mode, stripped) = match query.chars().next() {
            Some('@') => (Mode::Mentions, &query[1..]),
            Some('#') => (Mode::Hashtags, &query[1..]),
            Some('/') => (Mode::BotCommands, &query[1..]),
            _ => (Mode::Mentions, query),
        };

        let key = FilterKey {
            mode,
            scope,
            query: stripped.to_string(),
        };
        let reset = should_reset_scroll(self.last_key.as_ref(), &key);

        self.mode = mode;
        self.scope = scope;
        self.filter = stripped.to_string();
        self.trigger_emoji.clear();

        let (rows, recent) = build_rows(
            mode,
            self.source.as_ref(),
            &self.scope,
            stripped,
            allow_inline_bots,
            "",
        );
        tracing::debug!(
            target: "horizon_suggest::controller",
            ?mode,
            query = stripped,
            rows = rows.len(),
            reset,
            "filtered"
        );
        self.last_key = Some(key);
        self.apply_rows(rows, recent, reset);
    }

    /// Show sticker suggestions for a trigger emoji.
    ///
    /// Switches the mode to stickers and clears the scope.
    pub fn show_stickers(&mut self, trigger_emoji: &str) {
        let key = FilterKey {
            mode: Mode::Stickers,
            scope: Scope::None,
            query: trigger_emoji.to_string(),
        };
        let reset = should_reset_scroll(self.last_key.as_ref(), &key);

        self.mode = Mode::Stickers;
        self.scope = Scope::None;
        self.filter.clear();
        self.trigger_emoji = trigger_emoji.to_string();

        let (rows, recent) = build_rows(
            Mode::Stickers,
            self.source.as_ref(),
            &self.scope,
            "",
            false,
            trigger_emoji,
        );
        tracing::debug!(
            target: "horizon_suggest::controller",
            emoji = trigger_emoji,
            rows = rows.len(),
            "stickers"
        );
        self.last_key = Some(key);
        self.apply_rows(rows, recent, reset);
    }

    /// Empty the store when it shows filtered bot commands.
    ///
    /// Returns whether anything was cleared. The host calls this when the
    /// input no longer starts with `/`.
    pub fn clear_filtered_bot_commands(&mut self) -> bool {
        if self.mode != Mode::BotCommands || self.store.is_empty() {
            return false;
        }
        self.store.clear();
        self.cursor.clear();
        self.last_key = None;
        self.recount();
        true
    }

    fn apply_rows(&mut self, rows: Vec<Row>, recent_inline_bots: usize, reset_scroll: bool) {
        self.store.replace(rows, recent_inline_bots);
        if reset_scroll {
            self.cursor.reset(self.store.len());
        } else {
            self.cursor.clamp_to(self.store.len());
        }
        self.recount();
        if !self.store.is_empty() {
            self.visibility.show_start(Instant::now());
            if reset_scroll && self.viewport.height > 0.0 {
                // Fresh result set starts at the top.
                self.must_scroll_to.emit((0.0, self.viewport.height));
            } else {
                self.sync_scroll();
            }
        }
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Begin the appear animation (no-op while already visible).
    pub fn show_start(&mut self) {
        self.visibility.show_start(Instant::now());
    }

    /// Begin the hide animation.
    pub fn hide_start(&mut self) {
        self.visibility.hide_start(Instant::now());
    }

    /// Arm the deferred hide (`SuggestConfig::hide_delay`); cancelled by
    /// any successful show.
    pub fn hide_with_delay(&mut self) {
        self.visibility.hide_after(Instant::now(), self.config.hide_delay);
    }

    /// Hide immediately and synchronously, cancelling the in-flight fade,
    /// the deferred hide and any pending preview, and tearing down the
    /// candidate store.
    pub fn fast_hide(&mut self) {
        if self.visibility.fast_hide() {
            self.teardown();
        } else {
            self.pointer.reset();
        }
    }

    /// Advance animations and timers one tick.
    ///
    /// Returns `true` while further ticks are needed. Fires the deferred
    /// hide and the sticker preview when due; finishing the hide fade tears
    /// the candidate store down.
    pub fn animate(&mut self, now: Instant) -> bool {
        let was_hidden = self.visibility.is_hidden();
        let fading = self.visibility.animate(now);
        if !was_hidden && self.visibility.is_hidden() {
            self.teardown();
        }
        if let Some(index) = self.pointer.fire_preview(now)
            && let Some(Row::Sticker(sticker)) = self.store.get(index)
        {
            self.preview_requested.emit(sticker.document);
        }
        fading || self.pointer.preview_armed()
    }

    fn teardown(&mut self) {
        self.store.clear();
        self.cursor.clear();
        self.pointer.reset();
        self.last_key = None;
        self.recount();
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Update the caller-supplied placement constraint.
    ///
    /// Never alters visibility by itself; the sticker grid may reflow,
    /// which re-clamps selection and re-syncs scroll.
    pub fn set_boundings(&mut self, rect: Rect) {
        self.boundings = rect;
        self.recount();
        self.cursor.clamp_to(self.store.len());
        self.sync_scroll();
    }

    /// Tell the engine which slice of the row list is visible.
    pub fn set_visible_range(&mut self, top: f32, height: f32) {
        self.viewport = Viewport::new(top, height);
    }

    /// Mark how many leading sticker rows are recently-used inline bots.
    pub fn set_recent_inline_bots_in_rows(&mut self, count: usize) {
        self.store.set_recent_inline_bots(count);
        self.recount();
        self.sync_scroll();
    }

    fn recount(&mut self) {
        let width = self.boundings.width().max(0.0);
        if self.mode.is_grid() {
            let cell = self.config.sticker_cell;
            self.stickers_per_row = if cell.width > 0.0 {
                ((width / cell.width) as usize).max(1)
            } else {
                1
            };
            let rows = self.grid_layout().row_count(self.store.len());
            let content = rows as f32 * cell.height;
            self.size = Size::new(width, content.min(self.boundings.height()));
        } else {
            let content = self.store.len() as f32 * self.config.row_height;
            self.size = Size::new(width, content.min(self.boundings.height()));
        }
        // Bottom-anchored above the input field.
        self.origin = Point::new(self.boundings.left(), self.boundings.bottom() - self.size.height);
    }

    fn grid_layout(&self) -> GridLayout {
        GridLayout::new(self.stickers_per_row, self.store.recent_inline_bots())
    }

    /// The popup rectangle inside the boundings.
    pub fn rect(&self) -> Rect {
        Rect {
            origin: self.origin,
            size: self.size,
        }
    }

    /// Top pixel of the row list area.
    pub fn inner_top(&self) -> f32 {
        self.origin.y
    }

    /// Bottom pixel of the row list area.
    pub fn inner_bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Whether the popup is visible, fully opaque and intersecting the
    /// given rectangle. Used by the host for focus/overlap arbitration.
    pub fn overlaps(&self, global_rect: &Rect) -> bool {
        self.visibility.state() == VisibilityState::Shown
            && !self.rect().is_empty()
            && self.rect().intersects(global_rect)
    }

    // =========================================================================
    // Selection and committing
    // =========================================================================

    /// Move the selection; returns whether it changed.
    ///
    /// List modes wrap vertically; the sticker grid clamps at its first and
    /// last row. Inert while the popup is not interactive.
    pub fn move_sel(&mut self, direction: Direction) -> bool {
        if !self.visibility.is_interactive() {
            return false;
        }
        let len = self.store.len();
        let changed = if self.mode.is_grid() {
            let layout = self.grid_layout();
            self.cursor.move_grid(direction, &layout, len, self.page_rows())
        } else {
            self.cursor.move_list(direction, len, self.page_rows())
        };
        if changed {
            self.pointer.cancel_preview();
            self.sync_scroll();
        }
        changed
    }

    /// Clear the selection; with `hidden`, also suppress any pending
    /// preview timer.
    pub fn clear_sel(&mut self, hidden: bool) {
        self.cursor.clear();
        if hidden {
            self.pointer.reset();
        }
    }

    /// Commit the selected row.
    ///
    /// Emits the mode-specific chosen signal carrying the selected entity
    /// and the method. Returns `false` with no observable effect when
    /// nothing is selected or the popup is hidden.
    pub fn choose_selected(&self, method: ChooseMethod) -> bool {
        if self.visibility.is_hidden() {
            return false;
        }
        let Some(index) = self.cursor.selected() else {
            return false;
        };
        let Some(row) = self.store.get(index) else {
            return false;
        };
        match row.clone() {
            Row::Mention(mention) => {
                self.mention_chosen.emit((mention.user, method));
            }
            Row::Hashtag(tag) => {
                self.hashtag_chosen.emit((tag, method));
            }
            Row::BotCommand(command) => {
                // Qualify with the bot username where several bots may
                // share the chat.
                let text = match self.scope {
                    Scope::Chat(_) | Scope::Channel(_) if !command.bot_username.is_empty() => {
                        format!("/{}@{}", command.command, command.bot_username)
                    }
                    _ => format!("/{}", command.command),
                };
                self.bot_command_chosen.emit((text, method));
            }
            Row::Sticker(sticker) => {
                self.sticker_chosen.emit((sticker.document, method));
            }
        }
        true
    }

    /// Handle a key press; returns whether it was consumed.
    ///
    /// The host-installed moderate-key filter sees the key first and may
    /// consume it for an unrelated moderation feature.
    pub fn handle_key(&mut self, key: KeyPress) -> bool {
        if !self.visibility.is_interactive() {
            return false;
        }
        if let Some(filter) = &self.moderate_filter
            && filter(&key)
        {
            return true;
        }
        match key {
            KeyPress::Up => self.move_sel(Direction::Up),
            KeyPress::Down => self.move_sel(Direction::Down),
            KeyPress::Left => self.move_sel(Direction::Left),
            KeyPress::Right => self.move_sel(Direction::Right),
            KeyPress::PageUp => self.move_sel(Direction::PageUp),
            KeyPress::PageDown => self.move_sel(Direction::PageDown),
            KeyPress::Enter => self.choose_selected(ChooseMethod::ByEnter),
            KeyPress::Tab => {
                if self.cursor.selected().is_none() && !self.store.is_empty() {
                    self.cursor.select(0, self.store.len(), false);
                }
                self.choose_selected(ChooseMethod::ByTab)
            }
            KeyPress::Char(_) => false,
        }
    }

    /// Install or remove the moderate-key filter.
    pub fn set_moderate_key_filter(
        &mut self,
        filter: Option<Box<dyn Fn(&KeyPress) -> bool + Send + Sync>>,
    ) {
        self.moderate_filter = filter;
    }

    fn page_rows(&self) -> usize {
        let row_height = if self.mode.is_grid() {
            self.config.sticker_cell.height
        } else {
            self.config.row_height
        };
        if self.viewport.height > 0.0 && row_height > 0.0 {
            ((self.viewport.height / row_height) as usize).max(1)
        } else {
            1
        }
    }

    fn sync_scroll(&self) {
        let Some(index) = self.cursor.selected() else {
            return;
        };
        let extent = if self.mode.is_grid() {
            grid_row_extent(index, &self.grid_layout(), self.config.sticker_cell.height)
        } else {
            list_row_extent(index, self.config.row_height)
        };
        if let Some((top, bottom)) = scroll_target(extent, self.viewport) {
            self.must_scroll_to.emit((top, bottom));
        }
    }

    // =========================================================================
    // Pointer interaction
    // =========================================================================

    fn hit_test(&self, position: Point) -> Option<usize> {
        if self.mode.is_grid() {
            hit_test_grid(
                position,
                &self.grid_layout(),
                self.config.sticker_cell,
                self.store.len(),
            )
        } else {
            hit_test_list(
                position,
                self.size.width,
                self.config.row_height,
                self.store.len(),
            )
        }
    }

    /// Pointer movement over the row list (inner-content coordinates).
    ///
    /// Hovering a row selects it, unless a button is held on a different
    /// row. Hovering a sticker arms the preview timer; any movement re-arms
    /// it.
    pub fn pointer_moved(&mut self, position: Point) {
        if !self.visibility.is_interactive() {
            return;
        }
        if !self.pointer.record_position(position) {
            return;
        }
        self.pointer.cancel_preview();
        match self.hit_test(position) {
            Some(index) => {
                let dragging_elsewhere =
                    matches!(self.cursor.pressed(), Some(pressed) if pressed != index);
                if !dragging_elsewhere {
                    self.cursor.select(index, self.store.len(), true);
                    if self.mode.is_grid() && !self.pointer.preview_shown() {
                        self.pointer
                            .arm_preview(Instant::now(), self.config.preview_delay, index);
                    }
                }
            }
            None => self.cursor.clear_mouse_selection(),
        }
    }

    /// Pointer press; records the pressed row without committing.
    ///
    /// Returns whether the press landed on a row.
    pub fn pointer_pressed(&mut self, position: Point) -> bool {
        if !self.visibility.is_interactive() {
            return false;
        }
        self.pointer.cancel_preview();
        let hit = self.hit_test(position);
        self.cursor.press(hit);
        if let Some(index) = hit {
            self.cursor.select(index, self.store.len(), true);
        }
        hit.is_some()
    }

    /// Pointer release; commits with [`ChooseMethod::ByClick`] when the
    /// release lands on the pressed row.
    pub fn pointer_released(&mut self, position: Point) -> bool {
        let pressed = self.cursor.pressed();
        self.cursor.release();
        if !self.visibility.is_interactive() {
            return false;
        }
        self.pointer.cancel_preview();
        if self.pointer.preview_shown() {
            // The press turned into a preview; releasing dismisses it.
            self.pointer.dismiss_preview();
            return false;
        }
        match (pressed, self.hit_test(position)) {
            (Some(down), Some(up)) if down == up => {
                self.cursor.select(up, self.store.len(), true);
                self.choose_selected(ChooseMethod::ByClick)
            }
            _ => false,
        }
    }

    /// Pointer left the popup's interactive area.
    ///
    /// Clears a mouse-driven selection (keyboard selection survives) and
    /// cancels any pending preview.
    pub fn pointer_left(&mut self) {
        self.pointer.reset();
        self.cursor.clear_mouse_selection();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The current filter string (query without its sigil).
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// The active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The current scope.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// The group chat in scope, if any.
    pub fn chat(&self) -> Option<ChatId> {
        self.scope.chat()
    }

    /// The direct user in scope, if any.
    pub fn user(&self) -> Option<UserId> {
        self.scope.user()
    }

    /// The channel in scope, if any.
    pub fn channel(&self) -> Option<ChannelId> {
        self.scope.channel()
    }

    /// Whether sticker suggestions are currently shown.
    pub fn stickers_shown(&self) -> bool {
        self.mode == Mode::Stickers && !self.store.is_empty()
    }

    /// Number of candidate rows.
    pub fn row_count(&self) -> usize {
        self.store.len()
    }

    /// Whether the candidate store is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Row at `index`, if in range.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.store.get(index)
    }

    /// The selected row index, if any.
    pub fn selected(&self) -> Option<usize> {
        self.cursor.selected()
    }

    /// Snapshot of the selection state.
    pub fn selection_state(&self) -> crate::cursor::SelectionState {
        self.cursor.state()
    }

    /// Current visibility state.
    pub fn visibility_state(&self) -> VisibilityState {
        self.visibility.state()
    }

    /// Whether the popup is fully hidden.
    pub fn is_hidden(&self) -> bool {
        self.visibility.is_hidden()
    }

    /// Whether a deferred hide is pending.
    pub fn hide_pending(&self) -> bool {
        self.visibility.hide_pending()
    }

    /// Current opacity at `now`.
    pub fn opacity(&self, now: Instant) -> f32 {
        self.visibility.opacity(now)
    }

    /// Columns in the sticker grid after the last reflow.
    pub fn stickers_per_row(&self) -> usize {
        self.stickers_per_row
    }
}

impl std::fmt::Debug for SuggestPopup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestPopup")
            .field("mode", &self.mode)
            .field("filter", &self.filter)
            .field("row_count", &self.store.len())
            .field("selected", &self.cursor.selected())
            .field("visibility", &self.visibility.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::{MentionRow, StickerRow};
    use crate::source::StaticSource;

    fn popup_with_members(names: &[&str]) -> (SuggestPopup, ChatId) {
        let mut source = StaticSource::new();
        let chat = ChatId(1);
        for (i, name) in names.iter().enumerate() {
            source.add_chat_member(chat, MentionRow::new(UserId(i as u64 + 1), *name));
        }
        let mut popup = SuggestPopup::new(Box::new(source));
        popup.set_boundings(Rect::new(0.0, 0.0, 320.0, 400.0));
        (popup, chat)
    }

    #[test]
    fn test_mode_dispatch_by_sigil() {
        let (mut popup, chat) = popup_with_members(&["john"]);
        popup.show_filtered(Scope::Chat(chat), "@jo", false);
        assert_eq!(popup.mode(), Mode::Mentions);
        assert_eq!(popup.filter(), "jo");

        popup.show_filtered(Scope::Chat(chat), "#tag", false);
        assert_eq!(popup.mode(), Mode::Hashtags);
        assert_eq!(popup.filter(), "tag");

        popup.show_filtered(Scope::Chat(chat), "/cmd", false);
        assert_eq!(popup.mode(), Mode::BotCommands);
        assert_eq!(popup.filter(), "cmd");
    }

    #[test]
    fn test_fresh_filter_selects_first_row() {
        let (mut popup, chat) = popup_with_members(&["john", "joanna", "mike"]);
        popup.show_filtered(Scope::Chat(chat), "@jo", false);
        assert_eq!(popup.row_count(), 2);
        assert_eq!(popup.selected(), Some(0));
        assert_eq!(popup.visibility_state(), VisibilityState::Appearing);
    }

    #[test]
    fn test_extending_query_clamps_selection() {
        let (mut popup, chat) = popup_with_members(&["john", "joanna", "jora", "mike"]);
        popup.show_filtered(Scope::Chat(chat), "@jo", false);
        popup.move_sel(Direction::Down);
        popup.move_sel(Direction::Down);
        assert_eq!(popup.selected(), Some(2));

        // "joa" keeps only joanna: selection clamps, never out of range.
        popup.show_filtered(Scope::Chat(chat), "@joa", false);
        assert_eq!(popup.row_count(), 1);
        assert_eq!(popup.selected(), Some(0));
    }

    #[test]
    fn test_empty_result_keeps_visibility_for_host() {
        let (mut popup, chat) = popup_with_members(&["john"]);
        popup.show_filtered(Scope::Chat(chat), "@jo", false);
        assert_eq!(popup.visibility_state(), VisibilityState::Appearing);

        popup.show_filtered(Scope::Chat(chat), "@zzz", false);
        assert!(popup.is_empty());
        assert_eq!(popup.selected(), None);
        // Visibility untouched; the host decides.
        assert_eq!(popup.visibility_state(), VisibilityState::Appearing);

        popup.hide_with_delay();
        assert!(popup.hide_pending());
    }

    #[test]
    fn test_choose_without_selection_is_a_noop() {
        let (mut popup, chat) = popup_with_members(&["john"]);
        popup.show_filtered(Scope::Chat(chat), "@zzz", false);
        popup.show_start();
        assert!(!popup.choose_selected(ChooseMethod::ByEnter));
    }

    #[test]
    fn test_navigation_is_inert_while_hidden() {
        let (mut popup, chat) = popup_with_members(&["john"]);
        // Rebuild the store without showing.
        popup.show_filtered(Scope::Chat(chat), "@jo", false);
        popup.fast_hide();
        assert!(!popup.move_sel(Direction::Down));
        assert!(!popup.choose_selected(ChooseMethod::ByEnter));
        assert!(!popup.handle_key(KeyPress::Enter));
    }

    #[test]
    fn test_set_boundings_does_not_change_visibility() {
        let (mut popup, chat) = popup_with_members(&["john"]);
        assert!(popup.is_hidden());
        popup.set_boundings(Rect::new(0.0, 0.0, 200.0, 300.0));
        assert!(popup.is_hidden());

        popup.show_filtered(Scope::Chat(chat), "@jo", false);
        let state = popup.visibility_state();
        popup.set_boundings(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(popup.visibility_state(), state);
    }

    #[test]
    fn test_sticker_reflow_tracks_boundings() {
        let mut source = StaticSource::new();
        for i in 0..10 {
            source.add_sticker(StickerRow::new(DocumentId(i), "😀"));
        }
        let mut popup = SuggestPopup::new(Box::new(source));
        popup.set_boundings(Rect::new(0.0, 0.0, 256.0, 400.0));
        popup.show_stickers("😀");
        assert!(popup.stickers_shown());
        assert_eq!(popup.stickers_per_row(), 4);

        popup.set_boundings(Rect::new(0.0, 0.0, 128.0, 400.0));
        assert_eq!(popup.stickers_per_row(), 2);
    }

    #[test]
    fn test_moderate_filter_consumes_keys_first() {
        let (mut popup, chat) = popup_with_members(&["john", "joanna"]);
        popup.show_filtered(Scope::Chat(chat), "@jo", false);
        popup.set_moderate_key_filter(Some(Box::new(|key| {
            matches!(key, KeyPress::Char('1'))
        })));

        assert!(popup.handle_key(KeyPress::Char('1')));
        assert!(!popup.handle_key(KeyPress::Char('2')));
        // Navigation still works underneath.
        assert!(popup.handle_key(KeyPress::Down));
    }

    #[test]
    fn test_clear_filtered_bot_commands() {
        let mut source = StaticSource::new();
        let chat = ChatId(1);
        let bot = UserId(9);
        source.add_chat_command(
            chat,
            crate::rows::BotCommandRow::new(bot, "helper", "start", "starts"),
        );
        let mut popup = SuggestPopup::new(Box::new(source));
        popup.set_boundings(Rect::new(0.0, 0.0, 320.0, 400.0));

        popup.show_filtered(Scope::Chat(chat), "/st", false);
        assert_eq!(popup.row_count(), 1);
        assert!(popup.clear_filtered_bot_commands());
        assert!(popup.is_empty());
        assert!(!popup.clear_filtered_bot_commands());
    }

    #[test]
    fn test_overlaps_requires_shown_and_intersection() {
        let (mut popup, chat) = popup_with_members(&["john", "joanna"]);
        popup.show_filtered(Scope::Chat(chat), "@jo", false);

        let inside = popup.rect();
        // Still appearing: not opaque yet.
        assert!(!popup.overlaps(&inside));

        popup.animate(Instant::now() + Duration::from_secs(1));
        assert_eq!(popup.visibility_state(), VisibilityState::Shown);
        assert!(popup.overlaps(&inside));
        assert!(!popup.overlaps(&Rect::new(-500.0, -500.0, 10.0, 10.0)));
    }

    #[test]
    fn test_inner_extent_is_bottom_anchored() {
        let (mut popup, chat) = popup_with_members(&["john", "joanna"]);
        popup.show_filtered(Scope::Chat(chat), "@jo", false);
        // Two rows at the default height, anchored to the boundings bottom.
        let height = 2.0 * SuggestConfig::default().row_height;
        assert_eq!(popup.inner_bottom(), 400.0);
        assert_eq!(popup.inner_top(), 400.0 - height);
    }
}

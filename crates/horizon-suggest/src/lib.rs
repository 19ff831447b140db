//! Horizon Suggest - an inline suggestion popup engine for chat inputs.
//!
//! As the user types into a chat input field, the engine shows matching
//! mentions, hashtags, bot commands or sticker suggestions, lets the user
//! navigate the list with keyboard or mouse, and commits a choice back to
//! the host through signals.
//!
//! The engine owns the suggestion-list state only: candidate filtering and
//! scoping, selection-index management (linear and grid navigation), the
//! animated show/hide visibility machine, scroll synchronization, and
//! pointer-driven hover/preview interaction. Drawing rows, loading sticker
//! thumbnails and supplying candidate data are the host's job.
//!
//! # Example
//!
//! ```
//! use horizon_suggest::{
//!     ChatId, MentionRow, Scope, StaticSource, SuggestPopup, UserId,
//! };
//! use horizon_suggest_core::Rect;
//!
//! let mut source = StaticSource::new();
//! let chat = ChatId(1);
//! source.add_chat_member(chat, MentionRow::new(UserId(10), "john"));
//!
//! let mut popup = SuggestPopup::new(Box::new(source));
//! popup.set_boundings(Rect::new(0.0, 0.0, 300.0, 400.0));
//!
//! popup.mention_chosen.connect(|(user, _method)| {
//!     println!("mention chosen: {:?}", user);
//! });
//!
//! popup.show_filtered(Scope::Chat(chat), "@jo", false);
//! assert_eq!(popup.row_count(), 1);
//! ```

mod controller;
mod cursor;
mod fade;
mod filter;
mod pointer;
mod rows;
mod scope;
mod scroll;
mod source;
mod visibility;

pub use controller::{KeyPress, SuggestConfig, SuggestPopup};
pub use cursor::{ChooseMethod, Direction, GridLayout, SelectionCursor, SelectionState};
pub use fade::{Easing, FadeAnimation, ease};
pub use filter::{FilterKey, build_rows, should_reset_scroll};
pub use pointer::{PointerState, hit_test_grid, hit_test_list};
pub use rows::{
    BotCommandRow, CandidateStore, ChannelId, ChatId, DocumentId, MentionRow, Mode, Row, RowKind,
    StickerRow, UserId,
};
pub use scope::Scope;
pub use scroll::{RowExtent, Viewport, grid_row_extent, list_row_extent, scroll_target};
pub use source::{StaticSource, SuggestionSource};
pub use visibility::{Visibility, VisibilityState};

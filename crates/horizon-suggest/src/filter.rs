//! Candidate filtering and the scroll-reset policy.
//!
//! `filter(mode, query, scope) -> ordered rows`: the data source returns
//! scope-eligible candidates in relevance order, and this module keeps the
//! ones matching the typed query. Filtering is synchronous and idempotent
//! for identical `(mode, query, scope)` inputs.

use std::collections::HashSet;

use crate::rows::{Mode, Row};
use crate::scope::Scope;
use crate::source::SuggestionSource;

/// Case-insensitive prefix match.
fn matches_prefix(text: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    text.to_lowercase().starts_with(&query.to_lowercase())
}

/// Build the ordered candidate rows for a filter call.
///
/// Returns the rows plus the count of leading recently-used-inline-bot
/// entries (mention mode only; other modes report zero and the host may set
/// the count explicitly for sticker grids).
///
/// - **Mentions / bot commands**: keep candidates whose match text starts
///   with `query`, case-insensitively; source order is preserved. An empty
///   query keeps everything (used for bot-command listing).
/// - **Hashtags**: keep candidates with `query` as a prefix,
///   case-insensitively, deduplicated by text (first occurrence wins).
/// - **Stickers**: no text filtering; the full eligible set for
///   `trigger_emoji`.
pub fn build_rows(
    mode: Mode,
    source: &dyn SuggestionSource,
    scope: &Scope,
    query: &str,
    include_inline_bots: bool,
    trigger_emoji: &str,
) -> (Vec<Row>, usize) {
    match mode {
        Mode::Mentions => {
            let (candidates, inline_count) = source.mentions(scope, include_inline_bots);
            let mut kept_inline = 0;
            let rows: Vec<Row> = candidates
                .into_iter()
                .enumerate()
                .filter(|(_, row)| matches_prefix(&row.username, query))
                .map(|(index, row)| {
                    if index < inline_count {
                        kept_inline += 1;
                    }
                    Row::Mention(row)
                })
                .collect();
            (rows, kept_inline)
        }
        Mode::Hashtags => {
            let mut seen = HashSet::new();
            let rows = source
                .hashtags()
                .into_iter()
                .filter(|tag| matches_prefix(tag, query))
                .filter(|tag| seen.insert(tag.clone()))
                .map(Row::Hashtag)
                .collect();
            (rows, 0)
        }
        Mode::BotCommands => {
            let rows = source
                .bot_commands(scope)
                .into_iter()
                .filter(|row| matches_prefix(&row.command, query))
                .map(Row::BotCommand)
                .collect();
            (rows, 0)
        }
        Mode::Stickers => {
            let rows = source
                .stickers(trigger_emoji)
                .into_iter()
                .map(Row::Sticker)
                .collect();
            (rows, 0)
        }
    }
}

/// Identity of a filter call, for the scroll-reset policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterKey {
    pub mode: Mode,
    pub scope: Scope,
    pub query: String,
}

/// Whether a new filter call must reset scroll and selection.
///
/// Scroll is preserved only when the mode and scope are unchanged and the
/// new query extends (or equals) the previous one; every other trigger
/// (mode switch, scope switch, query rewrite, explicit show) resets.
pub fn should_reset_scroll(previous: Option<&FilterKey>, next: &FilterKey) -> bool {
    match previous {
        Some(prev) => {
            prev.mode != next.mode
                || prev.scope != next.scope
                || !next.query.starts_with(&prev.query)
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::{ChatId, DocumentId, MentionRow, StickerRow, UserId};
    use crate::source::StaticSource;

    fn chat_source() -> (StaticSource, ChatId) {
        let mut source = StaticSource::new();
        let chat = ChatId(1);
        source.add_chat_member(chat, MentionRow::new(UserId(1), "John"));
        source.add_chat_member(chat, MentionRow::new(UserId(2), "Joanna"));
        source.add_chat_member(chat, MentionRow::new(UserId(3), "Mike"));
        (source, chat)
    }

    #[test]
    fn test_mention_prefix_filter_case_insensitive() {
        let (source, chat) = chat_source();
        let (rows, _) = build_rows(Mode::Mentions, &source, &Scope::Chat(chat), "jo", false, "");
        let names: Vec<_> = rows.iter().filter_map(|r| r.match_text()).collect();
        assert_eq!(names, vec!["John", "Joanna"]);
    }

    #[test]
    fn test_empty_query_keeps_all_eligible() {
        let (source, chat) = chat_source();
        let (rows, _) = build_rows(Mode::Mentions, &source, &Scope::Chat(chat), "", false, "");
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let (source, chat) = chat_source();
        let scope = Scope::Chat(chat);
        let first = build_rows(Mode::Mentions, &source, &scope, "jo", false, "");
        let second = build_rows(Mode::Mentions, &source, &scope, "jo", false, "");
        assert_eq!(first, second);
    }

    #[test]
    fn test_hashtags_deduplicated() {
        let mut source = StaticSource::new();
        source.add_hashtag("rust");
        source.add_hashtag("rustacean");
        source.add_hashtag("rust");
        let (rows, _) = build_rows(Mode::Hashtags, &source, &Scope::None, "ru", false, "");
        assert_eq!(
            rows,
            vec![
                Row::Hashtag("rust".to_string()),
                Row::Hashtag("rustacean".to_string()),
            ]
        );
    }

    #[test]
    fn test_stickers_ignore_query() {
        let mut source = StaticSource::new();
        source.add_sticker(StickerRow::new(DocumentId(1), "😀"));
        source.add_sticker(StickerRow::new(DocumentId(2), "😀"));
        let (rows, _) = build_rows(Mode::Stickers, &source, &Scope::None, "zzz", false, "😀");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_inline_bot_count_tracks_kept_rows() {
        let mut source = StaticSource::new();
        let chat = ChatId(1);
        source.add_inline_bot(MentionRow::new(UserId(90), "gif"));
        source.add_inline_bot(MentionRow::new(UserId(91), "vote"));
        source.add_chat_member(chat, MentionRow::new(UserId(1), "gibson"));

        let (rows, inline) = build_rows(Mode::Mentions, &source, &Scope::Chat(chat), "gi", true, "");
        // "gif" and "gibson" survive, "vote" does not.
        assert_eq!(rows.len(), 2);
        assert_eq!(inline, 1);
    }

    #[test]
    fn test_reset_scroll_policy() {
        let key = |query: &str| FilterKey {
            mode: Mode::Mentions,
            scope: Scope::Chat(ChatId(1)),
            query: query.to_string(),
        };

        // First call always resets.
        assert!(should_reset_scroll(None, &key("jo")));
        // Extending the query preserves.
        assert!(!should_reset_scroll(Some(&key("jo")), &key("joh")));
        // Identical query preserves.
        assert!(!should_reset_scroll(Some(&key("jo")), &key("jo")));
        // Shortening resets.
        assert!(should_reset_scroll(Some(&key("joh")), &key("jo")));
        // Mode switch resets.
        let hashtags = FilterKey {
            mode: Mode::Hashtags,
            scope: Scope::Chat(ChatId(1)),
            query: "jo".to_string(),
        };
        assert!(should_reset_scroll(Some(&key("jo")), &hashtags));
        // Scope switch resets.
        let other_scope = FilterKey {
            mode: Mode::Mentions,
            scope: Scope::Chat(ChatId(2)),
            query: "joh".to_string(),
        };
        assert!(should_reset_scroll(Some(&key("jo")), &other_scope));
    }
}

//! The data-provider seam.
//!
//! Candidate entities live outside the engine (peer directory, hashtag
//! history, bot-command catalogs, sticker sets). [`SuggestionSource`] is the
//! trait the host implements to supply scope-eligible, relevance-ordered
//! candidates; the engine applies text filtering on top and re-queries the
//! source at the start of every filter call, so entities invalidated between
//! calls simply stop appearing.
//!
//! [`StaticSource`] is a simple in-memory implementation for hosts whose
//! candidate sets are known up front, and for tests.

use crate::rows::{BotCommandRow, ChannelId, ChatId, MentionRow, StickerRow, UserId};
use crate::scope::Scope;

/// Supplies candidate entities for the popup.
///
/// All methods return candidates in a stable external relevance order
/// (for example recency), ties broken by catalog order. Eligibility
/// restriction by [`Scope`] happens here: only entities belonging to the
/// given peer context may be returned.
pub trait SuggestionSource {
    /// Mention candidates eligible under `scope`.
    ///
    /// When `include_inline_bots` is set, recently-used inline bots are
    /// prepended; the returned count says how many leading entries they are.
    fn mentions(&self, scope: &Scope, include_inline_bots: bool) -> (Vec<MentionRow>, usize);

    /// Recent hashtags, most recent first. May contain duplicates; the
    /// engine deduplicates.
    fn hashtags(&self) -> Vec<String>;

    /// Bot commands eligible under `scope`.
    fn bot_commands(&self, scope: &Scope) -> Vec<BotCommandRow>;

    /// The full eligible sticker set for a trigger emoji.
    fn stickers(&self, trigger_emoji: &str) -> Vec<StickerRow>;
}

/// Where a scoped candidate is eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Eligibility {
    Chat(ChatId),
    User(UserId),
    Channel(ChannelId),
}

impl Eligibility {
    fn matches(&self, scope: &Scope) -> bool {
        match (self, scope) {
            (Eligibility::Chat(a), Scope::Chat(b)) => a == b,
            (Eligibility::User(a), Scope::User(b)) => a == b,
            (Eligibility::Channel(a), Scope::Channel(b)) => a == b,
            _ => false,
        }
    }
}

/// An in-memory suggestion source backed by static candidate lists.
///
/// Entries are returned in insertion order, so insertion order is the
/// relevance order.
#[derive(Debug, Default)]
pub struct StaticSource {
    mentions: Vec<(Eligibility, MentionRow)>,
    inline_bots: Vec<MentionRow>,
    hashtags: Vec<String>,
    commands: Vec<(Eligibility, BotCommandRow)>,
    stickers: Vec<StickerRow>,
}

impl StaticSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mention candidate eligible in a group chat.
    pub fn add_chat_member(&mut self, chat: ChatId, row: MentionRow) {
        self.mentions.push((Eligibility::Chat(chat), row));
    }

    /// Add a mention candidate eligible in a channel.
    pub fn add_channel_member(&mut self, channel: ChannelId, row: MentionRow) {
        self.mentions.push((Eligibility::Channel(channel), row));
    }

    /// Add a recently-used inline bot, prepended to mention candidates when
    /// requested.
    pub fn add_inline_bot(&mut self, row: MentionRow) {
        self.inline_bots.push(row);
    }

    /// Add a recent hashtag (without the `#` sigil).
    pub fn add_hashtag(&mut self, tag: impl Into<String>) {
        self.hashtags.push(tag.into());
    }

    /// Add a bot command eligible in a group chat.
    pub fn add_chat_command(&mut self, chat: ChatId, row: BotCommandRow) {
        self.commands.push((Eligibility::Chat(chat), row));
    }

    /// Add a bot command eligible in a direct conversation with the bot.
    pub fn add_user_command(&mut self, user: UserId, row: BotCommandRow) {
        self.commands.push((Eligibility::User(user), row));
    }

    /// Add a bot command eligible in a channel.
    pub fn add_channel_command(&mut self, channel: ChannelId, row: BotCommandRow) {
        self.commands.push((Eligibility::Channel(channel), row));
    }

    /// Add a sticker candidate, keyed by its trigger emoji.
    pub fn add_sticker(&mut self, row: StickerRow) {
        self.stickers.push(row);
    }
}

impl SuggestionSource for StaticSource {
    fn mentions(&self, scope: &Scope, include_inline_bots: bool) -> (Vec<MentionRow>, usize) {
        let mut rows = Vec::new();
        let mut inline_count = 0;
        if include_inline_bots {
            rows.extend(self.inline_bots.iter().cloned());
            inline_count = rows.len();
        }
        rows.extend(
            self.mentions
                .iter()
                .filter(|(eligibility, _)| eligibility.matches(scope))
                .map(|(_, row)| row.clone()),
        );
        (rows, inline_count)
    }

    fn hashtags(&self) -> Vec<String> {
        self.hashtags.clone()
    }

    fn bot_commands(&self, scope: &Scope) -> Vec<BotCommandRow> {
        self.commands
            .iter()
            .filter(|(eligibility, _)| eligibility.matches(scope))
            .map(|(_, row)| row.clone())
            .collect()
    }

    fn stickers(&self, trigger_emoji: &str) -> Vec<StickerRow> {
        self.stickers
            .iter()
            .filter(|row| row.emoji == trigger_emoji)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::DocumentId;

    #[test]
    fn test_mentions_are_scope_restricted() {
        let mut source = StaticSource::new();
        let chat = ChatId(1);
        let other = ChatId(2);
        source.add_chat_member(chat, MentionRow::new(UserId(10), "john"));
        source.add_chat_member(other, MentionRow::new(UserId(11), "mike"));

        let (rows, inline) = source.mentions(&Scope::Chat(chat), false);
        assert_eq!(inline, 0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].username, "john");

        // No peer context: nothing is eligible.
        let (rows, _) = source.mentions(&Scope::None, false);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_inline_bots_lead_the_mention_list() {
        let mut source = StaticSource::new();
        let chat = ChatId(1);
        source.add_chat_member(chat, MentionRow::new(UserId(10), "john"));
        source.add_inline_bot(MentionRow::new(UserId(99), "gif"));

        let (rows, inline) = source.mentions(&Scope::Chat(chat), true);
        assert_eq!(inline, 1);
        assert_eq!(rows[0].username, "gif");
        assert_eq!(rows[1].username, "john");
    }

    #[test]
    fn test_commands_by_peer_kind() {
        let mut source = StaticSource::new();
        let bot = UserId(5);
        source.add_user_command(bot, BotCommandRow::new(bot, "helper", "start", ""));
        source.add_chat_command(ChatId(1), BotCommandRow::new(bot, "helper", "settings", ""));

        let direct = source.bot_commands(&Scope::User(bot));
        assert_eq!(direct.len(), 1);
        assert_eq!(direct[0].command, "start");

        let in_chat = source.bot_commands(&Scope::Chat(ChatId(1)));
        assert_eq!(in_chat.len(), 1);
        assert_eq!(in_chat[0].command, "settings");
    }

    #[test]
    fn test_stickers_by_emoji() {
        let mut source = StaticSource::new();
        source.add_sticker(StickerRow::new(DocumentId(1), "😀"));
        source.add_sticker(StickerRow::new(DocumentId(2), "😢"));

        let rows = source.stickers("😀");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].document, DocumentId(1));
    }
}

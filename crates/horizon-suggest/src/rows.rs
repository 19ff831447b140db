//! Candidate rows and the candidate store.
//!
//! Rows are read-only views into externally-owned entities. The engine never
//! owns candidate entity lifetime; it holds non-owning keys ([`UserId`],
//! [`DocumentId`], ...) and transient display text supplied by the data
//! source, and rebuilds everything on each filter call.

/// Non-owning key of a user entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub u64);

/// Non-owning key of a group-chat entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(pub u64);

/// Non-owning key of a channel entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u64);

/// Non-owning key of a sticker document entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// The active suggestion category.
///
/// Exactly one mode is active at a time; switching modes clears the
/// candidate store and resets the selection cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// `@username` mentions.
    #[default]
    Mentions,
    /// `#hashtag` suggestions.
    Hashtags,
    /// `/command` bot commands.
    BotCommands,
    /// Sticker suggestions for a trigger emoji.
    Stickers,
}

impl Mode {
    /// The row kind this mode produces.
    pub fn row_kind(self) -> RowKind {
        match self {
            Mode::Mentions => RowKind::Mention,
            Mode::Hashtags => RowKind::Hashtag,
            Mode::BotCommands => RowKind::BotCommand,
            Mode::Stickers => RowKind::Sticker,
        }
    }

    /// Whether this mode lays rows out as a grid rather than a list.
    pub fn is_grid(self) -> bool {
        matches!(self, Mode::Stickers)
    }
}

/// A mention candidate supplied by the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionRow {
    /// The mentioned user.
    pub user: UserId,
    /// The username matched against the query (without the `@` sigil).
    pub username: String,
}

impl MentionRow {
    /// Create a mention row.
    pub fn new(user: UserId, username: impl Into<String>) -> Self {
        Self {
            user,
            username: username.into(),
        }
    }
}

/// A bot-command candidate supplied by the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotCommandRow {
    /// The bot that owns the command.
    pub bot: UserId,
    /// The bot's username, used to qualify the command in multi-bot chats.
    pub bot_username: String,
    /// The command name matched against the query (without the `/` sigil).
    pub command: String,
    /// Human-readable description, passed through for the renderer.
    pub description: String,
}

impl BotCommandRow {
    /// Create a bot-command row.
    pub fn new(
        bot: UserId,
        bot_username: impl Into<String>,
        command: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            bot,
            bot_username: bot_username.into(),
            command: command.into(),
            description: description.into(),
        }
    }
}

/// A sticker candidate supplied by the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickerRow {
    /// The sticker document.
    pub document: DocumentId,
    /// The emoji this sticker is suggested for.
    pub emoji: String,
}

impl StickerRow {
    /// Create a sticker row.
    pub fn new(document: DocumentId, emoji: impl Into<String>) -> Self {
        Self {
            document,
            emoji: emoji.into(),
        }
    }
}

/// Discriminant of a [`Row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Mention,
    Hashtag,
    BotCommand,
    Sticker,
}

/// One selectable suggestion entry.
///
/// A tagged variant over the four candidate kinds, so the selection cursor
/// and scroll synchronizer stay mode-agnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Mention(MentionRow),
    Hashtag(String),
    BotCommand(BotCommandRow),
    Sticker(StickerRow),
}

impl Row {
    /// The kind of this row.
    pub fn kind(&self) -> RowKind {
        match self {
            Row::Mention(_) => RowKind::Mention,
            Row::Hashtag(_) => RowKind::Hashtag,
            Row::BotCommand(_) => RowKind::BotCommand,
            Row::Sticker(_) => RowKind::Sticker,
        }
    }

    /// The text this row is matched against, if it has one.
    ///
    /// Stickers carry no match text.
    pub fn match_text(&self) -> Option<&str> {
        match self {
            Row::Mention(m) => Some(&m.username),
            Row::Hashtag(tag) => Some(tag),
            Row::BotCommand(c) => Some(&c.command),
            Row::Sticker(_) => None,
        }
    }
}

/// The ordered candidate rows for the currently active mode.
///
/// Rebuilt on every successful filter/show call and emptied on hide-finish
/// or mode switch.
#[derive(Debug, Default)]
pub struct CandidateStore {
    rows: Vec<Row>,
    /// How many leading rows are "recently used via inline bot" entries.
    /// Adjusts grid-navigation boundaries only, never row identity.
    recent_inline_bots: usize,
}

impl CandidateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all rows.
    pub fn replace(&mut self, rows: Vec<Row>, recent_inline_bots: usize) {
        self.rows = rows;
        self.recent_inline_bots = recent_inline_bots.min(self.rows.len());
    }

    /// Empty the store.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.recent_inline_bots = 0;
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// All rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Leading recently-used-inline-bot row count.
    pub fn recent_inline_bots(&self) -> usize {
        self.recent_inline_bots
    }

    /// Set the leading recently-used-inline-bot row count, clamped to the
    /// current row count.
    pub fn set_recent_inline_bots(&mut self, count: usize) {
        self.recent_inline_bots = count.min(self.rows.len());
    }
}

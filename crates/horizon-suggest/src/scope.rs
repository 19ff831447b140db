//! Candidate eligibility scope.

use crate::rows::{ChannelId, ChatId, UserId};

/// The chat-like context restricting candidate eligibility.
///
/// At most one peer kind is active at a time (exclusive by construction).
/// The scope is owned by the controller, replaced on each `show_filtered`
/// call and cleared on mode switch. It holds non-owning keys only; the data
/// source re-validates them at the start of each filter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// No peer context; mention and bot-command candidates are ineligible.
    #[default]
    None,
    /// A group chat; candidates are limited to its members.
    Chat(ChatId),
    /// A direct conversation with a single user.
    User(UserId),
    /// A channel.
    Channel(ChannelId),
}

impl Scope {
    /// The group chat this scope points at, if any.
    pub fn chat(&self) -> Option<ChatId> {
        match self {
            Scope::Chat(id) => Some(*id),
            _ => None,
        }
    }

    /// The direct user this scope points at, if any.
    pub fn user(&self) -> Option<UserId> {
        match self {
            Scope::User(id) => Some(*id),
            _ => None,
        }
    }

    /// The channel this scope points at, if any.
    pub fn channel(&self) -> Option<ChannelId> {
        match self {
            Scope::Channel(id) => Some(*id),
            _ => None,
        }
    }

    /// Whether no peer context is set.
    pub fn is_none(&self) -> bool {
        matches!(self, Scope::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_are_exclusive() {
        let scope = Scope::Chat(ChatId(3));
        assert_eq!(scope.chat(), Some(ChatId(3)));
        assert_eq!(scope.user(), None);
        assert_eq!(scope.channel(), None);
        assert!(!scope.is_none());

        assert!(Scope::None.is_none());
        assert_eq!(Scope::User(UserId(1)).user(), Some(UserId(1)));
        assert_eq!(Scope::Channel(ChannelId(2)).channel(), Some(ChannelId(2)));
    }
}

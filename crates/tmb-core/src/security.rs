use std::collections::HashSet;

use crate::domain::ChatId;

// ============== Authorization ==============

/// Chats allowed to talk to the bot. Built once from config, never mutated.
#[derive(Clone, Debug, Default)]
pub struct AuthorizationSet {
    chats: HashSet<i64>,
}

impl AuthorizationSet {
    pub fn new(chat_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            chats: chat_ids.into_iter().collect(),
        }
    }

    pub fn is_authorized(&self, chat_id: ChatId) -> bool {
        self.chats.contains(&chat_id.0)
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_listed_chats_are_authorized() {
        let auth = AuthorizationSet::new([42, -100_123]);
        assert!(auth.is_authorized(ChatId(42)));
        assert!(auth.is_authorized(ChatId(-100_123)));
        assert!(!auth.is_authorized(ChatId(7)));
        assert_eq!(auth.len(), 2);
    }

    #[test]
    fn empty_set_denies_everyone() {
        let auth = AuthorizationSet::default();
        assert!(auth.is_empty());
        assert!(!auth.is_authorized(ChatId(42)));
    }

    #[test]
    fn duplicate_ids_collapse() {
        let auth = AuthorizationSet::new([1, 1, 2]);
        assert_eq!(auth.len(), 2);
    }
}

//! Client lookup for mode targets.
//!
//! Rank changes name their target by nickname (from users) or UID (from
//! servers). A target that changed nick moments ago is still found under
//! the old name, so a `+o` racing a NICK lands on the right user.

use crate::state::{Client, Uid};
use chrono::Utc;
use ircd_proto::irc_to_lower;
use std::collections::HashMap;
use tracing::debug;

/// How long a previous nickname keeps resolving to its new owner, in
/// seconds.
pub const NICK_CHASE_WINDOW: i64 = 90;

/// Read access to known clients.
pub trait ClientDirectory {
    /// Look up by UID or SID.
    fn find_by_uid(&self, uid: &str) -> Option<&Client>;

    /// Look up a mode target: a UID when `name` starts with a digit,
    /// otherwise a current or recently changed nickname.
    fn find_chasing(&self, name: &str) -> Option<&Client>;
}

#[derive(Debug, Clone)]
struct NickChange {
    old_lower: String,
    uid: Uid,
    at: i64,
}

/// In-memory client table.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: HashMap<Uid, Client>,
    nicks: HashMap<String, Uid>,
    history: Vec<NickChange>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Add or replace a client.
    pub fn insert(&mut self, client: Client) {
        if let Some(old) = self.clients.get(&client.uid) {
            self.nicks.remove(&irc_to_lower(&old.name));
        }
        self.nicks.insert(irc_to_lower(&client.name), client.uid.clone());
        self.clients.insert(client.uid.clone(), client);
    }

    pub fn remove(&mut self, uid: &str) -> Option<Client> {
        let client = self.clients.remove(uid)?;
        self.nicks.remove(&irc_to_lower(&client.name));
        self.history.retain(|h| h.uid != uid);
        Some(client)
    }

    pub fn find_by_nick(&self, nick: &str) -> Option<&Client> {
        self.nicks
            .get(&irc_to_lower(nick))
            .and_then(|uid| self.clients.get(uid))
    }

    /// Record a nick change at the current time.
    pub fn rename(&mut self, uid: &str, new_nick: &str) -> bool {
        self.rename_at(uid, new_nick, Utc::now().timestamp())
    }

    /// Record a nick change at `at` (unix seconds).
    pub fn rename_at(&mut self, uid: &str, new_nick: &str, at: i64) -> bool {
        let Some(client) = self.clients.get_mut(uid) else {
            return false;
        };
        let old_lower = irc_to_lower(&client.name);
        self.nicks.remove(&old_lower);
        client.name = new_nick.to_string();
        self.nicks.insert(irc_to_lower(new_nick), client.uid.clone());

        let cutoff = at - NICK_CHASE_WINDOW;
        self.history.retain(|h| h.at >= cutoff);
        self.history.push(NickChange {
            old_lower,
            uid: uid.to_string(),
            at,
        });
        true
    }

    fn chase(&self, name: &str, now: i64) -> Option<&Client> {
        let lower = irc_to_lower(name);
        let change = self
            .history
            .iter()
            .rev()
            .find(|h| h.old_lower == lower && now - h.at <= NICK_CHASE_WINDOW)?;
        debug!(old = %name, uid = %change.uid, "chased nick change");
        self.clients.get(&change.uid)
    }
}

impl ClientDirectory for ClientRegistry {
    fn find_by_uid(&self, uid: &str) -> Option<&Client> {
        self.clients.get(uid)
    }

    fn find_chasing(&self, name: &str) -> Option<&Client> {
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            return self.find_by_uid(name);
        }
        self.find_by_nick(name)
            .or_else(|| self.chase(name, Utc::now().timestamp()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ClientRegistry {
        let mut reg = ClientRegistry::new();
        reg.insert(Client::local_user("001AAAAAA", "Alice", "a", "h"));
        reg.insert(Client::remote_user("002AAAAAA", "bob", "b", "h"));
        reg
    }

    #[test]
    fn finds_by_nick_or_uid() {
        let reg = registry();
        assert_eq!(reg.find_chasing("alice").map(|c| c.uid.as_str()), Some("001AAAAAA"));
        assert_eq!(reg.find_chasing("ALICE").map(|c| c.uid.as_str()), Some("001AAAAAA"));
        assert_eq!(reg.find_chasing("002AAAAAA").map(|c| c.name.as_str()), Some("bob"));
        assert!(reg.find_chasing("carol").is_none());
        assert!(reg.find_chasing("003AAAAAA").is_none());
    }

    #[test]
    fn chases_recent_nick_change() {
        let mut reg = registry();
        assert!(reg.rename("002AAAAAA", "robert"));
        assert_eq!(reg.find_chasing("bob").map(|c| c.name.as_str()), Some("robert"));
        assert_eq!(reg.find_chasing("robert").map(|c| c.uid.as_str()), Some("002AAAAAA"));
    }

    #[test]
    fn old_nick_expires() {
        let mut reg = registry();
        let long_ago = Utc::now().timestamp() - NICK_CHASE_WINDOW - 10;
        assert!(reg.rename_at("002AAAAAA", "robert", long_ago));
        assert!(reg.find_chasing("bob").is_none());
    }

    #[test]
    fn current_holder_wins_over_history() {
        let mut reg = registry();
        reg.rename("002AAAAAA", "robert");
        reg.insert(Client::local_user("001AAAAAB", "bob", "new", "h"));
        assert_eq!(reg.find_chasing("bob").map(|c| c.uid.as_str()), Some("001AAAAAB"));
    }

    #[test]
    fn remove_drops_nick_and_history() {
        let mut reg = registry();
        reg.rename("002AAAAAA", "robert");
        assert!(reg.remove("002AAAAAA").is_some());
        assert!(reg.find_chasing("robert").is_none());
        assert!(reg.find_chasing("bob").is_none());
        assert_eq!(reg.len(), 1);
    }
}

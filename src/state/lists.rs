//! Ban, exception and invite-exception lists.

use crate::security::mask::{CanonicalMask, HostForm};
use crate::state::Client;
use ircd_proto::{Response, irc_eq, wildcard_match};

/// Which of the three mask lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// `+b`
    Ban,
    /// `+e`
    Except,
    /// `+I`
    InviteEx,
}

impl ListKind {
    pub const ALL: [ListKind; 3] = [ListKind::Ban, ListKind::Except, ListKind::InviteEx];

    pub fn letter(self) -> char {
        match self {
            ListKind::Ban => 'b',
            ListKind::Except => 'e',
            ListKind::InviteEx => 'I',
        }
    }

    /// Numeric used for each listed entry.
    pub fn entry_reply(self) -> Response {
        match self {
            ListKind::Ban => Response::RPL_BANLIST,
            ListKind::Except => Response::RPL_EXCEPTLIST,
            ListKind::InviteEx => Response::RPL_INVITELIST,
        }
    }

    /// Numeric terminating a listing.
    pub fn end_reply(self) -> Response {
        match self {
            ListKind::Ban => Response::RPL_ENDOFBANLIST,
            ListKind::Except => Response::RPL_ENDOFEXCEPTLIST,
            ListKind::InviteEx => Response::RPL_ENDOFINVITELIST,
        }
    }

    /// Whether mutating this list invalidates cached ban results.
    pub fn affects_ban_cache(self) -> bool {
        !matches!(self, ListKind::InviteEx)
    }
}

/// An entry in a list (bans, excepts, invex).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub user: String,
    pub host: String,
    pub host_form: HostForm,
    /// Who set it: `nick!user@host` or a server name.
    pub who: String,
    /// Unix timestamp of when it was set.
    pub when: i64,
}

impl ListEntry {
    pub fn new(mask: CanonicalMask, who: impl Into<String>, when: i64) -> Self {
        Self {
            name: mask.name,
            user: mask.user,
            host: mask.host,
            host_form: mask.host_form,
            who: who.into(),
            when,
        }
    }

    /// `name!user@host`
    pub fn mask(&self) -> String {
        format!("{}!{}@{}", self.name, self.user, self.host)
    }

    /// Same entry under RFC 1459 casemapping.
    pub fn same_mask(&self, name: &str, user: &str, host: &str) -> bool {
        irc_eq(&self.name, name) && irc_eq(&self.user, user) && irc_eq(&self.host, host)
    }

    /// Whether `client` is covered by this entry.
    pub fn matches(&self, client: &Client) -> bool {
        if !wildcard_match(&self.name, &client.name) || !wildcard_match(&self.user, &client.username) {
            return false;
        }
        match self.host_form {
            HostForm::Host => {
                wildcard_match(&self.host, &client.host)
                    || wildcard_match(&self.host, &client.sockhost)
            }
            form => client.ip.is_some_and(|ip| form.contains(&ip)),
        }
    }
}

/// One channel list, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct BanList {
    entries: Vec<ListEntry>,
}

impl BanList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListEntry> {
        self.entries.iter()
    }

    pub fn contains(&self, name: &str, user: &str, host: &str) -> bool {
        self.entries.iter().any(|e| e.same_mask(name, user, host))
    }

    /// Insert unless an entry with the same triple exists. Returns whether
    /// the list changed.
    pub fn add(&mut self, entry: ListEntry) -> bool {
        if self.contains(&entry.name, &entry.user, &entry.host) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove the entry with this triple, if any.
    pub fn remove(&mut self, name: &str, user: &str, host: &str) -> Option<ListEntry> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.same_mask(name, user, host))?;
        Some(self.entries.remove(pos))
    }

    /// First entry that covers `client`.
    pub fn find_match(&self, client: &Client) -> Option<&ListEntry> {
        self.entries.iter().find(|e| e.matches(client))
    }
}

//! Channel-related types and state.

use crate::state::lists::{BanList, ListKind};
use crate::state::member::Membership;
use crate::state::{Client, Uid};
use bitflags::bitflags;
use std::collections::HashMap;
use std::num::NonZeroU32;

bitflags! {
    /// Parameterless channel modes.
    pub struct ChannelModes: u32 {
        /// `+p`
        const PRIVATE = 0x0001;
        /// `+s`
        const SECRET = 0x0002;
        /// `+m`
        const MODERATED = 0x0004;
        /// `+t`
        const TOPIC_LIMIT = 0x0008;
        /// `+i`
        const INVITE_ONLY = 0x0010;
        /// `+n`
        const NO_PRIVMSGS = 0x0020;
        /// `+S`
        const SSL_ONLY = 0x0040;
        /// `+O`
        const OPER_ONLY = 0x0080;
        /// `+r`, set by services only
        const REGISTERED = 0x0100;
        /// `+R`
        const REG_ONLY = 0x0200;
        /// `+c`
        const NO_CTRL = 0x0400;
        /// `+M`
        const MOD_REG = 0x0800;
        /// `+C`
        const NO_CTCP = 0x1000;
        /// `+T`
        const NO_NOTICE = 0x2000;
        /// `+u`, hides list contents from non-ops
        const HIDE_BMASKS = 0x4000;
        /// `+L`, raised list capacity
        const EXT_LIMIT = 0x8000;
    }
}

impl ChannelModes {
    /// Letters in the order they are reported.
    pub const LETTERS: [(char, ChannelModes); 16] = [
        ('c', ChannelModes::NO_CTRL),
        ('i', ChannelModes::INVITE_ONLY),
        ('m', ChannelModes::MODERATED),
        ('n', ChannelModes::NO_PRIVMSGS),
        ('p', ChannelModes::PRIVATE),
        ('r', ChannelModes::REGISTERED),
        ('s', ChannelModes::SECRET),
        ('t', ChannelModes::TOPIC_LIMIT),
        ('u', ChannelModes::HIDE_BMASKS),
        ('C', ChannelModes::NO_CTCP),
        ('L', ChannelModes::EXT_LIMIT),
        ('M', ChannelModes::MOD_REG),
        ('O', ChannelModes::OPER_ONLY),
        ('R', ChannelModes::REG_ONLY),
        ('S', ChannelModes::SSL_ONLY),
        ('T', ChannelModes::NO_NOTICE),
    ];

    pub fn from_letter(letter: char) -> Option<ChannelModes> {
        Self::LETTERS
            .iter()
            .find(|(c, _)| *c == letter)
            .map(|(_, m)| *m)
    }
}

impl Default for ChannelModes {
    fn default() -> Self {
        ChannelModes::empty()
    }
}

/// Flags plus the two parameterised modes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelModeState {
    pub flags: ChannelModes,
    pub limit: Option<NonZeroU32>,
    pub key: Option<String>,
}

/// A channel as mode handling sees it.
#[derive(Debug, Clone)]
pub struct Channel {
    pub name: String,
    /// Creation timestamp, used for TS comparison on TMODE.
    pub created: i64,
    pub mode: ChannelModeState,
    pub members: HashMap<Uid, Membership>,
    pub bans: BanList,
    pub excepts: BanList,
    pub invex: BanList,
}

impl Channel {
    pub fn new(name: impl Into<String>, created: i64) -> Self {
        Self {
            name: name.into(),
            created,
            mode: ChannelModeState::default(),
            members: HashMap::new(),
            bans: BanList::new(),
            excepts: BanList::new(),
            invex: BanList::new(),
        }
    }

    #[inline]
    pub fn has_mode(&self, flag: ChannelModes) -> bool {
        self.mode.flags.contains(flag)
    }

    pub fn add_member(&mut self, member: Membership) {
        self.members.insert(member.uid.clone(), member);
    }

    pub fn member(&self, uid: &str) -> Option<&Membership> {
        self.members.get(uid)
    }

    pub fn member_mut(&mut self, uid: &str) -> Option<&mut Membership> {
        self.members.get_mut(uid)
    }

    pub fn list(&self, kind: ListKind) -> &BanList {
        match kind {
            ListKind::Ban => &self.bans,
            ListKind::Except => &self.excepts,
            ListKind::InviteEx => &self.invex,
        }
    }

    pub fn list_mut(&mut self, kind: ListKind) -> &mut BanList {
        match kind {
            ListKind::Ban => &mut self.bans,
            ListKind::Except => &mut self.excepts,
            ListKind::InviteEx => &mut self.invex,
        }
    }

    /// Entries across all three lists; capacity is shared.
    pub fn list_total(&self) -> usize {
        self.bans.len() + self.excepts.len() + self.invex.len()
    }

    /// Forget cached ban results for every local member.
    pub fn clear_ban_cache(&mut self) {
        for member in self.members.values_mut().filter(|m| m.local) {
            member.clear_ban_cache();
        }
    }

    /// Current modes as `+flags[lk] [params]`.
    ///
    /// Limit and key values are only included when `show_params` is set,
    /// which callers do for members and servers.
    pub fn mode_string(&self, show_params: bool) -> String {
        let mut letters = String::from("+");
        let mut params = Vec::new();

        for (letter, flag) in ChannelModes::LETTERS {
            if self.mode.flags.contains(flag) {
                letters.push(letter);
            }
        }
        if let Some(limit) = self.mode.limit {
            letters.push('l');
            if show_params {
                params.push(limit.to_string());
            }
        }
        if let Some(key) = &self.mode.key {
            letters.push('k');
            if show_params {
                params.push(key.clone());
            }
        }

        if params.is_empty() {
            letters
        } else {
            format!("{} {}", letters, params.join(" "))
        }
    }

    /// Banned and not covered by an exception.
    pub fn is_banned(&self, client: &Client) -> bool {
        self.bans.find_match(client).is_some() && self.excepts.find_match(client).is_none()
    }

    /// Covered by an invite exception.
    pub fn matches_invex(&self, client: &Client) -> bool {
        self.invex.find_match(client).is_some()
    }

    /// Ban check for a member speaking in the channel, memoised in the
    /// member's flags until the next ban or exception change.
    pub fn is_silenced_by_ban(&mut self, client: &Client) -> bool {
        if let Some(cached) = self.member(&client.uid).and_then(Membership::cached_ban) {
            return cached;
        }
        let silenced = self.is_banned(client);
        if let Some(member) = self.members.get_mut(&client.uid) {
            member.cache_ban(silenced);
        }
        silenced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::canonicalize;
    use crate::state::lists::ListEntry;

    fn entry(mask: &str) -> ListEntry {
        ListEntry::new(canonicalize(mask), "irc.test", 0)
    }

    #[test]
    fn mode_string_orders_flags_then_limit_and_key() {
        let mut chan = Channel::new("#c", 1);
        chan.mode.flags = ChannelModes::TOPIC_LIMIT | ChannelModes::NO_PRIVMSGS | ChannelModes::SSL_ONLY;
        chan.mode.limit = NonZeroU32::new(10);
        chan.mode.key = Some("secret".into());
        assert_eq!(chan.mode_string(true), "+ntSlk 10 secret");
        assert_eq!(chan.mode_string(false), "+ntSlk");
    }

    #[test]
    fn empty_mode_string() {
        assert_eq!(Channel::new("#c", 1).mode_string(true), "+");
    }

    #[test]
    fn exception_overrides_ban() {
        let mut chan = Channel::new("#c", 1);
        let client = Client::local_user("001AAAAAA", "nick", "user", "host.example");
        chan.bans.add(entry("*!*@*.example"));
        assert!(chan.is_banned(&client));
        chan.excepts.add(entry("nick"));
        assert!(!chan.is_banned(&client));
    }

    #[test]
    fn silenced_check_is_cached_until_cleared() {
        let mut chan = Channel::new("#c", 1);
        let client = Client::local_user("001AAAAAA", "nick", "user", "host.example");
        chan.add_member(Membership::new("001AAAAAA", true));

        assert!(!chan.is_silenced_by_ban(&client));
        chan.bans.add(entry("nick"));
        // Stale until the cache is cleared.
        assert!(!chan.is_silenced_by_ban(&client));
        chan.clear_ban_cache();
        assert!(chan.is_silenced_by_ban(&client));
    }

    #[test]
    fn clear_ban_cache_only_touches_local_members() {
        let mut chan = Channel::new("#c", 1);
        let mut local = Membership::new("001AAAAAA", true);
        local.cache_ban(true);
        let mut remote = Membership::new("002AAAAAA", false);
        remote.cache_ban(true);
        chan.add_member(local);
        chan.add_member(remote);

        chan.clear_ban_cache();
        assert_eq!(chan.member("001AAAAAA").and_then(Membership::cached_ban), None);
        assert_eq!(chan.member("002AAAAAA").and_then(Membership::cached_ban), Some(true));
    }

    #[test]
    fn letters_round_trip() {
        for (letter, flag) in ChannelModes::LETTERS {
            assert_eq!(ChannelModes::from_letter(letter), Some(flag));
        }
        assert_eq!(ChannelModes::from_letter('b'), None);
    }
}

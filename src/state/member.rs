//! Channel membership.

use crate::state::Uid;
use bitflags::bitflags;

bitflags! {
    /// Per-member rank bits plus the cached ban evaluation.
    pub struct MemberFlags: u32 {
        /// `+o` (@)
        const CHANOP = 0x01;
        /// `+h` (%)
        const HALFOP = 0x02;
        /// `+v` (+)
        const VOICE = 0x04;
        /// Ban state below has been evaluated.
        const BAN_CHECKED = 0x08;
        /// Evaluated as banned and not excepted.
        const BAN_SILENCED = 0x10;

        const RANKS = Self::CHANOP.bits | Self::HALFOP.bits | Self::VOICE.bits;
        const BAN_CACHE = Self::BAN_CHECKED.bits | Self::BAN_SILENCED.bits;
    }
}

/// A user's presence on one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub uid: Uid,
    pub flags: MemberFlags,
    /// The member is connected to this server.
    pub local: bool,
}

impl Membership {
    pub fn new(uid: impl Into<Uid>, local: bool) -> Self {
        Self {
            uid: uid.into(),
            flags: MemberFlags::empty(),
            local,
        }
    }

    pub fn with_flags(mut self, flags: MemberFlags) -> Self {
        self.flags |= flags & MemberFlags::RANKS;
        self
    }

    #[inline]
    pub fn is_chanop(&self) -> bool {
        self.flags.contains(MemberFlags::CHANOP)
    }

    #[inline]
    pub fn is_halfop(&self) -> bool {
        self.flags.contains(MemberFlags::HALFOP)
    }

    #[inline]
    pub fn has_voice(&self) -> bool {
        self.flags.contains(MemberFlags::VOICE)
    }

    /// Highest status prefix, as shown in NAMES.
    pub fn prefix_char(&self) -> Option<char> {
        if self.is_chanop() {
            Some('@')
        } else if self.is_halfop() {
            Some('%')
        } else if self.has_voice() {
            Some('+')
        } else {
            None
        }
    }

    /// Cached ban result, if one has been computed since the last list
    /// change.
    pub fn cached_ban(&self) -> Option<bool> {
        self.flags
            .contains(MemberFlags::BAN_CHECKED)
            .then(|| self.flags.contains(MemberFlags::BAN_SILENCED))
    }

    pub fn cache_ban(&mut self, silenced: bool) {
        self.flags.insert(MemberFlags::BAN_CHECKED);
        self.flags.set(MemberFlags::BAN_SILENCED, silenced);
    }

    pub fn clear_ban_cache(&mut self) {
        self.flags.remove(MemberFlags::BAN_CACHE);
    }
}

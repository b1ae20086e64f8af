//! Channel mode letter table.

use super::context::Access;
use crate::state::{ChannelModes, ListKind, MemberFlags};
use std::sync::OnceLock;

/// What a mode letter does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    /// Parameterless channel flag.
    Simple(ChannelModes),
    /// Mask list.
    List(ListKind),
    /// Member rank, takes a nickname.
    Rank(MemberFlags),
    /// `+l <n>`
    Limit,
    /// `+k <key>`
    Key,
}

/// Table row.
#[derive(Debug, Clone, Copy)]
pub struct ModeDef {
    pub letter: char,
    pub kind: ModeKind,
    /// Lowest access that passes the rank gate.
    pub min_access: Access,
    /// Local users must be IRC operators.
    pub only_opers: bool,
    /// Only servers and services may change it.
    pub only_servers: bool,
}

const fn simple(letter: char, flag: ChannelModes) -> ModeDef {
    ModeDef {
        letter,
        kind: ModeKind::Simple(flag),
        min_access: Access::HalfOp,
        only_opers: false,
        only_servers: false,
    }
}

const fn with_kind(letter: char, kind: ModeKind, min_access: Access) -> ModeDef {
    ModeDef {
        letter,
        kind,
        min_access,
        only_opers: false,
        only_servers: false,
    }
}

const fn oper_only(def: ModeDef) -> ModeDef {
    ModeDef {
        only_opers: true,
        ..def
    }
}

const fn server_only(def: ModeDef) -> ModeDef {
    ModeDef {
        only_servers: true,
        ..def
    }
}

/// Every supported channel mode.
pub static MODE_TABLE: [ModeDef; 24] = [
    with_kind('b', ModeKind::List(ListKind::Ban), Access::HalfOp),
    simple('c', ChannelModes::NO_CTRL),
    with_kind('e', ModeKind::List(ListKind::Except), Access::HalfOp),
    with_kind('h', ModeKind::Rank(MemberFlags::HALFOP), Access::ChanOp),
    simple('i', ChannelModes::INVITE_ONLY),
    with_kind('k', ModeKind::Key, Access::HalfOp),
    with_kind('l', ModeKind::Limit, Access::HalfOp),
    simple('m', ChannelModes::MODERATED),
    simple('n', ChannelModes::NO_PRIVMSGS),
    with_kind('o', ModeKind::Rank(MemberFlags::CHANOP), Access::ChanOp),
    simple('p', ChannelModes::PRIVATE),
    server_only(simple('r', ChannelModes::REGISTERED)),
    simple('s', ChannelModes::SECRET),
    simple('t', ChannelModes::TOPIC_LIMIT),
    simple('u', ChannelModes::HIDE_BMASKS),
    with_kind('v', ModeKind::Rank(MemberFlags::VOICE), Access::ChanOp),
    simple('C', ChannelModes::NO_CTCP),
    with_kind('I', ModeKind::List(ListKind::InviteEx), Access::HalfOp),
    oper_only(simple('L', ChannelModes::EXT_LIMIT)),
    simple('M', ChannelModes::MOD_REG),
    oper_only(simple('O', ChannelModes::OPER_ONLY)),
    simple('R', ChannelModes::REG_ONLY),
    simple('S', ChannelModes::SSL_ONLY),
    simple('T', ChannelModes::NO_NOTICE),
];

static MODE_MAP: OnceLock<[Option<&'static ModeDef>; 128]> = OnceLock::new();

fn mode_map() -> &'static [Option<&'static ModeDef>; 128] {
    MODE_MAP.get_or_init(|| {
        let mut map = [None; 128];
        for def in MODE_TABLE.iter() {
            map[def.letter as usize] = Some(def);
        }
        map
    })
}

/// Table row for `letter`, if it is a known channel mode.
#[inline]
pub fn lookup(letter: char) -> Option<&'static ModeDef> {
    let index = letter as usize;
    if index < 128 { mode_map()[index] } else { None }
}

/// Every supported letter, for ISUPPORT-style advertising.
pub fn supported_letters() -> String {
    MODE_TABLE.iter().map(|d| d.letter).collect()
}

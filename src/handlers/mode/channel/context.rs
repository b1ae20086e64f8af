//! Per-command scratch state.
//!
//! A [`ModeBatch`] lives for exactly one MODE/TMODE command: it tracks the
//! direction cursor, which errors were already reported, which simple
//! modes were already handled, how many parameters a local user has spent,
//! and the changes accumulated so far.

use crate::state::{ChannelModes, Client, Membership};
use bitflags::bitflags;

/// Most parameter-carrying changes a local user gets per command, and most
/// parameters per outgoing line.
pub const MAX_MODE_PARAMS: usize = 6;

/// Direction cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Add,
    Remove,
    /// `=`: list queries only.
    Query,
}

impl Direction {
    pub fn sigil(self) -> char {
        match self {
            Direction::Add => '+',
            Direction::Remove => '-',
            Direction::Query => '=',
        }
    }
}

/// Who gets to see a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    All,
    /// Operators and half-operators only.
    OpsOnly,
}

/// One applied change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeChange {
    pub letter: char,
    /// `Add` or `Remove`; queries never produce changes.
    pub dir: Direction,
    /// Client-facing argument (nickname, mask, key, limit).
    pub arg: Option<String>,
    /// Server-facing replacement for `arg` (the target's UID).
    pub id: Option<String>,
    pub visibility: Visibility,
}

impl ModeChange {
    pub fn new(letter: char, dir: Direction) -> Self {
        Self {
            letter,
            dir,
            arg: None,
            id: None,
            visibility: Visibility::All,
        }
    }

    pub fn with_arg(letter: char, dir: Direction, arg: impl Into<String>) -> Self {
        Self {
            arg: Some(arg.into()),
            ..Self::new(letter, dir)
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn ops_only(mut self) -> Self {
        self.visibility = Visibility::OpsOnly;
        self
    }

    /// Argument as servers should see it.
    pub fn server_arg(&self) -> Option<&str> {
        self.id.as_deref().or(self.arg.as_deref())
    }
}

/// Requester's standing on the channel. Ordered: a higher level passes
/// every gate a lower one does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Access {
    NotOnChannel,
    Peon,
    HalfOp,
    ChanOp,
    /// Anything not typed by a local user: peer servers, remote users,
    /// services. Never rank-checked.
    Remote,
}

impl Access {
    pub fn of(source: &Client, member: Option<&Membership>) -> Self {
        if !source.is_my_client() {
            return Access::Remote;
        }
        match member {
            None => Access::NotOnChannel,
            Some(m) if m.is_chanop() => Access::ChanOp,
            Some(m) if m.is_halfop() => Access::HalfOp,
            Some(_) => Access::Peon,
        }
    }
}

bitflags! {
    /// Errors already reported in this command.
    pub struct ModeErrors: u32 {
        /// Rank gate; shared by 482 and 442.
        const NO_OPS = 0x001;
        const UNKNOWN = 0x002;
        const RPL_B = 0x004;
        const RPL_E = 0x008;
        const RPL_I = 0x010;
        /// 441 for a rank target.
        const NOT_ON_CHANNEL = 0x020;
        const NOT_OPER = 0x040;
        const ONLY_SERVER = 0x080;
        const LIST_FULL = 0x100;
    }
}

/// Scratch state for one command.
#[derive(Debug)]
pub struct ModeBatch<'a> {
    pub dir: Direction,
    pub access: Access,
    errors: ModeErrors,
    simple_seen: ChannelModes,
    params_used: usize,
    args: std::slice::Iter<'a, &'a str>,
    changes: Vec<ModeChange>,
}

impl<'a> ModeBatch<'a> {
    pub fn new(access: Access, args: &'a [&'a str]) -> Self {
        Self {
            dir: Direction::Add,
            access,
            errors: ModeErrors::empty(),
            simple_seen: ChannelModes::empty(),
            params_used: 0,
            args: args.iter(),
            changes: Vec::new(),
        }
    }

    /// True the first time `error` is raised in this command.
    pub fn first_error(&mut self, error: ModeErrors) -> bool {
        let first = !self.errors.contains(error);
        self.errors.insert(error);
        first
    }

    /// True the first time `flag` is handled in this command.
    pub fn first_simple(&mut self, flag: ChannelModes) -> bool {
        let first = !self.simple_seen.contains(flag);
        self.simple_seen.insert(flag);
        first
    }

    pub fn has_arg(&self) -> bool {
        self.args.len() > 0
    }

    pub fn next_arg(&mut self) -> Option<&'a str> {
        self.args.next().copied()
    }

    /// Spend one parameter slot. Local users get [`MAX_MODE_PARAMS`];
    /// everyone else is unlimited.
    pub fn take_param_slot(&mut self, source: &Client) -> bool {
        if !source.is_my_client() {
            return true;
        }
        self.params_used += 1;
        self.params_used <= MAX_MODE_PARAMS
    }

    pub fn push(&mut self, change: ModeChange) {
        self.changes.push(change);
    }

    /// Drop earlier `+letter` changes so only the newest survives.
    pub fn void_pending_add(&mut self, letter: char) {
        self.changes
            .retain(|c| !(c.letter == letter && c.dir == Direction::Add));
    }

    pub fn changes(&self) -> &[ModeChange] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<ModeChange> {
        self.changes
    }
}

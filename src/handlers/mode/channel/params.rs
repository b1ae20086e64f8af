//! Single-valued parameter modes: `+l <limit>` and `+k <key>`.

use super::{ChannelModeEngine, Direction, ModeBatch, ModeChange, ModeDef};
use crate::state::{Channel, Client};
use std::num::NonZeroU32;
use tracing::debug;

/// Longest channel key, in bytes of input considered.
pub const KEYLEN: usize = 23;

/// Argument propagated for `-k`; the old key is never echoed.
const KEY_REMOVED: &str = "*";

/// Parse a member limit the lenient way clients expect: leading
/// whitespace and sign are accepted, parsing stops at the first non-digit,
/// and overflow saturates. Zero or negative means "no limit".
pub fn parse_limit(raw: &str) -> Option<NonZeroU32> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: u32 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(u32::from(b - b'0'))
            .min(i32::MAX as u32);
    }

    if negative { None } else { NonZeroU32::new(value) }
}

/// Strip a key down to what can travel in a MODE line: printable ASCII
/// without `:` or `,`, from at most [`KEYLEN`] bytes of input.
pub fn sanitize_key(raw: &str) -> String {
    raw.char_indices()
        .take_while(|(i, _)| *i < KEYLEN)
        .map(|(_, c)| c)
        .filter(|c| c.is_ascii_graphic() && *c != ':' && *c != ',')
        .collect()
}

impl ChannelModeEngine<'_> {
    pub(super) fn apply_limit(
        &mut self,
        def: &ModeDef,
        source: &Client,
        channel: &mut Channel,
        batch: &mut ModeBatch<'_>,
    ) {
        if !self.check_rank(def.min_access, source, channel, batch) {
            return;
        }

        match batch.dir {
            Direction::Query => {}
            Direction::Add => {
                let Some(raw) = batch.next_arg() else {
                    return;
                };
                let Some(limit) = parse_limit(raw) else {
                    debug!(arg = %raw, "Unusable channel limit ignored");
                    return;
                };
                if !self.take_param_slot(def.letter, source, batch) {
                    return;
                }

                batch.void_pending_add(def.letter);
                channel.mode.limit = Some(limit);
                batch.push(ModeChange::with_arg(def.letter, Direction::Add, limit.to_string()));
            }
            Direction::Remove => {
                if channel.mode.limit.take().is_some() {
                    batch.push(ModeChange::new(def.letter, Direction::Remove));
                }
            }
        }
    }

    pub(super) fn apply_key(
        &mut self,
        def: &ModeDef,
        source: &Client,
        channel: &mut Channel,
        batch: &mut ModeBatch<'_>,
    ) {
        if !self.check_rank(def.min_access, source, channel, batch) {
            return;
        }

        match batch.dir {
            Direction::Query => {}
            Direction::Add => {
                let Some(raw) = batch.next_arg() else {
                    return;
                };
                let key = sanitize_key(raw);
                if key.is_empty() {
                    debug!("Empty channel key ignored");
                    return;
                }
                if !self.take_param_slot(def.letter, source, batch) {
                    return;
                }

                batch.void_pending_add(def.letter);
                channel.mode.key = Some(key.clone());
                batch.push(ModeChange::with_arg(def.letter, Direction::Add, key));
            }
            Direction::Remove => {
                // `-k` may carry the old key; it is consumed either way.
                if batch.next_arg().is_some() && !self.take_param_slot(def.letter, source, batch) {
                    return;
                }
                if channel.mode.key.take().is_some() {
                    batch.push(ModeChange::with_arg(def.letter, Direction::Remove, KEY_REMOVED));
                }
            }
        }
    }
}

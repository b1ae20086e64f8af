//! List mode handling (ban, except, invite lists).

use super::{Access, ChannelModeEngine, Direction, ModeBatch, ModeChange, ModeDef, ModeErrors};
use crate::error::ModeError;
use crate::security::canonicalize;
use crate::state::{Channel, ChannelModes, Client, ListEntry, ListKind};
use chrono::Utc;
use ircd_proto::collapse;
use std::borrow::Cow;
use tracing::debug;

fn reply_bit(kind: ListKind) -> ModeErrors {
    match kind {
        ListKind::Ban => ModeErrors::RPL_B,
        ListKind::Except => ModeErrors::RPL_E,
        ListKind::InviteEx => ModeErrors::RPL_I,
    }
}

impl ChannelModeEngine<'_> {
    pub(super) fn apply_list(
        &mut self,
        def: &ModeDef,
        kind: ListKind,
        source: &Client,
        channel: &mut Channel,
        batch: &mut ModeBatch<'_>,
    ) {
        if batch.dir == Direction::Query || !batch.has_arg() {
            self.send_list(kind, source, channel, batch);
            return;
        }

        if !self.check_rank(def.min_access, source, channel, batch) {
            return;
        }

        // Over the limit, the mask stays for the next letter.
        if !self.take_param_slot(def.letter, source, batch) {
            return;
        }
        let Some(raw) = batch.next_arg() else {
            return;
        };
        if raw.starts_with(':') || (!source.is_my_connect() && raw.contains(' ')) {
            debug!(letter = %def.letter, mask = %raw, "Unusable list mask ignored");
            return;
        }

        let applied = match batch.dir {
            Direction::Add => self.add_entry(kind, raw, source, channel, batch),
            _ => remove_entry(kind, raw, channel),
        };
        let Some(mask) = applied else {
            return;
        };

        let mut change = ModeChange::with_arg(def.letter, batch.dir, mask);
        if kind != ListKind::InviteEx && channel.has_mode(ChannelModes::HIDE_BMASKS) {
            change = change.ops_only();
        }
        batch.push(change);
    }

    /// Add a mask. Returns its canonical form if the list changed.
    fn add_entry(
        &mut self,
        kind: ListKind,
        raw: &str,
        source: &Client,
        channel: &mut Channel,
        batch: &mut ModeBatch<'_>,
    ) -> Option<String> {
        let raw = if source.is_my_client() {
            let capacity = self
                .config
                .channel
                .list_capacity(channel.has_mode(ChannelModes::EXT_LIMIT));
            if channel.list_total() >= capacity {
                if batch.first_error(ModeErrors::LIST_FULL) {
                    self.reply(
                        source,
                        ModeError::BanListFull {
                            channel: channel.name.clone(),
                            mask: raw.to_string(),
                        },
                    );
                }
                return None;
            }
            Cow::Owned(collapse(raw))
        } else {
            Cow::Borrowed(raw)
        };

        let mask = canonicalize(&raw);
        let canonical = mask.to_string();
        let entry = ListEntry::new(mask, self.setter_name(source), Utc::now().timestamp());
        if !channel.list_mut(kind).add(entry) {
            debug!(letter = %kind.letter(), mask = %canonical, "Duplicate list entry ignored");
            return None;
        }
        if kind.affects_ban_cache() {
            channel.clear_ban_cache();
        }
        Some(canonical)
    }

    /// Recorded as the entry's setter.
    fn setter_name(&self, source: &Client) -> String {
        self.display_source(source)
    }

    fn send_list(&mut self, kind: ListKind, source: &Client, channel: &Channel, batch: &mut ModeBatch<'_>) {
        if !batch.first_error(reply_bit(kind)) {
            return;
        }

        let server = &self.config.server.name;
        let show_entries = !channel.has_mode(ChannelModes::HIDE_BMASKS) || batch.access >= Access::HalfOp;
        let mut lines = Vec::new();
        if show_entries {
            for entry in channel.list(kind).iter() {
                let mask = entry.mask();
                let when = entry.when.to_string();
                lines.push(kind.entry_reply().render(
                    server,
                    &source.name,
                    &[channel.name.as_str(), mask.as_str(), entry.who.as_str(), when.as_str()],
                ));
            }
        }
        lines.push(kind.end_reply().render(server, &source.name, &[channel.name.as_str()]));

        for line in lines {
            self.emit_reply(source, line);
        }
    }
}

/// Remove a mask. Returns its canonical form if the list changed.
fn remove_entry(kind: ListKind, raw: &str, channel: &mut Channel) -> Option<String> {
    let mask = canonicalize(raw);
    channel
        .list_mut(kind)
        .remove(&mask.name, &mask.user, &mask.host)?;
    if kind.affects_ban_cache() {
        channel.clear_ban_cache();
    }
    Some(mask.to_string())
}

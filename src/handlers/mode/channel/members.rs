//! Member rank modes (`o`, `h`, `v`).

use super::{ChannelModeEngine, Direction, ModeBatch, ModeChange, ModeDef, ModeErrors};
use crate::error::ModeError;
use crate::state::{Channel, Client, MemberFlags};
use tracing::debug;

impl ChannelModeEngine<'_> {
    pub(super) fn apply_rank(
        &mut self,
        def: &ModeDef,
        flag: MemberFlags,
        source: &Client,
        channel: &mut Channel,
        batch: &mut ModeBatch<'_>,
    ) {
        if !self.check_rank(def.min_access, source, channel, batch) {
            return;
        }
        if batch.dir == Direction::Query {
            return;
        }
        let Some(name) = batch.next_arg() else {
            return;
        };

        let clients = self.clients;
        let Some(target) = clients.find_chasing(name) else {
            self.reply(source, ModeError::NoSuchNick(name.to_string()));
            return;
        };

        if channel.member(&target.uid).is_none() {
            if batch.first_error(ModeErrors::NOT_ON_CHANNEL) {
                self.reply(
                    source,
                    ModeError::UserNotInChannel {
                        target: target.name.clone(),
                        channel: channel.name.clone(),
                    },
                );
            }
            return;
        }

        if !self.take_param_slot(def.letter, source, batch) {
            return;
        }

        let Some(member) = channel.member_mut(&target.uid) else {
            return;
        };
        let adding = batch.dir == Direction::Add;
        if member.flags.contains(flag) == adding {
            debug!(letter = %def.letter, target = %target.name, "Redundant rank change ignored");
            return;
        }
        member.flags.set(flag, adding);

        batch.push(ModeChange::with_arg(def.letter, batch.dir, target.name.clone()).with_id(target.uid.clone()));
    }
}

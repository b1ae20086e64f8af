//! Parameterless channel flags.

use super::{ChannelModeEngine, Direction, ModeBatch, ModeChange, ModeDef};
use crate::state::{Channel, ChannelModes, Client};
use tracing::debug;

impl ChannelModeEngine<'_> {
    pub(super) fn apply_simple(
        &mut self,
        def: &ModeDef,
        flag: ChannelModes,
        source: &Client,
        channel: &mut Channel,
        batch: &mut ModeBatch<'_>,
    ) {
        if !self.check_privilege(def, source, channel, batch) {
            return;
        }
        if !self.check_rank(def.min_access, source, channel, batch) {
            return;
        }
        if batch.dir == Direction::Query {
            return;
        }
        if !batch.first_simple(flag) {
            return;
        }

        let set = channel.has_mode(flag);
        // Peers are told about no-ops anyway; they may disagree with us.
        if source.is_my_client() && set == (batch.dir == Direction::Add) {
            debug!(letter = %def.letter, "Redundant channel flag ignored");
            return;
        }

        channel.mode.flags.set(flag, batch.dir == Direction::Add);
        batch.push(ModeChange::new(def.letter, batch.dir));
    }
}

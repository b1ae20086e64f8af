//! Channel mode engine.
//!
//! [`ChannelModeEngine::apply`] walks a mode string letter by letter, runs
//! each letter's handler against the channel, and then announces whatever
//! actually changed: `MODE` lines to local members and `TMODE` lines to
//! peer servers.
//!
//! Handlers live in submodules by mode kind:
//! - [`simple`]: parameterless flags
//! - [`lists`]: `b`/`e`/`I`
//! - [`members`]: `o`/`h`/`v`
//! - [`params`]: `l`/`k`

pub mod context;
mod lists;
mod members;
mod params;
pub mod propagate;
pub mod registry;
mod simple;

pub use context::{Access, Direction, MAX_MODE_PARAMS, ModeBatch, ModeChange, ModeErrors, Visibility};
pub use registry::{ModeDef, ModeKind, lookup};

use crate::config::Config;
use crate::error::ModeError;
use crate::handlers::{ModeSink, Outbound};
use crate::metrics;
use crate::state::{Channel, Client, ClientDirectory};
use tracing::{debug, info};

/// Applies mode strings to channels.
///
/// Borrowed for the duration of one or more commands; holds no state of
/// its own between calls.
pub struct ChannelModeEngine<'a> {
    config: &'a Config,
    clients: &'a dyn ClientDirectory,
    sink: &'a mut dyn ModeSink,
}

impl<'a> ChannelModeEngine<'a> {
    pub fn new(
        config: &'a Config,
        clients: &'a dyn ClientDirectory,
        sink: &'a mut dyn ModeSink,
    ) -> Self {
        Self {
            config,
            clients,
            sink,
        }
    }

    /// Apply `argv` (mode string followed by its arguments) on behalf of
    /// `source`, announce the result, and return the applied changes.
    pub fn apply(&mut self, source: &Client, channel: &mut Channel, argv: &[&str]) -> Vec<ModeChange> {
        let Some((modes, args)) = argv.split_first() else {
            return Vec::new();
        };

        let access = Access::of(source, channel.member(&source.uid));
        let mut batch = ModeBatch::new(access, args);

        for letter in modes.chars() {
            match letter {
                '+' => batch.dir = Direction::Add,
                '-' => batch.dir = Direction::Remove,
                '=' => batch.dir = Direction::Query,
                _ => match registry::lookup(letter) {
                    Some(def) => self.dispatch(def, source, channel, &mut batch),
                    None => {
                        if batch.first_error(ModeErrors::UNKNOWN) {
                            self.reply(source, ModeError::UnknownMode(letter));
                        }
                    }
                },
            }
        }

        let changes = batch.into_changes();
        if changes.is_empty() {
            return changes;
        }

        for change in &changes {
            metrics::record_mode_change(change.letter);
        }
        info!(
            channel = %channel.name,
            source = %source.name,
            changes = changes.len(),
            "Channel modes changed"
        );

        self.propagate(source, channel, &changes);
        changes
    }

    fn dispatch(&mut self, def: &ModeDef, source: &Client, channel: &mut Channel, batch: &mut ModeBatch<'_>) {
        match def.kind {
            ModeKind::Simple(flag) => self.apply_simple(def, flag, source, channel, batch),
            ModeKind::List(kind) => self.apply_list(def, kind, source, channel, batch),
            ModeKind::Rank(flag) => self.apply_rank(def, flag, source, channel, batch),
            ModeKind::Limit => self.apply_limit(def, source, channel, batch),
            ModeKind::Key => self.apply_key(def, source, channel, batch),
        }
    }

    /// Operator-only and server-only gates.
    fn check_privilege(&mut self, def: &ModeDef, source: &Client, channel: &Channel, batch: &mut ModeBatch<'_>) -> bool {
        if def.only_opers && source.is_my_client() && !source.oper {
            if batch.first_error(ModeErrors::NOT_OPER) {
                self.reply(source, ModeError::NoPrivileges);
            }
            return false;
        }

        if def.only_servers && !source.is_server() && !source.service {
            if batch.first_error(ModeErrors::ONLY_SERVER) {
                let err = if batch.access == Access::NotOnChannel {
                    ModeError::NotOnChannel(channel.name.clone())
                } else {
                    ModeError::OnlyServersCanChange(channel.name.clone())
                };
                self.reply(source, err);
            }
            return false;
        }

        true
    }

    /// Channel rank gate; remote requests always pass.
    fn check_rank(&mut self, min: Access, source: &Client, channel: &Channel, batch: &mut ModeBatch<'_>) -> bool {
        if batch.access >= min {
            return true;
        }
        if batch.first_error(ModeErrors::NO_OPS) {
            let err = if batch.access == Access::NotOnChannel {
                ModeError::NotOnChannel(channel.name.clone())
            } else {
                ModeError::ChanOpPrivsNeeded(channel.name.clone())
            };
            self.reply(source, err);
        }
        false
    }

    fn take_param_slot(&self, letter: char, source: &Client, batch: &mut ModeBatch<'_>) -> bool {
        if batch.take_param_slot(source) {
            return true;
        }
        metrics::record_param_throttled();
        debug!(letter = %letter, source = %source.name, "Mode parameter limit reached");
        false
    }

    fn reply(&mut self, source: &Client, err: ModeError) {
        debug!(source = %source.name, error = %err, "Mode letter rejected");
        metrics::record_mode_error(err.error_code());
        let line = err.to_irc_reply(&self.config.server.name, &source.name);
        self.emit_reply(source, line);
    }

    fn emit_reply(&mut self, source: &Client, line: String) {
        self.sink.emit(Outbound::Reply {
            to: source.uid.clone(),
            line,
        });
    }

    /// How `source` is named to local users: its full prefix for users, its
    /// server name for servers unless server names are hidden.
    pub fn display_source(&self, source: &Client) -> String {
        if source.is_server() && (source.hidden || self.config.server_hide.hide_servers) {
            self.config.server.name.clone()
        } else {
            source.prefix().to_string()
        }
    }

    fn propagate(&mut self, source: &Client, channel: &Channel, changes: &[ModeChange]) {
        let sender = self.display_source(source);
        for audience in [Visibility::All, Visibility::OpsOnly] {
            for line in propagate::client_lines(&sender, &channel.name, changes, audience) {
                self.sink.emit(Outbound::Channel {
                    channel: channel.name.clone(),
                    audience,
                    line,
                });
            }
        }

        for line in propagate::server_lines(&source.uid, channel.created, &channel.name, changes) {
            self.sink.emit(Outbound::Servers {
                except: source.uid.clone(),
                line,
            });
        }
    }
}

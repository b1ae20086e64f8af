//! MODE command handler.
//!
//! `MODE <channel>` reports the current modes; `MODE <channel> <modes>
//! [args...]` hands the mode string to the [`ChannelModeEngine`].

pub mod channel;

pub use channel::{
    Access, ChannelModeEngine, Direction, MAX_MODE_PARAMS, ModeBatch, ModeChange, ModeDef, ModeKind, Visibility,
};

use super::{HandlerError, HandlerResult, ModeSink, Outbound};
use crate::config::Config;
use crate::state::{Channel, Client, ClientDirectory};
use crate::telemetry::{CommandTimer, spans};
use ircd_proto::Response;

/// Handle `MODE <target> [modes [args...]]` for a channel target.
///
/// `channel` is the registry's lookup of `target`; `None` is answered with
/// `ERR_NOSUCHCHANNEL` by the caller via [`HandlerError::to_irc_reply`].
pub fn handle_channel_mode(
    config: &Config,
    clients: &dyn ClientDirectory,
    sink: &mut dyn ModeSink,
    source: &Client,
    channel: Option<&mut Channel>,
    target: &str,
    argv: &[&str],
) -> HandlerResult<Vec<ModeChange>> {
    let _timer = CommandTimer::new("MODE");
    let span = spans::command("MODE", &source.uid, Some(target));
    let _enter = span.enter();

    let channel = channel.ok_or_else(|| HandlerError::NoSuchChannel(target.to_string()))?;

    if argv.is_empty() {
        send_channel_modes(config, sink, source, channel);
        return Ok(Vec::new());
    }

    let mut engine = ChannelModeEngine::new(config, clients, sink);
    Ok(engine.apply(source, channel, argv))
}

/// `RPL_CHANNELMODEIS` and `RPL_CREATIONTIME`. Limit and key values are
/// only shown to members and servers.
fn send_channel_modes(config: &Config, sink: &mut dyn ModeSink, source: &Client, channel: &Channel) {
    let server = &config.server.name;
    let show_params = source.is_server() || channel.member(&source.uid).is_some();
    let modes = channel.mode_string(show_params);
    let created = channel.created.to_string();

    for line in [
        Response::RPL_CHANNELMODEIS.render(server, &source.name, &[channel.name.as_str(), modes.as_str()]),
        Response::RPL_CREATIONTIME.render(server, &source.name, &[channel.name.as_str(), created.as_str()]),
    ] {
        sink.emit(Outbound::Reply {
            to: source.uid.clone(),
            line,
        });
    }
}

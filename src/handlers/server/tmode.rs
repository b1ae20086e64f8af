use crate::config::Config;
use crate::handlers::mode::{ChannelModeEngine, ModeChange};
use crate::handlers::{HandlerError, HandlerResult, ModeSink};
use crate::metrics;
use crate::state::{Channel, Client, ClientDirectory};
use crate::telemetry::{CommandTimer, spans};
use tracing::{debug, warn};

/// Handle an inbound TMODE (timestamped mode) from a peer.
///
/// Format: `TMODE <channel-ts> <channel> <modes> [args...]`. `args` starts
/// at the timestamp; `channel` is the local channel named by `args[1]`.
///
/// A TMODE carrying a timestamp newer than ours comes from the losing side
/// of a netsplit and is dropped. Otherwise the modes are applied with the
/// sender's own standing on the channel, which for servers and remote
/// users bypasses every local limit.
pub fn handle_tmode(
    config: &Config,
    clients: &dyn ClientDirectory,
    sink: &mut dyn ModeSink,
    source: &Client,
    channel: Option<&mut Channel>,
    args: &[&str],
) -> HandlerResult<Vec<ModeChange>> {
    let _timer = CommandTimer::new("TMODE");

    let (ts_str, channel_name, modes) = match args {
        [ts, chan, modes @ ..] if !modes.is_empty() => (*ts, *chan, modes),
        _ => return Err(HandlerError::NeedMoreParams("TMODE")),
    };

    let span = spans::command("TMODE", &source.uid, Some(channel_name));
    let _enter = span.enter();

    let ts = ts_str
        .parse::<i64>()
        .map_err(|_| HandlerError::ProtocolError(format!("Invalid timestamp: {}", ts_str)))?;

    let Some(channel) = channel else {
        warn!(channel = %channel_name, "Received TMODE for unknown channel");
        return Ok(Vec::new());
    };

    if ts > channel.created {
        metrics::record_tmode_ts_rejected();
        debug!(
            channel = %channel.name,
            theirs = ts,
            ours = channel.created,
            "Ignoring TMODE with newer channel timestamp"
        );
        return Ok(Vec::new());
    }

    let mut engine = ChannelModeEngine::new(config, clients, sink);
    Ok(engine.apply(source, channel, modes))
}

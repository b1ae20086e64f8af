//! ircd-chanmode - channel mode subsystem for a TS6 IRC daemon.
//!
//! Takes a parsed `MODE`/`TMODE` command, checks the requester's standing,
//! mutates channel state (flags, limit, key, ban/except/invite lists,
//! member ranks) and produces the numeric replies, `MODE` lines for local
//! members and `TMODE` lines for peer servers that result.
//!
//! The transport, the client registry and channel lifecycle live outside
//! this crate: callers hand in a [`Client`], the [`Channel`] it targets and
//! a [`ClientDirectory`], and collect output through a [`ModeSink`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod security;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use error::{HandlerError, HandlerResult, ModeError};
pub use handlers::{
    ChannelModeEngine, Direction, ModeChange, ModeSink, Outbound, Visibility, handle_channel_mode, handle_tmode,
};
pub use state::{Channel, Client, ClientDirectory, ClientRegistry};

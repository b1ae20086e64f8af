//! IRC command handlers for channel modes.
//!
//! Handlers are synchronous and never touch sockets: they mutate the
//! channel they are given and describe their output as [`Outbound`] lines
//! pushed into a [`ModeSink`]. Errors that end a command before any mode
//! letter is examined come back as [`HandlerError`]; the caller turns them
//! into numerics with [`HandlerError::to_irc_reply`].

pub mod mode;
pub mod server;
mod sink;

pub use crate::error::{HandlerError, HandlerResult};
pub use mode::{
    Access, ChannelModeEngine, Direction, MAX_MODE_PARAMS, ModeChange, ModeDef, ModeKind, Visibility,
    handle_channel_mode,
};
pub use server::handle_tmode;
pub use sink::{ModeSink, Outbound};

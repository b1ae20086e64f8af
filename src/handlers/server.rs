//! Server-to-server command handlers.

pub mod tmode;

pub use tmode::handle_tmode;

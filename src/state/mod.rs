//! State management module.
//!
//! Contains the channel, membership and client records that mode handling
//! reads and mutates.

mod channel;
mod client;
pub mod lists;
mod member;
mod registry;

pub use channel::{Channel, ChannelModeState, ChannelModes};
pub use client::{Client, ClientKind, Uid};
pub use lists::{BanList, ListEntry, ListKind};
pub use member::{MemberFlags, Membership};
pub use registry::{ClientDirectory, ClientRegistry, NICK_CHASE_WINDOW};

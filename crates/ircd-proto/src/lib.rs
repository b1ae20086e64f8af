//! # ircd-proto
//!
//! Wire-level primitives shared by the channel mode subsystem:
//!
//! - RFC 1459 casemapping ([`irc_eq`], [`irc_to_lower`])
//! - wildcard mask matching and `*` collapsing ([`wildcard_match`], [`collapse`])
//! - numeric replies ([`Response`]) and their rendering
//! - message prefixes ([`Prefix`])
//! - the transport line-size bound ([`line::MAX_LINE_LEN`])

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod line;
pub mod prefix;
pub mod response;
pub mod wildcard;

pub use casemap::{irc_eq, irc_lower_char, irc_to_lower};
pub use prefix::{ParsePrefixError, Prefix};
pub use response::{ParseResponseError, Response};
pub use wildcard::{collapse, wildcard_match};

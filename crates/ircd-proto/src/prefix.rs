//! Message prefixes.
//!
//! The origin of a line: a server name, or a client's `nick!user@host`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Origin of a protocol line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// A server, by name.
    ServerName(String),
    /// A client: nickname, username, hostname.
    Nickname(String, String, String),
}

/// Error produced when parsing a [`Prefix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePrefixError {
    /// Empty input.
    #[error("empty prefix")]
    Empty,
    /// A client prefix with an empty component.
    #[error("malformed client prefix: {0:?}")]
    Malformed(String),
}

impl Prefix {
    /// Client prefix from its parts.
    pub fn new(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Prefix::Nickname(nick.into(), user.into(), host.into())
    }

    /// Server prefix.
    pub fn server(name: impl Into<String>) -> Self {
        Prefix::ServerName(name.into())
    }

    /// The nickname or server name.
    pub fn name(&self) -> &str {
        match self {
            Prefix::ServerName(name) | Prefix::Nickname(name, _, _) => name,
        }
    }

    /// True for server origins.
    pub fn is_server(&self) -> bool {
        matches!(self, Prefix::ServerName(_))
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) => f.write_str(name),
            Prefix::Nickname(nick, user, host) => write!(f, "{}!{}@{}", nick, user, host),
        }
    }
}

impl FromStr for Prefix {
    type Err = ParsePrefixError;

    /// `nick!user@host` parses as a client; a bare token containing a dot
    /// parses as a server name; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix(':').unwrap_or(s);
        if s.is_empty() {
            return Err(ParsePrefixError::Empty);
        }

        match s.split_once('!') {
            Some((nick, rest)) => {
                let (user, host) = rest
                    .split_once('@')
                    .ok_or_else(|| ParsePrefixError::Malformed(s.to_owned()))?;
                if nick.is_empty() || user.is_empty() || host.is_empty() {
                    return Err(ParsePrefixError::Malformed(s.to_owned()));
                }
                Ok(Prefix::new(nick, user, host))
            }
            None if s.contains('.') && !s.contains('@') => Ok(Prefix::server(s)),
            None => Err(ParsePrefixError::Malformed(s.to_owned())),
        }
    }
}

//! Unified error handling for channel mode processing.
//!
//! Nothing here is fatal: every rejection becomes at most one numeric reply
//! to the requester, and processing continues with the next mode letter.

use ircd_proto::Response;
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that end a MODE or TMODE command before any letter is looked at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("not enough parameters for {0}")]
    NeedMoreParams(&'static str),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("protocol error: {0}")]
    ProtocolError(String),
}

impl HandlerError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams(_) => "need_more_params",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::ProtocolError(_) => "protocol_error",
        }
    }

    /// Convert to an IRC error reply line.
    ///
    /// Returns `None` for errors that don't warrant a reply (malformed
    /// server-to-server input is only logged).
    pub fn to_irc_reply(&self, server_name: &str, nick: &str) -> Option<String> {
        match self {
            Self::NeedMoreParams(cmd) => {
                Some(Response::ERR_NEEDMOREPARAMS.render(server_name, nick, &[*cmd]))
            }
            Self::NoSuchChannel(chan) => {
                Some(Response::ERR_NOSUCHCHANNEL.render(server_name, nick, &[chan.as_str()]))
            }
            Self::ProtocolError(_) => None,
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult<T = ()> = Result<T, HandlerError>;

// ============================================================================
// Mode Errors (per-letter rejections)
// ============================================================================

/// A rejected mode letter, as reported back to the requester.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("unknown mode char {0:?}")]
    UnknownMode(char),

    #[error("not an IRC operator")]
    NoPrivileges,

    #[error("not on channel {0}")]
    NotOnChannel(String),

    #[error("only servers can change that mode on {0}")]
    OnlyServersCanChange(String),

    #[error("not channel operator on {0}")]
    ChanOpPrivsNeeded(String),

    #[error("{target} is not on {channel}")]
    UserNotInChannel { target: String, channel: String },

    #[error("list full on {channel}, cannot add {mask}")]
    BanListFull { channel: String, mask: String },

    #[error("no such nick {0}")]
    NoSuchNick(String),
}

impl ModeError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownMode(_) => "unknown_mode",
            Self::NoPrivileges => "no_privileges",
            Self::NotOnChannel(_) => "not_on_channel",
            Self::OnlyServersCanChange(_) => "only_servers_can_change",
            Self::ChanOpPrivsNeeded(_) => "chanop_privs_needed",
            Self::UserNotInChannel { .. } => "user_not_in_channel",
            Self::BanListFull { .. } => "ban_list_full",
            Self::NoSuchNick(_) => "no_such_nick",
        }
    }

    /// Numeric this error is reported with.
    pub fn response(&self) -> Response {
        match self {
            Self::UnknownMode(_) => Response::ERR_UNKNOWNMODE,
            Self::NoPrivileges => Response::ERR_NOPRIVILEGES,
            Self::NotOnChannel(_) => Response::ERR_NOTONCHANNEL,
            Self::OnlyServersCanChange(_) => Response::ERR_ONLYSERVERSCANCHANGE,
            Self::ChanOpPrivsNeeded(_) => Response::ERR_CHANOPRIVSNEEDED,
            Self::UserNotInChannel { .. } => Response::ERR_USERNOTINCHANNEL,
            Self::BanListFull { .. } => Response::ERR_BANLISTFULL,
            Self::NoSuchNick(_) => Response::ERR_NOSUCHNICK,
        }
    }

    /// Render the numeric reply line for `nick`.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str) -> String {
        let letter = match self {
            Self::UnknownMode(c) => c.to_string(),
            _ => String::new(),
        };
        let params: Vec<&str> = match self {
            Self::UnknownMode(_) => vec![letter.as_str()],
            Self::NoPrivileges => vec![],
            Self::NotOnChannel(chan)
            | Self::OnlyServersCanChange(chan)
            | Self::ChanOpPrivsNeeded(chan) => vec![chan.as_str()],
            Self::UserNotInChannel { target, channel } => vec![target.as_str(), channel.as_str()],
            Self::BanListFull { channel, mask } => vec![channel.as_str(), mask.as_str()],
            Self::NoSuchNick(target) => vec![target.as_str()],
        };
        self.response().render(server_name, nick, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_to_irc_reply() {
        assert_eq!(
            HandlerError::NoSuchChannel("#gone".into()).to_irc_reply("irc.test", "alice"),
            Some(":irc.test 403 alice #gone :No such channel".to_string())
        );
        assert_eq!(
            HandlerError::NeedMoreParams("MODE").to_irc_reply("irc.test", "alice"),
            Some(":irc.test 461 alice MODE :Not enough parameters".to_string())
        );
        assert!(HandlerError::ProtocolError("bad ts".into())
            .to_irc_reply("irc.test", "hub")
            .is_none());
        assert_eq!(HandlerError::ProtocolError(String::new()).error_code(), "protocol_error");
    }

    #[test]
    fn test_mode_error_codes() {
        assert_eq!(ModeError::UnknownMode('X').error_code(), "unknown_mode");
        assert_eq!(ModeError::NoPrivileges.error_code(), "no_privileges");
        assert_eq!(
            ModeError::BanListFull {
                channel: "#c".into(),
                mask: "a!*@*".into()
            }
            .error_code(),
            "ban_list_full"
        );
    }

    #[test]
    fn test_mode_error_to_irc_reply() {
        assert_eq!(
            ModeError::UnknownMode('X').to_irc_reply("irc.test", "alice"),
            ":irc.test 472 alice X :is unknown mode char to me"
        );
        assert_eq!(
            ModeError::ChanOpPrivsNeeded("#c".into()).to_irc_reply("irc.test", "alice"),
            ":irc.test 482 alice #c :You're not channel operator"
        );
        assert_eq!(
            ModeError::UserNotInChannel {
                target: "bob".into(),
                channel: "#c".into()
            }
            .to_irc_reply("irc.test", "alice"),
            ":irc.test 441 alice bob #c :They aren't on that channel"
        );
        assert_eq!(
            ModeError::NoPrivileges.to_irc_reply("irc.test", "alice"),
            ":irc.test 481 alice :Permission Denied - You're not an IRC operator"
        );
    }
}

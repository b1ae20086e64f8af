//! Numeric replies used by channel mode handling.
//!
//! Only the numerics this crate family emits are listed. Each carries its
//! conventional trailing text so replies can be rendered without a separate
//! message catalog.

#![allow(non_camel_case_types)]

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// IRC numeric reply code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    /// 324 - Current channel modes
    RPL_CHANNELMODEIS = 324,
    /// 329 - Channel creation time
    RPL_CREATIONTIME = 329,
    /// 346 - Invite exception list entry
    RPL_INVITELIST = 346,
    /// 347 - End of invite exception list
    RPL_ENDOFINVITELIST = 347,
    /// 348 - Ban exception list entry
    RPL_EXCEPTLIST = 348,
    /// 349 - End of ban exception list
    RPL_ENDOFEXCEPTLIST = 349,
    /// 367 - Ban list entry
    RPL_BANLIST = 367,
    /// 368 - End of ban list
    RPL_ENDOFBANLIST = 368,
    /// 401 - No such nick/channel
    ERR_NOSUCHNICK = 401,
    /// 403 - No such channel
    ERR_NOSUCHCHANNEL = 403,
    /// 441 - Target is not on that channel
    ERR_USERNOTINCHANNEL = 441,
    /// 442 - Requester is not on that channel
    ERR_NOTONCHANNEL = 442,
    /// 461 - Not enough parameters
    ERR_NEEDMOREPARAMS = 461,
    /// 468 - Only servers can change that mode
    ERR_ONLYSERVERSCANCHANGE = 468,
    /// 472 - Unknown mode character
    ERR_UNKNOWNMODE = 472,
    /// 478 - Channel list is full
    ERR_BANLISTFULL = 478,
    /// 481 - Not an IRC operator
    ERR_NOPRIVILEGES = 481,
    /// 482 - Not a channel operator
    ERR_CHANOPRIVSNEEDED = 482,
}

/// Error returned when a numeric string does not name a known [`Response`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseResponseError {
    /// Not a three digit number.
    #[error("invalid numeric: {0:?}")]
    NotNumeric(String),
    /// A number this crate does not know.
    #[error("unknown numeric: {0}")]
    Unknown(u16),
}

const ALL: &[Response] = &[
    Response::RPL_CHANNELMODEIS,
    Response::RPL_CREATIONTIME,
    Response::RPL_INVITELIST,
    Response::RPL_ENDOFINVITELIST,
    Response::RPL_EXCEPTLIST,
    Response::RPL_ENDOFEXCEPTLIST,
    Response::RPL_BANLIST,
    Response::RPL_ENDOFBANLIST,
    Response::ERR_NOSUCHNICK,
    Response::ERR_NOSUCHCHANNEL,
    Response::ERR_USERNOTINCHANNEL,
    Response::ERR_NOTONCHANNEL,
    Response::ERR_NEEDMOREPARAMS,
    Response::ERR_ONLYSERVERSCANCHANGE,
    Response::ERR_UNKNOWNMODE,
    Response::ERR_BANLISTFULL,
    Response::ERR_NOPRIVILEGES,
    Response::ERR_CHANOPRIVSNEEDED,
];

impl Response {
    /// Numeric code.
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Look a code up.
    pub fn from_code(code: u16) -> Option<Response> {
        ALL.iter().copied().find(|r| r.code() == code)
    }

    /// 4xx/5xx numerics.
    #[inline]
    pub fn is_error(&self) -> bool {
        (400..600).contains(&self.code())
    }

    /// Conventional trailing text, if the numeric has one.
    pub fn text(&self) -> Option<&'static str> {
        Some(match self {
            Response::RPL_ENDOFINVITELIST => "End of Channel Invite List",
            Response::RPL_ENDOFEXCEPTLIST => "End of Channel Exception List",
            Response::RPL_ENDOFBANLIST => "End of Channel Ban List",
            Response::ERR_NOSUCHNICK => "No such nick/channel",
            Response::ERR_NOSUCHCHANNEL => "No such channel",
            Response::ERR_USERNOTINCHANNEL => "They aren't on that channel",
            Response::ERR_NOTONCHANNEL => "You're not on that channel",
            Response::ERR_NEEDMOREPARAMS => "Not enough parameters",
            Response::ERR_ONLYSERVERSCANCHANGE => "Only servers can change that mode",
            Response::ERR_UNKNOWNMODE => "is unknown mode char to me",
            Response::ERR_BANLISTFULL => "Channel ban list is full",
            Response::ERR_NOPRIVILEGES => "Permission Denied - You're not an IRC operator",
            Response::ERR_CHANOPRIVSNEEDED => "You're not channel operator",
            Response::RPL_CHANNELMODEIS
            | Response::RPL_CREATIONTIME
            | Response::RPL_INVITELIST
            | Response::RPL_EXCEPTLIST
            | Response::RPL_BANLIST => return None,
        })
    }

    /// Render a complete numeric line (without CR LF):
    /// `:<server> <code> <target> <params...> [:<text>]`.
    pub fn render(&self, server: &str, target: &str, params: &[&str]) -> String {
        let mut line = format!(":{} {} {}", server, self, target);
        for param in params {
            line.push(' ');
            line.push_str(param);
        }
        if let Some(text) = self.text() {
            line.push_str(" :");
            line.push_str(text);
        }
        line
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

impl FromStr for Response {
    type Err = ParseResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseResponseError::NotNumeric(s.to_owned()));
        }
        let code: u16 = s
            .parse()
            .map_err(|_| ParseResponseError::NotNumeric(s.to_owned()))?;
        Response::from_code(code).ok_or(ParseResponseError::Unknown(code))
    }
}

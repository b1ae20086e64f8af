//! Ban mask canonicalization.
//!
//! Every `+b`/`+e`/`+I` argument is reduced to a `nick!user@host` triple
//! before it is stored or propagated, so that `foo`, `foo!*` and `foo!*@*`
//! all name the same entry. The host part is additionally parsed into a
//! network form when it is an address literal or CIDR block, which is what
//! lets an entry like `*!*@192.0.2.0/24` match by address.

use ipnet::{Ipv4Net, Ipv6Net};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Longest nickname part kept in a mask.
pub const NICKLEN: usize = 30;
/// Longest username part kept in a mask.
pub const USERLEN: usize = 10;
/// Longest hostname part kept in a mask.
pub const HOSTLEN: usize = 63;

/// Structural form of a mask's host part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostForm {
    /// Matched as a wildcard pattern against hostnames.
    Host,
    /// Matched by IPv4 network membership.
    V4(Ipv4Net),
    /// Matched by IPv6 network membership.
    V6(Ipv6Net),
}

impl HostForm {
    /// Network-form containment; always false for [`HostForm::Host`].
    pub fn contains(&self, ip: &IpAddr) -> bool {
        match (self, ip) {
            (HostForm::V4(net), IpAddr::V4(addr)) => net.contains(addr),
            (HostForm::V6(net), IpAddr::V6(addr)) => net.contains(addr),
            _ => false,
        }
    }
}

/// A mask reduced to its canonical triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalMask {
    pub name: String,
    pub user: String,
    pub host: String,
    pub host_form: HostForm,
}

impl fmt::Display for CanonicalMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}@{}", self.name, self.user, self.host)
    }
}

/// Canonicalize a raw mask argument.
///
/// ```
/// use ircd_chanmode::security::canonicalize;
///
/// assert_eq!(canonicalize("foo").to_string(), "foo!*@*");
/// assert_eq!(canonicalize("ident@host.example").to_string(), "*!ident@host.example");
/// assert_eq!(canonicalize("192.0.2.0/24").to_string(), "*!*@192.0.2.0/24");
/// ```
pub fn canonicalize(raw: &str) -> CanonicalMask {
    let (name, user, host) = split_nuh(first_word(raw));
    let host_form = parse_netmask(&host);
    CanonicalMask {
        name,
        user,
        host,
        host_form,
    }
}

/// Everything before the first whitespace character, or `*` when that is
/// empty.
pub fn first_word(raw: &str) -> &str {
    let word = raw.split(char::is_whitespace).next().unwrap_or("");
    if word.is_empty() { "*" } else { word }
}

/// Split a mask into nick, user and host parts, each defaulting to `*` and
/// clipped to its length bound.
///
/// A bare word is taken as a host when it contains `.` or `:`, otherwise as
/// a nickname.
pub fn split_nuh(mask: &str) -> (String, String, String) {
    let (nick, user, host) = match mask.split_once('!') {
        Some((nick, rest)) => match rest.split_once('@') {
            Some((user, host)) => (nick, user, host),
            None => (nick, rest, ""),
        },
        None => match mask.split_once('@') {
            Some((user, host)) => ("", user, host),
            None if mask.contains(['.', ':']) => ("", "", mask),
            None => (mask, "", ""),
        },
    };

    (
        part_or_star(nick, NICKLEN),
        part_or_star(user, USERLEN),
        part_or_star(host, HOSTLEN),
    )
}

fn part_or_star(part: &str, max: usize) -> String {
    if part.is_empty() {
        "*".to_string()
    } else {
        part.chars().take(max).collect()
    }
}

/// Classify a host part as a hostname pattern or a network.
///
/// Accepted network spellings: `a.b.c.d`, `a.b.c.d/n`, truncated forms such
/// as `10.0/16`, trailing wildcard octets such as `10.1.*`, and IPv6
/// addresses with an optional `/n`.
pub fn parse_netmask(text: &str) -> HostForm {
    let parsed = if text.contains(':') {
        parse_v6(text)
    } else {
        parse_v4(text)
    };
    parsed.unwrap_or(HostForm::Host)
}

fn split_bits(text: &str) -> Option<(&str, Option<u8>)> {
    match text.split_once('/') {
        Some((addr, bits)) => {
            if bits.is_empty() || !bits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            Some((addr, Some(bits.parse().ok()?)))
        }
        None => Some((text, None)),
    }
}

fn parse_v6(text: &str) -> Option<HostForm> {
    let (addr, bits) = split_bits(text)?;
    let addr: Ipv6Addr = addr.parse().ok()?;
    let net = Ipv6Net::new(addr, bits.unwrap_or(128)).ok()?;
    Some(HostForm::V6(net.trunc()))
}

fn parse_v4(text: &str) -> Option<HostForm> {
    let (body, bits) = split_bits(text)?;
    let groups: Vec<&str> = body.split('.').collect();
    if groups.len() > 4 {
        return None;
    }

    let mut octets = [0u8; 4];
    let mut given = 0usize;
    let mut wildcard = false;
    for (i, group) in groups.iter().enumerate() {
        if *group == "*" && i > 0 && i == groups.len() - 1 && bits.is_none() {
            wildcard = true;
            break;
        }
        if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        octets[i] = group.parse().ok()?;
        given += 1;
    }

    let prefix = match bits {
        Some(bits) if usize::from(bits) > groups.len() * 8 => return None,
        Some(bits) => bits,
        None if wildcard || given < 4 => (given * 8) as u8,
        None => 32,
    };

    let net = Ipv4Net::new(Ipv4Addr::from(octets), prefix).ok()?;
    Some(HostForm::V4(net.trunc()))
}

//! RFC 1459 casemapping.
//!
//! Nicknames, channel names and mask components compare case-insensitively,
//! where `[]\~` are the uppercase forms of `{}|^`.

/// Fold one character to its RFC 1459 lowercase form.
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        'A'..='Z' => c.to_ascii_lowercase(),
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        _ => c,
    }
}

/// Fold a whole string; used to key registries by nickname.
pub fn irc_to_lower(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    out.extend(s.chars().map(irc_lower_char));
    out
}

/// Case-insensitive equality without allocating.
pub fn irc_eq(a: &str, b: &str) -> bool {
    let mut left = a.chars().map(irc_lower_char);
    let mut right = b.chars().map(irc_lower_char);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if x == y => continue,
            _ => return false,
        }
    }
}

//! Wildcard masks.
//!
//! `*` matches any run of characters (including none), `?` exactly one.
//! Matching folds case with the RFC 1459 mapping.

use crate::casemap::irc_lower_char;

/// Match `text` against the wildcard `pattern`.
///
/// ```
/// use ircd_proto::wildcard_match;
///
/// assert!(wildcard_match("*!*@*.example.net", "Nick!user@host.EXAMPLE.net"));
/// assert!(!wildcard_match("bad?", "bad"));
/// ```
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().map(irc_lower_char).collect();
    let text: Vec<char> = text.chars().map(irc_lower_char).collect();

    let (mut p, mut t) = (0, 0);
    // Last `*` seen and the text position it was tried against.
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, resume)) => {
                    p = star + 1;
                    t = resume + 1;
                    backtrack = Some((star, resume + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Squeeze runs of consecutive `*` into a single `*`.
///
/// Masks are stored collapsed so that `a**b` and `a*b` compare equal.
pub fn collapse(mask: &str) -> String {
    let mut out = String::with_capacity(mask.len());
    let mut in_star = false;
    for c in mask.chars() {
        if c == '*' {
            if !in_star {
                out.push('*');
            }
            in_star = true;
        } else {
            out.push(c);
            in_star = false;
        }
    }
    out
}

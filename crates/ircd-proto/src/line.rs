//! Transport line bounds.

/// Maximum length of one protocol line, including the trailing CR LF.
pub const MAX_LINE_LEN: usize = 512;

/// Length of the CR LF terminator the transport appends.
pub const CRLF_LEN: usize = 2;

/// Whether a line body of `len` bytes fits within `max` once terminated.
#[inline]
pub const fn fits(len: usize, max: usize) -> bool {
    len + CRLF_LEN <= max
}

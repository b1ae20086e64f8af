//! Mask handling for channel lists.
//!
//! Every list argument passes through [`canonicalize`] before it reaches a
//! [`BanList`](crate::state::BanList), so stored entries always have the
//! `nick!user@host` shape and a parsed host form.

pub mod mask;

pub use mask::{CanonicalMask, HostForm, canonicalize, parse_netmask, split_nuh};

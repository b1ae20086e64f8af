//! Channel list limits configuration.

use serde::Deserialize;

/// Channel list limits.
///
/// Capacity is shared across the ban, exception and invite-exception lists
/// and only applies to changes made by locally connected users.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelConfig {
    /// Combined b/e/I entries per channel (default: 100).
    #[serde(default = "default_max_bans")]
    pub max_bans: usize,
    /// Combined b/e/I entries on channels with +L (default: 500).
    #[serde(default = "default_max_bans_large")]
    pub max_bans_large: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            max_bans: default_max_bans(),
            max_bans_large: default_max_bans_large(),
        }
    }
}

impl ChannelConfig {
    /// Capacity for a channel, given whether +L is set.
    #[inline]
    pub fn list_capacity(&self, extended: bool) -> usize {
        if extended {
            self.max_bans_large
        } else {
            self.max_bans
        }
    }
}

fn default_max_bans() -> usize {
    100
}

fn default_max_bans_large() -> usize {
    500
}

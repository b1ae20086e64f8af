//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, ServerHideConfig)
//! - [`limits`]: Channel list limits (ChannelConfig)
//! - [`validation`]: Cross-field checks run by [`Config::load`]

mod limits;
mod types;
mod validation;

pub use limits::ChannelConfig;
pub use types::{Config, ConfigError, ServerConfig, ServerHideConfig};
pub use validation::ValidationError;

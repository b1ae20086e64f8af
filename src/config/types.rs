//! Core configuration types.

use super::limits::ChannelConfig;
use super::validation::{ValidationError, validate};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Settings channel mode handling depends on.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server identity.
    pub server: ServerConfig,
    /// Server hiding.
    #[serde(default)]
    pub server_hide: ServerHideConfig,
    /// Channel list limits.
    #[serde(default)]
    pub channel: ChannelConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(self).map_err(ConfigError::Invalid)
    }

    /// Minimal configuration for a named server, with defaults elsewhere.
    pub fn for_server(name: impl Into<String>, sid: impl Into<String>) -> Self {
        Self {
            server: ServerConfig {
                name: name.into(),
                sid: sid.into(),
            },
            server_hide: ServerHideConfig::default(),
            channel: ChannelConfig::default(),
        }
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name (e.g., "irc.example.net").
    pub name: String,
    /// TS6 server id (e.g., "001").
    pub sid: String,
}

/// Server hiding configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerHideConfig {
    /// Show this server's name in place of any other server's name in
    /// client-visible mode lines.
    #[serde(default)]
    pub hide_servers: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_applies_defaults() {
        let file = write_config(
            r#"
            [server]
            name = "irc.example.net"
            sid = "001"
            "#,
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.name, "irc.example.net");
        assert!(!config.server_hide.hide_servers);
        assert_eq!(config.channel.max_bans, 100);
        assert_eq!(config.channel.max_bans_large, 500);
    }

    #[test]
    fn load_reads_all_sections() {
        let file = write_config(
            r#"
            [server]
            name = "irc.example.net"
            sid = "0AB"

            [server_hide]
            hide_servers = true

            [channel]
            max_bans = 25
            max_bans_large = 250
            "#,
        );
        let config = Config::load(file.path()).unwrap();
        assert!(config.server_hide.hide_servers);
        assert_eq!(config.channel.max_bans, 25);
        assert_eq!(config.channel.max_bans_large, 250);
    }

    #[test]
    fn load_rejects_inverted_limits() {
        let file = write_config(
            r#"
            [server]
            name = "irc.example.net"
            sid = "001"

            [channel]
            max_bans = 50
            max_bans_large = 10
            "#,
        );
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("max_bans_large"));
    }

    #[test]
    fn load_reports_parse_and_io_errors() {
        let file = write_config("[server\nname = 1");
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse(_))));
        assert!(matches!(
            Config::load("/nonexistent/ircd.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}

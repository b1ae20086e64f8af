//! Configuration validation.
//!
//! Validates configuration at load time to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.sid must be exactly 3 characters, got {0}")]
    InvalidSid(usize),
    #[error("server.sid must match pattern [0-9][A-Z0-9][A-Z0-9], got '{0}'")]
    InvalidSidFormat(String),
    #[error("channel.max_bans must be at least 1")]
    ZeroMaxBans,
    #[error("channel.max_bans_large ({large}) must not be below channel.max_bans ({small})")]
    LargeBelowSmall { small: usize, large: usize },
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    }

    // SID validation (TS6 format)
    let sid = &config.server.sid;
    if sid.len() != 3 {
        errors.push(ValidationError::InvalidSid(sid.len()));
    } else {
        let bytes = sid.as_bytes();
        let valid = bytes[0].is_ascii_digit()
            && bytes[1..]
                .iter()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        if !valid {
            errors.push(ValidationError::InvalidSidFormat(sid.clone()));
        }
    }

    let channel = &config.channel;
    if channel.max_bans == 0 {
        errors.push(ValidationError::ZeroMaxBans);
    }
    if channel.max_bans_large < channel.max_bans {
        errors.push(ValidationError::LargeBelowSmall {
            small: channel.max_bans,
            large: channel.max_bans_large,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_defaults() {
        assert!(validate(&Config::for_server("irc.test", "001")).is_ok());
    }

    #[test]
    fn collects_every_problem() {
        let mut config = Config::for_server("", "1");
        config.channel.max_bans = 0;
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn rejects_malformed_sid() {
        let errors = validate(&Config::for_server("irc.test", "A01")).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidSidFormat(_)));
    }
}

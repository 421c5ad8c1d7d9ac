//! API credentials and sandbox/live mode selection.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Selects which API key and base URL the client uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Test,
    Live,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Test => write!(f, "test"),
            Mode::Live => write!(f, "live"),
        }
    }
}

impl FromStr for Mode {
    type Err = CredentialsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "test" => Ok(Mode::Test),
            "live" => Ok(Mode::Live),
            other => Err(CredentialsError::UnknownMode(other.to_string())),
        }
    }
}

/// Errors raised while constructing credentials.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    #[error("unknown mode {0:?} (expected \"test\" or \"live\")")]
    UnknownMode(String),

    #[error("API key for {0} mode is empty")]
    EmptyKey(Mode),
}

/// The sandbox and live API keys plus the active mode.
///
/// Immutable after construction; the key for the active mode is attached
/// to every outgoing request. Only the active key is required to be
/// non-empty, so sandbox-only setups can leave the live key blank.
#[derive(Debug, Clone)]
pub struct Credentials {
    sandbox_key: String,
    live_key: String,
    mode: Mode,
}

impl Credentials {
    /// Creates credentials, validating the key for the active mode.
    pub fn new(
        sandbox_key: impl Into<String>,
        live_key: impl Into<String>,
        mode: Mode,
    ) -> Result<Self, CredentialsError> {
        let credentials = Self {
            sandbox_key: sandbox_key.into(),
            live_key: live_key.into(),
            mode,
        };
        if credentials.active_key().is_empty() {
            return Err(CredentialsError::EmptyKey(mode));
        }
        Ok(credentials)
    }

    /// Loads credentials from `SANDBOX_API_KEY`, `LIVE_API_KEY` and `MODE`.
    ///
    /// `MODE` defaults to `test` when unset. Only the key for the active
    /// mode is required.
    pub fn from_env() -> Result<Self, CredentialsError> {
        let mode: Mode = env::var("MODE").unwrap_or_else(|_| "test".to_string()).parse()?;

        let sandbox_key = env::var("SANDBOX_API_KEY").unwrap_or_default();
        let live_key = env::var("LIVE_API_KEY").unwrap_or_default();
        if mode == Mode::Test && sandbox_key.is_empty() {
            return Err(CredentialsError::MissingVar("SANDBOX_API_KEY"));
        }
        if mode == Mode::Live && live_key.is_empty() {
            return Err(CredentialsError::MissingVar("LIVE_API_KEY"));
        }

        Self::new(sandbox_key, live_key, mode)
    }

    /// Returns the API key matching the active mode.
    pub fn active_key(&self) -> &str {
        match self.mode {
            Mode::Test => &self.sandbox_key,
            Mode::Live => &self.live_key,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parses_case_insensitively() {
        assert_eq!("test".parse::<Mode>().unwrap(), Mode::Test);
        assert_eq!("LIVE".parse::<Mode>().unwrap(), Mode::Live);
        assert_eq!(" Test ".parse::<Mode>().unwrap(), Mode::Test);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(matches!(
            "staging".parse::<Mode>(),
            Err(CredentialsError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_active_key_follows_mode() {
        let creds = Credentials::new("sk_test", "sk_live", Mode::Test).unwrap();
        assert_eq!(creds.active_key(), "sk_test");

        let creds = Credentials::new("sk_test", "sk_live", Mode::Live).unwrap();
        assert_eq!(creds.active_key(), "sk_live");
    }

    #[test]
    fn test_empty_active_key_is_rejected() {
        assert!(matches!(
            Credentials::new("", "sk_live", Mode::Test),
            Err(CredentialsError::EmptyKey(Mode::Test))
        ));
    }

    #[test]
    fn test_inactive_key_may_be_empty() {
        let creds = Credentials::new("sk_test", "", Mode::Test).unwrap();
        assert_eq!(creds.active_key(), "sk_test");
    }
}

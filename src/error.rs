//! Unified error types for the multiplexer controller and event client.

use std::fmt;

// ---------------------------------------------------------------------------
// MuxError
// ---------------------------------------------------------------------------

/// Errors from single-target multiplexer mutations.
///
/// Listing operations never produce this; they degrade to empty results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MuxError {
    /// The tmux command exited nonzero. Carries captured stderr, or a
    /// per-operation default message when stderr was empty.
    Execution(String),
}

impl MuxError {
    /// Raw external error text, suitable for showing to a user verbatim.
    pub fn message(&self) -> &str {
        match self {
            Self::Execution(msg) => msg,
        }
    }
}

impl fmt::Display for MuxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Execution(msg) => write!(f, "execution failed: {msg}"),
        }
    }
}

impl std::error::Error for MuxError {}

// ---------------------------------------------------------------------------
// StreamError
// ---------------------------------------------------------------------------

/// Failures while connecting to or reading the event stream.
///
/// These stay inside the reconnect loop; listeners never observe them.
#[derive(Debug)]
pub enum StreamError {
    /// Network / reqwest-level error.
    Http(reqwest::Error),
    /// The endpoint answered with something other than 200.
    Status(u16),
    /// The server closed the stream.
    Closed,
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status(code) => write!(f, "unexpected status {code}"),
            Self::Closed => write!(f, "stream closed by server"),
        }
    }
}

impl std::error::Error for StreamError {}

impl From<reqwest::Error> for StreamError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mux_error_keeps_raw_message() {
        let e = MuxError::Execution("can't find session: work".into());
        assert_eq!(e.message(), "can't find session: work");
        assert_eq!(e.to_string(), "execution failed: can't find session: work");
    }

    #[test]
    fn stream_error_display_variants() {
        assert_eq!(StreamError::Status(503).to_string(), "unexpected status 503");
        assert_eq!(StreamError::Closed.to_string(), "stream closed by server");
    }

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e = ConfigError::from(io_err);
        let s = e.to_string();
        assert!(s.starts_with("io:"), "got: {s}");
        assert!(s.contains("file not found"));
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }
}

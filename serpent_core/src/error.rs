//! Error types shared by every serpent crate

use thiserror::Error;

/// Result alias used across the workspace
pub type SerpentResult<T> = Result<T, SerpentError>;

#[derive(Debug, Error)]
pub enum SerpentError {
    /// Invalid or inconsistent configuration, detected at construction time
    #[error("configuration error: {0}")]
    Config(String),

    /// Topic registration or delivery failure
    #[error("communication error: {0}")]
    Communication(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SerpentError {
    pub fn config(msg: impl Into<String>) -> Self {
        SerpentError::Config(msg.into())
    }

    pub fn communication(msg: impl Into<String>) -> Self {
        SerpentError::Communication(msg.into())
    }
}

impl From<serde_json::Error> for SerpentError {
    fn from(err: serde_json::Error) -> Self {
        SerpentError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for SerpentError {
    fn from(err: serde_yaml::Error) -> Self {
        SerpentError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        let err = SerpentError::config("width must be positive");
        assert_eq!(err.to_string(), "configuration error: width must be positive");

        let err = SerpentError::communication("topic busy");
        assert!(err.to_string().starts_with("communication error"));
    }

    #[test]
    fn test_io_conversion() {
        fn open_missing() -> SerpentResult<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.yaml")?)
        }

        assert!(matches!(open_missing(), Err(SerpentError::Io(_))));
    }
}

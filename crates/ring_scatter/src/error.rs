//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, missing object factories, and misuse of the session lifecycle.
use thiserror::Error;

use crate::placement::Category;
use crate::spawn::SpawnPhase;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no factory registered for {category} but {count} requested")]
    MissingFactory { category: Category, count: usize },

    #[error("session can only start from Idle (current phase: {phase:?})")]
    SessionNotIdle { phase: SpawnPhase },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Returns true for errors that move a scheduler into `ConfigInvalid`.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::InvalidConfig(_) | Error::MissingFactory { .. })
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(_)));
        assert!(!err.is_config_error());
    }

    #[test]
    fn from_str_allocates_owned_message() {
        let err: Error = "issue".into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "issue"));
    }

    #[test]
    fn missing_factory_message_names_category() {
        let err = Error::MissingFactory {
            category: Category::Obstacle,
            count: 3,
        };
        assert!(err.is_config_error());
        assert_eq!(
            err.to_string(),
            "no factory registered for obstacle but 3 requested"
        );
    }
}

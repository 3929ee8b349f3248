//! Error type shared by the simulation and its collaborator seams

use core::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// An animation timer was advanced or drawn before its one-time setup
    AnimationNotInitialized { operation: &'static str },
    /// A named asset could not be found by the content source
    MissingResource { name: String },
    /// The audio collaborator failed to play something
    Audio { message: String },
    /// Settings, tuning or atlas data could not be parsed
    Config { message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnimationNotInitialized { operation } => {
                write!(f, "animation must be initialized prior to {operation}")
            }
            Self::MissingResource { name } => write!(f, "missing resource: {name}"),
            Self::Audio { message } => write!(f, "audio playback failed: {message}"),
            Self::Config { message } => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::AnimationNotInitialized { operation: "updating" };
        assert_eq!(err.to_string(), "animation must be initialized prior to updating");

        let err = Error::MissingResource {
            name: "asteroidLarge".into(),
        };
        assert_eq!(err.to_string(), "missing resource: asteroidLarge");
    }

    #[test]
    fn test_json_error_converts_to_config() {
        let parse = serde_json::from_str::<u32>("not a number");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Config { .. }));
    }
}

//! Error types shared by the timer components.

use crate::binding::Role;
use thiserror::Error;

/// Errors produced while wiring or driving a timer widget.
///
/// None of these reach the bubbletea event loop: widget attachment failures
/// cause the container to be skipped, and playback failures are dropped by
/// the voice bank.
#[derive(Debug, Error)]
pub enum Error {
    /// A container lacks one of the elements every widget needs.
    #[error("container is missing its {0} element")]
    MissingElement(Role),

    /// An audio clip could not be preloaded or played.
    #[error("voice clip for {second}s failed: {reason}")]
    Playback {
        /// The second the clip announces.
        second: u32,
        /// Human-readable failure reason reported by the sink.
        reason: String,
    },

    /// Writing to the terminal failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_message() {
        let err = Error::MissingElement(Role::Display);
        assert_eq!(err.to_string(), "container is missing its display element");
    }

    #[test]
    fn test_playback_message() {
        let err = Error::Playback {
            second: 3,
            reason: "autoplay blocked".to_string(),
        };
        assert_eq!(err.to_string(), "voice clip for 3s failed: autoplay blocked");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "closed");
    }
}

//! Crate-wide error type.

use thiserror::Error;

use crate::synthesis::VoiceId;

/// Everything that can go wrong while building voices, reading games or
/// writing audio.
#[derive(Debug, Error)]
pub enum Error {
    /// A piece code outside `p n b r q k` reached the voice factory.
    #[error("no timbre for piece code '{0}'")]
    InvalidTimbre(char),

    /// A colour code other than `w` or `b`.
    #[error("invalid colour code '{0}'")]
    InvalidColor(char),

    /// An operation was attempted on a voice that has already been released.
    #[error("voice {0} was used after release")]
    UseAfterRelease(VoiceId),

    /// A square key that is not `a1`..`h8`.
    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    /// A SAN token that matches no legal move in the current position.
    #[error("illegal move '{san}': {reason}")]
    IllegalMove { san: String, reason: String },

    /// A SAN token that matches more than one legal move.
    #[error("ambiguous move '{0}'")]
    AmbiguousMove(String),

    #[cfg(feature = "wav")]
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

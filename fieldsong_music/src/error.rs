// Error types for the music-generation crate.

use fieldsong_affect::error::AffectError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MusicError {
    /// A value lies outside its declared domain, or a pair arrived with
    /// swapped scale kinds.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Synthesis produced nothing renderable (empty stream, silent buffer).
    #[error("degenerate output: {0}")]
    DegenerateOutput(String),
    /// Failure propagated from the affect-mapping crate.
    #[error("affect error: {0}")]
    Affect(#[from] AffectError),
    /// WAV encoding failure.
    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MusicError>;

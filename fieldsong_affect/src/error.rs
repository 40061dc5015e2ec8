// Error types for the affect-mapping crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AffectError {
    /// A caller-supplied setting is unusable: inverted threshold window,
    /// inversion requested on an asymmetric scale, mismatched series lengths.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A value lies outside its declared domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, AffectError>;

// Fieldsong Affect Mapping
//
// Turns raw environmental-sensor readings into the two affect dimensions
// that drive the fieldsong music generator: valence (emotional positivity,
// [-100, 100] in steps of 10) and arousal (emotional activation, [0, 100]
// in steps of 5).
//
// Architecture:
// - scale.rs: threshold-window mapping from raw float series to quantized
//   ScaleValue sequences
// - emotion.rs: quadrant-based classification of (valence, arousal) pairs
//   into emotion labels with an intensity qualifier
// - prompt.rs: text prompt rendering for downstream music-generation APIs
// - error.rs: crate error types
//
// Everything here is a pure, synchronous function of its inputs. Data
// loading, column selection, and resampling are the caller's problem; this
// crate only sees one-dimensional float slices.

pub mod emotion;
pub mod error;
pub mod prompt;
pub mod scale;

// Fieldsong Music Generator
//
// A procedural chord/melody generator driven by affect values: each
// (valence, arousal) pair from `fieldsong_affect` yields a four-bar loop of
// chords, a bass line, and a stochastic melody, emitted as an ordered MIDI
// event stream. Valence picks the mode (bright Lydian down to dissonant
// Locrian) and the voicing register; arousal sets rhythmic density and
// loudness.
//
// Architecture:
// - mode.rs: the fixed 7-mode x 4-bar x 4-note chord table, built once and
//   shared read-only
// - compose.rs: parameter derivation + stochastic note generation into a
//   NoteEvent stream, deterministic under a seeded RNG
// - midi.rs: Standard MIDI File serialization of generated streams
// - synth.rs: offline additive-sine rendering to 16-bit samples and WAV
// - error.rs: crate error types
//
// The generator is deterministic given a seed, supporting reproducible
// output.

pub mod compose;
pub mod error;
pub mod midi;
pub mod mode;
pub mod synth;

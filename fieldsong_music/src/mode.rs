// Mode and chord table for the affect-driven composer.
//
// Seven modes, ordered bright to dark: the composer maps high valence to
// index 0 (Lydian) and low valence to index 6 (Locrian). Each mode is a
// fixed four-bar progression drawn from a shared pool of seven four-note
// voicings. The table is pure data — built once, shared read-only for the
// life of the process, never mutated.
//
// Chord voicings and progressions follow the closed-loop BCI design of
// Ehrlich et al. (2019), PLoS One 14(3), e0213516.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A four-note chord voicing as MIDI note numbers.
pub type Chord = [u8; 4];

/// Number of modes in the table.
pub const MODE_COUNT: usize = 7;

/// Bars in one mode's progression.
pub const PROGRESSION_BARS: usize = 4;

/// The voicing pool the progressions draw from.
const CHORD_POOL: [Chord; 7] = [
    [60, 64, 55, 59],
    [62, 65, 57, 60],
    [64, 55, 59, 62],
    [60, 65, 57, 64],
    [55, 59, 62, 65],
    [57, 60, 64, 55],
    [59, 62, 65, 57],
];

/// The seven modes, declared in table-index order (0 = brightest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Lydian,
    Ionian,
    Mixolydian,
    Dorian,
    Aeolian,
    Phrygian,
    Locrian,
}

impl Mode {
    /// All modes in table-index order.
    pub const ALL: [Mode; MODE_COUNT] = [
        Mode::Lydian,
        Mode::Ionian,
        Mode::Mixolydian,
        Mode::Dorian,
        Mode::Aeolian,
        Mode::Phrygian,
        Mode::Locrian,
    ];

    /// Table index of this mode (0 = brightest, 6 = darkest).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Mode at a table index, if it exists.
    pub fn from_index(index: usize) -> Option<Mode> {
        Mode::ALL.get(index).copied()
    }

    /// Affective character of the mode. Not consulted by the generator;
    /// kept as documentation and as a test oracle.
    pub fn descriptor(self) -> &'static str {
        match self {
            Mode::Lydian => "dreamy, ethereal",
            Mode::Ionian => "bright, happy",
            Mode::Mixolydian => "bold, bluesy",
            Mode::Dorian => "cool, soulful",
            Mode::Aeolian => "melancholic, reflective",
            Mode::Phrygian => "dark, mysterious",
            Mode::Locrian => "dissonant, eerie",
        }
    }

    /// Four-bar progression as indices into the voicing pool.
    fn progression(self) -> [usize; PROGRESSION_BARS] {
        match self {
            Mode::Lydian => [3, 6, 0, 3],
            Mode::Ionian => [0, 3, 4, 0],
            Mode::Mixolydian => [4, 0, 1, 4],
            Mode::Dorian => [1, 4, 5, 1],
            Mode::Aeolian => [5, 1, 2, 5],
            Mode::Phrygian => [2, 5, 6, 2],
            Mode::Locrian => [6, 2, 3, 6],
        }
    }
}

/// The full 7-mode chord table: one four-bar progression per mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeTable {
    chords: [[Chord; PROGRESSION_BARS]; MODE_COUNT],
}

impl ModeTable {
    /// Build the table. Pure and deterministic — every call yields the same
    /// structure.
    pub fn new() -> Self {
        let mut chords = [[[0u8; 4]; PROGRESSION_BARS]; MODE_COUNT];
        for mode in Mode::ALL {
            for (bar, &pool_index) in mode.progression().iter().enumerate() {
                chords[mode.index()][bar] = CHORD_POOL[pool_index];
            }
        }
        ModeTable { chords }
    }

    /// The process-wide shared instance, built on first use.
    pub fn shared() -> &'static ModeTable {
        static TABLE: LazyLock<ModeTable> = LazyLock::new(ModeTable::new);
        &TABLE
    }

    /// The chord a mode plays at a bar of its progression. Bars past the
    /// progression length wrap around.
    pub fn chord(&self, mode: Mode, bar: usize) -> &Chord {
        &self.chords[mode.index()][bar % PROGRESSION_BARS]
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        ModeTable::new()
    }
}

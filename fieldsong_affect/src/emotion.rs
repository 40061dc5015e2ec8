// Emotion classification from (valence, arousal) pairs.
//
// Quadrant rules: positive valence splits into joyful/content on arousal,
// negative valence into angry-fearful/sad, and an "extremely " qualifier
// fires whenever either dimension sits near an extreme. Labels are derived
// on demand; they have no identity of their own.
//
// Zero valence is classified as neutral regardless of arousal. The behavior
// at (valence = 0, arousal != 0) was left undefined upstream, so this crate
// pins it down: valence carries the sign of the emotion, and without a sign
// there is no quadrant to land in.

use crate::error::{AffectError, Result};
use crate::scale::{ScaleKind, ScaleValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The discrete emotion classes the quadrant rules can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emotion {
    HappyJoyful,
    Contentment,
    AngryFearful,
    Sad,
    Neutral,
}

impl Emotion {
    /// Human-readable phrase, as consumed by prompt text sinks.
    pub fn phrase(self) -> &'static str {
        match self {
            Emotion::HappyJoyful => "happy and joyful",
            Emotion::Contentment => "contentment",
            Emotion::AngryFearful => "angry or fearful",
            Emotion::Sad => "sad",
            Emotion::Neutral => "neutral emotion",
        }
    }
}

/// An emotion class plus its intensity qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionLabel {
    pub emotion: Emotion,
    pub intense: bool,
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.intense {
            write!(f, "extremely {}", self.emotion.phrase())
        } else {
            f.write_str(self.emotion.phrase())
        }
    }
}

/// Classify one (valence, arousal) pair. Deterministic and pure.
pub fn classify(valence: &ScaleValue, arousal: &ScaleValue) -> Result<EmotionLabel> {
    check_kinds(valence, arousal)?;
    let v = valence.value();
    let a = arousal.value();

    let intense = v >= 60 || v <= -60 || a >= 80 || a <= 20;

    let emotion = if v > 0 {
        if a >= 50 {
            Emotion::HappyJoyful
        } else {
            Emotion::Contentment
        }
    } else if v < 0 {
        if a >= 50 {
            Emotion::AngryFearful
        } else {
            Emotion::Sad
        }
    } else {
        Emotion::Neutral
    };

    Ok(EmotionLabel { emotion, intense })
}

/// Classify paired series element-wise.
pub fn classify_series(
    valence: &[ScaleValue],
    arousal: &[ScaleValue],
) -> Result<Vec<EmotionLabel>> {
    if valence.len() != arousal.len() {
        return Err(AffectError::Configuration(format!(
            "series length mismatch: {} valence vs {} arousal",
            valence.len(),
            arousal.len()
        )));
    }
    valence
        .iter()
        .zip(arousal)
        .map(|(v, a)| classify(v, a))
        .collect()
}

/// Classify matrices of series row by row, preserving shape.
pub fn classify_matrix(
    valence: &[Vec<ScaleValue>],
    arousal: &[Vec<ScaleValue>],
) -> Result<Vec<Vec<EmotionLabel>>> {
    if valence.len() != arousal.len() {
        return Err(AffectError::Configuration(format!(
            "matrix row count mismatch: {} valence vs {} arousal",
            valence.len(),
            arousal.len()
        )));
    }
    valence
        .iter()
        .zip(arousal)
        .map(|(vr, ar)| classify_series(vr, ar))
        .collect()
}

fn check_kinds(valence: &ScaleValue, arousal: &ScaleValue) -> Result<()> {
    if valence.kind() != ScaleKind::Valence {
        return Err(AffectError::InvalidInput(format!(
            "expected a Valence value, got {:?}",
            valence.kind()
        )));
    }
    if arousal.kind() != ScaleKind::Arousal {
        return Err(AffectError::InvalidInput(format!(
            "expected an Arousal value, got {:?}",
            arousal.kind()
        )));
    }
    Ok(())
}

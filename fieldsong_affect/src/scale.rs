// Scale mapping: raw sensor samples to quantized valence/arousal values.
//
// A raw numeric series (radiation dose rate, temperature, whatever the
// loader hands us) is mapped onto one of two bounded affect scales through
// a caller-supplied threshold window. Samples at or above the window's
// upper bound clamp to the scale maximum, samples below the lower bound
// clamp to the minimum, and everything in between is rescaled linearly and
// snapped to the scale's quantization interval.
//
// Rounding policy: round-half-away-from-zero (`f64::round`), applied
// everywhere a continuous value is snapped to a discrete step.

use crate::error::{AffectError, Result};
use serde::{Deserialize, Serialize};

/// Which affect scale a value lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleKind {
    /// Emotional positivity: [-100, 100] in steps of 10.
    Valence,
    /// Emotional activation: [0, 100] in steps of 5.
    Arousal,
}

impl ScaleKind {
    /// Inclusive bounds of the scale.
    pub fn range(self) -> (i32, i32) {
        match self {
            ScaleKind::Valence => (-100, 100),
            ScaleKind::Arousal => (0, 100),
        }
    }

    /// Quantization step of the scale.
    pub fn interval(self) -> i32 {
        match self {
            ScaleKind::Valence => 10,
            ScaleKind::Arousal => 5,
        }
    }

    /// Whether negating any on-scale value yields another on-scale value.
    /// Only symmetric scales support inverted mapping.
    fn symmetric(self) -> bool {
        let (min, max) = self.range();
        min == -max
    }
}

/// A quantized scalar on one of the affect scales.
///
/// Invariant: `value` is a multiple of the kind's interval, inside the
/// kind's bounds. The constructor enforces this, so any `ScaleValue` a
/// downstream component receives is already validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleValue {
    kind: ScaleKind,
    value: i32,
}

impl ScaleValue {
    /// Create a validated scale value.
    pub fn new(kind: ScaleKind, value: i32) -> Result<Self> {
        let (min, max) = kind.range();
        if value < min || value > max {
            return Err(AffectError::InvalidInput(format!(
                "{value} is outside the {kind:?} range [{min}, {max}]"
            )));
        }
        if value % kind.interval() != 0 {
            return Err(AffectError::InvalidInput(format!(
                "{value} is not a multiple of the {kind:?} interval {}",
                kind.interval()
            )));
        }
        Ok(ScaleValue { kind, value })
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

/// The raw-input domain that maps linearly onto a full affect scale.
///
/// Inputs at or above `max_thresh` clamp to the scale maximum; inputs below
/// `min_thresh` clamp to the scale minimum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdWindow {
    min_thresh: f64,
    max_thresh: f64,
}

impl ThresholdWindow {
    /// Create a window, rejecting non-finite or non-monotonic bounds.
    pub fn new(min_thresh: f64, max_thresh: f64) -> Result<Self> {
        if !min_thresh.is_finite() || !max_thresh.is_finite() {
            return Err(AffectError::Configuration(format!(
                "threshold window bounds must be finite, got [{min_thresh}, {max_thresh}]"
            )));
        }
        if max_thresh <= min_thresh {
            return Err(AffectError::Configuration(format!(
                "max_thresh {max_thresh} must exceed min_thresh {min_thresh}"
            )));
        }
        Ok(ThresholdWindow {
            min_thresh,
            max_thresh,
        })
    }

    pub fn min_thresh(&self) -> f64 {
        self.min_thresh
    }

    pub fn max_thresh(&self) -> f64 {
        self.max_thresh
    }
}

/// Map one raw sample onto a scale.
pub fn map_value(kind: ScaleKind, sample: f64, window: &ThresholdWindow) -> Result<ScaleValue> {
    if !sample.is_finite() {
        return Err(AffectError::InvalidInput(format!(
            "sample {sample} is not finite"
        )));
    }
    let (range_min, range_max) = kind.range();
    let value = if sample >= window.max_thresh {
        range_max
    } else if sample < window.min_thresh {
        range_min
    } else {
        let span = window.max_thresh - window.min_thresh;
        let scaled = (sample - window.min_thresh) / span * f64::from(range_max - range_min)
            + f64::from(range_min);
        round_to_interval(scaled, kind.interval())
    };
    ScaleValue::new(kind, value)
}

/// Map a raw series onto the valence scale.
pub fn map_to_valence(
    samples: &[f64],
    window: &ThresholdWindow,
    inverted: bool,
) -> Result<Vec<ScaleValue>> {
    map_series(ScaleKind::Valence, samples, window, inverted)
}

/// Map a raw series onto the arousal scale. Inversion is rejected here:
/// negating the asymmetric [0, 100] range would leave the scale entirely.
pub fn map_to_arousal(
    samples: &[f64],
    window: &ThresholdWindow,
    inverted: bool,
) -> Result<Vec<ScaleValue>> {
    map_series(ScaleKind::Arousal, samples, window, inverted)
}

/// Element-wise mapping of a series, optionally negating each result.
pub fn map_series(
    kind: ScaleKind,
    samples: &[f64],
    window: &ThresholdWindow,
    inverted: bool,
) -> Result<Vec<ScaleValue>> {
    if inverted && !kind.symmetric() {
        return Err(AffectError::Configuration(format!(
            "inversion is not supported on the asymmetric {kind:?} range"
        )));
    }
    samples
        .iter()
        .map(|&sample| {
            let mapped = map_value(kind, sample, window)?;
            if inverted {
                ScaleValue::new(kind, -mapped.value())
            } else {
                Ok(mapped)
            }
        })
        .collect()
}

/// Snap a continuous value to the nearest multiple of `interval`,
/// rounding halves away from zero.
fn round_to_interval(value: f64, interval: i32) -> i32 {
    (value / f64::from(interval)).round() as i32 * interval
}

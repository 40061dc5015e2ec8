// Prompt text rendering for downstream music-generation services.
//
// The remote generation client itself lives outside this crate; these
// functions only build the strings it consumes, one per (valence, arousal)
// pair.

use crate::emotion::classify_series;
use crate::error::{AffectError, Result};
use crate::scale::ScaleValue;

/// Render a genre prompt for one pair, e.g.
/// `"lo-fi ambient, -40% of valence, and 55% of arousal"`.
pub fn genre_prompt(genre: &str, valence: &ScaleValue, arousal: &ScaleValue) -> String {
    format!(
        "{genre}, {}% of valence, and {}% of arousal",
        valence.value(),
        arousal.value()
    )
}

/// Render genre prompts for paired series.
pub fn genre_prompts(
    genre: &str,
    valence: &[ScaleValue],
    arousal: &[ScaleValue],
) -> Result<Vec<String>> {
    if valence.len() != arousal.len() {
        return Err(AffectError::Configuration(format!(
            "series length mismatch: {} valence vs {} arousal",
            valence.len(),
            arousal.len()
        )));
    }
    Ok(valence
        .iter()
        .zip(arousal)
        .map(|(v, a)| genre_prompt(genre, v, a))
        .collect())
}

/// Render classified emotion labels as prompt strings, one per pair.
pub fn emotion_prompts(valence: &[ScaleValue], arousal: &[ScaleValue]) -> Result<Vec<String>> {
    Ok(classify_series(valence, arousal)?
        .iter()
        .map(|label| label.to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleKind;

    fn pair(v: i32, a: i32) -> (ScaleValue, ScaleValue) {
        (
            ScaleValue::new(ScaleKind::Valence, v).unwrap(),
            ScaleValue::new(ScaleKind::Arousal, a).unwrap(),
        )
    }

    #[test]
    fn genre_prompt_format() {
        let (v, a) = pair(-40, 55);
        assert_eq!(
            genre_prompt("lo-fi ambient", &v, &a),
            "lo-fi ambient, -40% of valence, and 55% of arousal"
        );
    }

    #[test]
    fn genre_prompts_mismatch_is_rejected() {
        let (v, a) = pair(0, 0);
        let err = genre_prompts("jazz", &[v], &[a, a]).unwrap_err();
        assert!(matches!(err, AffectError::Configuration(_)));
    }

    #[test]
    fn emotion_prompts_render_labels() {
        let (v1, a1) = pair(80, 90);
        let (v2, a2) = pair(-20, 30);
        let prompts = emotion_prompts(&[v1, v2], &[a1, a2]).unwrap();
        assert_eq!(prompts, vec!["extremely happy and joyful", "sad"]);
    }
}

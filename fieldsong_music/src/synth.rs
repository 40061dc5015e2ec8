// Offline additive-sine rendering of generated melodies.
//
// Each note-on contributes a fixed half-second sine partial at its equal-
// temperament frequency; partials are summed into a buffer covering the
// whole event stream and the result is peak-normalized to the full 16-bit
// range. Playback-quality synthesis is out of scope — this exists so a
// generated loop can be auditioned without a MIDI renderer.

use crate::compose::{EventKind, MelodyOutput};
use crate::error::{MusicError, Result};
use std::f64::consts::PI;
use std::path::Path;

/// Length of each synthesized tone, in seconds.
const TONE_SECONDS: f64 = 0.5;

/// Per-partial amplitude before normalization.
const TONE_AMPLITUDE: f64 = 0.2;

/// Render an event stream to mono 16-bit samples.
///
/// Tones that extend past the end of the stream are clipped at the buffer
/// boundary. An empty stream, or one whose note-ons all carry velocity 0,
/// renders nothing and fails with `DegenerateOutput` rather than dividing
/// by a zero peak.
pub fn render(melody: &MelodyOutput, sample_rate: u32) -> Result<Vec<i16>> {
    if melody.events.is_empty() {
        return Err(MusicError::DegenerateOutput("empty event stream".into()));
    }

    let seconds_per_tick =
        60.0 / (f64::from(melody.tempo_bpm) * f64::from(melody.ticks_per_beat));
    let total_ticks: u64 = melody.events.iter().map(|e| u64::from(e.delta_ticks)).sum();
    let total_seconds = total_ticks as f64 * seconds_per_tick;
    let len = (total_seconds * f64::from(sample_rate)) as usize;
    if len == 0 {
        return Err(MusicError::DegenerateOutput(
            "event stream has zero duration".into(),
        ));
    }

    let mut buffer = vec![0.0f64; len];
    let mut tick: u64 = 0;
    for event in &melody.events {
        tick += u64::from(event.delta_ticks);
        if event.kind != EventKind::NoteOn || event.velocity == 0 {
            continue;
        }
        let onset = tick as f64 * seconds_per_tick;
        let start = ((onset * f64::from(sample_rate)) as usize).min(len);
        let end = (((onset + TONE_SECONDS) * f64::from(sample_rate)) as usize).min(len);
        let freq = 440.0 * 2f64.powf((f64::from(event.note) - 69.0) / 12.0);
        for (i, sample) in buffer[start..end].iter_mut().enumerate() {
            let t = i as f64 / f64::from(sample_rate);
            *sample += TONE_AMPLITUDE * (2.0 * PI * freq * t).sin();
        }
    }

    let peak = buffer.iter().fold(0.0f64, |acc, s| acc.max(s.abs()));
    if peak == 0.0 {
        return Err(MusicError::DegenerateOutput(
            "zero-amplitude buffer".into(),
        ));
    }

    Ok(buffer
        .iter()
        .map(|s| (s / peak * f64::from(i16::MAX)).round() as i16)
        .collect())
}

/// Write rendered samples as a mono 16-bit WAV file.
pub fn write_wav(samples: &[i16], sample_rate: u32, path: &Path) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

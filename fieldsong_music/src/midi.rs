// Standard MIDI File output for generated melodies.
//
// Serializes a MelodyOutput into a single-track SMF using the `midly`
// crate: one tempo meta event, a program change on channel 0, then the
// event stream verbatim (its delta times are already relative).

use crate::compose::{EventKind, MelodyOutput};
use crate::error::Result;
use midly::{
    Format, Header, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Convert a melody to MIDI and write it to a file.
pub fn write_midi(melody: &MelodyOutput, path: &Path) -> Result<()> {
    let smf = melody_to_smf(melody);
    let mut buf = Vec::new();
    smf.write_std(&mut buf)?;
    std::fs::write(path, &buf)?;
    Ok(())
}

/// Convert a melody to an in-memory SMF.
pub fn melody_to_smf(melody: &MelodyOutput) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(melody.ticks_per_beat)),
    ));

    let mut track: Track<'static> = Vec::new();

    let tempo_microseconds = 60_000_000 / u32::from(melody.tempo_bpm);
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::Tempo(u24::new(tempo_microseconds))),
    });

    // Acoustic grand on channel 0
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel: u4::new(0),
            message: MidiMessage::ProgramChange { program: u7::new(0) },
        },
    });

    for event in &melody.events {
        let message = match event.kind {
            EventKind::NoteOn => MidiMessage::NoteOn {
                key: u7::new(event.note),
                vel: u7::new(event.velocity),
            },
            EventKind::NoteOff => MidiMessage::NoteOff {
                key: u7::new(event.note),
                vel: u7::new(event.velocity),
            },
        };
        track.push(TrackEvent {
            delta: u28::new(event.delta_ticks),
            kind: TrackEventKind::Midi {
                channel: u4::new(0),
                message,
            },
        });
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);
    smf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{BASE_BPM, NoteEvent, TICKS_PER_BEAT};
    use crate::mode::Mode;

    fn test_melody() -> MelodyOutput {
        MelodyOutput {
            events: vec![
                NoteEvent {
                    note: 60,
                    velocity: 80,
                    delta_ticks: 0,
                    kind: EventKind::NoteOn,
                },
                NoteEvent {
                    note: 60,
                    velocity: 0,
                    delta_ticks: u32::from(TICKS_PER_BEAT),
                    kind: EventKind::NoteOff,
                },
            ],
            tempo_bpm: BASE_BPM,
            ticks_per_beat: TICKS_PER_BEAT,
            mode: Mode::Ionian,
        }
    }

    #[test]
    fn single_track_with_tempo_and_program() {
        let melody = test_melody();
        let smf = melody_to_smf(&melody);
        assert_eq!(smf.tracks.len(), 1);
        // tempo + program change + 2 note events + end of track
        assert_eq!(smf.tracks[0].len(), melody.events.len() + 3);

        // 60 BPM = 1_000_000 us per quarter note
        match smf.tracks[0][0].kind {
            TrackEventKind::Meta(midly::MetaMessage::Tempo(us)) => {
                assert_eq!(us.as_int(), 1_000_000);
            }
            ref other => panic!("expected tempo meta, got {other:?}"),
        }
    }

    #[test]
    fn smf_bytes_parse_back() {
        let smf = melody_to_smf(&test_melody());
        let mut buf = Vec::new();
        smf.write_std(&mut buf).unwrap();
        let parsed = Smf::parse(&buf).unwrap();
        assert_eq!(parsed.tracks.len(), 1);
        assert_eq!(parsed.tracks[0].len(), smf.tracks[0].len());
    }

    #[test]
    fn write_midi_creates_a_file() {
        let path = std::env::temp_dir().join("fieldsong_midi_writer_test.mid");
        write_midi(&test_melody(), &path).unwrap();
        let len = std::fs::metadata(&path).unwrap().len();
        assert!(len > 0);
        std::fs::remove_file(&path).unwrap();
    }
}

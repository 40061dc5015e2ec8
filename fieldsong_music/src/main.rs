// Fieldsong melody generator — CLI entry point.
//
// Generates a four-bar loop for each (valence, arousal) point and writes it
// to MIDI (and optionally WAV). Without an explicit pair it sweeps the full
// affect plane on a coarse grid, one file per point.
//
// Usage:
//   cargo run -p fieldsong_music -- [outdir] [--valence N --arousal N]
//     [--seed N] [--genre NAME] [--wav]
//
// Valence must be a multiple of 10 in [-100, 100]; arousal a multiple of 5
// in [0, 100].

use fieldsong_affect::emotion::classify;
use fieldsong_affect::prompt::genre_prompt;
use fieldsong_affect::scale::{ScaleKind, ScaleValue};
use fieldsong_music::compose::compose;
use fieldsong_music::error::Result;
use fieldsong_music::midi::write_midi;
use fieldsong_music::mode::ModeTable;
use fieldsong_music::synth::{render, write_wav};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

const SAMPLE_RATE: u32 = 44_100;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let out_dir = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str())
        .unwrap_or("generated_melody");
    let valence_flag: Option<i32> = parse_flag(&args, "--valence");
    let arousal_flag: Option<i32> = parse_flag(&args, "--arousal");
    let seed: Option<u64> = parse_flag(&args, "--seed");
    let genre: Option<String> = parse_flag(&args, "--genre");
    let with_wav = args.iter().any(|a| a == "--wav");

    let pairs: Vec<(i32, i32)> = match (valence_flag, arousal_flag) {
        (Some(v), Some(a)) => vec![(v, a)],
        (None, None) => sweep_pairs(),
        _ => {
            eprintln!("--valence and --arousal must be given together");
            std::process::exit(1);
        }
    };

    println!("=== Fieldsong Melody Generator ===");
    println!("Output: {out_dir}");
    println!("Points: {}", pairs.len());
    if let Some(s) = seed {
        println!("Seed: {s}");
    }
    println!();

    if let Err(e) = std::fs::create_dir_all(out_dir) {
        eprintln!("Failed to create {out_dir}: {e}");
        std::process::exit(1);
    }

    let base_seed = seed.unwrap_or_else(rand::random);
    let table = ModeTable::shared();
    for (idx, &(v, a)) in pairs.iter().enumerate() {
        let point_seed = base_seed.wrapping_add(idx as u64);
        if let Err(e) = generate_point(
            v,
            a,
            idx,
            point_seed,
            table,
            Path::new(out_dir),
            genre.as_deref(),
            with_wav,
        ) {
            eprintln!("Failed at valence {v}, arousal {a}: {e}");
            std::process::exit(1);
        }
    }

    println!();
    println!("Done. Play with: timidity {out_dir}/<file>.mid (or any MIDI player)");
}

#[allow(clippy::too_many_arguments)]
fn generate_point(
    v: i32,
    a: i32,
    idx: usize,
    point_seed: u64,
    table: &ModeTable,
    out_dir: &Path,
    genre: Option<&str>,
    with_wav: bool,
) -> Result<()> {
    let valence = ScaleValue::new(ScaleKind::Valence, v)?;
    let arousal = ScaleValue::new(ScaleKind::Arousal, a)?;
    let label = classify(&valence, &arousal)?;

    let mut rng = StdRng::seed_from_u64(point_seed);
    let melody = compose(&valence, &arousal, table, &mut rng)?;

    let midi_path = out_dir.join(format!("melody_val{v}_aro{a}.mid"));
    write_midi(&melody, &midi_path)?;
    println!(
        "[{:>3}] valence {v:>4}, arousal {a:>3} -> {:?} (\"{label}\") -> {}",
        idx + 1,
        melody.mode,
        midi_path.display()
    );
    if let Some(genre) = genre {
        println!("      prompt: {}", genre_prompt(genre, &valence, &arousal));
    }

    if with_wav {
        let samples = render(&melody, SAMPLE_RATE)?;
        let wav_path = out_dir.join(format!("melody_val{v}_aro{a}.wav"));
        write_wav(&samples, SAMPLE_RATE, &wav_path)?;
        println!("      wav -> {}", wav_path.display());
    }
    Ok(())
}

/// The default sweep: every 20 valence steps crossed with every 10 arousal
/// steps, the same grid the affect plane is usually explored on.
fn sweep_pairs() -> Vec<(i32, i32)> {
    let mut pairs = Vec::new();
    for v in (-100..=100).step_by(20) {
        for a in (0..=100).step_by(10) {
            pairs.push((v, a));
        }
    }
    pairs
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

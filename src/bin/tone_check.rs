//! Tone Check Program
//!
//! Runs the pipeline on a synthesized sine tone, so processing can be checked
//! without any input media.

use clap::Parser;
use std::process;
use tempobass::audio::write_wav_file;
use tempobass::{init_logging, Result, SampleBuffer};

#[derive(Parser, Debug)]
#[command(name = "tone_check")]
#[command(about = "Process a synthesized tone and write the result")]
struct Args {
    /// Output audio file
    #[arg(short, long, default_value = "tone_check.wav")]
    output: String,

    /// Tone frequency (Hz)
    #[arg(short, long, default_value = "110")]
    frequency: f32,

    /// Tone length (seconds)
    #[arg(short, long, default_value = "2.0")]
    duration: f32,

    /// Sample rate
    #[arg(short, long, default_value = "44100")]
    sample_rate: u32,

    /// Tempo factor
    #[arg(short, long, default_value = "0.75")]
    tempo: f64,

    /// Bass boost (dB)
    #[arg(short, long, default_value = "5")]
    bass: f64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    println!("=== Tone Check ===");
    println!("Tone: {} Hz, {:.2}s @ {} Hz", args.frequency, args.duration, args.sample_rate);
    println!("Tempo: {}x, Bass: +{} dB", args.tempo, args.bass);
    println!("==================");

    let frames = (args.duration * args.sample_rate as f32) as usize;
    let step = std::f32::consts::TAU * args.frequency / args.sample_rate as f32;
    let left: Vec<f32> = (0..frames).map(|i| 0.5 * (i as f32 * step).sin()).collect();
    let right: Vec<f32> = (0..frames).map(|i| 0.5 * (i as f32 * step).cos()).collect();
    let tone = SampleBuffer::from_channels(args.sample_rate, vec![left, right])?;

    let wav = tempobass::process(tone, args.tempo, args.bass)?;
    write_wav_file(&args.output, &wav)?;

    println!("Wrote {} ({} bytes)", args.output, wav.len());
    Ok(())
}

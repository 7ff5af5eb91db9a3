//! tempobass - Tempo and Bass Processor

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::process;
use tempobass::audio::{read_wav_file, write_wav_file};
use tempobass::processing::{Pipeline, StageEvent, params};
use tempobass::utils::{format_duration, format_file_size, is_supported_format};
use tempobass::{init_logging, Args, Config};

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    if let Some(path) = &args.write_config {
        init_logging(args.verbose);
        Config::create_default_config(path)?;
        println!("Wrote default config: {}", path.display());
        return Ok(());
    }

    if args.test_only {
        init_logging(args.verbose);
        return run_test_mode();
    }

    // Log level comes from the merged config
    let config = Config::from_args_and_config(args)?;
    init_logging(config.verbose());
    if config.verbose() {
        println!("{}", tempobass::get_library_info());
        println!();
    }

    if !config.input_path.exists() {
        bail!("Input file does not exist: {}", config.input_path.display());
    }
    if !is_supported_format(&config.input_path) {
        log::warn!("{} does not have a .wav extension, trying anyway", config.input_path.display());
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads())
        .build_global()
        .context("Failed to configure worker threads")?;

    let settings = config.params();

    println!("=== tempobass Audio Processor ===");
    println!("Input: {}", config.input_path.display());
    println!("Output: {}", config.output_path.display());
    println!("Tempo: {}x ({})", settings.tempo_factor, params::describe_tempo(settings.tempo_factor));
    println!("Bass: +{} dB ({})", settings.bass_boost_db, params::describe_bass(settings.bass_boost_db));
    println!("=================================\n");

    for tip in params::recommendations(&settings) {
        log::info!("{}", tip);
    }

    let input_size = std::fs::metadata(&config.input_path)?.len();
    log::debug!(
        "Estimated processing time: {:.1}s",
        params::estimate_processing_seconds(input_size as f64 / (1024.0 * 1024.0), &settings)
    );

    let decoded = read_wav_file(&config.input_path)
        .with_context(|| format!("Failed to load {}", config.input_path.display()))?;

    let pipeline = Pipeline::new(settings)?;
    let verbose = config.verbose();
    let output = pipeline.run(decoded, &mut |event: StageEvent| {
        if event.applied {
            println!("{}", event.stage.label());
        } else if verbose {
            println!("{} (skipped)", event.stage.label());
        }
    })?;

    write_wav_file(&config.output_path, &output.wav)?;

    let report = &output.report;
    println!();
    println!("=== Processing Complete ===");
    println!("Time: {:.2}s", report.processing_time.as_secs_f64());
    println!("RTF: {:.3}", report.real_time_factor);
    println!(
        "Duration: {} -> {}",
        format_duration(Some(report.input_duration_seconds)),
        format_duration(Some(report.output_duration_seconds))
    );
    println!("Size: {}", format_file_size(report.encoded_bytes as u64));
    if verbose {
        println!("Frames: {} -> {} ({} ch @ {} Hz)",
                 report.input_frames, report.output_frames, report.channels, report.sample_rate);
        for (stage, elapsed) in &report.stage_timings {
            println!("  {:?}: {:.2}ms", stage, elapsed.as_secs_f64() * 1000.0);
        }
        if report.clipped_samples > 0 {
            println!("Clipped samples: {}", report.clipped_samples);
        }
    }

    Ok(())
}

fn run_test_mode() -> Result<()> {
    println!("=== Test Mode ===");
    let config = Config::default();
    config.validate()?;
    println!("Config OK");
    println!("CPU cores: {}", tempobass::utils::cpu_count());

    let probe = tempobass::SampleBuffer::mono(44100, vec![0.0, 0.5, -0.5, 1.0])?;
    let wav = tempobass::process(probe, 2.0, 5.0)?;
    println!("Pipeline OK ({} bytes)", wav.len());
    println!("Ready for processing");
    Ok(())
}

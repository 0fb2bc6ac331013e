// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! keydrill - an interactive MIDI chord trainer
//!
//! Prompts chords built on the degrees of the major scale, watches the
//! attached MIDI keyboard, and confirms when the held keys exactly match
//! the prompted chord.

mod config;
mod midi;
mod music;
mod trainer;
mod ui;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::event::Event;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use config::TrainerFile;
use midi::{print_sources, MidiListener, MidiMessage};
use trainer::TrainerSession;
use ui::{App, KeyAction};

/// How often the input ports are rescanned for plugged/unplugged devices
const PORT_RESCAN_INTERVAL: Duration = Duration::from_secs(1);

fn print_usage() {
    println!("Usage: keydrill [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <FILE>    Load configuration from a YAML file");
    println!("  --degree <1-7>     Start with the chord on this scale degree");
    println!("  --list-sources     List available MIDI input ports and exit");
    println!("  --help             Show this help message");
}

fn main() -> Result<()> {
    let mut config_path: Option<PathBuf> = None;
    let mut degree: Option<u8> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--list-sources" => {
                print_sources();
                return Ok(());
            }
            "--config" => {
                let path = args
                    .next()
                    .context("--config requires a file path argument")?;
                config_path = Some(PathBuf::from(path));
            }
            "--degree" => {
                let value = args.next().context("--degree requires a value")?;
                let parsed: u8 = value
                    .parse()
                    .with_context(|| format!("Invalid degree: {value}"))?;
                if !(1..=7).contains(&parsed) {
                    bail!("Degree must be between 1 and 7, got {parsed}");
                }
                degree = Some(parsed);
            }
            other => {
                print_usage();
                bail!("Unknown argument: {other}");
            }
        }
    }

    init_logging()?;

    let config = match config_path {
        Some(path) => TrainerFile::load(path)?,
        None => TrainerFile::default(),
    };

    run(config, degree)
}

/// Set up tracing to a log file when RUST_LOG is set.
///
/// The terminal belongs to the UI, so logs never go to stdout.
fn init_logging() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        return Ok(());
    }

    let file = File::create("keydrill.log").context("Failed to create log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(config: TrainerFile, degree: Option<u8>) -> Result<()> {
    let mut session = match config.trainer.seed {
        Some(seed) => TrainerSession::with_seed(
            config.keyboard.base_note,
            config.keyboard.octaves,
            config.trainer.chord_root,
            seed,
        ),
        None => TrainerSession::new(
            config.keyboard.base_note,
            config.keyboard.octaves,
            config.trainer.chord_root,
        ),
    };
    session.prompt_chord(degree);

    let mut listener = MidiListener::new(config.midi.device.clone());
    if let Err(error) = listener.attach_first() {
        warn!(%error, "could not attach MIDI input, continuing without a device");
    }

    let mut app = App::new()?;
    let mut last_rescan = Instant::now();

    while app.is_running() {
        // Drain pending MIDI events before drawing
        for message in listener.recv_all() {
            match message {
                MidiMessage::NoteOn { note, .. } => {
                    session.note_on(note);
                }
                MidiMessage::NoteOff { note } => {
                    session.note_off(note);
                }
                MidiMessage::TimingClock | MidiMessage::Unknown => {}
            }
        }

        if last_rescan.elapsed() >= PORT_RESCAN_INTERVAL {
            let was_connected = listener.is_connected();
            if let Err(error) = listener.rescan() {
                warn!(%error, "port rescan failed");
            }
            // Held notes never get a release once the device is gone
            if was_connected && !listener.is_connected() {
                session.release_all();
            }
            last_rescan = Instant::now();
        }

        if let Some(Event::Key(key)) = app.poll_event()? {
            match app.handle_key(key.code, key.modifiers) {
                KeyAction::NextChord => session.prompt_chord(None),
                KeyAction::PromptDegree(d) => session.prompt_chord(Some(d)),
                KeyAction::Quit | KeyAction::ToggleHelp | KeyAction::None => {}
            }
        }

        app.draw(&session, listener.port_name())?;
    }

    Ok(())
}

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Trainer session state machine.
//!
//! The session owns the keyboard state and the currently prompted chord.
//! Every note on/off event runs to completion: update the pressed flag,
//! re-check the exact match, and prompt a fresh chord on a match.

pub mod keyboard;

pub use keyboard::{KeyState, Keybed};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::music::{octave_of, ChordTemplate, MidiNote, Note, Quality, ScalePattern};

/// Default anchor note chords are resolved from (middle C)
pub const DEFAULT_CHORD_ROOT: MidiNote = 60;

/// The currently active training target.
///
/// Replaced wholesale on every new prompt; no history is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptedChord {
    /// Resolved absolute notes, in template order
    pub notes: [MidiNote; 3],
    /// Derived quality, for display only
    pub quality: Quality,
}

impl PromptedChord {
    /// Prompt string: root pitch-class name plus quality label
    pub fn label(&self) -> String {
        format!("{} {}", Note::from_midi(self.notes[0]), self.quality)
    }
}

/// Interactive chord-training session.
///
/// Single-threaded: all mutation happens synchronously inside
/// [`note_on`]/[`note_off`] and [`prompt_chord`].
///
/// [`note_on`]: TrainerSession::note_on
/// [`note_off`]: TrainerSession::note_off
/// [`prompt_chord`]: TrainerSession::prompt_chord
pub struct TrainerSession {
    keybed: Keybed,
    prompt: Option<PromptedChord>,
    scale: ScalePattern,
    chord_root: MidiNote,
    rng: StdRng,
    matched: u64,
}

impl TrainerSession {
    /// Create a session over a keybed starting at `base_note` spanning
    /// `octaves`, with chords anchored at `chord_root`.
    pub fn new(base_note: MidiNote, octaves: u8, chord_root: MidiNote) -> Self {
        Self::with_rng(base_note, octaves, chord_root, StdRng::from_entropy())
    }

    /// Create a session with a fixed RNG seed for reproducible prompts.
    pub fn with_seed(base_note: MidiNote, octaves: u8, chord_root: MidiNote, seed: u64) -> Self {
        Self::with_rng(base_note, octaves, chord_root, StdRng::seed_from_u64(seed))
    }

    fn with_rng(base_note: MidiNote, octaves: u8, chord_root: MidiNote, rng: StdRng) -> Self {
        Self {
            keybed: Keybed::new(base_note, octaves),
            prompt: None,
            scale: ScalePattern::major(),
            chord_root,
            rng,
            matched: 0,
        }
    }

    /// Read-only view of the key states, in ascending note order
    pub fn keys(&self) -> &[KeyState] {
        self.keybed.keys()
    }

    /// The active prompt, if any
    pub fn prompt(&self) -> Option<&PromptedChord> {
        self.prompt.as_ref()
    }

    /// Number of chords matched this session (display only, not persisted)
    pub fn matched(&self) -> u64 {
        self.matched
    }

    /// Prompt a new chord.
    ///
    /// `degree` is the 1-indexed scale degree (1-7) to build the chord on;
    /// `None` picks one uniformly at random. The major triad template is
    /// resolved against the major scale at the session's anchor note, the
    /// resolved keys are flagged as expected, and the quality label is
    /// derived for display. An unclassifiable interval pair just labels the
    /// prompt `?`; matching is unaffected.
    pub fn prompt_chord(&mut self, degree: Option<u8>) {
        let offset = match degree {
            Some(d) => d.clamp(1, 7) - 1,
            None => self.rng.gen_range(0..7),
        };

        let notes = ChordTemplate::MAJOR.resolve(self.chord_root, &self.scale, offset);
        let quality = Quality::classify(&notes);
        self.keybed.set_chord(&notes);

        let prompt = PromptedChord { notes, quality };
        info!(
            root = %Note::from_midi(notes[0]),
            octave = octave_of(notes[0]),
            label = %prompt.label(),
            "prompting chord"
        );
        self.prompt = Some(prompt);
    }

    /// Release every key, e.g. when the input device disappears while
    /// notes are held. The prompt stays active.
    pub fn release_all(&mut self) {
        self.keybed.clear_pressed();
    }

    /// Handle a note-on event. Returns true when the event completed the
    /// prompted chord (a fresh chord has already been prompted).
    pub fn note_on(&mut self, note: MidiNote) -> bool {
        self.apply(note, true)
    }

    /// Handle a note-off event. Returns true on the (unusual) case that a
    /// release completes the chord, e.g. after an extra note is let go.
    pub fn note_off(&mut self, note: MidiNote) -> bool {
        self.apply(note, false)
    }

    fn apply(&mut self, note: MidiNote, pressed: bool) -> bool {
        if !self.keybed.set_pressed(note, pressed) {
            debug!(note, "note outside rendered range");
            return false;
        }

        if self.prompt.is_none() || !self.keybed.matches_chord() {
            return false;
        }

        self.matched += 1;
        info!(matched = self.matched, "chord matched");
        self.prompt_chord(None);
        true
    }
}

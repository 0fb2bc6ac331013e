// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory primitives for the trainer.
//!
//! Provides pitch-class naming, scale step patterns, chord templates,
//! and the degree-based chord resolution the prompts are built from.

pub mod chord;
pub mod note;
pub mod scale;

pub use chord::{Accidental, ChordTemplate, Quality, ScaleDegree};
pub use note::{octave_of, MidiNote, Note};
pub use scale::ScalePattern;

use thiserror::Error;

/// Errors raised when constructing scale or chord definitions.
///
/// These only occur for malformed inputs at construction time; the built-in
/// templates and patterns are known-valid constants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MusicError {
    #[error("scale pattern must have exactly 7 steps, got {0}")]
    PatternLength(usize),
    #[error("scale pattern steps must sum to 12 semitones, got {0}")]
    PatternSum(u8),
    #[error("scale degree step must be in 1-7, got {0}")]
    DegreeStep(u8),
}

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale step patterns.
//!
//! A scale is described by the semitone distances between its seven
//! consecutive degrees. Cumulative offsets wrap past the seventh degree
//! into the next octave.

use super::MusicError;

/// Number of degrees in a diatonic scale
pub const SCALE_DEGREES: usize = 7;

/// Semitone steps between consecutive scale degrees.
///
/// The pattern is cyclic: positions past the seventh degree continue into
/// the next octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalePattern {
    steps: [u8; SCALE_DEGREES],
}

impl ScalePattern {
    /// Build a pattern from step sizes.
    ///
    /// Fails fast if the slice does not hold exactly 7 steps or the steps
    /// do not span exactly one octave (12 semitones).
    pub fn new(steps: &[u8]) -> Result<Self, MusicError> {
        if steps.len() != SCALE_DEGREES {
            return Err(MusicError::PatternLength(steps.len()));
        }
        let sum: u8 = steps.iter().sum();
        if sum != 12 {
            return Err(MusicError::PatternSum(sum));
        }
        let mut fixed = [0u8; SCALE_DEGREES];
        fixed.copy_from_slice(steps);
        Ok(Self { steps: fixed })
    }

    /// The major scale: whole, whole, half, whole, whole, whole, half
    pub fn major() -> Self {
        Self {
            steps: [2, 2, 1, 2, 2, 2, 1],
        }
    }

    /// Step sizes between consecutive degrees
    pub fn steps(&self) -> &[u8] {
        &self.steps
    }

    /// Cumulative semitone offset of a scale position from the root.
    ///
    /// Position 0 is the root itself. Positions beyond the seventh degree
    /// wrap into higher octaves; the pattern repeats as many times as the
    /// position requires.
    pub fn semitone_offset(&self, position: usize) -> u8 {
        self.steps
            .iter()
            .cycle()
            .take(position)
            .map(|&s| s as usize)
            .sum::<usize>() as u8
    }
}

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord templates, resolution, and quality classification.
//!
//! A chord is a fixed set of scale degrees with optional accidentals.
//! Resolving a template against a scale pattern and a root degree produces
//! the absolute notes the trainer expects the user to play.

use std::fmt;

use super::note::MidiNote;
use super::scale::ScalePattern;
use super::MusicError;

/// Number of notes in a triad
pub const TRIAD_NOTES: usize = 3;

/// Semitone modifier applied to a scale degree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accidental {
    Flat,
    Natural,
    Sharp,
}

impl Accidental {
    /// Semitone offset: flat -1, natural 0, sharp +1
    pub fn offset(self) -> i8 {
        match self {
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
        }
    }
}

/// One voice of a chord: a scale step (1-7) plus an accidental
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleDegree {
    step: u8,
    accidental: Accidental,
}

impl ScaleDegree {
    /// Build a degree, failing fast when the step is outside 1-7.
    pub fn new(step: u8, accidental: Accidental) -> Result<Self, MusicError> {
        if !(1..=7).contains(&step) {
            return Err(MusicError::DegreeStep(step));
        }
        Ok(Self { step, accidental })
    }

    /// Scale step (1-7)
    pub fn step(self) -> u8 {
        self.step
    }

    /// Accidental applied to the step
    pub fn accidental(self) -> Accidental {
        self.accidental
    }
}

// Known-valid constructor for the static templates below.
const fn degree(step: u8, accidental: Accidental) -> ScaleDegree {
    ScaleDegree { step, accidental }
}

/// An ordered triple of scale degrees defining a chord quality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordTemplate {
    degrees: [ScaleDegree; TRIAD_NOTES],
}

impl ChordTemplate {
    /// Major triad: 1, 3, 5
    pub const MAJOR: ChordTemplate = ChordTemplate {
        degrees: [
            degree(1, Accidental::Natural),
            degree(3, Accidental::Natural),
            degree(5, Accidental::Natural),
        ],
    };

    /// Minor triad: 1, b3, 5
    pub const MINOR: ChordTemplate = ChordTemplate {
        degrees: [
            degree(1, Accidental::Natural),
            degree(3, Accidental::Flat),
            degree(5, Accidental::Natural),
        ],
    };

    /// Diminished triad: 1, b3, b5
    pub const DIMINISHED: ChordTemplate = ChordTemplate {
        degrees: [
            degree(1, Accidental::Natural),
            degree(3, Accidental::Flat),
            degree(5, Accidental::Flat),
        ],
    };

    /// Build a template from explicit degrees
    pub fn new(degrees: [ScaleDegree; TRIAD_NOTES]) -> Self {
        Self { degrees }
    }

    /// The degrees in template order
    pub fn degrees(&self) -> &[ScaleDegree] {
        &self.degrees
    }

    /// Resolve the template to absolute notes.
    ///
    /// `degree_offset` (0-6) selects which scale degree the chord is built
    /// on. Each voice lands on scale position `(step - 1) + degree_offset`;
    /// positions past the seventh degree wrap into the next octave via the
    /// cyclic pattern. Pure: identical inputs always yield identical notes.
    /// Resolved notes are clamped into the MIDI range 0-127 rather than
    /// wrapping.
    pub fn resolve(
        &self,
        root: MidiNote,
        pattern: &ScalePattern,
        degree_offset: u8,
    ) -> [MidiNote; TRIAD_NOTES] {
        let mut notes = [0; TRIAD_NOTES];
        for (voice, deg) in self.degrees.iter().enumerate() {
            let position = (deg.step - 1 + degree_offset) as usize;
            let offset = pattern.semitone_offset(position) as i16;
            let note = root as i16 + offset + deg.accidental.offset() as i16;
            notes[voice] = note.clamp(0, 127) as MidiNote;
        }
        notes
    }
}

/// Triad quality derived from the interval pair between its voices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Major,
    Minor,
    Diminished,
    Unknown,
}

impl Quality {
    /// Classify three ascending notes by their consecutive intervals.
    ///
    /// Major is (4,3), minor (3,4), diminished (3,3); exact match on both
    /// values, order-sensitive. Anything else is [`Quality::Unknown`].
    pub fn classify(notes: &[MidiNote; TRIAD_NOTES]) -> Self {
        let first = notes[1] as i16 - notes[0] as i16;
        let second = notes[2] as i16 - notes[1] as i16;
        match (first, second) {
            (4, 3) => Quality::Major,
            (3, 4) => Quality::Minor,
            (3, 3) => Quality::Diminished,
            _ => Quality::Unknown,
        }
    }

    /// Short label used in the chord prompt
    pub fn label(self) -> &'static str {
        match self {
            Quality::Major => "maj",
            Quality::Minor => "min",
            Quality::Diminished => "dim",
            Quality::Unknown => "?",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accidental_offsets() {
        assert_eq!(Accidental::Flat.offset(), -1);
        assert_eq!(Accidental::Natural.offset(), 0);
        assert_eq!(Accidental::Sharp.offset(), 1);
    }

    #[test]
    fn test_scale_degree_validation() {
        assert!(ScaleDegree::new(1, Accidental::Natural).is_ok());
        assert!(ScaleDegree::new(7, Accidental::Flat).is_ok());
        assert_eq!(
            ScaleDegree::new(0, Accidental::Natural),
            Err(MusicError::DegreeStep(0))
        );
        assert_eq!(
            ScaleDegree::new(8, Accidental::Sharp),
            Err(MusicError::DegreeStep(8))
        );
    }

    #[test]
    fn test_resolve_c_major_triad() {
        let notes = ChordTemplate::MAJOR.resolve(60, &ScalePattern::major(), 0);
        assert_eq!(notes, [60, 64, 67]); // C E G
    }

    #[test]
    fn test_resolve_c_minor_triad() {
        let notes = ChordTemplate::MINOR.resolve(60, &ScalePattern::major(), 0);
        assert_eq!(notes, [60, 63, 67]); // C Eb G
    }

    #[test]
    fn test_resolve_diminished_triad() {
        let notes = ChordTemplate::DIMINISHED.resolve(60, &ScalePattern::major(), 0);
        assert_eq!(notes, [60, 63, 66]); // C Eb Gb
    }

    #[test]
    fn test_resolve_on_each_scale_degree() {
        let major = ScalePattern::major();
        // Triads built on every degree of C major
        let expected: [[u8; 3]; 7] = [
            [60, 64, 67], // C E G
            [62, 65, 69], // D F A
            [64, 67, 71], // E G B
            [65, 69, 72], // F A C
            [67, 71, 74], // G B D
            [69, 72, 76], // A C E
            [71, 74, 77], // B D F
        ];
        for (offset, want) in expected.iter().enumerate() {
            let notes = ChordTemplate::MAJOR.resolve(60, &major, offset as u8);
            assert_eq!(&notes, want, "degree offset {}", offset);
        }
    }

    #[test]
    fn test_resolve_clamps_to_midi_range() {
        let major = ScalePattern::major();

        // An anchor near the top of the range must not wrap around
        let high = ChordTemplate::MAJOR.resolve(120, &major, 6);
        assert_eq!(high, [127, 127, 127]);

        let near_top = ChordTemplate::MAJOR.resolve(110, &major, 6);
        assert_eq!(near_top, [121, 124, 127]);

        // A flattened root at note 0 clamps low instead of underflowing
        let flat_root = ChordTemplate::new([
            ScaleDegree::new(1, Accidental::Flat).unwrap(),
            ScaleDegree::new(3, Accidental::Natural).unwrap(),
            ScaleDegree::new(5, Accidental::Natural).unwrap(),
        ]);
        assert_eq!(flat_root.resolve(0, &major, 0), [0, 4, 7]);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let major = ScalePattern::major();
        for offset in 0..7 {
            let a = ChordTemplate::MAJOR.resolve(60, &major, offset);
            let b = ChordTemplate::MAJOR.resolve(60, &major, offset);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_classify_qualities() {
        assert_eq!(Quality::classify(&[60, 64, 67]), Quality::Major);
        assert_eq!(Quality::classify(&[60, 63, 67]), Quality::Minor);
        assert_eq!(Quality::classify(&[60, 63, 66]), Quality::Diminished);
        assert_eq!(Quality::classify(&[60, 61, 67]), Quality::Unknown);
    }

    #[test]
    fn test_classify_is_order_sensitive() {
        // (3,4) is minor, (4,3) is major; swapping intervals changes quality
        assert_eq!(Quality::classify(&[57, 60, 64]), Quality::Minor);
        assert_eq!(Quality::classify(&[57, 61, 64]), Quality::Major);
    }

    #[test]
    fn test_quality_labels() {
        assert_eq!(Quality::Major.label(), "maj");
        assert_eq!(Quality::Minor.label(), "min");
        assert_eq!(Quality::Diminished.label(), "dim");
        assert_eq!(Quality::Unknown.label(), "?");
    }

    #[test]
    fn test_derived_qualities_of_major_scale() {
        // I ii iii IV V vi vii(dim)
        let major = ScalePattern::major();
        let want = [
            Quality::Major,
            Quality::Minor,
            Quality::Minor,
            Quality::Major,
            Quality::Major,
            Quality::Minor,
            Quality::Diminished,
        ];
        for (offset, quality) in want.iter().enumerate() {
            let notes = ChordTemplate::MAJOR.resolve(60, &major, offset as u8);
            assert_eq!(&Quality::classify(&notes), quality, "degree {}", offset + 1);
        }
    }
}

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note naming and classification.
//!
//! Maps absolute MIDI note numbers to pitch classes, octave numbers,
//! and the white/black split used by the keyboard display.

use std::fmt;

/// MIDI note number type (0-127)
pub type MidiNote = u8;

/// Semitones per octave
pub const OCTAVE_SEMITONES: u8 = 12;

/// Lowest note of the rendered keyboard; octave numbering starts here.
pub const KEYBOARD_C0: MidiNote = 24;

/// Note names (pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Note {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> u8 {
        match self {
            Note::C => 0,
            Note::Cs => 1,
            Note::D => 2,
            Note::Ds => 3,
            Note::E => 4,
            Note::F => 5,
            Note::Fs => 6,
            Note::G => 7,
            Note::Gs => 8,
            Note::A => 9,
            Note::As => 10,
            Note::B => 11,
        }
    }

    /// Get note from pitch class
    pub fn from_pitch_class(pc: u8) -> Self {
        Note::ALL[(pc % OCTAVE_SEMITONES) as usize]
    }

    /// Get the pitch class of an absolute MIDI note
    pub fn from_midi(note: MidiNote) -> Self {
        Self::from_pitch_class(note % OCTAVE_SEMITONES)
    }

    /// Note name as displayed on the keyboard
    pub fn name(self) -> &'static str {
        match self {
            Note::C => "C",
            Note::Cs => "C#",
            Note::D => "D",
            Note::Ds => "D#",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F#",
            Note::G => "G",
            Note::Gs => "G#",
            Note::A => "A",
            Note::As => "A#",
            Note::B => "B",
        }
    }

    /// Whether this pitch class is a black key (its name carries a sharp)
    pub fn is_black(self) -> bool {
        self.name().contains('#')
    }

    /// Whether this pitch class is a white key
    pub fn is_white(self) -> bool {
        !self.is_black()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Keyboard octave number of an absolute note.
///
/// Octave 0 starts at [`KEYBOARD_C0`] (MIDI note 24), so middle C (60) sits
/// in octave 3 of the rendered keyboard.
pub fn octave_of(note: MidiNote) -> i8 {
    (note / OCTAVE_SEMITONES) as i8 - (KEYBOARD_C0 / OCTAVE_SEMITONES) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_pitch_class() {
        assert_eq!(Note::C.pitch_class(), 0);
        assert_eq!(Note::A.pitch_class(), 9);
        assert_eq!(Note::B.pitch_class(), 11);
    }

    #[test]
    fn test_note_from_midi() {
        assert_eq!(Note::from_midi(60), Note::C);
        assert_eq!(Note::from_midi(61), Note::Cs);
        assert_eq!(Note::from_midi(69), Note::A);
        assert_eq!(Note::from_midi(24), Note::C);
    }

    #[test]
    fn test_black_white_classification() {
        // Black iff the name carries a sharp
        assert!(Note::Cs.is_black());
        assert!(Note::Fs.is_black());
        assert!(Note::C.is_white());
        assert!(Note::E.is_white());
        assert!(Note::B.is_white());

        let blacks: Vec<Note> = Note::ALL.iter().copied().filter(|n| n.is_black()).collect();
        assert_eq!(
            blacks,
            vec![Note::Cs, Note::Ds, Note::Fs, Note::Gs, Note::As]
        );
    }

    #[test]
    fn test_octave_numbering() {
        // Octave 0 starts at MIDI note 24
        assert_eq!(octave_of(24), 0);
        assert_eq!(octave_of(35), 0);
        assert_eq!(octave_of(36), 1);
        assert_eq!(octave_of(60), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Note::C.to_string(), "C");
        assert_eq!(Note::Cs.to_string(), "C#");
        assert_eq!(Note::As.to_string(), "A#");
    }
}

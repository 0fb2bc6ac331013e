// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard key state.
//!
//! One mutable state record per displayable key, created once for the
//! configured range and updated on every MIDI event and chord prompt.

use crate::music::note::OCTAVE_SEMITONES;
use crate::music::{MidiNote, Note};

/// Per-key state driving the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyState {
    /// Absolute MIDI note of this key
    pub note: MidiNote,
    /// Currently held down on the input device
    pub pressed: bool,
    /// Part of the currently prompted chord
    pub in_chord: bool,
}

impl KeyState {
    fn new(note: MidiNote) -> Self {
        Self {
            note,
            pressed: false,
            in_chord: false,
        }
    }

    /// Whether this key renders as a white key
    pub fn is_white(&self) -> bool {
        Note::from_midi(self.note).is_white()
    }
}

/// The fixed bank of keys the trainer renders and tracks.
///
/// Owned exclusively by the session; the renderer gets a read-only view.
#[derive(Debug, Clone)]
pub struct Keybed {
    keys: Vec<KeyState>,
    base_note: MidiNote,
}

impl Keybed {
    /// Create a keybed spanning `octaves` octaves upward from `base_note`.
    /// The range is truncated at MIDI note 127; a base note past the MIDI
    /// range yields an empty keybed.
    pub fn new(base_note: MidiNote, octaves: u8) -> Self {
        let top = (base_note as usize + octaves as usize * OCTAVE_SEMITONES as usize).min(128);
        let keys = (base_note as usize..top)
            .map(|note| KeyState::new(note as MidiNote))
            .collect();
        Self { keys, base_note }
    }

    /// All keys in ascending note order
    pub fn keys(&self) -> &[KeyState] {
        &self.keys
    }

    /// Lowest rendered note
    pub fn base_note(&self) -> MidiNote {
        self.base_note
    }

    /// Whether a note falls on a rendered key
    pub fn contains(&self, note: MidiNote) -> bool {
        self.index_of(note).is_some()
    }

    fn index_of(&self, note: MidiNote) -> Option<usize> {
        if note < self.base_note {
            return None;
        }
        let index = (note - self.base_note) as usize;
        (index < self.keys.len()).then_some(index)
    }

    /// Update the pressed flag for a note. Notes outside the rendered
    /// range are ignored. Returns whether a key was updated.
    pub fn set_pressed(&mut self, note: MidiNote, pressed: bool) -> bool {
        match self.index_of(note) {
            Some(index) => {
                self.keys[index].pressed = pressed;
                true
            }
            None => false,
        }
    }

    /// Flag exactly the given notes as the expected chord, clearing the
    /// flag on every other key.
    pub fn set_chord(&mut self, notes: &[MidiNote]) {
        for key in &mut self.keys {
            key.in_chord = notes.contains(&key.note);
        }
    }

    /// Release all keys
    pub fn clear_pressed(&mut self) {
        for key in &mut self.keys {
            key.pressed = false;
        }
    }

    /// Exact-match check: the held set equals the expected set.
    ///
    /// Pressing a superset, subset, or disjoint set does not match. Only
    /// the current held set matters, not the order that produced it.
    pub fn matches_chord(&self) -> bool {
        let mut pressed = 0usize;
        let mut in_chord = 0usize;
        let mut pressed_in_chord = 0usize;
        for key in &self.keys {
            if key.pressed {
                pressed += 1;
            }
            if key.in_chord {
                in_chord += 1;
            }
            if key.pressed && key.in_chord {
                pressed_in_chord += 1;
            }
        }
        in_chord > 0 && pressed == in_chord && pressed == pressed_in_chord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keybed_layout() {
        let keybed = Keybed::new(24, 5);
        assert_eq!(keybed.base_note(), 24);
        assert_eq!(keybed.keys().len(), 60);
        assert_eq!(keybed.keys()[0].note, 24);
        assert_eq!(keybed.keys()[59].note, 83);
        assert!(keybed.contains(24));
        assert!(keybed.contains(83));
        assert!(!keybed.contains(23));
        assert!(!keybed.contains(84));
    }

    #[test]
    fn test_keybed_truncates_at_midi_range() {
        // 120 + 24 would pass note 127; only 120..=127 are representable
        let keybed = Keybed::new(120, 2);
        assert_eq!(keybed.keys().len(), 8);
        assert_eq!(keybed.keys()[0].note, 120);
        assert_eq!(keybed.keys()[7].note, 127);
        assert!(!keybed.contains(119));

        // A base note past the MIDI range yields an empty, inert keybed
        let mut empty = Keybed::new(250, 5);
        assert!(empty.keys().is_empty());
        assert!(!empty.set_pressed(60, true));
        assert!(!empty.matches_chord());
    }

    #[test]
    fn test_set_pressed_out_of_range_is_ignored() {
        let mut keybed = Keybed::new(24, 5);
        assert!(!keybed.set_pressed(100, true));
        assert!(!keybed.set_pressed(12, true));
        assert!(keybed.keys().iter().all(|k| !k.pressed));
    }

    #[test]
    fn test_set_chord_clears_previous_flags() {
        let mut keybed = Keybed::new(24, 5);
        keybed.set_chord(&[60, 64, 67]);
        keybed.set_chord(&[62, 65, 69]);

        let flagged: Vec<u8> = keybed
            .keys()
            .iter()
            .filter(|k| k.in_chord)
            .map(|k| k.note)
            .collect();
        assert_eq!(flagged, vec![62, 65, 69]);
    }

    #[test]
    fn test_exact_match_any_order() {
        let mut keybed = Keybed::new(24, 5);
        keybed.set_chord(&[60, 64, 67]);

        // Press in scrambled order; only the final held set matters
        keybed.set_pressed(67, true);
        assert!(!keybed.matches_chord());
        keybed.set_pressed(60, true);
        assert!(!keybed.matches_chord());
        keybed.set_pressed(64, true);
        assert!(keybed.matches_chord());
    }

    #[test]
    fn test_superset_does_not_match() {
        let mut keybed = Keybed::new(24, 5);
        keybed.set_chord(&[60, 64, 67]);
        for note in [60, 64, 67, 72] {
            keybed.set_pressed(note, true);
        }
        assert!(!keybed.matches_chord());
    }

    #[test]
    fn test_subset_does_not_match() {
        let mut keybed = Keybed::new(24, 5);
        keybed.set_chord(&[60, 64, 67]);
        keybed.set_pressed(60, true);
        keybed.set_pressed(64, true);
        assert!(!keybed.matches_chord());
    }

    #[test]
    fn test_disjoint_set_does_not_match() {
        let mut keybed = Keybed::new(24, 5);
        keybed.set_chord(&[60, 64, 67]);
        for note in [48, 52, 55] {
            keybed.set_pressed(note, true);
        }
        assert!(!keybed.matches_chord());
    }

    #[test]
    fn test_release_breaks_match_until_repressed() {
        let mut keybed = Keybed::new(24, 5);
        keybed.set_chord(&[60, 64, 67]);
        for note in [60, 64, 67] {
            keybed.set_pressed(note, true);
        }
        assert!(keybed.matches_chord());

        keybed.set_pressed(64, false);
        assert!(!keybed.matches_chord());

        keybed.set_pressed(64, true);
        assert!(keybed.matches_chord());
    }

    #[test]
    fn test_clear_pressed_releases_everything() {
        let mut keybed = Keybed::new(24, 5);
        keybed.set_chord(&[60, 64, 67]);
        for note in [60, 64, 67] {
            keybed.set_pressed(note, true);
        }
        assert!(keybed.matches_chord());

        keybed.clear_pressed();
        assert!(keybed.keys().iter().all(|k| !k.pressed));
        assert!(!keybed.matches_chord());
    }

    #[test]
    fn test_empty_chord_never_matches() {
        let keybed = Keybed::new(24, 5);
        // No chord flagged, nothing pressed: 0 == 0 must not count
        assert!(!keybed.matches_chord());
    }

    #[test]
    fn test_white_black_keys() {
        let keybed = Keybed::new(24, 1);
        let whites = keybed.keys().iter().filter(|k| k.is_white()).count();
        assert_eq!(whites, 7);
    }
}

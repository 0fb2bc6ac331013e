// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! MIDI input layer.
//!
//! Parses raw device bytes into the small set of messages the trainer
//! cares about and manages the connection to the input device.

pub mod input;

pub use input::{list_sources, print_sources, MidiListener};

/// MIDI message constants
pub mod messages {
    // Channel Voice Messages (upper nibble, lower nibble is channel 0-15)
    pub const NOTE_OFF: u8 = 0x80;
    pub const NOTE_ON: u8 = 0x90;

    // System Real-Time Messages
    pub const TIMING_CLOCK: u8 = 0xF8;
}

/// Parsed MIDI message types.
///
/// The trainer reacts to note on/off only; clock and everything else is
/// parsed but ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    /// Note On: note (0-127), velocity (1-127)
    NoteOn { note: u8, velocity: u8 },
    /// Note Off: note (0-127)
    NoteOff { note: u8 },
    /// MIDI Clock tick
    TimingClock,
    /// Anything else (CC, aftertouch, sysex fragments, ...)
    Unknown,
}

impl MidiMessage {
    /// Parse raw MIDI bytes into a MidiMessage
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.is_empty() {
            return None;
        }

        let status = data[0];

        if status == messages::TIMING_CLOCK {
            return Some(MidiMessage::TimingClock);
        }

        match status & 0xF0 {
            messages::NOTE_OFF if data.len() >= 3 => Some(MidiMessage::NoteOff {
                note: data[1] & 0x7F,
            }),
            messages::NOTE_ON if data.len() >= 3 => {
                let velocity = data[2] & 0x7F;
                // Note On with velocity 0 is equivalent to Note Off
                if velocity == 0 {
                    Some(MidiMessage::NoteOff {
                        note: data[1] & 0x7F,
                    })
                } else {
                    Some(MidiMessage::NoteOn {
                        note: data[1] & 0x7F,
                        velocity,
                    })
                }
            }
            _ => Some(MidiMessage::Unknown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_on() {
        let msg = MidiMessage::parse(&[0x90, 60, 100]);
        assert_eq!(
            msg,
            Some(MidiMessage::NoteOn {
                note: 60,
                velocity: 100
            })
        );
    }

    #[test]
    fn test_parse_note_on_any_channel() {
        // Channel nibble is irrelevant to the trainer
        let msg = MidiMessage::parse(&[0x93, 60, 100]);
        assert_eq!(
            msg,
            Some(MidiMessage::NoteOn {
                note: 60,
                velocity: 100
            })
        );
    }

    #[test]
    fn test_parse_note_on_velocity_zero() {
        // Note On with velocity 0 should be treated as Note Off
        let msg = MidiMessage::parse(&[0x90, 60, 0]);
        assert_eq!(msg, Some(MidiMessage::NoteOff { note: 60 }));
    }

    #[test]
    fn test_parse_note_off() {
        let msg = MidiMessage::parse(&[0x80, 60, 64]);
        assert_eq!(msg, Some(MidiMessage::NoteOff { note: 60 }));
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(MidiMessage::parse(&[0xF8]), Some(MidiMessage::TimingClock));
    }

    #[test]
    fn test_parse_other_messages_are_unknown() {
        assert_eq!(MidiMessage::parse(&[0xB0, 1, 64]), Some(MidiMessage::Unknown));
        assert_eq!(MidiMessage::parse(&[0xE0, 0x00, 0x40]), Some(MidiMessage::Unknown));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(MidiMessage::parse(&[]), None);
    }

    #[test]
    fn test_parse_truncated_note_message() {
        assert_eq!(MidiMessage::parse(&[0x90, 60]), Some(MidiMessage::Unknown));
    }
}

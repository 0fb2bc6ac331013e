// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Piano keyboard widget.
//!
//! Maps the ordered key states to terminal cells each frame: white keys on
//! the base row, black keys overlaid at the boundaries, styles driven by
//! the pressed/expected flags.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use crate::music::{octave_of, Note};
use crate::trainer::KeyState;

/// Terminal cells per white key
pub const WHITE_KEY_WIDTH: u16 = 3;
/// Terminal cells per black key
pub const BLACK_KEY_WIDTH: u16 = 2;
/// Rows of a white key
pub const WHITE_KEY_HEIGHT: u16 = 6;
/// Rows of a black key
pub const BLACK_KEY_HEIGHT: u16 = 4;

/// Renders a slice of key states as a piano keyboard.
///
/// The widget only reads session state; all key flags are owned by the
/// session and recomputed before each draw.
pub struct KeyboardWidget<'a> {
    keys: &'a [KeyState],
}

impl<'a> KeyboardWidget<'a> {
    pub fn new(keys: &'a [KeyState]) -> Self {
        Self { keys }
    }

    /// Total width in cells needed to show every key
    pub fn required_width(&self) -> u16 {
        self.keys.iter().filter(|k| k.is_white()).count() as u16 * WHITE_KEY_WIDTH
    }
}

/// Horizontal cell offset of the key at `index`, counting the white keys
/// to its left. Black keys sit shifted half a key into the boundary.
fn key_offset(keys: &[KeyState], index: usize) -> u16 {
    let whites_before = keys[..index].iter().filter(|k| k.is_white()).count() as u16;
    let x = whites_before * WHITE_KEY_WIDTH;
    if keys[index].is_white() {
        x
    } else {
        x.saturating_sub(BLACK_KEY_WIDTH / 2)
    }
}

fn key_style(key: &KeyState) -> Style {
    match (key.pressed, key.in_chord) {
        (true, true) => Style::default().bg(Color::Green),
        (true, false) => Style::default().bg(Color::Red),
        (false, true) => Style::default().bg(Color::Cyan),
        (false, false) if key.is_white() => Style::default().bg(Color::Gray),
        (false, false) => Style::default().bg(Color::Black),
    }
}

fn fill_key(buf: &mut Buffer, area: Rect, x: u16, width: u16, height: u16, style: Style) {
    let blank = " ".repeat(width as usize);
    for row in 0..height.min(area.height) {
        if x + width <= area.right() {
            buf.set_string(x, area.y + row, &blank, style);
        }
    }
}

impl Widget for KeyboardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        // White keys first, black keys overlaid on top
        for (index, key) in self.keys.iter().enumerate() {
            if !key.is_white() {
                continue;
            }
            let x = area.x + key_offset(self.keys, index);
            if x + WHITE_KEY_WIDTH > area.right() {
                break;
            }
            let style = key_style(key);
            // Leave the last column as a gap between neighboring keys
            fill_key(buf, area, x, WHITE_KEY_WIDTH - 1, WHITE_KEY_HEIGHT, style);

            let note = Note::from_midi(key.note);
            if note == Note::C && area.height >= WHITE_KEY_HEIGHT {
                let label = format!("{}{}", note, octave_of(key.note));
                buf.set_string(
                    x,
                    area.y + WHITE_KEY_HEIGHT - 1,
                    &label,
                    style.fg(Color::DarkGray),
                );
            }
        }

        for (index, key) in self.keys.iter().enumerate() {
            if key.is_white() {
                continue;
            }
            let x = area.x + key_offset(self.keys, index);
            if x + BLACK_KEY_WIDTH > area.right() {
                break;
            }
            fill_key(buf, area, x, BLACK_KEY_WIDTH, BLACK_KEY_HEIGHT, key_style(key));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::Keybed;

    #[test]
    fn test_key_offsets_follow_white_key_grid() {
        let keybed = Keybed::new(24, 1);
        let keys = keybed.keys();
        // C D E F G A B at white positions 0..7
        assert_eq!(key_offset(keys, 0), 0); // C
        assert_eq!(key_offset(keys, 2), WHITE_KEY_WIDTH); // D
        assert_eq!(key_offset(keys, 4), 2 * WHITE_KEY_WIDTH); // E
        assert_eq!(key_offset(keys, 11), 6 * WHITE_KEY_WIDTH); // B
    }

    #[test]
    fn test_black_keys_sit_on_boundaries() {
        let keybed = Keybed::new(24, 1);
        let keys = keybed.keys();
        // C# leans into the C/D boundary
        assert_eq!(key_offset(keys, 1), WHITE_KEY_WIDTH - BLACK_KEY_WIDTH / 2);
        // F# leans into the F/G boundary
        assert_eq!(
            key_offset(keys, 6),
            4 * WHITE_KEY_WIDTH - BLACK_KEY_WIDTH / 2
        );
    }

    #[test]
    fn test_required_width() {
        let keybed = Keybed::new(24, 5);
        let widget = KeyboardWidget::new(keybed.keys());
        // 35 white keys across 5 octaves
        assert_eq!(widget.required_width(), 35 * WHITE_KEY_WIDTH);
    }

    #[test]
    fn test_render_highlights_expected_keys() {
        let mut keybed = Keybed::new(24, 5);
        keybed.set_chord(&[60, 64, 67]);
        keybed.set_pressed(60, true);

        let area = Rect::new(0, 0, 120, 8);
        let mut buf = Buffer::empty(area);
        KeyboardWidget::new(keybed.keys()).render(area, &mut buf);

        // Key 60 is pressed and expected: green
        let x60 = key_offset(keybed.keys(), (60 - 24) as usize);
        assert_eq!(buf[(x60, 0)].style().bg, Some(Color::Green));

        // Key 64 is expected only: cyan
        let x64 = key_offset(keybed.keys(), (64 - 24) as usize);
        assert_eq!(buf[(x64, 0)].style().bg, Some(Color::Cyan));
    }

    #[test]
    fn test_render_clips_to_area() {
        let keybed = Keybed::new(24, 5);
        let area = Rect::new(0, 0, 20, 8);
        let mut buf = Buffer::empty(area);
        // Must not panic when the area is narrower than the keyboard
        KeyboardWidget::new(keybed.keys()).render(area, &mut buf);
    }
}

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for the trainer.
//!
//! All fields carry defaults, so a missing file or an empty document is a
//! fully usable configuration.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Highest accepted chord anchor: the top prompted chord tone sits 17
/// semitones above the anchor (degree-7 triad) and must stay within the
/// MIDI range.
const CHORD_ROOT_MAX: u8 = 110;

/// Root configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TrainerFile {
    /// MIDI device selection
    #[serde(default)]
    pub midi: MidiDeviceConfig,
    /// Rendered keyboard range
    #[serde(default)]
    pub keyboard: KeyboardConfig,
    /// Session settings
    #[serde(default)]
    pub trainer: TrainerConfig,
}

impl TrainerFile {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: Self =
            serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")?;
        file.validate()?;
        Ok(file)
    }

    /// Reject values that would push notes outside the MIDI range (0-127)
    pub fn validate(&self) -> Result<()> {
        let top = self.keyboard.base_note as u32 + self.keyboard.octaves as u32 * 12;
        if top > 128 {
            bail!(
                "Keyboard range exceeds MIDI note 127: base_note {} + {} octaves",
                self.keyboard.base_note,
                self.keyboard.octaves
            );
        }
        if self.trainer.chord_root > CHORD_ROOT_MAX {
            bail!(
                "trainer.chord_root must be at most {}, got {}",
                CHORD_ROOT_MAX,
                self.trainer.chord_root
            );
        }
        Ok(())
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }
}

/// MIDI device configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MidiDeviceConfig {
    /// Substring of the input port name to bind to (first port when unset)
    #[serde(default)]
    pub device: Option<String>,
}

/// Rendered keyboard range
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyboardConfig {
    /// Lowest rendered MIDI note
    #[serde(default = "default_base_note")]
    pub base_note: u8,
    /// Number of octaves rendered upward from the base note
    #[serde(default = "default_octaves")]
    pub octaves: u8,
}

fn default_base_note() -> u8 {
    24
}
fn default_octaves() -> u8 {
    5
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            base_note: default_base_note(),
            octaves: default_octaves(),
        }
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainerConfig {
    /// Anchor note chords are resolved from (degree 1 of the scale)
    #[serde(default = "default_chord_root")]
    pub chord_root: u8,
    /// Optional RNG seed for a reproducible prompt order
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_chord_root() -> u8 {
    60
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            chord_root: default_chord_root(),
            seed: None,
        }
    }
}

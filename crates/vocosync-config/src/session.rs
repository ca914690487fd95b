//! Session file format and operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use vocosync_core::{Effect, EventTiming, ParameterInfo};
use vocosync_effects::{DEFAULT_NOTE, Vocoder};

use crate::cue::NoteCue;
use crate::error::ConfigError;
use crate::validation::{self, ValidationError, ValidationResult};

/// Where note cues take effect inside a host block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingMode {
    /// At the start of the block containing the cue.
    #[default]
    Block,
    /// At the cue's exact sample.
    Sample,
}

impl From<TimingMode> for EventTiming {
    fn from(mode: TimingMode) -> Self {
        match mode {
            TimingMode::Block => EventTiming::BlockStart,
            TimingMode::Sample => EventTiming::SampleAccurate,
        }
    }
}

impl FromStr for TimingMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(TimingMode::Block),
            "sample" => Ok(TimingMode::Sample),
            other => Err(ValidationError::InvalidFormat {
                param: "timing".to_string(),
                reason: format!("expected 'block' or 'sample', got '{other}'"),
            }),
        }
    }
}

impl fmt::Display for TimingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimingMode::Block => "block",
            TimingMode::Sample => "sample",
        })
    }
}

/// Effect parameters in their display units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionParams {
    /// Dry/wet mix in percent.
    pub mix: f32,
    /// Transpose in semitones.
    pub transpose: f32,
    /// Output level in dB.
    pub output_db: f32,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            mix: 100.0,
            transpose: 0.0,
            output_db: 0.0,
        }
    }
}

impl SessionParams {
    /// `(string_id, value)` for every parameter.
    pub fn entries(&self) -> [(&'static str, f32); 3] {
        [
            ("voc_mix", self.mix),
            ("voc_transpose", self.transpose),
            ("voc_output", self.output_db),
        ]
    }

    /// Set a parameter by any name [`resolve_param`](crate::resolve_param)
    /// accepts, after range validation.
    pub fn set(&mut self, name: &str, value: f32) -> ValidationResult<()> {
        match validation::validate_param(name, value)? {
            0 => self.mix = value,
            1 => self.transpose = value,
            _ => self.output_db = value,
        }
        Ok(())
    }
}

/// A complete offline render description.
///
/// # TOML Format
///
/// ```toml
/// name = "Lead"
/// description = "Impulse-driven lead line"
/// sample_rate = 44100
/// block_size = 512
/// default_note = 57
/// timing = "block"
///
/// [params]
/// mix = 100.0
/// transpose = 0
/// output_db = 0.0
///
/// [[notes]]
/// at = "0"
/// note = 69
///
/// [[notes]]
/// at = "1.5s"
/// note = 72
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Name of the session.
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate hint for resolving cue times when no file is involved.
    /// An input file's own rate takes precedence.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Host block size for rendering.
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// Resting pitch before the first cue.
    #[serde(default = "default_note")]
    pub default_note: u8,

    /// Cue timing within a block.
    #[serde(default)]
    pub timing: TimingMode,

    /// Effect parameters.
    #[serde(default)]
    pub params: SessionParams,

    /// Note schedule.
    #[serde(default)]
    pub notes: Vec<NoteCue>,
}

fn default_sample_rate() -> u32 {
    44100
}

fn default_block_size() -> usize {
    512
}

fn default_note() -> u8 {
    DEFAULT_NOTE
}

impl Session {
    /// Create a session with default settings and no notes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            block_size: default_block_size(),
            default_note: DEFAULT_NOTE,
            timing: TimingMode::default(),
            params: SessionParams::default(),
            notes: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the block size.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the resting pitch.
    pub fn with_default_note(mut self, note: u8) -> Self {
        self.default_note = note;
        self
    }

    /// Set the cue timing.
    pub fn with_timing(mut self, timing: TimingMode) -> Self {
        self.timing = timing;
        self
    }

    /// Append a note cue.
    pub fn with_note(mut self, cue: NoteCue) -> Self {
        self.notes.push(cue);
        self
    }

    /// Load a session from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a session from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the session to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the session to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate every field.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_session(self)
    }

    /// Event timing for the renderer.
    pub fn event_timing(&self) -> EventTiming {
        self.timing.into()
    }

    /// Push the default note and parameters into `vocoder`.
    ///
    /// The default note takes effect on the vocoder's next reset.
    pub fn apply(&self, vocoder: &mut Vocoder) {
        vocoder.set_default_note(self.default_note);
        for (id, value) in self.params.entries() {
            if let Some(index) = vocoder.find_param_by_id_str(id) {
                vocoder.set_param(index, value);
            }
        }
    }

    /// A fresh vocoder at `sample_rate` configured from this session.
    pub fn build_vocoder(&self, sample_rate: f32) -> Vocoder {
        let mut vocoder = Vocoder::new(sample_rate);
        self.apply(&mut vocoder);
        vocoder.reset();
        vocoder
    }

    /// Cues resolved to `(frame, note)` at `sample_rate`, in time order.
    /// Cues at the same frame keep their file order.
    pub fn schedule(&self, sample_rate: u32) -> Vec<(usize, u8)> {
        let mut schedule: Vec<_> = self.notes.iter().map(|c| c.resolve(sample_rate)).collect();
        schedule.sort_by_key(|&(at, _)| at);
        schedule
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

//! `TIME:NOTE` note cues.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// When a cue fires: an absolute sample index, or seconds from the start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CueTime {
    /// Frame index.
    Samples(usize),
    /// Seconds, resolved against the render sample rate.
    Seconds(f64),
}

impl CueTime {
    /// Frame index at `sample_rate`. Seconds round to the nearest frame.
    pub fn to_samples(self, sample_rate: u32) -> usize {
        match self {
            CueTime::Samples(n) => n,
            CueTime::Seconds(s) => (s * f64::from(sample_rate)).round() as usize,
        }
    }
}

impl Default for CueTime {
    fn default() -> Self {
        CueTime::Samples(0)
    }
}

impl FromStr for CueTime {
    type Err = ConfigError;

    /// Parses `"4410"` as samples and `"1.5s"` as seconds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if let Some(secs) = text.strip_suffix('s') {
            let secs: f64 = secs
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_cue(s, "expected seconds like '1.5s'"))?;
            if !secs.is_finite() || secs < 0.0 {
                return Err(ConfigError::invalid_cue(s, "time must be finite and not negative"));
            }
            return Ok(CueTime::Seconds(secs));
        }
        text.parse()
            .map(CueTime::Samples)
            .map_err(|_| ConfigError::invalid_cue(s, "expected a sample index or seconds with 's'"))
    }
}

impl TryFrom<String> for CueTime {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CueTime> for String {
    fn from(time: CueTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for CueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CueTime::Samples(n) => write!(f, "{n}"),
            CueTime::Seconds(s) => write!(f, "{s}s"),
        }
    }
}

/// A note-on cue: MIDI `note` at time `at`.
///
/// ```rust
/// use vocosync_config::{CueTime, NoteCue};
///
/// let cue: NoteCue = "1.5s:72".parse()?;
/// assert_eq!(cue.at, CueTime::Seconds(1.5));
/// assert_eq!(cue.note, 72);
/// assert_eq!(cue.resolve(48000), (72000, 72));
/// # Ok::<(), vocosync_config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteCue {
    /// When the note starts.
    #[serde(default)]
    pub at: CueTime,
    /// MIDI note number.
    pub note: u8,
}

impl NoteCue {
    /// Cue for `note` at sample `at`.
    pub const fn at_sample(at: usize, note: u8) -> Self {
        Self {
            at: CueTime::Samples(at),
            note,
        }
    }

    /// Cue for `note` at `secs` seconds.
    pub const fn at_seconds(secs: f64, note: u8) -> Self {
        Self {
            at: CueTime::Seconds(secs),
            note,
        }
    }

    /// `(frame, note)` at `sample_rate`.
    pub fn resolve(&self, sample_rate: u32) -> (usize, u8) {
        (self.at.to_samples(sample_rate), self.note)
    }
}

impl FromStr for NoteCue {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((time, note)) = s.rsplit_once(':') else {
            return Err(ConfigError::invalid_cue(s, "expected TIME:NOTE"));
        };
        let at: CueTime = time
            .parse()
            .map_err(|_| ConfigError::invalid_cue(s, "bad time before ':'"))?;
        let note: u8 = note
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid_cue(s, "note must be an integer 0-127"))?;
        if note > 127 {
            return Err(ConfigError::invalid_cue(s, "note must be an integer 0-127"));
        }
        Ok(Self { at, note })
    }
}

impl fmt::Display for NoteCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.at, self.note)
    }
}

//! Parameter and session validation.
//!
//! Parameter ranges come from the effect's own [`ParameterInfo`] descriptors,
//! so the validator never drifts from what [`Vocoder`] accepts.
//!
//! # Example
//!
//! ```rust
//! use vocosync_config::{validate_param, ValidationError};
//!
//! // Names, short names and string ids all resolve
//! assert_eq!(validate_param("mix", 50.0), Ok(0));
//! assert_eq!(validate_param("voc_transpose", -12.0), Ok(1));
//! assert!(matches!(
//!     validate_param("Out", 40.0),
//!     Err(ValidationError::OutOfRange { .. })
//! ));
//! ```

use thiserror::Error;
use vocosync_core::{ParamUnit, ParameterInfo};
use vocosync_effects::{MAX_NOTE, Vocoder};

use crate::session::Session;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// MIDI note above 127.
    #[error("note {0} out of range [0, 127]")]
    NoteOutOfRange(u8),

    /// Block size of zero.
    #[error("block size must be at least 1")]
    ZeroBlockSize,

    /// Sample rate of zero.
    #[error("sample rate must be at least 1 Hz")]
    ZeroSampleRate,

    /// Unknown parameter name.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Invalid parameter format.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Name of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Parameter metadata for validation and listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamValidationInfo {
    /// Display name.
    pub name: &'static str,
    /// Short display name.
    pub short_name: &'static str,
    /// Stable string id (`voc_mix`, ...).
    pub string_id: &'static str,
    /// Parameter index on the effect.
    pub index: usize,
    /// Minimum value.
    pub min: f32,
    /// Maximum value.
    pub max: f32,
    /// Default value.
    pub default: f32,
    /// Unit of the value.
    pub unit: ParamUnit,
}

/// The effect's parameter table, read from its descriptors.
pub fn param_table() -> Vec<ParamValidationInfo> {
    let vocoder = Vocoder::default();
    (0..vocoder.param_count())
        .filter_map(|index| {
            vocoder.param_info(index).map(|d| ParamValidationInfo {
                name: d.name,
                short_name: d.short_name,
                string_id: d.string_id,
                index,
                min: d.min,
                max: d.max,
                default: d.default,
                unit: d.unit,
            })
        })
        .collect()
}

/// Resolve a parameter name to its index.
///
/// Accepts the string id (`voc_mix`), the id without its prefix (`mix`), and
/// the display or short name in any case (`Transpose`, `out`).
pub fn resolve_param(name: &str) -> Option<usize> {
    let vocoder = Vocoder::default();
    let key = name.trim().to_ascii_lowercase();
    vocoder
        .find_param_by_id_str(&key)
        .or_else(|| vocoder.find_param_by_id_str(&format!("voc_{key}")))
        .or_else(|| vocoder.find_param_by_name(&key))
}

/// Check `value` against the named parameter's range, returning its index.
pub fn validate_param(name: &str, value: f32) -> ValidationResult<usize> {
    let index = resolve_param(name).ok_or_else(|| ValidationError::UnknownParameter(name.to_string()))?;
    let vocoder = Vocoder::default();
    let Some(desc) = vocoder.param_info(index) else {
        return Err(ValidationError::UnknownParameter(name.to_string()));
    };
    if desc.contains(value) {
        Ok(index)
    } else {
        Err(ValidationError::OutOfRange {
            param: name.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        })
    }
}

/// Check a MIDI note number.
pub fn validate_note(note: u8) -> ValidationResult<()> {
    if note <= MAX_NOTE {
        Ok(())
    } else {
        Err(ValidationError::NoteOutOfRange(note))
    }
}

/// Check every field of a session, collecting all problems.
pub fn validate_session(session: &Session) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if session.sample_rate == 0 {
        errors.push(ValidationError::ZeroSampleRate);
    }
    if session.block_size == 0 {
        errors.push(ValidationError::ZeroBlockSize);
    }
    if let Err(e) = validate_note(session.default_note) {
        errors.push(e);
    }
    for (name, value) in session.params.entries() {
        if let Err(e) = validate_param(name, value) {
            errors.push(e);
        }
    }
    for cue in &session.notes {
        if let Err(e) = validate_note(cue.note) {
            errors.push(e);
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Parse a parameter value string.
///
/// Values are in the parameter's own unit; a trailing unit suffix is
/// accepted and stripped:
/// - Plain numbers: "50", "-12", "3.5"
/// - Percent: "50%"
/// - Decibels: "-6dB", "+3db"
/// - Semitones: "7st", "-12st"
pub fn parse_param_value(value: &str) -> Option<f32> {
    let value = value.trim();
    let number = value
        .strip_suffix('%')
        .or_else(|| value.strip_suffix("dB"))
        .or_else(|| value.strip_suffix("db"))
        .or_else(|| value.strip_suffix("st"))
        .unwrap_or(value)
        .trim();
    number.parse::<f32>().ok().filter(|v| v.is_finite())
}

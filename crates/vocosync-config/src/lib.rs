//! Session configuration for vocosync.
//!
//! A session describes one offline render: the rendering settings, the effect
//! parameters and a schedule of note cues. Sessions are stored as TOML.
//!
//! # Features
//!
//! - **Sessions**: load, save and apply [`Session`] files
//! - **Note cues**: parse `TIME:NOTE` strings such as `0:69` or `1.5s:72`
//! - **Validation**: note ranges, block size and parameter ranges checked
//!   against the effect's own descriptors
//!
//! # Example
//!
//! ```rust
//! use vocosync_config::{NoteCue, Session};
//!
//! let session = Session::new("Lead")
//!     .with_description("Impulse-driven lead line")
//!     .with_note("0:69".parse::<NoteCue>()?)
//!     .with_note("0.5s:72".parse::<NoteCue>()?);
//! session.validate()?;
//!
//! let vocoder = session.build_vocoder(44100.0);
//! assert_eq!(vocoder.default_note(), 57);
//! assert_eq!(session.schedule(44100), vec![(0, 69), (22050, 72)]);
//! # Ok::<(), vocosync_config::ConfigError>(())
//! ```

mod cue;
mod error;
mod session;

/// Parameter and session validation.
pub mod validation;

pub use cue::{CueTime, NoteCue};
pub use error::ConfigError;
pub use session::{Session, SessionParams, TimingMode};
pub use validation::{
    ParamValidationInfo, ValidationError, ValidationResult, param_table, parse_param_value,
    resolve_param, validate_note, validate_param, validate_session,
};

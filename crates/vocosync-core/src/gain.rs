//! Output level contract.
//!
//! Every vocosync effect exposes its output level as the *last* parameter
//! index. The level is stored as linear gain in a [`SmoothedParam`] and set or
//! read in dB, clamped to [`OUTPUT_MIN_DB`]..=[`OUTPUT_MAX_DB`].
//!
//! ```rust
//! use vocosync_core::gain;
//!
//! let mut output = gain::output_level_param(48000.0);
//! gain::set_output_level_db(&mut output, -3.0);
//! assert!((gain::output_level_db(&output) + 3.0).abs() < 0.01);
//! ```

use crate::{ParamDescriptor, SmoothedParam, db_to_linear, linear_to_db};

/// Minimum output level in dB.
pub const OUTPUT_MIN_DB: f32 = -20.0;

/// Maximum output level in dB.
pub const OUTPUT_MAX_DB: f32 = 20.0;

/// Output level parameter at unity gain (0 dB) with standard smoothing.
pub fn output_level_param(sample_rate: f32) -> SmoothedParam {
    SmoothedParam::standard(1.0, sample_rate)
}

/// Set output level from dB, clamped to the output range.
#[inline]
pub fn set_output_level_db(param: &mut SmoothedParam, db: f32) {
    param.set_target(db_to_linear(db.clamp(OUTPUT_MIN_DB, OUTPUT_MAX_DB)));
}

/// Output level target in dB.
#[inline]
pub fn output_level_db(param: &SmoothedParam) -> f32 {
    linear_to_db(param.target())
}

/// Descriptor for the output level parameter.
pub fn output_param_descriptor() -> ParamDescriptor {
    ParamDescriptor::gain_db("Output", "Out", OUTPUT_MIN_DB, OUTPUT_MAX_DB, 0.0)
}

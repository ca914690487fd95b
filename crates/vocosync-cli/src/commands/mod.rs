//! CLI command implementations.

pub mod common;
pub mod generate;
pub mod info;
pub mod params;
pub mod process;
pub mod session;

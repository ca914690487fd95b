//! Precomputed 256-point Hann window.
//!
//! `w[i] = 0.5 - 0.5 * cos(2π i / 256)`, periodic form: `w[0] = 0`,
//! `w[128] = 1`, symmetric around 128. The grain synthesizer reads the rising
//! half `[0, 128)` and the falling half `[128, 256)` separately.

use core::f64::consts::PI;
use libm::cosf;

/// Number of window points.
pub const WINDOW_LEN: usize = 256;

/// Immutable Hann table, filled once at construction.
#[derive(Debug, Clone)]
pub struct HannWindow {
    table: [f32; WINDOW_LEN],
}

impl HannWindow {
    /// Build the table.
    ///
    /// The angle is formed in single precision and promoted to `f64` only for
    /// the multiplication by π, then evaluated with `cosf`.
    pub fn new() -> Self {
        let mut table = [0.0; WINDOW_LEN];
        for (i, w) in table.iter_mut().enumerate() {
            let turns = i as f32 * (1.0 / WINDOW_LEN as f32) * 2.0;
            *w = 0.5 - 0.5 * cosf((f64::from(turns) * PI) as f32);
        }
        Self { table }
    }

    /// Window value at `i`. Panics if `i >= 256`.
    #[inline]
    pub fn get(&self, i: usize) -> f32 {
        self.table[i]
    }

    /// The whole table.
    pub fn as_slice(&self) -> &[f32; WINDOW_LEN] {
        &self.table
    }
}

impl Default for HannWindow {
    fn default() -> Self {
        Self::new()
    }
}

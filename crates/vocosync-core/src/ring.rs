//! 256-slot circular sample buffer addressed by a `u8` cursor.
//!
//! Indexing with `u8` makes wraparound free: `pos.wrapping_add(k)` and
//! `pos.wrapping_sub(k)` always land inside the buffer, so there is no modulo
//! and no bounds failure on the audio path. The cursor itself lives with the
//! owner, which lets one cursor drive several rings in lockstep.
//!
//! ```rust
//! use vocosync_core::Ring256;
//!
//! let mut ring = Ring256::new();
//! let pos: u8 = 255;
//! ring[pos] = 1.0;
//! ring[pos.wrapping_add(1)] += 0.5;
//! assert_eq!(ring[0], 0.5);
//! assert_eq!(ring[255], 1.0);
//! ```

use core::ops::{Index, IndexMut};

/// Number of slots in a [`Ring256`].
pub const RING_LEN: usize = 256;

/// Fixed 256-sample circular buffer.
#[derive(Debug, Clone)]
pub struct Ring256 {
    slots: [f32; RING_LEN],
}

impl Ring256 {
    /// Zero-filled ring.
    pub const fn new() -> Self {
        Self {
            slots: [0.0; RING_LEN],
        }
    }

    /// Zero every slot.
    pub fn clear(&mut self) {
        self.slots.fill(0.0);
    }

    /// Read slot `pos` and zero it.
    #[inline]
    pub fn take(&mut self, pos: u8) -> f32 {
        let value = self.slots[pos as usize];
        self.slots[pos as usize] = 0.0;
        value
    }

    /// Raw slot storage, slot 0 first.
    pub fn as_slice(&self) -> &[f32] {
        &self.slots
    }
}

impl Default for Ring256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<u8> for Ring256 {
    type Output = f32;

    #[inline]
    fn index(&self, pos: u8) -> &f32 {
        &self.slots[pos as usize]
    }
}

impl IndexMut<u8> for Ring256 {
    #[inline]
    fn index_mut(&mut self, pos: u8) -> &mut f32 {
        &mut self.slots[pos as usize]
    }
}

//! MIDI note events carrying pitch hints.
//!
//! Only channel voice note messages matter to the resynthesizer. A note-on
//! supplies a pitch hint; note-offs (including note-on with velocity 0) and
//! every other status are parsed but ignored downstream.
//!
//! ```rust
//! use vocosync_core::MidiMessage;
//!
//! assert_eq!(
//!     MidiMessage::from_bytes(&[0x90, 69, 100]),
//!     MidiMessage::NoteOn { channel: 0, note: 69, velocity: 100 }
//! );
//! assert_eq!(MidiMessage::from_bytes(&[0x93, 60, 0]).pitch_hint(), None);
//! ```

/// A parsed MIDI message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    /// Note-on with non-zero velocity.
    NoteOn {
        /// Channel 0..16.
        channel: u8,
        /// Note number 0..128.
        note: u8,
        /// Velocity 1..128.
        velocity: u8,
    },
    /// Note-off, or note-on with velocity 0.
    NoteOff {
        /// Channel 0..16.
        channel: u8,
        /// Note number 0..128.
        note: u8,
    },
    /// Any other or malformed message.
    Other,
}

impl MidiMessage {
    /// Parse raw bytes (status first). Data bytes are masked to 7 bits.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let &[status, note, velocity, ..] = bytes else {
            return Self::Other;
        };
        let channel = status & 0x0F;
        let note = note & 0x7F;
        let velocity = velocity & 0x7F;
        match status & 0xF0 {
            0x90 if velocity > 0 => Self::NoteOn {
                channel,
                note,
                velocity,
            },
            0x90 | 0x80 => Self::NoteOff { channel, note },
            _ => Self::Other,
        }
    }

    /// Note-on at full velocity on channel 0.
    pub const fn note_on(note: u8) -> Self {
        Self::NoteOn {
            channel: 0,
            note,
            velocity: 127,
        }
    }

    /// The note number when this message is a pitch hint (a real note-on).
    #[inline]
    pub fn pitch_hint(&self) -> Option<u8> {
        match *self {
            Self::NoteOn { note, .. } => Some(note),
            _ => None,
        }
    }
}

/// A message at a sample offset inside the current block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    /// Offset from the first sample of the block.
    pub offset: usize,
    /// The message.
    pub message: MidiMessage,
}

impl NoteEvent {
    /// Event at `offset`.
    pub const fn new(offset: usize, message: MidiMessage) -> Self {
        Self { offset, message }
    }

    /// Note-on for `note` at `offset`.
    pub const fn note_on(offset: usize, note: u8) -> Self {
        Self::new(offset, MidiMessage::note_on(note))
    }
}

/// Where within a block pitch hints take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventTiming {
    /// All hints apply before the first sample of the block; the last
    /// note-on in the block wins for the whole block.
    #[default]
    BlockStart,
    /// Each hint applies just before the sample at its offset. Offsets past
    /// the end of the block apply after the last sample.
    SampleAccurate,
}

use std::io;

use crate::frames::LengthTier;

/// Errors produced while decoding or encoding a frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The underlying stream failed to read or write.
    #[error("frame I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream ended before the declared frame was fully read.
    #[error("stream ended mid-frame")]
    Truncated,

    /// The declared payload length cannot be held in memory on this platform.
    #[error("declared payload length {0} exceeds addressable capacity")]
    LengthOverflow(u64),

    /// The declared payload length exceeds the decoder's configured limit.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An extended length field carried a value that fits a smaller tier.
    #[error("non-minimal length {len} in {tier:?} field")]
    NonMinimalLength { len: u64, tier: LengthTier },
}

impl FrameError {
    // read_exact reports a short read as UnexpectedEof
    pub(crate) fn from_read(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::Truncated
        } else {
            Self::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;

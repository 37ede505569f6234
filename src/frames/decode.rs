use std::io::Read;

use super::{
    Frame,
    header::{Header, MASK_KEY_LEN, PayloadLen, split_first_byte, split_second_byte},
};
use crate::{FrameError, Result, protocol::apply_mask};

// upper bound on the payload buffer reserved before any payload byte has arrived
pub(super) const PREALLOC_LIMIT: usize = 64 * 1024;

/// Limits applied while decoding. The default accepts every frame RFC 6455 base framing can
/// express, including non-minimal length encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Reject frames declaring a longer payload with [`FrameError::PayloadTooLarge`].
    pub max_payload: Option<usize>,
    /// Reject extended lengths a smaller tier could carry with
    /// [`FrameError::NonMinimalLength`].
    pub strict_lengths: bool,
}

impl DecodeConfig {
    pub(super) fn payload_size(&self, len: PayloadLen) -> Result<usize> {
        if self.strict_lengths && !len.is_minimal() {
            return Err(FrameError::NonMinimalLength {
                len: len.value(),
                tier: len.tier(),
            });
        }

        let declared = len.value();
        let size = usize::try_from(declared)
            .ok()
            .filter(|&n| isize::try_from(n).is_ok())
            .ok_or(FrameError::LengthOverflow(declared))?;

        if let Some(max) = self.max_payload {
            if size > max {
                return Err(FrameError::PayloadTooLarge { size, max });
            }
        }

        Ok(size)
    }
}

/// Reads one frame per call according to its [`DecodeConfig`]. Holds no stream state, so one
/// decoder can serve any number of connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameDecoder {
    config: DecodeConfig,
}

impl FrameDecoder {
    #[must_use]
    pub fn new(config: DecodeConfig) -> Self { Self { config } }

    #[must_use]
    pub fn config(&self) -> DecodeConfig { self.config }

    pub fn decode<R: Read + ?Sized>(&self, input: &mut R) -> Result<Frame> {
        let mut head = [0; 2];
        input.read_exact(&mut head).map_err(FrameError::from_read)?;
        let (fin, opcode) = split_first_byte(head[0]);
        let (masked, len7) = split_second_byte(head[1]);

        let mut ext = [0; 8];
        let ext = &mut ext[..PayloadLen::extension_len(len7)];
        input.read_exact(ext).map_err(FrameError::from_read)?;
        let len = PayloadLen::from_wire(len7, ext);
        let size = self.config.payload_size(len)?;

        let mask_key = if masked {
            let mut key = [0; MASK_KEY_LEN];
            input.read_exact(&mut key).map_err(FrameError::from_read)?;
            Some(key)
        } else {
            None
        };

        // grow with the data actually received instead of trusting the header
        let mut payload = Vec::with_capacity(size.min(PREALLOC_LIMIT));
        (&mut *input).take(len.value()).read_to_end(&mut payload)?;

        let header = Header {
            fin,
            opcode,
            len,
            mask_key,
        };
        header.into_frame(payload, size)
    }
}

impl Header {
    pub(super) fn into_frame(self, mut payload: Vec<u8>, size: usize) -> Result<Frame> {
        if payload.len() < size {
            return Err(FrameError::Truncated);
        }

        let frame = if let Some(mask_key) = self.mask_key {
            apply_mask(&mut payload, mask_key);
            Frame::new(self.fin, self.opcode, payload).with_mask(mask_key)
        } else {
            Frame::new(self.fin, self.opcode, payload)
        };

        tracing::trace!(
            opcode = self.opcode,
            fin = self.fin,
            masked = self.mask_key.is_some(),
            len = size,
            tier = ?self.len.tier(),
            "frame decoded"
        );
        Ok(frame)
    }
}

/// Reads exactly one frame from `input` with the default [`DecodeConfig`].
pub fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Frame> {
    FrameDecoder::default().decode(input)
}

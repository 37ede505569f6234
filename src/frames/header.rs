use byteorder::{BigEndian, ByteOrder};
use bytes::{BufMut, BytesMut};

// first byte
// 0   | 1 2 3 | 4 5 6 7
// Fin | Rsv   | Opcode
pub(crate) const FIN_BIT: u8 = 0b1000_0000;
pub(crate) const OPCODE_BITS: u8 = 0b0000_1111;

// second byte
// 0    | 1 2 3 4 5 6 7
// Mask | Payload len
pub(crate) const MASK_BIT: u8 = 0b1000_0000;
pub(crate) const LEN_BITS: u8 = 0b0111_1111;

pub(crate) const MAX_INLINE_LEN: u8 = 125;
pub(crate) const LEN_MARKER_U16: u8 = 126;
pub(crate) const LEN_MARKER_U64: u8 = 127;

pub(crate) const MASK_KEY_LEN: usize = 4;

/// Which of the three length encodings a header uses.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LengthTier {
    /// 7-bit length in the second header byte.
    Inline,
    /// 16-bit big-endian extension, marker 126.
    Extended16,
    /// 64-bit big-endian extension, marker 127.
    Extended64,
}

/// A payload length as it appears on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadLen {
    Inline(u8),
    Extended16(u16),
    Extended64(u64),
}

impl PayloadLen {
    /// The smallest encoding that can carry `len`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn for_len(len: usize) -> Self {
        match len {
            0..=125 => Self::Inline(len as u8),
            126..=65535 => Self::Extended16(len as u16),
            _ => Self::Extended64(len as u64),
        }
    }

    #[must_use]
    pub fn tier(self) -> LengthTier {
        match self {
            Self::Inline(_) => LengthTier::Inline,
            Self::Extended16(_) => LengthTier::Extended16,
            Self::Extended64(_) => LengthTier::Extended64,
        }
    }

    /// The declared number of payload bytes.
    #[must_use]
    pub fn value(self) -> u64 {
        match self {
            Self::Inline(n) => u64::from(n),
            Self::Extended16(n) => u64::from(n),
            Self::Extended64(n) => n,
        }
    }

    /// False when an extended field holds a value a smaller tier could carry.
    #[must_use]
    pub fn is_minimal(self) -> bool {
        match self {
            Self::Inline(n) => n <= MAX_INLINE_LEN,
            Self::Extended16(n) => n > u16::from(MAX_INLINE_LEN),
            Self::Extended64(n) => n > u64::from(u16::MAX),
        }
    }

    /// Bytes taken by the fixed header plus length extension, excluding any mask key.
    #[must_use]
    pub fn header_len(self) -> usize {
        match self {
            Self::Inline(_) => 2,
            Self::Extended16(_) => 4,
            Self::Extended64(_) => 10,
        }
    }

    // bytes that follow the second header byte for a given 7-bit length field
    pub(crate) fn extension_len(len7: u8) -> usize {
        match len7 {
            LEN_MARKER_U16 => 2,
            LEN_MARKER_U64 => 8,
            _ => 0,
        }
    }

    // `ext` must be exactly `extension_len(len7)` bytes
    pub(crate) fn from_wire(len7: u8, ext: &[u8]) -> Self {
        match len7 {
            LEN_MARKER_U16 => Self::Extended16(BigEndian::read_u16(ext)),
            LEN_MARKER_U64 => Self::Extended64(BigEndian::read_u64(ext)),
            n => Self::Inline(n),
        }
    }

    // writes the second header byte and any extension
    pub(crate) fn put(self, buf: &mut BytesMut, mask_bit: u8) {
        match self {
            Self::Inline(n) => buf.put_u8(mask_bit | n),
            Self::Extended16(n) => {
                buf.put_u8(mask_bit | LEN_MARKER_U16);
                buf.put_u16(n);
            }
            Self::Extended64(n) => {
                buf.put_u8(mask_bit | LEN_MARKER_U64);
                buf.put_u64(n);
            }
        }
    }
}

/// Everything up to and including the mask key.
#[derive(Debug)]
pub(crate) struct Header {
    pub(crate) fin: bool,
    pub(crate) opcode: u8,
    pub(crate) len: PayloadLen,
    pub(crate) mask_key: Option<[u8; 4]>,
}

// RSV bits are dropped
pub(crate) fn split_first_byte(b: u8) -> (bool, u8) { (b & FIN_BIT != 0, b & OPCODE_BITS) }

pub(crate) fn split_second_byte(b: u8) -> (bool, u8) { (b & MASK_BIT != 0, b & LEN_BITS) }

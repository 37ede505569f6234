use bytes::Bytes;

use super::{
    Opcode,
    header::{MASK_KEY_LEN, OPCODE_BITS, PayloadLen},
};
use crate::role::Role;

/// One WebSocket frame. `payload` always holds the unmasked bytes; the mask key only affects the
/// wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    final_fragment: bool,
    opcode: u8,
    mask_key: Option<[u8; 4]>,
    payload: Bytes,
}

impl Frame {
    /// Builds an unmasked frame. Only the low four bits of `opcode` are kept.
    #[must_use]
    pub fn new(final_fragment: bool, opcode: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            final_fragment,
            opcode: opcode & OPCODE_BITS,
            mask_key: None,
            payload: payload.into(),
        }
    }

    /// Builds a frame the way `role` has to send it: clients mask with a fresh random key,
    /// servers never mask.
    #[must_use]
    pub fn outgoing(role: Role, final_fragment: bool, opcode: u8, payload: impl Into<Bytes>) -> Self {
        let frame = Self::new(final_fragment, opcode, payload);
        if role.masks_outgoing() {
            frame.with_random_mask()
        } else {
            frame
        }
    }

    #[must_use]
    pub fn with_mask(mut self, mask_key: [u8; 4]) -> Self {
        self.mask_key = Some(mask_key);
        self
    }

    #[must_use]
    pub fn with_random_mask(self) -> Self {
        let mut mask_key = [0; 4];
        rand::fill(&mut mask_key);
        self.with_mask(mask_key)
    }

    #[must_use]
    pub fn unmasked(mut self) -> Self {
        self.mask_key = None;
        self
    }

    #[must_use]
    pub fn final_fragment(&self) -> bool { self.final_fragment }

    #[must_use]
    pub fn opcode(&self) -> u8 { self.opcode }

    /// The opcode as a known frame type, `None` for reserved values.
    #[must_use]
    pub fn kind(&self) -> Option<Opcode> { Opcode::try_from(self.opcode).ok() }

    #[must_use]
    pub fn masked(&self) -> bool { self.mask_key.is_some() }

    #[must_use]
    pub fn mask_key(&self) -> Option<[u8; 4]> { self.mask_key }

    #[must_use]
    pub fn payload(&self) -> &Bytes { &self.payload }

    #[must_use]
    pub fn into_payload(self) -> Bytes { self.payload }

    /// Exact number of bytes [`encode`](crate::encode) writes for this frame.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        let key_len = if self.masked() { MASK_KEY_LEN } else { 0 };
        PayloadLen::for_len(self.payload.len()).header_len() + key_len + self.payload.len()
    }

    /// Encodes the frame into a fresh buffer.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes { super::encode::encode_to_buf(self).freeze() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_is_truncated_to_four_bits() {
        let f = Frame::new(true, 0xF1, &b""[..]);
        assert_eq!(f.opcode(), 0x1);
        assert_eq!(f.kind(), Some(Opcode::Text));
    }

    #[test]
    fn reserved_opcode_is_carried() {
        let f = Frame::new(true, 0x3, &b""[..]);
        assert_eq!(f.opcode(), 0x3);
        assert_eq!(f.kind(), None);
    }

    #[test]
    fn mask_builders() {
        let f = Frame::new(true, 1, &b"hi"[..]);
        assert!(!f.masked());
        assert_eq!(f.mask_key(), None);

        let f = f.with_mask([1, 2, 3, 4]);
        assert!(f.masked());
        assert_eq!(f.mask_key(), Some([1, 2, 3, 4]));

        let f = f.unmasked();
        assert!(!f.masked());
        assert_eq!(&f.payload()[..], b"hi");
    }

    #[test]
    fn outgoing_follows_role() {
        assert!(Frame::outgoing(Role::Client, true, 2, vec![1u8, 2, 3]).masked());
        assert!(!Frame::outgoing(Role::Server, true, 2, vec![1u8, 2, 3]).masked());
    }

    #[test]
    fn encoded_len_matches_buffer() {
        for len in [0, 125, 126, 65535, 65536] {
            let f = Frame::new(true, 2, vec![7u8; len]);
            assert_eq!(f.encoded_len(), f.to_bytes().len());
            let f = f.with_mask([9, 8, 7, 6]);
            assert_eq!(f.encoded_len(), f.to_bytes().len());
        }
    }
}

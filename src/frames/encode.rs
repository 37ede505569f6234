use std::io::Write;

use bytes::{BufMut, BytesMut};

use super::{
    Frame,
    header::{FIN_BIT, MASK_BIT, PayloadLen},
};
use crate::{Result, protocol::apply_mask};

/// Writes `frame` to `out` with a single `write_all`, then flushes.
///
/// The length field always uses the smallest tier that fits the payload.
pub fn encode<W: Write + ?Sized>(frame: &Frame, out: &mut W) -> Result<()> {
    let buf = encode_to_buf(frame);
    out.write_all(&buf)?;
    out.flush()?;
    Ok(())
}

pub(crate) fn encode_to_buf(frame: &Frame) -> BytesMut {
    let payload = frame.payload();
    let len = PayloadLen::for_len(payload.len());

    tracing::trace!(
        opcode = frame.opcode(),
        fin = frame.final_fragment(),
        masked = frame.masked(),
        len = payload.len(),
        "encoding frame"
    );

    let mut buf = BytesMut::with_capacity(frame.encoded_len());
    buf.put_u8(if frame.final_fragment() { FIN_BIT } else { 0 } | frame.opcode());

    if let Some(mask_key) = frame.mask_key() {
        len.put(&mut buf, MASK_BIT);
        buf.extend_from_slice(&mask_key);

        let start = buf.len();
        buf.extend_from_slice(payload);
        apply_mask(&mut buf[start..], mask_key);
    } else {
        len.put(&mut buf, 0);
        buf.extend_from_slice(payload);
    }

    buf
}

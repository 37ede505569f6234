use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::{
    Frame, FrameDecoder,
    decode::PREALLOC_LIMIT,
    encode::encode_to_buf,
    header::{Header, MASK_KEY_LEN, PayloadLen, split_first_byte, split_second_byte},
};
use crate::{FrameError, Result};

impl FrameDecoder {
    /// Async counterpart of [`FrameDecoder::decode`]. Suspends only on reads from `input`.
    pub async fn decode_async<R: AsyncRead + Unpin + ?Sized>(&self, input: &mut R) -> Result<Frame> {
        let mut head = [0; 2];
        input
            .read_exact(&mut head)
            .await
            .map_err(FrameError::from_read)?;
        let (fin, opcode) = split_first_byte(head[0]);
        let (masked, len7) = split_second_byte(head[1]);

        let mut ext = [0; 8];
        let ext = &mut ext[..PayloadLen::extension_len(len7)];
        input
            .read_exact(ext)
            .await
            .map_err(FrameError::from_read)?;
        let len = PayloadLen::from_wire(len7, ext);
        let size = self.config().payload_size(len)?;

        let mask_key = if masked {
            let mut key = [0; MASK_KEY_LEN];
            input
                .read_exact(&mut key)
                .await
                .map_err(FrameError::from_read)?;
            Some(key)
        } else {
            None
        };

        let mut payload = Vec::with_capacity(size.min(PREALLOC_LIMIT));
        (&mut *input)
            .take(len.value())
            .read_to_end(&mut payload)
            .await?;

        let header = Header {
            fin,
            opcode,
            len,
            mask_key,
        };
        header.into_frame(payload, size)
    }
}

/// Async counterpart of [`decode`](crate::decode).
pub async fn decode_async<R: AsyncRead + Unpin + ?Sized>(input: &mut R) -> Result<Frame> {
    FrameDecoder::default().decode_async(input).await
}

/// Async counterpart of [`encode`](crate::encode).
pub async fn encode_async<W: AsyncWrite + Unpin + ?Sized>(frame: &Frame, out: &mut W) -> Result<()> {
    let buf = encode_to_buf(frame);
    out.write_all(&buf).await?;
    out.flush().await?;
    Ok(())
}

//! Encoding and decoding of single WebSocket frames
//! ([RFC 6455 §5](https://www.rfc-editor.org/rfc/rfc6455.html#section-5)).
//!
//! The codec is stateless: each call reads or writes exactly one frame.
//! Handshakes, message reassembly and extensions belong to the layers above.
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::empty_docs,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::missing_safety_doc
)]

mod error;
mod frames;
mod protocol;
mod role;

pub use error::{FrameError, Result};
pub use frames::{
    DecodeConfig, Frame, FrameDecoder, LengthTier, Opcode, PayloadLen, decode, decode_async,
    encode, encode_async,
};
pub use protocol::apply_mask;
pub use role::Role;

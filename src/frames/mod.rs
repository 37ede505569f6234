mod decode;
mod encode;
mod frame;
mod header;
mod nonblocking;
mod opcode;

pub use decode::{DecodeConfig, FrameDecoder, decode};
pub use encode::encode;
pub use frame::Frame;
pub use header::{LengthTier, PayloadLen};
pub use nonblocking::{decode_async, encode_async};
pub use opcode::Opcode;

/// Frame types defined by RFC 6455. The codec carries opcodes as plain `u8`; this enum is for
/// callers that want to interpret them.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Opcode {
    Cont = 0x0,
    Text = 0x1,
    Bin = 0x2,
    Close = 0x8,
    Ping = 0x9,
    Pong = 0xA,
}

impl Opcode {
    /// Close, Ping and Pong.
    #[must_use]
    pub fn is_control(self) -> bool { self as u8 & 0x8 != 0 }
}

/// Fails for reserved values (0x3-0x7, 0xB-0xF) and anything wider than 4 bits.
impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(Self::Cont),
            0x1 => Ok(Self::Text),
            0x2 => Ok(Self::Bin),
            0x8 => Ok(Self::Close),
            0x9 => Ok(Self::Ping),
            0xA => Ok(Self::Pong),
            other => Err(other),
        }
    }
}

impl From<Opcode> for u8 {
    fn from(value: Opcode) -> Self { value as u8 }
}

/// Which end of the connection is sending. Clients must mask every frame they send, servers must
/// not mask any.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    Client,
    Server,
}

impl Role {
    #[must_use]
    pub fn masks_outgoing(self) -> bool { matches!(self, Role::Client) }
}

//! Ordered, reliable message delivery between the two peers.

use crate::protocol::Message;

/// A framed connection to the peer. Implementations deliver messages in
/// send order and drop frames that do not decode to a known [`Message`].
#[async_trait::async_trait]
pub trait Transport: Send {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

pub mod in_memory;
pub mod tcp;

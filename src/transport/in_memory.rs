use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::protocol::{decode, encode, Message};
use crate::transport::Transport;

/// One end of an in-process connection. Frames travel as encoded JSON so
/// both ends exercise the same codec as the network transport.
pub struct InMemoryTransport {
    tx: UnboundedSender<Vec<u8>>,
    rx: UnboundedReceiver<Vec<u8>>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let (tx1, rx1) = unbounded_channel();
        let (tx2, rx2) = unbounded_channel();
        (Self { tx: tx1, rx: rx2 }, Self { tx: tx2, rx: rx1 })
    }

    /// Push a raw frame to the peer without encoding it.
    pub fn send_raw(&mut self, frame: Vec<u8>) -> anyhow::Result<()> {
        self.tx
            .send(frame)
            .map_err(|_| anyhow::anyhow!("Channel closed"))
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let frame = encode(&msg)?;
        self.send_raw(frame)
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        loop {
            let frame = self
                .rx
                .recv()
                .await
                .ok_or_else(|| anyhow::anyhow!("Channel closed"))?;
            if let Some(msg) = decode(&frame) {
                return Ok(msg);
            }
        }
    }
}

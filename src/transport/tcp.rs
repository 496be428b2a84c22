use std::io::ErrorKind;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::config::{FRAME_TIMEOUT, MAX_FRAME_SIZE};
use crate::protocol::{decode, encode, Message};
use crate::transport::Transport;

/// Length-prefixed JSON frames over TCP.
///
/// Each frame is a 4-byte big-endian length followed by the JSON body.
/// Waiting for the next frame is unbounded, since the peer may be thinking;
/// once a frame has started, the rest of it and every write must complete
/// within the frame timeout.
pub struct TcpTransport {
    stream: TcpStream,
    frame_timeout: Duration,
    max_frame_size: u32,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, FRAME_TIMEOUT, MAX_FRAME_SIZE)
    }

    pub fn with_config(stream: TcpStream, frame_timeout: Duration, max_frame_size: u32) -> Self {
        Self {
            stream,
            frame_timeout,
            max_frame_size,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        Ok(Self::new(stream))
    }

    async fn read_frame(&mut self) -> anyhow::Result<Vec<u8>> {
        let mut len_buf = [0u8; 4];
        self.stream
            .read_exact(&mut len_buf)
            .await
            .map_err(read_error)?;
        let len = u32::from_be_bytes(len_buf);
        if len == 0 {
            return Err(anyhow::anyhow!("Invalid frame length: 0"));
        }
        if len > self.max_frame_size {
            return Err(anyhow::anyhow!(
                "Frame too large: {} bytes (max: {})",
                len,
                self.max_frame_size
            ));
        }

        let mut buf = vec![0u8; len as usize];
        timeout(self.frame_timeout, self.stream.read_exact(&mut buf))
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", self.frame_timeout))?
            .map_err(read_error)?;
        Ok(buf)
    }
}

fn read_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        ErrorKind::UnexpectedEof => anyhow::anyhow!("Connection closed by peer"),
        ErrorKind::ConnectionReset => anyhow::anyhow!("Connection reset by peer"),
        _ => anyhow::anyhow!("Read error: {}", e),
    }
}

fn write_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        ErrorKind::BrokenPipe | ErrorKind::ConnectionReset => {
            anyhow::anyhow!("Connection closed by peer")
        }
        _ => anyhow::anyhow!("Write error: {}", e),
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let data = encode(&msg)?;
        if data.len() > self.max_frame_size as usize {
            return Err(anyhow::anyhow!(
                "Frame too large: {} bytes (max: {})",
                data.len(),
                self.max_frame_size
            ));
        }

        let frame_timeout = self.frame_timeout;
        let stream = &mut self.stream;
        let write = async move {
            let len = (data.len() as u32).to_be_bytes();
            stream.write_all(&len).await.map_err(write_error)?;
            stream.write_all(&data).await.map_err(write_error)?;
            stream.flush().await.map_err(write_error)?;
            anyhow::Ok(())
        };
        timeout(frame_timeout, write)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", frame_timeout))?
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        loop {
            let frame = self.read_frame().await?;
            if let Some(msg) = decode(&frame) {
                return Ok(msg);
            }
        }
    }
}

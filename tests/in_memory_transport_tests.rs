use seabattle::transport::in_memory::InMemoryTransport;
use seabattle::transport::Transport;
use seabattle::{CellPos, Message, ShotResult};

#[tokio::test]
async fn test_messages_arrive_in_order() -> anyhow::Result<()> {
    let (mut host, mut guest) = InMemoryTransport::pair();

    host.send(Message::ReadyToPlay { reply: false }).await?;
    host.send(Message::PassToken).await?;
    guest
        .send(Message::BombCell {
            cell_pos: CellPos::new(2, 2),
        })
        .await?;

    assert_eq!(guest.recv().await?, Message::ReadyToPlay { reply: false });
    assert_eq!(guest.recv().await?, Message::PassToken);
    assert_eq!(
        host.recv().await?,
        Message::BombCell {
            cell_pos: CellPos::new(2, 2)
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_malformed_frames_are_skipped() -> anyhow::Result<()> {
    let (mut host, mut guest) = InMemoryTransport::pair();

    host.send_raw(br#"{"type":"emote","name":"wave"}"#.to_vec())?;
    host.send_raw(b"\x00garbage".to_vec())?;
    host.send(Message::BombResponse(ShotResult::miss(CellPos::new(9, 9))))
        .await?;

    assert_eq!(
        guest.recv().await?,
        Message::BombResponse(ShotResult::miss(CellPos::new(9, 9)))
    );
    Ok(())
}

#[tokio::test]
async fn test_dropped_peer_closes_channel() {
    let (mut host, guest) = InMemoryTransport::pair();
    drop(guest);

    assert!(host.send(Message::PassToken).await.is_err());
    let err = host.recv().await.unwrap_err();
    assert!(err.to_string().contains("Channel closed"));
}

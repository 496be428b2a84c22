use seabattle::transport::in_memory::InMemoryTransport;
use seabattle::transport::tcp::TcpTransport;
use seabattle::transport::Transport;
use seabattle::{AiPlayer, GameConfig, Outcome, PlayerNode, Role, Session};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::TcpListener;

enum TransportKind {
    InMemory,
    Tcp,
}

async fn run_game(kind: TransportKind, config: GameConfig) -> anyhow::Result<()> {
    let (t1, t2): (Box<dyn Transport>, Box<dyn Transport>) = match kind {
        TransportKind::InMemory => {
            let (t1, t2) = InMemoryTransport::pair();
            (Box::new(t1), Box::new(t2))
        }
        TransportKind::Tcp => {
            let listener = TcpListener::bind("127.0.0.1:0").await?;
            let addr = listener.local_addr()?;
            let accept = tokio::spawn(async move {
                let (socket, _) = listener.accept().await?;
                Ok::<TcpTransport, anyhow::Error>(TcpTransport::new(socket))
            });
            let client = TcpTransport::connect(addr).await?;
            let server = accept.await??;
            (Box::new(server), Box::new(client))
        }
    };

    let mut rng1 = SmallRng::seed_from_u64(1);
    let mut rng2 = SmallRng::seed_from_u64(2);

    let host = Session::start(Role::Host, &config, &mut rng1)?;
    let guest = Session::start(Role::Guest, &config, &mut rng2)?;

    let mut node1 = PlayerNode::new(Box::new(AiPlayer::new()), host, t1);
    let mut node2 = PlayerNode::new(Box::new(AiPlayer::new()), guest, t2);

    let (outcome1, outcome2) = tokio::try_join!(node1.run(&mut rng1), node2.run(&mut rng2))?;

    let turns = node1
        .session()
        .shots_fired()
        .max(node2.session().shots_fired());
    println!("{:?} / {:?} after {} turns", outcome1, outcome2, turns);

    assert_ne!(outcome1, outcome2);
    assert!(matches!(outcome1, Outcome::Won | Outcome::Lost));
    assert_eq!(node1.session().outcome(), Some(outcome1));
    assert_eq!(node2.session().outcome(), Some(outcome2));
    assert!(turns <= 100);

    let loser = if outcome1 == Outcome::Lost { &node1 } else { &node2 };
    let winner = if outcome1 == Outcome::Won { &node1 } else { &node2 };
    assert!(loser.session().own_board().board().all_sunk());
    assert_eq!(
        winner.session().opponent_view().revealed_ships().len(),
        config.fleet().len()
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ai_transport_game_in_memory() -> anyhow::Result<()> {
    run_game(TransportKind::InMemory, GameConfig::default()).await
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ai_transport_game_in_memory_classic_fleet() -> anyhow::Result<()> {
    run_game(TransportKind::InMemory, GameConfig::classic()).await
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ai_transport_game_tcp() -> anyhow::Result<()> {
    run_game(TransportKind::Tcp, GameConfig::classic()).await
}

#[tokio::test(flavor = "multi_thread")]
async fn test_peer_disconnect_ends_the_game_with_an_error() {
    let (t1, t2) = InMemoryTransport::pair();
    drop(t2);
    let mut rng = SmallRng::seed_from_u64(3);
    let session = Session::start(Role::Host, &GameConfig::default(), &mut rng).unwrap();
    let mut node = PlayerNode::new(Box::new(AiPlayer::new()), session, Box::new(t1));
    assert!(node.run(&mut rng).await.is_err());
}

#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use log::{error, info};
#[cfg(feature = "std")]
use rand::{rngs::SmallRng, SeedableRng};
#[cfg(feature = "std")]
use seabattle::{
    init_logging, AiPlayer, CliPlayer, GameConfig, InMemoryTransport, Outcome, Player,
    PlayerNode, Role, Session, TcpTransport, Transport,
};
#[cfg(feature = "std")]
use serde_json::json;
#[cfg(feature = "std")]
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum PlayerType {
    Human,
    Ai,
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct GameArgs {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, value_parser = GameConfig::parse_fleet, conflicts_with = "classic", help = "Ship sizes, e.g. --fleet 5,4,3")]
    fleet: Option<GameConfig>,
    #[arg(long, help = "Play with the ten-ship classic fleet")]
    classic: bool,
}

#[cfg(feature = "std")]
impl GameArgs {
    fn config(&self) -> GameConfig {
        match (&self.fleet, self.classic) {
            (Some(config), _) => config.clone(),
            (None, true) => GameConfig::classic(),
            (None, false) => GameConfig::default(),
        }
    }

    fn rng(&self, offset: u64) -> SmallRng {
        match self.seed {
            Some(s) => SmallRng::seed_from_u64(s.wrapping_add(offset)),
            None => SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Wait for an opponent to connect, then play.
    Host {
        #[arg(long, default_value = "0.0.0.0:7878")]
        bind: String,
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        player: PlayerType,
        #[command(flatten)]
        game: GameArgs,
    },
    /// Connect to a hosted game and play.
    Join {
        #[arg(long, default_value = "127.0.0.1:7878")]
        connect: String,
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        player: PlayerType,
        #[command(flatten)]
        game: GameArgs,
    },
    /// Two computer players against each other in one process; prints a JSON summary.
    Local {
        #[command(flatten)]
        game: GameArgs,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Host { bind, player, game } => {
            let listener = TcpListener::bind(&bind).await?;
            info!("waiting for an opponent on {}", listener.local_addr()?);
            let (stream, addr) = listener.accept().await?;
            stream.set_nodelay(true)?;
            info!("opponent connected from {}", addr);
            play(Role::Host, Box::new(TcpTransport::new(stream)), player, &game).await
        }
        Commands::Join {
            connect,
            player,
            game,
        } => {
            info!("connecting to {}", connect);
            let transport = TcpTransport::connect(&connect).await?;
            info!("connected");
            play(Role::Guest, Box::new(transport), player, &game).await
        }
        Commands::Local { game } => local(&game).await,
    }
}

#[cfg(feature = "std")]
async fn play(
    role: Role,
    transport: Box<dyn Transport>,
    kind: PlayerType,
    game: &GameArgs,
) -> anyhow::Result<()> {
    let mut rng = game.rng(0);
    let session = Session::start(role, &game.config(), &mut rng)?;
    let player: Box<dyn Player> = match kind {
        PlayerType::Human => Box::new(CliPlayer::new()),
        PlayerType::Ai => Box::new(AiPlayer::new()),
    };
    let mut node = PlayerNode::new(player, session, transport);
    match node.run(&mut rng).await {
        Ok(Outcome::Won) => {
            println!("Victory after {} shot(s).", node.session().shots_fired());
            Ok(())
        }
        Ok(Outcome::Lost) => {
            println!("Defeat. All your ships have been sunk.");
            Ok(())
        }
        Err(e) => {
            error!("session abandoned: {}", e);
            Err(e)
        }
    }
}

#[cfg(feature = "std")]
async fn local(game: &GameArgs) -> anyhow::Result<()> {
    let config = game.config();
    let mut rng1 = game.rng(0);
    let mut rng2 = game.rng(1);
    let host = Session::start(Role::Host, &config, &mut rng1)?;
    let guest = Session::start(Role::Guest, &config, &mut rng2)?;
    let (t1, t2) = InMemoryTransport::pair();

    let host_future = async move {
        let mut node = PlayerNode::new(Box::new(AiPlayer::new()), host, Box::new(t1));
        let outcome = node.run(&mut rng1).await?;
        anyhow::Ok((outcome, node.session().shots_fired()))
    };
    let guest_future = async move {
        let mut node = PlayerNode::new(Box::new(AiPlayer::new()), guest, Box::new(t2));
        let outcome = node.run(&mut rng2).await?;
        anyhow::Ok((outcome, node.session().shots_fired()))
    };
    let (res1, res2) = tokio::try_join!(host_future, guest_future)?;

    let winner = match (res1.0, res2.0) {
        (Outcome::Won, Outcome::Lost) => Some("host"),
        (Outcome::Lost, Outcome::Won) => Some("guest"),
        _ => None,
    };
    let result = json!({
        "fleet": config.fleet(),
        "host": {"outcome": format!("{:?}", res1.0), "shots": res1.1},
        "guest": {"outcome": format!("{:?}", res2.0), "shots": res2.1},
        "winner": winner,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

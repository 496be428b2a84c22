use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{
    AiPlayer, GameConfig, GameState, ManualClock, Outcome, OwnBoard, Role, Session,
};

fn new_session(role: Role, config: &GameConfig, rng: &mut SmallRng) -> Session {
    let mut own = OwnBoard::new(config.fleet()).unwrap();
    own.randomize(rng).unwrap();
    Session::new(role, own, Box::new(ManualClock::new()))
}

fn pump(a: &mut Session, b: &mut Session) {
    loop {
        let from_a = a.take_outgoing();
        let from_b = b.take_outgoing();
        if from_a.is_empty() && from_b.is_empty() {
            break;
        }
        for msg in from_a {
            b.handle_message(msg);
        }
        for msg in from_b {
            a.handle_message(msg);
        }
    }
}

fn turn_is_exclusive(a: &Session, b: &Session) -> bool {
    let holders = [a, b]
        .iter()
        .filter(|s| s.state() == GameState::MyTurn)
        .count();
    holders <= 1
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn games_converge_to_one_winner(seed in any::<u64>(), order in 0..3u8, classic in any::<bool>()) {
        let config = if classic { GameConfig::classic() } else { GameConfig::default() };
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut host = new_session(Role::Host, &config, &mut rng);
        let mut guest = new_session(Role::Guest, &config, &mut rng);

        match order {
            0 => {
                host.ready();
                pump(&mut host, &mut guest);
                guest.ready();
            }
            1 => {
                guest.ready();
                pump(&mut host, &mut guest);
                host.ready();
            }
            _ => {
                host.ready();
                guest.ready();
            }
        }
        pump(&mut host, &mut guest);
        prop_assert!(host.state() == GameState::MyTurn || guest.state() == GameState::MyTurn);
        prop_assert!(turn_is_exclusive(&host, &guest));

        let mut turns = 0;
        while !host.is_finished() {
            prop_assert!(turns < 200, "game did not finish");
            let shooter = if host.can_fire() { &mut host } else { &mut guest };
            prop_assert!(shooter.can_fire());
            let target = AiPlayer::choose(&mut rng, shooter.opponent_view());
            shooter.fire_at(target.row, target.column);
            pump(&mut host, &mut guest);
            prop_assert!(turn_is_exclusive(&host, &guest));
            turns += 1;
        }

        prop_assert!(guest.is_finished());
        let (winner, loser) = match host.outcome() {
            Some(Outcome::Won) => (&host, &guest),
            _ => (&guest, &host),
        };
        prop_assert_eq!(winner.outcome(), Some(Outcome::Won));
        prop_assert_eq!(loser.outcome(), Some(Outcome::Lost));
        prop_assert!(loser.own_board().board().all_sunk());
        prop_assert_eq!(
            winner.opponent_view().revealed_ships().len(),
            config.fleet().len()
        );
        prop_assert_eq!(host.shots_fired() + guest.shots_fired(), turns);
    }
}

use maze_chase::{ConfigError, Dir, GameConfig, Outcome, PelletSet, Pos, Session, TerminalEvent};
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SPAWN: Pos = Pos::new(14, 23);

fn session() -> Session {
    Session::new(GameConfig::default()).unwrap()
}

/// An rng that never triggers an adversary re-roll.
fn never() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

fn park_adversaries(session: &mut Session) {
    for adversary in &mut session.adversaries {
        adversary.agent.velocity = None;
    }
}

fn assert_fresh(session: &Session) {
    assert_eq!(session.score, 0);
    assert_eq!(session.pellets.len(), 754);
    assert_eq!(session.player.pos, SPAWN);
    assert_eq!(session.player.velocity, None);
    assert_eq!(session.player.facing, Dir::Left);
    let config = session.config();
    for (adversary, spawn) in session.adversaries.iter().zip(&config.adversaries) {
        assert_eq!(adversary.agent.pos, spawn.pos);
        assert_eq!(adversary.agent.velocity, None);
    }
}

#[test]
fn test_initial_state() {
    let session = session();
    assert_eq!(session.score, 0);
    assert_eq!(session.initial_pellets(), 754);
    assert_eq!(session.player.pos, SPAWN);
    assert_eq!(session.adversaries.len(), 2);
    assert_eq!(session.adversaries[0].agent.pos, Pos::new(13, 15));
    assert_eq!(session.adversaries[0].agent.velocity, Some(Dir::Right));
    assert_eq!(session.adversaries[1].agent.pos, Pos::new(14, 15));
    assert_eq!(session.adversaries[1].agent.velocity, Some(Dir::Left));
    assert_eq!(session.rounds(), 0);
}

#[test]
fn test_move_onto_pellet_scores() {
    let mut session = session();
    let mut events = Vec::new();
    session.post_input(Dir::Left);

    let ended = session.tick(&mut never(), &mut |e: TerminalEvent| events.push(e));
    assert_eq!(ended, None);
    assert!(events.is_empty());
    assert_eq!(session.player.pos, Pos::new(13, 23));
    assert_eq!(session.player.facing, Dir::Left);
    assert_eq!(session.pellets.len(), 753);
    assert_eq!(session.score, 10);
}

#[test]
fn test_wall_blocks_without_scoring() {
    let mut session = session();
    session.player.pos = Pos::new(14, 29);
    session.pellets.take(Pos::new(14, 29));
    session.post_input(Dir::Down);

    session.tick(&mut never(), &mut |_: TerminalEvent| {});
    assert_eq!(session.player.pos, Pos::new(14, 29));
    assert_eq!(session.player.velocity, Some(Dir::Down));
    assert_eq!(session.score, 0);
}

#[test]
fn test_only_latest_input_applies() {
    let mut session = session();
    session.post_input(Dir::Up);
    session.post_input(Dir::Right);
    assert_eq!(session.pending_input(), Some(Dir::Right));

    session.tick(&mut never(), &mut |_: TerminalEvent| {});
    assert_eq!(session.player.pos, Pos::new(15, 23));
    assert_eq!(session.pending_input(), None);

    // Velocity persists without new input.
    session.tick(&mut never(), &mut |_: TerminalEvent| {});
    assert_eq!(session.player.pos, Pos::new(16, 23));
}

#[test]
fn test_collision_loses_and_resets() {
    let mut session = session();
    park_adversaries(&mut session);
    session.player.pos = Pos::new(13, 15);
    let mut events = Vec::new();

    let ended = session.tick(&mut never(), &mut |e: TerminalEvent| events.push(e));
    let expected = TerminalEvent {
        outcome: Outcome::Lost,
        score: 10,
    };
    assert_eq!(ended, Some(expected));
    assert_eq!(events, vec![expected]);
    assert_eq!(session.rounds(), 1);
    assert_fresh(&session);
}

#[test]
fn test_last_pellet_wins_and_resets() {
    let mut session = session();
    park_adversaries(&mut session);
    session.pellets.retain(|pos| pos == Pos::new(13, 23));
    session.post_input(Dir::Left);
    let mut events = Vec::new();

    let ended = session.tick(&mut never(), &mut |e: TerminalEvent| events.push(e));
    assert_eq!(
        ended,
        Some(TerminalEvent {
            outcome: Outcome::Won,
            score: 10
        })
    );
    assert_eq!(events.len(), 1);
    assert_fresh(&session);

    // The next tick is an ordinary one on the rebuilt map.
    let ended = session.tick(&mut never(), &mut |e: TerminalEvent| events.push(e));
    assert_eq!(ended, None);
    assert_eq!(events.len(), 1);
}

#[test]
fn test_loss_beats_win_on_same_tick() {
    let mut session = session();
    park_adversaries(&mut session);
    session.pellets.retain(|pos| pos == Pos::new(13, 15));
    session.player.pos = Pos::new(12, 15);
    session.post_input(Dir::Right);
    let mut events = Vec::new();

    session.tick(&mut never(), &mut |e: TerminalEvent| events.push(e));
    assert_eq!(
        events,
        vec![TerminalEvent {
            outcome: Outcome::Lost,
            score: 10
        }]
    );
    assert_fresh(&session);
}

#[test]
fn test_adversary_stepping_onto_player_loses() {
    let mut session = session();
    park_adversaries(&mut session);
    session.player.pos = Pos::new(20, 15);
    session.adversaries[1].agent.pos = Pos::new(21, 15);
    session.adversaries[1].agent.steer(Dir::Left);
    let mut events = Vec::new();

    session.tick(&mut never(), &mut |e: TerminalEvent| events.push(e));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].outcome, Outcome::Lost);
}

#[test]
fn test_reset_restores_spawn_state() {
    let mut session = session();
    let mut rng = StdRng::seed_from_u64(11);
    session.post_input(Dir::Up);
    for _ in 0..12 {
        session.tick(&mut rng, &mut |_: TerminalEvent| {});
    }
    session.post_input(Dir::Right);
    session.reset();
    assert_fresh(&session);
    assert_eq!(session.pending_input(), None);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = GameConfig {
        adversaries: Vec::new(),
        ..GameConfig::default()
    };
    assert!(Session::new(config).is_err());
}

#[test]
fn test_overflowing_reward_is_rejected() {
    let config = GameConfig {
        pellet_score: u32::MAX,
        ..GameConfig::default()
    };
    assert!(matches!(
        Session::new(config),
        Err(ConfigError::ScoreOverflow { .. })
    ));
}

#[test]
fn test_largest_reward_scores_a_full_board() {
    let config = GameConfig {
        pellet_score: u32::MAX / 754,
        ..GameConfig::default()
    };
    let mut session = Session::new(config).unwrap();
    park_adversaries(&mut session);
    let mut events = Vec::new();
    session.pellets.retain(|pos| pos == Pos::new(13, 23));
    session.score = 753 * (u32::MAX / 754);
    session.post_input(Dir::Left);

    session.tick(&mut never(), &mut |e: TerminalEvent| events.push(e));
    assert_eq!(
        events,
        vec![TerminalEvent {
            outcome: Outcome::Won,
            score: 754 * (u32::MAX / 754)
        }]
    );
}

#[test]
fn test_seeded_runs_replay() {
    let run = |seed: u64| {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut trace = Vec::new();
        for i in 0..400 {
            if i % 9 == 0 {
                session.post_input(Dir::ALL[i % 4]);
            }
            session.tick(&mut rng, &mut |_: TerminalEvent| {});
            trace.push((
                session.player.pos,
                session.adversaries[0].agent.pos,
                session.adversaries[1].agent.pos,
                session.score,
            ));
        }
        trace
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn test_invariants_hold_over_long_play() {
    for seed in [1u64, 7, 2024] {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut input_rng = StdRng::seed_from_u64(seed ^ 0xdead_beef);
        let (cols, rows) = (session.grid.width(), session.grid.height());
        let mut events = 0;
        let mut terminal_ticks = 0;
        let mut prev: PelletSet = session.pellets.clone();

        for _ in 0..3000 {
            if input_rng.gen_bool(0.15) {
                session.post_input(Dir::ALL[input_rng.gen_range(0..4)]);
            }
            let ended = session.tick(&mut rng, &mut |_: TerminalEvent| events += 1);

            let agents = std::iter::once(&session.player)
                .chain(session.adversaries.iter().map(|a| &a.agent));
            for agent in agents {
                let Pos { x, y } = agent.pos;
                assert!((1..=cols - 2).contains(&x) && (1..=rows - 2).contains(&y));
                assert!(session.grid.is_floor(agent.pos));
            }

            if ended.is_some() {
                terminal_ticks += 1;
                assert_fresh(&session);
            } else {
                let eaten = prev.len() - session.pellets.len();
                assert!(eaten <= 1);
                assert_eq!(eaten == 1, prev.contains(session.player.pos));
                assert!(session.pellets.iter().all(|p| prev.contains(p)));
                assert_eq!(
                    session.score as usize,
                    10 * (session.initial_pellets() - session.pellets.len())
                );
            }
            prev = session.pellets.clone();
        }
        assert_eq!(events, terminal_ticks);
        assert_eq!(session.rounds(), terminal_ticks);
    }
}

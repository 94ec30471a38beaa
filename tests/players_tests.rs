//! Automated player and scheduling integration tests.
//!
//! Tokio's clock is paused, so thinking delays elapse deterministically.
//! Every test runs inside a `LocalSet`, as automated players require.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use bisim_game::{
    Automated, BisimulationGame, Color, Deferred, DependencyGame, Game, GameConfig, GameError,
    GameHandle, GameRng, Human, Move, NodeId, Phase, Player, PlayerKind, ProcessGraph, ProcessId,
    Result, Role, Session,
};
use tokio::task::LocalSet;
use tokio::time::sleep;

const DELAY: Duration = Duration::from_secs(2);

fn rules(triples: Vec<(&str, &str, &str)>, left: &str, right: &str) -> BisimulationGame {
    let graph = Rc::new(ProcessGraph::from(triples));
    BisimulationGame::from_config(graph, &GameConfig::default(), left, right).unwrap()
}

fn distinguishable() -> BisimulationGame {
    rules(vec![("P", "a", "P1"), ("P1", "b", "P2"), ("Q", "a", "Q1")], "P", "Q")
}

fn looping() -> BisimulationGame {
    rules(vec![("P", "a", "P")], "P", "P")
}

fn automated<G: DependencyGame + 'static>(rules: G, seed: u64) -> GameHandle<G> {
    let game = GameHandle::new(Game::new(rules).with_log_echo(false));
    let mut rng = GameRng::new(seed);
    game.set_players(
        Rc::new(Automated::new(Role::Attacker, Color::PLAYER2, DELAY, rng.fork())),
        Rc::new(Automated::new(Role::Defender, Color::PLAYER1, DELAY, rng.fork())),
    )
    .unwrap();
    game
}

/// Test double: schedules a decision like `Automated` and records whether
/// its callback ever ran.
struct Recorder {
    role: Role,
    fired: Rc<Cell<bool>>,
    pending: RefCell<Option<Deferred>>,
}

impl Recorder {
    fn new(role: Role) -> Self {
        Self {
            role,
            fired: Rc::new(Cell::new(false)),
            pending: RefCell::new(None),
        }
    }
}

impl<G: DependencyGame + 'static> Player<G> for Recorder {
    fn role(&self) -> Role {
        self.role
    }

    fn color(&self) -> Color {
        Color::COMPUTER
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Automated
    }

    fn prepare_turn(&self, choices: Vec<Move>, game: &GameHandle<G>) {
        let fired = Rc::clone(&self.fired);
        let role = self.role;
        let game = game.clone();
        let task = Deferred::after(DELAY, move || {
            fired.set(true);
            let _ = game.play(role, choices[0].clone());
        });
        *self.pending.borrow_mut() = Some(task);
    }

    fn abort_play(&self) {
        if let Some(task) = self.pending.borrow_mut().take() {
            task.cancel();
        }
    }
}

/// Delegates to real rules but claims the Defender wins.
struct ClaimsDefenderWins(BisimulationGame);

impl DependencyGame for ClaimsDefenderWins {
    fn root(&self) -> NodeId {
        self.0.root()
    }

    fn choices(&self, node: NodeId, role: Role) -> Vec<Move> {
        self.0.choices(node, role)
    }

    fn winner(&self) -> Role {
        Role::Defender
    }

    fn best_winning_attack(&self, node: NodeId, choices: &[Move]) -> Result<Move> {
        self.0.best_winning_attack(node, choices)
    }

    fn winning_defend(&self, node: NodeId, choices: &[Move]) -> Result<Move> {
        self.0.winning_defend(node, choices)
    }

    fn label(&self, process: ProcessId) -> String {
        self.0.label(process)
    }
}

// =============================================================================
// Automated Play Tests
// =============================================================================

/// Identical processes: the winning Defender always has a ZERO reply, so
/// the game runs until stopped without aborting.
#[tokio::test(start_paused = true)]
async fn test_defender_survives_identical_processes() {
    LocalSet::new()
        .run_until(async {
            let rules = looping();
            assert!(rules.is_bisimilar());
            let game = automated(rules, 42);
            game.start().unwrap();

            sleep(Duration::from_secs(21)).await;
            assert_eq!(game.step(), 10);
            assert_eq!(game.round(), 6);
            assert_eq!(game.phase(), Phase::ToMove(Role::Attacker));

            game.stop();
        })
        .await;
}

/// Distinguishable processes: the losing Defender runs out of answers.
#[tokio::test(start_paused = true)]
async fn test_attacker_wins_distinguishable_processes() {
    LocalSet::new()
        .run_until(async {
            let rules = distinguishable();
            assert!(!rules.is_bisimilar());
            let game = automated(rules, 7);
            assert!(!game.current_choices(Role::Attacker).is_empty());
            game.start().unwrap();

            sleep(Duration::from_secs(1)).await;
            assert_eq!(game.step(), 0);

            sleep(Duration::from_secs(10)).await;
            assert_eq!(game.phase(), Phase::Finished { winner: Role::Attacker });
            assert_eq!(game.step(), 3);
            assert_eq!(game.log_lines().last().map(String::as_str), Some("ATTACKER wins."));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_wait_for_finish_through_subscription() {
    LocalSet::new()
        .run_until(async {
            let game = automated(distinguishable(), 3);
            let mut phase = game.subscribe();
            game.start().unwrap();

            while !phase.borrow_and_update().is_over() {
                phase.changed().await.unwrap();
            }
            assert_eq!(game.phase().winner(), Some(Role::Attacker));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_broken_marking_aborts_game() {
    LocalSet::new()
        .run_until(async {
            let game = automated(ClaimsDefenderWins(distinguishable()), 1);
            game.start().unwrap();

            sleep(Duration::from_secs(10)).await;
            assert_eq!(
                game.phase(),
                Phase::Aborted(GameError::NoWinningDefence.to_string())
            );
            assert!(game.is_over());
            assert_eq!(game.step(), 1);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_new_decision_replaces_pending_one() {
    LocalSet::new()
        .run_until(async {
            let game = GameHandle::new(Game::new(distinguishable()).with_log_echo(false));
            let attacker = Rc::new(Automated::new(
                Role::Attacker,
                Color::PLAYER2,
                DELAY,
                GameRng::new(5),
            ));
            game.set_players(
                attacker.clone(),
                Rc::new(Human::new(Role::Defender, Color::HUMAN)),
            )
            .unwrap();
            game.start().unwrap();
            assert!(attacker.is_pending());

            let choices = game.current_choices(Role::Attacker);
            attacker.prepare_turn(choices, &game);

            sleep(Duration::from_secs(5)).await;
            assert_eq!(game.step(), 1);
            assert_eq!(game.phase(), Phase::ToMove(Role::Defender));
            assert!(!attacker.is_pending());
        })
        .await;
}

#[test]
fn test_loser_picks_among_choices() {
    let game = Game::new(looping()).with_log_echo(false);
    let choices = game.current_choices(Role::Attacker);
    let mut rng = GameRng::new(11);

    assert!(!game.is_winner(Role::Attacker));
    for _ in 0..20 {
        let mv = Automated::decide(Role::Attacker, &game, &choices, &mut rng).unwrap();
        assert!(choices.contains(&mv));
    }
    assert!(matches!(
        Automated::decide(Role::Attacker, &game, &[], &mut rng).unwrap_err(),
        GameError::NoChoices(Role::Attacker)
    ));
}

// =============================================================================
// Cancellation Tests
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_stop_suppresses_scheduled_callback() {
    LocalSet::new()
        .run_until(async {
            let game = GameHandle::new(Game::new(looping()).with_log_echo(false));
            let recorder = Rc::new(Recorder::new(Role::Attacker));
            game.set_players(
                recorder.clone(),
                Rc::new(Human::new(Role::Defender, Color::HUMAN)),
            )
            .unwrap();
            game.start().unwrap();

            game.stop();
            sleep(Duration::from_secs(10)).await;

            assert!(!recorder.fired.get());
            assert_eq!(game.step(), 0);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_cancels_automated_players() {
    LocalSet::new()
        .run_until(async {
            let game = automated(looping(), 9);
            game.start().unwrap();

            sleep(Duration::from_secs(3)).await;
            assert_eq!(game.step(), 1);

            game.stop();
            game.stop();
            sleep(Duration::from_secs(30)).await;
            assert_eq!(game.step(), 1);
            assert_eq!(game.phase(), Phase::ToMove(Role::Defender));
        })
        .await;
}

fn shared_players() -> (Rc<Automated>, Rc<Automated>) {
    let mut rng = GameRng::new(4);
    (
        Rc::new(Automated::new(Role::Attacker, Color::PLAYER2, DELAY, rng.fork())),
        Rc::new(Automated::new(Role::Defender, Color::PLAYER1, DELAY, rng.fork())),
    )
}

/// Players reused after a stop keep playing when the old game is stopped
/// again.
#[tokio::test(start_paused = true)]
async fn test_repeated_stop_leaves_reused_players_alone() {
    LocalSet::new()
        .run_until(async {
            let (attacker, defender) = shared_players();
            let old = GameHandle::new(Game::new(looping()).with_log_echo(false));
            let new = GameHandle::new(Game::new(looping()).with_log_echo(false));
            old.set_players(attacker.clone(), defender.clone()).unwrap();
            new.set_players(attacker.clone(), defender.clone()).unwrap();

            old.start().unwrap();
            old.stop();
            new.start().unwrap();

            sleep(Duration::from_secs(3)).await;
            assert_eq!(new.step(), 1);
            assert!(defender.is_pending());

            old.stop();
            assert!(defender.is_pending());
            sleep(Duration::from_secs(30)).await;
            assert_eq!(new.step(), 16);
            assert_eq!(old.step(), 0);
        })
        .await;
}

/// Stopping a game that already finished does not touch its players.
#[tokio::test(start_paused = true)]
async fn test_stop_after_finish_leaves_reused_players_alone() {
    LocalSet::new()
        .run_until(async {
            let (attacker, defender) = shared_players();
            let old = GameHandle::new(Game::new(distinguishable()).with_log_echo(false));
            old.set_players(attacker.clone(), defender.clone()).unwrap();
            old.start().unwrap();
            sleep(Duration::from_secs(7)).await;
            assert_eq!(old.phase(), Phase::Finished { winner: Role::Attacker });

            let new = GameHandle::new(Game::new(looping()).with_log_echo(false));
            new.set_players(attacker.clone(), defender.clone()).unwrap();
            new.start().unwrap();
            assert!(attacker.is_pending());

            old.stop();
            assert!(attacker.is_pending());
            sleep(Duration::from_secs(5)).await;
            assert_eq!(new.step(), 2);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_dropped_game_is_not_played() {
    LocalSet::new()
        .run_until(async {
            let game = automated(looping(), 2);
            game.start().unwrap();
            drop(game);

            // The pending decision holds only a weak handle.
            sleep(Duration::from_secs(10)).await;
        })
        .await;
}

// =============================================================================
// Session Tests
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_new_game_stops_previous() {
    LocalSet::new()
        .run_until(async {
            let graph = ProcessGraph::from(vec![("P", "a", "P"), ("Q", "a", "Q")]);
            let config = GameConfig::default().with_seed(1).with_echo_log(false);
            let mut session = Session::new(graph, config);

            let first = session.new_game("P", "P").unwrap();
            sleep(Duration::from_secs(1)).await;
            let second = session.new_game("P", "Q").unwrap();

            assert!(first.is_stopped());
            sleep(Duration::from_secs(9)).await;
            assert_eq!(first.step(), 0);
            assert_eq!(second.step(), 4);

            session.hide();
            assert!(session.current().is_none());
            assert!(second.is_stopped());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_session_seats_automated_players() {
    LocalSet::new()
        .run_until(async {
            let graph = ProcessGraph::from(vec![("P", "a", "P1"), ("P1", "b", "P2"), ("Q", "a", "Q1")]);
            let mut session = Session::new(graph, GameConfig::default().with_echo_log(false));
            let (left, right) = session.default_pair().unwrap();
            assert_eq!((left.as_str(), right.as_str()), ("Q1", "Q"));

            let game = session.new_game("P", "Q").unwrap();
            game.with(|g| {
                let attacker = g.player(Role::Attacker).unwrap();
                let defender = g.player(Role::Defender).unwrap();
                assert_eq!(attacker.kind(), PlayerKind::Automated);
                assert_eq!(attacker.color(), Color::PLAYER2);
                assert_eq!(defender.kind(), PlayerKind::Automated);
                assert_eq!(defender.color(), Color::PLAYER1);
            });
            assert!(session.current().is_some());
        })
        .await;
}

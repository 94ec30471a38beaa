//! Play the bisimulation game between two processes of a transition system.
//!
//! ```text
//! RUST_LOG=debug bisim --lts system.lts --left P --right Q --delay-ms 0
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio::task::LocalSet;

use bisim_game::{GameConfig, GameError, Phase, ProcessGraph, Result, Semantics, Session};

#[derive(Parser, Debug)]
#[command(name = "bisim", about = "Play the bisimulation game between two processes")]
struct Args {
    /// Transition system: one `source action target` per line
    #[arg(long)]
    lts: PathBuf,

    /// Left process (default: last declared)
    #[arg(long)]
    left: Option<String>,

    /// Right process (default: the one declared before the last)
    #[arg(long)]
    right: Option<String>,

    /// Defender answers under weak semantics
    #[arg(long)]
    weak: bool,

    /// Thinking delay of the automated players
    #[arg(long, default_value_t = 2000)]
    delay_ms: u64,

    /// Seed for the players' random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after this many rounds
    #[arg(long, default_value_t = 100)]
    max_rounds: u32,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match LocalSet::new().run_until(run(args)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let graph: ProcessGraph = std::fs::read_to_string(&args.lts)?.parse()?;

    let mut config = GameConfig::default()
        .with_thinking_delay(Duration::from_millis(args.delay_ms))
        .with_echo_log(false);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.weak {
        config = config.with_defender_semantics(Semantics::Weak);
    }

    let mut session = Session::new(graph, config);
    let (left, right) = match (args.left, args.right) {
        (Some(left), Some(right)) => (left, right),
        (left, right) => {
            let (first, second) = session
                .default_pair()
                .ok_or_else(|| GameError::UnknownProcess("<none declared>".into()))?;
            (left.unwrap_or(first), right.unwrap_or(second))
        }
    };

    for name in [&left, &right] {
        for (process, transitions) in session.explore(name)? {
            for t in transitions {
                log::debug!(
                    "{}: {} --{}--> {}",
                    name,
                    session.graph().label(process),
                    t.action,
                    session.graph().label(t.target)
                );
            }
        }
    }

    let game = session.new_game(&left, &right)?;
    let bisimilar = game.with(|g| g.rules().is_bisimilar());
    println!(
        "{left} and {right} are {}bisimilar",
        if bisimilar { "" } else { "not " }
    );

    let mut phase = game.subscribe();
    while !game.is_over() && game.round() <= args.max_rounds {
        if phase.changed().await.is_err() {
            break;
        }
    }
    session.hide();

    for line in game.log_lines() {
        println!("{line}");
    }
    match game.phase() {
        Phase::Finished { .. } => {}
        Phase::Aborted(reason) => println!("game aborted: {reason}"),
        _ => println!("no winner after {} rounds", args.max_rounds),
    }
    Ok(())
}

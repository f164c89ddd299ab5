use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use rand::Rng as _;
use tilerun_engine::{GameState, RngSeed};
use tilerun_evaluator::move_selector;

use crate::{
    command::strategy::StrategyArg,
    schema::report::{GameRecord, ReportSummary, SelfPlayReport, StrategyInfo},
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SelfPlayArg {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Stop each game after this many moves
    #[arg(long)]
    move_limit: Option<usize>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    #[clap(flatten)]
    strategy: StrategyArg,
}

pub(crate) fn run(arg: &SelfPlayArg) -> anyhow::Result<()> {
    let SelfPlayArg {
        games,
        move_limit,
        output,
        strategy: strategy_arg,
    } = arg;

    let (seed, mut rng) = strategy_arg.rng();
    let strategy = strategy_arg.build();

    let mut records = Vec::with_capacity(*games);
    for game in 0..*games {
        let game_seed: RngSeed = rng.random();
        let mut game_rng = game_seed.rng();
        let mut state = GameState::new(&mut game_rng);

        let end = move_selector::play_session(
            strategy.selector(),
            &mut state,
            &mut game_rng,
            *move_limit,
        )
        .with_context(|| format!("Game #{game} (seed {game_seed}) hit a corrupt tile"))?;

        eprintln!(
            "Game #{game}: {end}, score {}, {} moves, max tile {}",
            state.score(),
            state.move_count(),
            state.board().max_tile()
        );
        records.push(GameRecord {
            seed: game_seed,
            end: end.into(),
            stats: *state.stats(),
            max_tile: state.board().max_tile(),
            final_board: *state.board(),
        });
    }

    let summary = ReportSummary::from_games(&records);
    eprintln!(
        "Played {} games: mean score {:.1}, best score {}, max tile {}",
        summary.games, summary.mean_score, summary.best_score, summary.max_tile
    );

    let report = SelfPlayReport {
        played_at: Utc::now(),
        seed,
        strategy: StrategyInfo {
            kind: strategy_arg.strategy,
            policy: strategy_arg.policy,
            trials_per_direction: strategy_arg.trials.get(),
            parallel: strategy_arg.parallel,
            move_limit: *move_limit,
        },
        summary,
        games: records,
    };
    Output::save_json(&report, output.clone())?;

    Ok(())
}

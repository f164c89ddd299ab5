use anyhow::Context as _;
use tilerun_engine::GameState;

use crate::{
    command::strategy::{self, StrategyArg},
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SuggestArg {
    /// Board as 16 tile values in row-major order (read from stdin if omitted)
    board: Option<String>,
    #[clap(flatten)]
    strategy: StrategyArg,
}

pub(crate) fn run(arg: &SuggestArg) -> anyhow::Result<()> {
    let SuggestArg { board, strategy } = arg;

    let input = match board {
        Some(board) => board.clone(),
        None => util::read_stdin()?,
    };
    let state: GameState = input
        .parse()
        .with_context(|| format!("Failed to parse board: {}", input.trim()))?;

    let (_seed, mut rng) = strategy.rng();
    let direction = strategy
        .build()
        .explain_move(&state, &mut rng)
        .context("Failed to evaluate board")?;

    println!("{}", strategy::move_token(direction));
    Ok(())
}

use std::io::{self, BufRead, Write};

use anyhow::Context as _;
use tilerun_engine::{GameRng, GameState};

use crate::command::strategy::{self, Strategy, StrategyArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PipeArg {
    #[clap(flatten)]
    strategy: StrategyArg,
}

pub(crate) fn run(arg: &PipeArg) -> anyhow::Result<()> {
    let PipeArg { strategy } = arg;
    let (_seed, mut rng) = strategy.rng();
    let strategy = strategy.build();

    let answered = answer_boards(
        &strategy,
        &mut rng,
        io::stdin().lock(),
        io::stdout().lock(),
    )?;
    log::info!("Answered {answered} boards");
    Ok(())
}

/// Reads one board per line and answers each with one move token.
///
/// Blank lines are ignored. A line that is not a board is reported on stderr
/// and answered with `none`, so the driver always gets one answer per board.
/// Returns the number of answers written.
fn answer_boards<R, W>(
    strategy: &Strategy,
    rng: &mut GameRng,
    input: R,
    mut output: W,
) -> anyhow::Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut answered = 0_usize;
    for (i, line) in input.lines().enumerate() {
        let line = line.context("Failed to read board from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let direction = match line.parse::<GameState>() {
            Ok(state) => strategy
                .selector()
                .select_move(&state, rng)
                .with_context(|| format!("Failed to evaluate board on line {}", i + 1))?,
            Err(e) => {
                eprintln!("line {}: {e}", i + 1);
                None
            }
        };

        writeln!(output, "{}", strategy::move_token(direction))
            .context("Failed to write move to stdout")?;
        output.flush().context("Failed to flush stdout")?;
        answered += 1;
    }
    Ok(answered)
}

#[cfg(test)]
mod tests {
    use tilerun_engine::RngSeed;
    use tilerun_evaluator::static_evaluator::StaticHeuristicStrategy;

    use super::*;

    fn answer(input: &str) -> (String, usize) {
        let strategy = Strategy::Static(StaticHeuristicStrategy);
        let mut rng = "1".parse::<RngSeed>().unwrap().rng();
        let mut output = Vec::new();
        let answered = answer_boards(&strategy, &mut rng, input.as_bytes(), &mut output).unwrap();
        (String::from_utf8(output).unwrap(), answered)
    }

    #[test]
    fn test_one_answer_per_board_line() {
        let input = "0 0 0 0  0 2 0 0  0 0 0 0  0 0 0 0\n\n   \nnot a board\n";
        let (output, answered) = answer(input);
        assert_eq!(output, "up\nnone\n");
        assert_eq!(answered, 2);
    }

    #[test]
    fn test_terminal_and_short_boards_answer_none() {
        let input = "2 4 2 4  4 2 4 2  2 4 2 4  4 2 4 2\n2 0 0 0\n2 4 2 0  4 2 4 0  2 4 2 0  4 2 4 0";
        let (output, answered) = answer(input);
        assert_eq!(output, "none\nnone\nright\n");
        assert_eq!(answered, 3);
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        assert_eq!(answer(""), (String::new(), 0));
    }
}

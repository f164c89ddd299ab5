use clap::{Parser, Subcommand};
use env_logger::Env;

use self::{pipe::PipeArg, self_play::SelfPlayArg, suggest::SuggestArg};

mod pipe;
mod self_play;
pub(crate) mod strategy;
mod suggest;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Suggest a move for one board
    Suggest(#[clap(flatten)] SuggestArg),
    /// Answer one board per stdin line with one move per stdout line
    Pipe(#[clap(flatten)] PipeArg),
    /// Play local games and write a JSON report
    SelfPlay(#[clap(flatten)] SelfPlayArg),
}

pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = CommandArgs::parse();
    match args.mode {
        Mode::Suggest(arg) => suggest::run(&arg)?,
        Mode::Pipe(arg) => pipe::run(&arg)?,
        Mode::SelfPlay(arg) => self_play::run(&arg)?,
    }
    Ok(())
}

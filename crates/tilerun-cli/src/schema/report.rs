use chrono::{DateTime, Utc};
use serde::Serialize;
use tilerun_engine::{Board, GameStats, RngSeed};
use tilerun_evaluator::move_selector::SessionEnd;

use crate::command::strategy::{PolicyKind, StrategyKind};

/// Summary of a self-play run
#[derive(Debug, Clone, Serialize)]
pub struct SelfPlayReport {
    /// Timestamp when the run finished (ISO 8601 format)
    pub played_at: DateTime<Utc>,
    /// Seed of the stream the per-game seeds were drawn from
    pub seed: RngSeed,
    pub strategy: StrategyInfo,
    pub summary: ReportSummary,
    pub games: Vec<GameRecord>,
}

/// Strategy configuration used for every game of the run
#[derive(Debug, Clone, Serialize)]
pub struct StrategyInfo {
    pub kind: StrategyKind,
    pub policy: PolicyKind,
    pub trials_per_direction: usize,
    pub parallel: bool,
    pub move_limit: Option<usize>,
}

/// Aggregates over all games
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportSummary {
    pub games: usize,
    pub mean_score: f64,
    pub best_score: u64,
    pub mean_moves: f64,
    pub max_tile: u32,
}

impl ReportSummary {
    #[expect(clippy::cast_precision_loss)]
    pub fn from_games(games: &[GameRecord]) -> Self {
        if games.is_empty() {
            return Self::default();
        }
        let count = games.len() as f64;
        Self {
            games: games.len(),
            mean_score: games.iter().map(|g| g.stats.score() as f64).sum::<f64>() / count,
            best_score: games.iter().map(|g| g.stats.score()).max().unwrap_or(0),
            mean_moves: games.iter().map(|g| g.stats.move_count() as f64).sum::<f64>() / count,
            max_tile: games.iter().map(|g| g.max_tile).max().unwrap_or(0),
        }
    }
}

/// One finished game
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    /// Seed that reproduces this game on its own
    pub seed: RngSeed,
    pub end: GameEnd,
    pub stats: GameStats,
    pub max_tile: u32,
    pub final_board: Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameEnd {
    Terminal,
    NoMove,
    MoveLimit,
}

impl From<SessionEnd> for GameEnd {
    fn from(end: SessionEnd) -> Self {
        match end {
            SessionEnd::Terminal => Self::Terminal,
            SessionEnd::NoMove => Self::NoMove,
            SessionEnd::MoveLimit => Self::MoveLimit,
        }
    }
}

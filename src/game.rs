use anyhow::{Result, bail};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::agent::{Agent, AgentConfig, Move};
use crate::board::{Board, GameStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 9,
            cols: 9,
            mines: 10,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameReport {
    pub won: bool,
    pub moves: usize,
    pub reveals: usize,
    pub flags: usize,
    pub guesses: usize,
}

/// Plays one headless game with a seeded board.
///
/// `Guess` moves uncover a random non-mine cell, so the game is only lost if
/// the agent reveals a cell it claimed was safe.
pub fn play(config: &GameConfig, agent_config: &AgentConfig) -> Result<GameReport> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut board = Board::generate(config.rows, config.cols, config.mines, &mut rng)?;
    let mut agent = Agent::new(config.rows, config.cols, config.mines, agent_config);
    let mut report = GameReport {
        won: false,
        moves: 0,
        reveals: 0,
        flags: 0,
        guesses: 0,
    };
    // every move either flags or uncovers at least one cell
    let move_cap = 2 * board.grid().len() + 1;

    while board.status() == GameStatus::Playing {
        if report.moves >= move_cap {
            bail!("agent made no progress after {} moves", report.moves);
        }
        report.moves += 1;
        let revelations = match agent.next_move()? {
            Move::Reveal(cell) => {
                report.reveals += 1;
                board.reveal(cell)?
            }
            Move::Flag(_) => {
                report.flags += 1;
                continue;
            }
            Move::Guess => {
                report.guesses += 1;
                board.random_reveal(&mut rng)?
            }
        };
        for rev in revelations {
            agent.report(rev.cell, rev.clue)?;
        }
    }

    report.won = board.status() == GameStatus::Won;
    info!(
        seed = config.seed,
        won = report.won,
        moves = report.moves,
        guesses = report.guesses,
        "game finished"
    );
    Ok(report)
}

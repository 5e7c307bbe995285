use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use minelogic::agent::AgentConfig;
use minelogic::agent::knowledge::{Inference, KnowledgeBase};
use minelogic::board::Cell;
use minelogic::board::text::{Snapshot, parse_snapshot};
use minelogic::game::{GameConfig, play};
use minelogic::sat::dpll::Limits;
use minelogic::solver::{Backend, IncrementalSolver};

#[derive(Debug, Parser)]
#[command(name = "minelogic")]
#[command(about = "Minesweeper inference with a DPLL SAT core")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Classify the covered cells of a board snapshot
    Infer {
        path: String,
        #[arg(long, default_value = "dpll")]
        backend: Backend,
        #[arg(long, default_value_t = minelogic::sat::dpll::DEFAULT_MAX_NODES)]
        max_nodes: usize,
    },
    /// Play seeded headless games
    Play {
        #[arg(long, default_value_t = 9)]
        rows: usize,
        #[arg(long, default_value_t = 9)]
        cols: usize,
        #[arg(long, default_value_t = 10)]
        mines: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 1)]
        games: usize,
        #[arg(long, default_value = "dpll")]
        backend: Backend,
        #[arg(long, default_value_t = minelogic::sat::dpll::DEFAULT_MAX_NODES)]
        max_nodes: usize,
        #[arg(long)]
        no_memo: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Cmd::Infer {
            path,
            backend,
            max_nodes,
        } => infer_cmd(&path, backend, max_nodes)?,
        Cmd::Play {
            rows,
            cols,
            mines,
            seed,
            games,
            backend,
            max_nodes,
            no_memo,
        } => play_cmd(
            GameConfig {
                rows,
                cols,
                mines,
                seed,
            },
            games,
            AgentConfig {
                backend,
                limits: Limits::nodes(max_nodes),
                memoize: !no_memo,
            },
        )?,
    }
    Ok(())
}

fn infer_cmd(path: &str, backend: Backend, max_nodes: usize) -> Result<()> {
    let text = std::fs::read_to_string(path)?;
    let snapshot = parse_snapshot(&text)?;
    let mut kb: KnowledgeBase<Cell, Box<dyn IncrementalSolver>> =
        KnowledgeBase::with_solver(backend.build(Limits::nodes(max_nodes)));
    snapshot.load_into(&mut kb)?;

    let found = kb.infer(snapshot.frontier());
    print_grid(&snapshot, &mut kb);
    println!(
        "backend={} clauses={} safe={} mines={} solve_calls={}",
        kb.backend_name(),
        kb.num_clauses(),
        found.safe.len(),
        found.mines.len(),
        kb.stats().solve_calls
    );
    Ok(())
}

fn print_grid(snapshot: &Snapshot, kb: &mut KnowledgeBase<Cell, Box<dyn IncrementalSolver>>) {
    for r in 0..snapshot.grid.rows {
        let mut line = Vec::with_capacity(snapshot.grid.cols);
        for c in 0..snapshot.grid.cols {
            let cell = Cell::new(r, c);
            let token = if let Some(&(_, clue)) = snapshot.clues.iter().find(|(x, _)| *x == cell) {
                clue.to_string()
            } else if snapshot.flagged.contains(&cell) {
                "*".to_string()
            } else {
                match kb.query(cell) {
                    Inference::Safe => "S".to_string(),
                    Inference::Mine => "M".to_string(),
                    Inference::Unknown => "?".to_string(),
                }
            };
            line.push(token);
        }
        println!("{}", line.join(" "));
    }
}

fn play_cmd(base: GameConfig, games: usize, agent: AgentConfig) -> Result<()> {
    let mut won = 0usize;
    let mut guesses = 0usize;
    for i in 0..games {
        let config = GameConfig {
            seed: base.seed.wrapping_add(i as u64),
            ..base
        };
        let report = play(&config, &agent)?;
        println!(
            "game={} seed={} result={} moves={} reveals={} flags={} guesses={}",
            i,
            config.seed,
            if report.won { "WON" } else { "LOST" },
            report.moves,
            report.reveals,
            report.flags,
            report.guesses
        );
        if report.won {
            won += 1;
        }
        guesses += report.guesses;
    }
    println!(
        "SUMMARY: {}/{} won | backend={} avg_guesses={:.2}",
        won,
        games,
        agent.backend,
        guesses as f64 / games.max(1) as f64
    );
    Ok(())
}

use minelogic::agent::knowledge::{Inference, KnowledgeBase};
use minelogic::agent::{Agent, AgentConfig, Move};
use minelogic::board::text::parse_snapshot;
use minelogic::board::{Board, Cell, GameStatus};
use minelogic::error::{BoardError, ConstraintError};
use minelogic::game::{GameConfig, play};
use minelogic::solver::Backend;

#[test]
fn snapshot_column_pins_the_middle_mine() {
    let snap = parse_snapshot(
        "
        _ 1 0
        _ 1 0
        _ 1 0
        ",
    )
    .expect("parse");
    let mut kb: KnowledgeBase<Cell> = KnowledgeBase::new();
    snap.load_into(&mut kb).expect("load");
    let found = kb.infer(snap.frontier());
    assert_eq!(
        found.safe.into_iter().collect::<Vec<_>>(),
        vec![Cell::new(0, 0), Cell::new(2, 0)]
    );
    assert_eq!(found.mines.into_iter().collect::<Vec<_>>(), vec![Cell::new(1, 0)]);
}

#[test]
fn snapshot_flags_become_mines() {
    let snap = parse_snapshot("* 1\n1 1").expect("parse");
    let mut kb: KnowledgeBase<Cell> = KnowledgeBase::new();
    snap.load_into(&mut kb).expect("load");
    assert_eq!(kb.query(Cell::new(0, 0)), Inference::Mine);
    assert_eq!(kb.query(Cell::new(1, 1)), Inference::Safe);
}

#[test]
fn inconsistent_snapshot_is_rejected_on_load() {
    let snap = parse_snapshot("1 1 1").expect("parse");
    let mut kb: KnowledgeBase<Cell> = KnowledgeBase::new();
    assert!(snap.load_into(&mut kb).is_err());
}

#[test]
fn agent_reveals_then_flags_then_guesses() {
    let mut agent = Agent::new(1, 3, 1, &AgentConfig::default());
    agent.report(Cell::new(0, 0), 0).expect("report");
    assert_eq!(agent.next_move().expect("move"), Move::Reveal(Cell::new(0, 1)));

    agent.report(Cell::new(0, 1), 1).expect("report");
    assert_eq!(agent.next_move().expect("move"), Move::Flag(Cell::new(0, 2)));
    assert!(agent.flagged().contains(&Cell::new(0, 2)));
    assert_eq!(agent.next_move().expect("move"), Move::Guess);
}

#[test]
fn agent_guesses_without_information() {
    let mut agent = Agent::new(4, 4, 3, &AgentConfig::default());
    assert_eq!(agent.next_move().expect("move"), Move::Guess);
    assert!(agent.frontier().is_empty());
}

#[test]
fn agent_rejects_bad_reports() {
    let mut agent = Agent::new(2, 2, 1, &AgentConfig::default());
    assert!(matches!(
        agent.report(Cell::new(3, 3), 1),
        Err(BoardError::OutOfBounds { .. })
    ));
    assert!(matches!(
        agent.report(Cell::new(0, 0), 4),
        Err(BoardError::ClueTooLarge { .. })
    ));
}

#[test]
fn rejected_report_does_not_drop_later_ones() {
    let mut agent = Agent::new(1, 5, 1, &AgentConfig::default());
    // (0,1) claims two mines but only (0,0) is still covered next to it
    agent.report(Cell::new(0, 1), 2).expect("report");
    agent.report(Cell::new(0, 2), 0).expect("report");
    assert_eq!(
        agent.next_move(),
        Err(ConstraintError::MineCountOutOfRange {
            mine_count: 2,
            cells: 1
        })
    );
    assert_eq!(agent.knowledge().known(Cell::new(0, 2)), Some(false));
    assert_eq!(agent.next_move().expect("move"), Move::Reveal(Cell::new(0, 3)));
}

#[test]
fn agent_moves_are_safe_on_a_fixed_board() {
    let mines = [Cell::new(1, 1), Cell::new(4, 4), Cell::new(4, 1)];
    let mut board = Board::new(6, 6, mines).expect("board");
    let mut agent = Agent::new(6, 6, 3, &AgentConfig::default());
    for rev in board.reveal(Cell::new(0, 5)).expect("reveal") {
        agent.report(rev.cell, rev.clue).expect("report");
    }
    let mut steps = 0;
    while board.status() == GameStatus::Playing && steps < 200 {
        steps += 1;
        match agent.next_move().expect("move") {
            Move::Reveal(cell) => {
                assert!(!board.is_mine(cell), "agent revealed a mine at {cell}");
                for rev in board.reveal(cell).expect("reveal") {
                    agent.report(rev.cell, rev.clue).expect("report");
                }
            }
            Move::Flag(cell) => assert!(board.is_mine(cell), "wrong flag at {cell}"),
            Move::Guess => break,
        }
    }
    assert_ne!(board.status(), GameStatus::Lost);
}

#[test]
fn seeded_games_are_never_lost() {
    for seed in 0..8 {
        let config = GameConfig {
            rows: 8,
            cols: 8,
            mines: 8,
            seed,
        };
        let report = play(&config, &AgentConfig::default()).expect("game");
        assert!(report.won, "seed {seed} lost");
        assert!(report.guesses >= 1);
        assert!(report.flags <= config.mines);
    }
}

#[test]
fn backends_play_identical_games() {
    let config = GameConfig {
        rows: 9,
        cols: 9,
        mines: 10,
        seed: 42,
    };
    let dpll = play(&config, &AgentConfig::default()).expect("dpll");
    let varisat = play(
        &config,
        &AgentConfig {
            backend: Backend::Varisat,
            ..AgentConfig::default()
        },
    )
    .expect("varisat");
    assert_eq!(dpll, varisat);
}

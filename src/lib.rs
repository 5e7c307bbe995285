//! Propositional reasoning for Minesweeper.
//!
//! Clues become exact cardinality constraints in CNF, a DPLL procedure with
//! unit propagation answers entailment queries, and an agent turns the answers
//! into moves.

pub mod agent;
pub mod board;
pub mod cnf;
pub mod error;
pub mod game;
pub mod sat;
pub mod solver;

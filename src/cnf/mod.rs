pub mod cardinality;
#[allow(clippy::module_inception)]
pub mod cnf;
pub mod text;

pub use cnf::{Clause, Cnf, Lit, UnitResolution, Var};

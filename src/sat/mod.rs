pub mod assignment;
pub mod dpll;
pub mod entail;
pub mod propagate;
pub mod search;

//! Symbolic notation for hand-written formulas.
//!
//! Literals are alphanumeric/underscore symbols with an optional `!` prefix,
//! clauses join literals with `||`, and the literal string `FALSE` stands for
//! the empty clause. Symbols are interned to variables in first-seen order.

use anyhow::{Result, bail};
use indexmap::IndexMap;

use super::cnf::{Clause, Cnf, Lit, Var};

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    vars: IndexMap<String, Var>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn var(&mut self, symbol: &str) -> Var {
        if let Some(&v) = self.vars.get(symbol) {
            return v;
        }
        let v = self.vars.len() as Var + 1;
        self.vars.insert(symbol.to_string(), v);
        v
    }

    pub fn lookup(&self, symbol: &str) -> Option<Var> {
        self.vars.get(symbol).copied()
    }

    pub fn symbol(&self, var: Var) -> Option<&str> {
        let idx = (var as usize).checked_sub(1)?;
        self.vars.get_index(idx).map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn lit(&mut self, text: &str) -> Result<Lit> {
        let text = text.trim();
        let (symbol, sign) = match text.strip_prefix('!') {
            Some(rest) => (rest, false),
            None => (text, true),
        };
        if symbol.is_empty() {
            bail!("empty literal symbol in '{}'", text);
        }
        if !symbol.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
            bail!("invalid literal symbol '{}'", symbol);
        }
        Ok(Lit::new(self.var(symbol), sign))
    }

    pub fn clause(&mut self, text: &str) -> Result<Clause> {
        let text = text.trim();
        if text == "FALSE" {
            return Ok(Clause::empty());
        }
        text.split("||").map(|part| self.lit(part)).collect()
    }

    /// Builds a formula from clause strings. Tautological clauses are dropped.
    pub fn sentence<S: AsRef<str>>(&mut self, clauses: &[S]) -> Result<Cnf> {
        let mut cnf = Cnf::new(0);
        for text in clauses {
            let clause = self.clause(text.as_ref())?;
            cnf.add_clause(clause);
        }
        cnf.num_vars = cnf.num_vars.max(self.len() as u32);
        Ok(cnf)
    }

    fn name(&self, var: Var) -> String {
        self.symbol(var)
            .map(str::to_string)
            .unwrap_or_else(|| format!("x{var}"))
    }

    pub fn render_lit(&self, lit: Lit) -> String {
        let name = self.name(lit.var);
        if lit.sign { name } else { format!("!{name}") }
    }

    /// Renders a clause with symbol names, literals sorted by name.
    pub fn render_clause(&self, clause: &Clause) -> String {
        if clause.is_empty() {
            return "FALSE".to_string();
        }
        let mut parts = clause
            .lits()
            .iter()
            .map(|&l| (self.name(l.var), l))
            .collect::<Vec<_>>();
        parts.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.sign.cmp(&b.1.sign)));
        parts
            .into_iter()
            .map(|(_, l)| self.render_lit(l))
            .collect::<Vec<_>>()
            .join(" || ")
    }
}

use crate::cnf::{Lit, Var};

/// Two different values demanded for the same variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    pub var: Var,
}

/// Partial map from variable to value, indexed by variable (slot 0 unused).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<Option<bool>>,
}

impl Assignment {
    pub fn new(num_vars: u32) -> Self {
        Self {
            values: vec![None; num_vars as usize + 1],
        }
    }

    pub fn num_vars(&self) -> u32 {
        (self.values.len() - 1) as u32
    }

    pub fn value(&self, var: Var) -> Option<bool> {
        self.values.get(var as usize).copied().flatten()
    }

    pub fn lit_value(&self, lit: Lit) -> Option<bool> {
        self.value(lit.var).map(|v| lit.under(v))
    }

    /// Makes `lit` true. `Ok(true)` when the variable was free, `Ok(false)`
    /// when it already had that value.
    pub fn assign(&mut self, lit: Lit) -> Result<bool, Conflict> {
        let idx = lit.var as usize;
        if idx >= self.values.len() {
            self.values.resize(idx + 1, None);
        }
        match self.values[idx] {
            Some(v) if v == lit.sign => Ok(false),
            Some(_) => Err(Conflict { var: lit.var }),
            None => {
                self.values[idx] = Some(lit.sign);
                Ok(true)
            }
        }
    }

    pub fn is_assigned(&self, var: Var) -> bool {
        self.value(var).is_some()
    }

    pub fn assigned_count(&self) -> usize {
        self.values.iter().skip(1).filter(|v| v.is_some()).count()
    }

    pub fn as_slice(&self) -> &[Option<bool>] {
        &self.values
    }

    /// Assigned literals in variable order.
    pub fn lits(&self) -> Vec<Lit> {
        self.values
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(v, val)| val.map(|b| Lit::new(v as Var, b)))
            .collect()
    }

    /// Total model with free variables set to false.
    pub fn to_model(&self) -> Vec<bool> {
        self.values.iter().map(|v| v.unwrap_or(false)).collect()
    }
}

// ─────────────────────────────────────────────────────────────────────
// Love-OS — Trajectory Record
// ─────────────────────────────────────────────────────────────────────
//! Columnar record of one simulation run: a time axis plus named
//! series for state components and derived observables.
//!
//! Append-only, owned exclusively by the run that produced it.
//! Consumers (CSV export, plotting, the event detector) read it
//! after the run completes.

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};

/// Ordered sequence of (time, values…) records from one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    names: Vec<String>,
    times: Vec<f64>,
    columns: Vec<Vec<f64>>,
}

impl Trajectory {
    /// Create an empty trajectory with the given column names.
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|s| s.to_string()).collect(),
            times: Vec::new(),
            columns: vec![Vec::new(); names.len()],
        }
    }

    /// Pre-allocate capacity for `n` records.
    pub fn with_capacity(names: &[&str], n: usize) -> Self {
        Self {
            names: names.iter().map(|s| s.to_string()).collect(),
            times: Vec::with_capacity(n),
            columns: vec![Vec::with_capacity(n); names.len()],
        }
    }

    /// Append one record. `values` must match the column count.
    pub fn push(&mut self, t: f64, values: &[f64]) -> KernelResult<()> {
        if values.len() != self.columns.len() {
            return Err(KernelError::Internal(format!(
                "trajectory record has {} values, expected {}",
                values.len(),
                self.columns.len()
            )));
        }
        self.times.push(t);
        for (col, &v) in self.columns.iter_mut().zip(values) {
            col.push(v);
        }
        Ok(())
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Series for a named column, if present.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Last recorded value of a named column.
    pub fn last(&self, name: &str) -> Option<f64> {
        self.column(name).and_then(|c| c.last().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_read() {
        let mut tr = Trajectory::new(&["r", "x"]);
        tr.push(0.0, &[0.1, 0.2]).unwrap();
        tr.push(0.5, &[0.3, 0.4]).unwrap();
        assert_eq!(tr.len(), 2);
        assert_eq!(tr.column("r"), Some(&[0.1, 0.3][..]));
        assert_eq!(tr.column("x"), Some(&[0.2, 0.4][..]));
        assert_eq!(tr.last("x"), Some(0.4));
    }

    #[test]
    fn test_unknown_column() {
        let tr = Trajectory::new(&["r"]);
        assert!(tr.column("nope").is_none());
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let mut tr = Trajectory::new(&["r", "x"]);
        assert!(tr.push(0.0, &[1.0]).is_err());
    }

    #[test]
    fn test_equality_for_replay_checks() {
        let mut a = Trajectory::new(&["r"]);
        let mut b = Trajectory::new(&["r"]);
        a.push(0.0, &[1.0]).unwrap();
        b.push(0.0, &[1.0]).unwrap();
        assert_eq!(a, b);
    }
}

//! The outcome of a solve, and the values that can be read from it.
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use crate::{LinearExpr, ModelError};

/// How a solve terminated.
///
/// Only [SolveStatus::Optimal] carries values. The other statuses are normal
/// answers about the model and are never raised as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// An optimal solution was found
    Optimal,
    /// There exists no solution that satisfies all of the constraints
    Infeasible,
    /// The objective can be made infinitely good without violating any constraint
    Unbounded,
    /// The solver failed or returned a status that could not be interpreted
    NotSolved,
}

impl SolveStatus {
    /// Check if the status indicates an optimal solution.
    pub fn is_optimal(self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }

    /// Get a human-readable string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::NotSolved => "not_solved",
        }
    }
}

impl Display for SolveStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of one solve.
///
/// A new result is produced by every solve; it does not change when the model
/// it was computed from is modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub(crate) status: SolveStatus,
    pub(crate) values: HashMap<String, f64>,
    pub(crate) objective: f64,
    pub(crate) message: Option<String>,
}

impl SolveResult {
    pub(crate) fn optimal(values: HashMap<String, f64>, objective: f64) -> Self {
        SolveResult {
            status: SolveStatus::Optimal,
            values,
            objective,
            message: None,
        }
    }

    pub(crate) fn failed(status: SolveStatus, message: Option<String>) -> Self {
        SolveResult {
            status,
            values: HashMap::new(),
            objective: f64::NAN,
            message,
        }
    }

    /// How the solve terminated
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Shorthand for `self.status().is_optimal()`
    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    /// The error reported by the solver when the status is [SolveStatus::NotSolved]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn ensure_optimal(&self) -> Result<(), ModelError> {
        if self.is_optimal() {
            Ok(())
        } else {
            Err(ModelError::ResultNotAvailable(format!(
                "the solve terminated with status {}",
                self.status
            )))
        }
    }

    /// The value reached by the objective
    pub fn objective_value(&self) -> Result<f64, ModelError> {
        self.ensure_optimal()?;
        Ok(self.objective)
    }

    /// The value of every variable of the model, including the ones that
    /// appear neither in the objective nor in any constraint
    pub fn values(&self) -> Result<&HashMap<String, f64>, ModelError> {
        self.ensure_optimal()?;
        Ok(&self.values)
    }

    /// The value of a single variable
    pub fn value(&self, name: &str) -> Result<f64, ModelError> {
        self.values()?
            .get(name)
            .copied()
            .ok_or_else(|| ModelError::UnknownVariable(name.to_string()))
    }

    /// Evaluate an expression with the values of the solution
    ///
    /// Variables missing from the solution count as 0.
    pub fn eval(&self, expr: &LinearExpr) -> Result<f64, ModelError> {
        let values = self.values()?;
        Ok(expr.eval_with(|name| values.get(name).copied().unwrap_or(0.)))
    }
}

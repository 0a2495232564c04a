//! Errors raised by the model builder and by result extraction.
//!
//! Solver outcomes such as infeasibility are not errors: they are reported
//! through [SolveStatus](crate::SolveStatus).
use thiserror::Error;

/// An error caused by a malformed model definition or by reading results
/// that do not exist.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A variable definition is malformed or its name is already taken
    #[error("[VARIABLE_INVALID_SPEC] invalid definition for variable `{name}`: {reason}")]
    InvalidVariableSpec {
        /// The offending variable
        name: String,
        /// What is wrong with it
        reason: String,
    },
    /// An objective or a constraint references a variable that was never defined
    #[error("[VARIABLE_UNKNOWN] variable `{0}` is not defined")]
    UnknownVariable(String),
    /// A constraint uses an operator other than `<=`, `>=` or `=`
    #[error("[CONSTRAINT_INVALID_OPERATOR] invalid constraint operator `{0}`")]
    InvalidOperator(String),
    /// A coefficient or a right hand side is NaN or infinite
    #[error("[COEFFICIENT_NOT_FINITE] {0}")]
    NonFiniteCoefficient(String),
    /// The model cannot be solved yet
    #[error("[MODEL_INCOMPLETE] incomplete model: {0}")]
    IncompleteModel(&'static str),
    /// Values were requested without an optimal solution to read them from
    #[error("[RESULT_NOT_AVAILABLE] no optimal result available: {0}")]
    ResultNotAvailable(String),
}

impl ModelError {
    pub(crate) fn invalid_variable(name: &str, reason: impl Into<String>) -> Self {
        ModelError::InvalidVariableSpec {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidVariableSpec { .. } => "VARIABLE_INVALID_SPEC",
            ModelError::UnknownVariable(_) => "VARIABLE_UNKNOWN",
            ModelError::InvalidOperator(_) => "CONSTRAINT_INVALID_OPERATOR",
            ModelError::NonFiniteCoefficient(_) => "COEFFICIENT_NOT_FINITE",
            ModelError::IncompleteModel(_) => "MODEL_INCOMPLETE",
            ModelError::ResultNotAvailable(_) => "RESULT_NOT_AVAILABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ModelError;

    #[test]
    fn display_carries_code() {
        let err = ModelError::UnknownVariable("x3".into());
        assert_eq!(err.to_string(), "[VARIABLE_UNKNOWN] variable `x3` is not defined");

        let err = ModelError::invalid_variable("x", "lower bound 2 > upper bound 1");
        assert_eq!(err.code(), "VARIABLE_INVALID_SPEC");
        assert!(err.to_string().contains("`x`"));
    }
}

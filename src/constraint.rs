//! Constraints define the (in)equalities that must hold in the solution.
use core::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use crate::expression::LinearExpr;
use crate::ModelError;

/// The relation between the left hand side of a constraint and its constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    /// less than or equal
    #[cfg_attr(feature = "serde", serde(rename = "<="))]
    Le,
    /// greater than or equal
    #[cfg_attr(feature = "serde", serde(rename = ">="))]
    Ge,
    /// equals
    #[cfg_attr(feature = "serde", serde(rename = "="))]
    Eq,
}

impl Operator {
    /// The usual textual representation of the operator
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Eq => "=",
        }
    }

    /// Whether `lhs op rhs` holds
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Operator::Le => lhs <= rhs,
            Operator::Ge => lhs >= rhs,
            Operator::Eq => lhs == rhs,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<=" | "≤" => Ok(Operator::Le),
            ">=" | "≥" => Ok(Operator::Ge),
            "=" | "==" => Ok(Operator::Eq),
            other => Err(ModelError::InvalidOperator(other.to_string())),
        }
    }
}

/// Anything that can name a constraint operator.
///
/// Typed operators always convert; text is parsed and rejected with
/// [ModelError::InvalidOperator] when it is not `<=`, `>=` or `=`.
pub trait IntoOperator {
    /// Get the operator
    fn into_operator(self) -> Result<Operator, ModelError>;
}

impl IntoOperator for Operator {
    fn into_operator(self) -> Result<Operator, ModelError> {
        Ok(self)
    }
}

impl IntoOperator for &str {
    fn into_operator(self) -> Result<Operator, ModelError> {
        self.parse()
    }
}

impl IntoOperator for String {
    fn into_operator(self) -> Result<Operator, ModelError> {
        self.parse()
    }
}

impl IntoOperator for &String {
    fn into_operator(self) -> Result<Operator, ModelError> {
        self.parse()
    }
}

/// A constraint represents a single (in)equality that must hold in the solution:
/// `expression operator rhs`.
#[derive(Clone, PartialEq)]
pub struct Constraint {
    pub(crate) expression: LinearExpr,
    pub(crate) operator: Operator,
    pub(crate) rhs: f64,
}

impl Constraint {
    /// Create a constraint. The variables it references are checked when it is added to a model.
    pub fn new(expression: LinearExpr, operator: Operator, rhs: f64) -> Constraint {
        Constraint {
            expression,
            operator,
            rhs,
        }
    }

    /// The left hand side
    pub fn expression(&self) -> &LinearExpr {
        &self.expression
    }

    /// The relation between both sides
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The right hand side constant
    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Whether the constraint holds for the given values, within `tolerance`
    pub fn is_satisfied_by<F: Fn(&str) -> f64>(&self, value: F, tolerance: f64) -> bool {
        let lhs = self.expression.eval_with(value);
        match self.operator {
            Operator::Le => lhs <= self.rhs + tolerance,
            Operator::Ge => lhs >= self.rhs - tolerance,
            Operator::Eq => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.expression, self.operator, self.rhs)
    }
}

impl Debug for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// equals
pub fn eq<E: IntoIterator<Item = (N, f64)>, N: Into<String>>(expr: E, rhs: f64) -> Constraint {
    Constraint::new(expr.into_iter().collect(), Operator::Eq, rhs)
}

/// less than or equal
pub fn leq<E: IntoIterator<Item = (N, f64)>, N: Into<String>>(expr: E, rhs: f64) -> Constraint {
    Constraint::new(expr.into_iter().collect(), Operator::Le, rhs)
}

/// greater than or equal
pub fn geq<E: IntoIterator<Item = (N, f64)>, N: Into<String>>(expr: E, rhs: f64) -> Constraint {
    Constraint::new(expr.into_iter().collect(), Operator::Ge, rhs)
}

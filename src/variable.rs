//! A [Variable] is a named decision variable of a [Model](crate::Model).
//! The goal of the solver is to find optimal values for all variables in a model.
//!
//! Each variable has a [VariableDefinition] that sets its bounds and its [VarKind].
use std::collections::Bound;
use std::fmt::{Display, Formatter};
use std::ops::RangeBounds;
use std::str::FromStr;

use crate::ModelError;

/// The domain of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VarKind {
    /// Any real value between the bounds
    Continuous,
    /// Whole numbers between the bounds
    Integer,
    /// 0 or 1. The bounds of a binary variable are always `[0, 1]`
    Binary,
}

impl VarKind {
    /// The lowercase name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Continuous => "continuous",
            VarKind::Integer => "integer",
            VarKind::Binary => "binary",
        }
    }
}

impl Display for VarKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `continuous`, `integer` or `binary`, ignoring case and an optional `Lp` prefix.
///
/// ```
/// # use rule_lp::VarKind;
/// assert_eq!("Binary".parse::<VarKind>(), Ok(VarKind::Binary));
/// assert_eq!("LpInteger".parse::<VarKind>(), Ok(VarKind::Integer));
/// assert!("boolean".parse::<VarKind>().is_err());
/// ```
impl FromStr for VarKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.strip_prefix("lp").unwrap_or(&lower) {
            "continuous" => Ok(VarKind::Continuous),
            "integer" => Ok(VarKind::Integer),
            "binary" => Ok(VarKind::Binary),
            _ => Err(ModelError::InvalidVariableSpec {
                name: String::new(),
                reason: format!("unknown variable kind `{}`", s),
            }),
        }
    }
}

/// Defines the properties of a variable, such as its lower and upper bounds.
///
/// Infinite bounds mean "no bound in that direction".
#[derive(Clone, PartialEq, Debug)]
pub struct VariableDefinition {
    pub(crate) min: f64,
    pub(crate) max: f64,
    pub(crate) kind: VarKind,
}

impl VariableDefinition {
    /// Creates an unbounded continuous variable
    pub fn new() -> Self {
        VariableDefinition {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            kind: VarKind::Continuous,
        }
    }

    /// Set the lower and/or higher bounds of the variable
    ///
    /// ## Examples
    /// ```
    /// # use rule_lp::variable;
    /// assert_eq!(
    ///     variable().bounds(1..2),
    ///     variable().min(1).max(2)
    /// );
    ///
    /// assert_eq!(
    ///     variable().bounds(..=2),
    ///     variable().max(2)
    /// );
    /// ```
    pub fn bounds<N: Into<f64> + Copy, B: RangeBounds<N>>(self, bounds: B) -> Self {
        self.min(match bounds.start_bound() {
            Bound::Included(&x) => x.into(),
            Bound::Excluded(&x) => x.into(),
            Bound::Unbounded => f64::NEG_INFINITY,
        })
        .max(match bounds.end_bound() {
            Bound::Included(&x) => x.into(),
            Bound::Excluded(&x) => x.into(),
            Bound::Unbounded => f64::INFINITY,
        })
    }

    /// Set the lower bound of the variable
    pub fn min<N: Into<f64>>(mut self, min: N) -> Self {
        self.min = min.into();
        self
    }

    /// Set the higher bound of the variable
    pub fn max<N: Into<f64>>(mut self, max: N) -> Self {
        self.max = max.into();
        self
    }

    /// Set both the lower and higher bounds of the variable
    pub fn clamp<N1: Into<f64>, N2: Into<f64>>(self, min: N1, max: N2) -> Self {
        self.min(min).max(max)
    }

    /// Set the kind of the variable
    pub fn kind(mut self, kind: VarKind) -> Self {
        self.kind = kind;
        self
    }

    /// Make the variable take whole values only
    pub fn integer(self) -> Self {
        self.kind(VarKind::Integer)
    }

    /// Make the variable take the values 0 or 1
    pub fn binary(self) -> Self {
        self.kind(VarKind::Binary).clamp(0, 1)
    }

    /// Checks the definition and applies the binary normalization.
    pub(crate) fn validated(mut self, name: &str) -> Result<Self, ModelError> {
        if self.kind == VarKind::Binary {
            self.min = 0.;
            self.max = 1.;
        }
        if self.min.is_nan() || self.max.is_nan() {
            return Err(ModelError::invalid_variable(name, "bounds must be numbers"));
        }
        if self.min == f64::INFINITY {
            return Err(ModelError::invalid_variable(name, "lower bound is +inf"));
        }
        if self.max == f64::NEG_INFINITY {
            return Err(ModelError::invalid_variable(name, "upper bound is -inf"));
        }
        if self.min > self.max {
            return Err(ModelError::invalid_variable(
                name,
                format!("lower bound {} > upper bound {}", self.min, self.max),
            ));
        }
        Ok(self)
    }
}

/// Creates an unbounded continuous variable
impl Default for VariableDefinition {
    fn default() -> Self {
        VariableDefinition::new()
    }
}

/// The `(lower, upper, kind)` triple, where `None` means unbounded.
impl From<(Option<f64>, Option<f64>, VarKind)> for VariableDefinition {
    fn from((lower, upper, kind): (Option<f64>, Option<f64>, VarKind)) -> Self {
        VariableDefinition {
            min: lower.unwrap_or(f64::NEG_INFINITY),
            max: upper.unwrap_or(f64::INFINITY),
            kind,
        }
    }
}

/// Returns an anonymous unbounded continuous variable definition
pub fn variable() -> VariableDefinition {
    VariableDefinition::default()
}

/// A variable registered in a model.
#[derive(Clone, PartialEq, Debug)]
pub struct Variable {
    pub(crate) name: String,
    pub(crate) definition: VariableDefinition,
}

impl Variable {
    /// The unique name of the variable within its model
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lower bound, or `None` when the variable has none
    pub fn lower(&self) -> Option<f64> {
        Some(self.definition.min).filter(|b| b.is_finite())
    }

    /// The upper bound, or `None` when the variable has none
    pub fn upper(&self) -> Option<f64> {
        Some(self.definition.max).filter(|b| b.is_finite())
    }

    /// The domain of the variable
    pub fn kind(&self) -> VarKind {
        self.definition.kind
    }

    /// The full definition, with infinite values for missing bounds
    pub fn definition(&self) -> &VariableDefinition {
        &self.definition
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let VariableDefinition { min, max, kind } = self.definition;
        write!(f, "{} <= {} <= {} ({})", min, self.name, max, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_ignores_given_bounds() {
        let def = variable().clamp(-5, 7).kind(VarKind::Binary);
        let def = def.validated("b").unwrap();
        assert_eq!((def.min, def.max), (0., 1.));
    }

    #[test]
    fn reversed_bounds_are_rejected() {
        let err = variable().clamp(3, 1).validated("x").unwrap_err();
        assert!(matches!(err, ModelError::InvalidVariableSpec { ref name, .. } if name == "x"));
    }

    #[test]
    fn infinite_bounds_stay_valid() {
        let def: VariableDefinition = (None, Some(4.), VarKind::Integer).into();
        assert!(def.validated("y").is_ok());
        assert!(variable().min(f64::INFINITY).validated("y").is_err());
        assert!(variable().max(f64::NAN).validated("y").is_err());
    }

    #[test]
    fn display() {
        let var = Variable {
            name: "x".into(),
            definition: variable().min(0),
        };
        assert_eq!(var.to_string(), "0 <= x <= inf (continuous)");
    }
}

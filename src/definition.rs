//! A serializable description of a whole model, to build and solve it in one go.
//!
//! ```
//! # #[cfg(feature = "microlp")] {
//! use rule_lp::ModelSpec;
//!
//! let spec = ModelSpec::from_json(r#"{
//!     "name": "rules",
//!     "sense": "maximise",
//!     "variables": {
//!         "x1": { "lower": 0, "upper": 10 },
//!         "x2": { "lower": 0, "kind": "continuous" }
//!     },
//!     "objective": { "x1": 1, "x2": 2 },
//!     "constraints": [
//!         { "coefficients": { "x1": 1, "x2": 1 }, "operator": "<=", "rhs": 10 }
//!     ]
//! }"#)?;
//! let result = spec.run()?;
//! assert!((result.value("x2")? - 10.).abs() < 1e-9);
//! # }
//! # Ok::<_, rule_lp::DefinitionError>(())
//! ```
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::DEFAULT_MODEL_NAME;
use crate::{Model, ModelError, ObjectiveDirection, VarKind};

/// An error raised while reading a [ModelSpec]
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The document is not valid JSON, or does not have the expected shape
    #[error("malformed model definition: {0}")]
    Json(#[from] serde_json::Error),
    /// The document describes an invalid model
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// The bounds and the kind of one variable. Missing bounds mean unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    /// Lower bound
    #[serde(default)]
    pub lower: Option<f64>,
    /// Upper bound
    #[serde(default)]
    pub upper: Option<f64>,
    /// `continuous`, `integer` or `binary`
    #[serde(default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    VarKind::Continuous.as_str().to_string()
}

/// One `coefficients operator rhs` constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSpec {
    /// The coefficient of each variable on the left hand side
    pub coefficients: BTreeMap<String, f64>,
    /// `<=`, `>=` or `=`
    pub operator: String,
    /// The right hand side constant
    pub rhs: f64,
}

/// A whole model: variables, objective and constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// The name of the model
    #[serde(default = "default_name")]
    pub name: String,
    /// Whether the objective is maximised (the default) or minimised
    #[serde(default = "default_sense")]
    pub sense: ObjectiveDirection,
    /// The variables, by name, in document order.
    /// A name that appears twice is rejected by [ModelSpec::build].
    #[serde(with = "entries")]
    pub variables: Vec<(String, VariableSpec)>,
    /// The coefficient of each variable in the objective
    #[serde(default)]
    pub objective: Option<BTreeMap<String, f64>>,
    /// The constraints, in order
    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
}

fn default_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

fn default_sense() -> ObjectiveDirection {
    ObjectiveDirection::Maximisation
}

/// Reads a JSON object as a list of entries, keeping the order and the repeated keys
mod entries {
    use std::fmt::{self, Formatter};

    use serde::de::{Deserializer, MapAccess, Visitor};
    use serde::ser::{SerializeMap, Serializer};

    use super::VariableSpec;

    type Entries = Vec<(String, VariableSpec)>;

    pub fn serialize<S: Serializer>(entries: &Entries, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (name, spec) in entries {
            map.serialize_entry(name, spec)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Entries, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Entries;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("a map from variable names to variable definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Entries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl ModelSpec {
    /// Read a definition from a JSON document
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Create a model with the variables, objective and constraints of the definition
    pub fn build(&self) -> Result<Model, ModelError> {
        let mut model = Model::new(self.name.as_str());
        let variables = self
            .variables
            .iter()
            .map(|(name, spec)| {
                let kind: VarKind = spec.kind.parse().map_err(|err| match err {
                    ModelError::InvalidVariableSpec { reason, .. } => {
                        ModelError::invalid_variable(name, reason)
                    }
                    other => other,
                })?;
                Ok((name.as_str(), (spec.lower, spec.upper, kind)))
            })
            .collect::<Result<Vec<_>, ModelError>>()?;
        model.define_vars(variables)?;
        if let Some(objective) = &self.objective {
            let coefficients = objective.iter().map(|(name, &c)| (name.as_str(), c));
            model.set_objective(coefficients, self.sense)?;
        }
        model.add_constraints(self.constraints.iter().map(|c| {
            let coefficients = c.coefficients.iter().map(|(name, &v)| (name.as_str(), v));
            (coefficients, c.operator.as_str(), c.rhs)
        }))?;
        Ok(model)
    }

    /// Build the model and solve it with the [default solver](crate::default_solver)
    #[cfg(feature = "microlp")]
    pub fn run(&self) -> Result<crate::SolveResult, ModelError> {
        self.build()?.optimise(crate::default_solver)
    }
}

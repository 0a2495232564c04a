//! A declarative builder for linear programs, used as the optimization backend
//! of rule-based learning pipelines.
//!
//! Variables, the objective and the constraints are described with plain
//! names and coefficients, validated as they are added, then handed to a
//! [solver](solvers::Solver). The outcome of a solve is a [SolveResult] whose
//! [status](SolveStatus) must be checked before reading values.
//!
//! ```rust
//! # #[cfg(feature = "microlp")] {
//! use rule_lp::{Model, ObjectiveDirection, SolveStatus, VarKind};
//!
//! let mut model = Model::new("rules");
//! model.define_vars([
//!     ("x1", (Some(0.), Some(10.), VarKind::Continuous)),
//!     ("x2", (Some(0.), None, VarKind::Continuous)),
//! ])?;
//! model.set_objective([("x1", 1.), ("x2", 2.)], ObjectiveDirection::Maximisation)?;
//! model.add_constraints([
//!     (vec![("x1", 1.), ("x2", 1.)], "<=", 10.),
//!     (vec![("x1", 1.)], ">=", 0.),
//! ])?;
//!
//! if model.solve()? == SolveStatus::Optimal {
//!     let values = model.values()?;
//!     println!("x1={}   x2={}", values["x1"], values["x2"]);
//! }
//! # }
//! # Ok::<_, rule_lp::ModelError>(())
//! ```

pub use constraint::{Constraint, IntoOperator, Operator};
pub use error::ModelError;
pub use expression::LinearExpr;
pub use model::{Model, Objective};
pub use solution::{SolveResult, SolveStatus};
pub use solvers::{ObjectiveDirection, ResolutionError, Solver, SolverModel, UnsolvedProblem};
pub use variable::{variable, VarKind, Variable, VariableDefinition};

#[cfg(feature = "serde")]
pub use definition::{ConstraintSpec, DefinitionError, ModelSpec, VariableSpec};
pub use logging::{enable_logging, LoggingError};

#[cfg(feature = "microlp")]
pub use solvers::microlp::microlp;
/// The solver used by [Model::solve]
#[cfg(feature = "microlp")]
pub use solvers::microlp::microlp as default_solver;

pub mod constraint;
#[cfg(feature = "serde")]
mod definition;
mod error;
mod expression;
pub mod logging;
pub mod model;
mod solution;
pub mod solvers;
pub mod variable;

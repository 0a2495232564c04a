//! The seam between a [Model](crate::Model) and the LP engines that solve it.
//!
//! A backend is anything implementing [Solver]: it encodes an [UnsolvedProblem]
//! into its own representation, a [SolverModel], which is then solved.
use std::panic::{catch_unwind, AssertUnwindSafe};

use fnv::FnvHashMap as HashMap;
use tracing::{debug, info, warn};

use crate::model::Objective;
use crate::{Constraint, LinearExpr, SolveResult, SolveStatus, Variable};

#[cfg(feature = "microlp")]
pub mod microlp;

/// Whether to search for the variable values that give the highest
/// or the lowest value of the objective function.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectiveDirection {
    /// Find the highest value
    #[cfg_attr(
        feature = "serde",
        serde(rename = "maximise", alias = "maximize", alias = "max")
    )]
    Maximisation,
    /// Find the lowest value
    #[cfg_attr(
        feature = "serde",
        serde(rename = "minimise", alias = "minimize", alias = "min")
    )]
    Minimisation,
}

/// Represents an error that occurred when solving a problem
#[derive(Debug, PartialEq, Clone)]
pub enum ResolutionError {
    /// The problem is [unbounded](https://www.matem.unam.mx/~omar/math340/unbounded.html).
    /// It doesn't have a finite optimal values for its variables.
    /// The objective can be made infinitely large without violating any constraints.
    Unbounded,
    ///  There exists no solution that satisfies all of the constraints
    Infeasible,
    /// Another error occurred
    Other(String),
}

impl ResolutionError {
    fn status(&self) -> SolveStatus {
        match self {
            ResolutionError::Unbounded => SolveStatus::Unbounded,
            ResolutionError::Infeasible => SolveStatus::Infeasible,
            ResolutionError::Other(_) => SolveStatus::NotSolved,
        }
    }
}

/// A solver's own representation of a model, ready to be solved.
pub trait SolverModel {
    /// Find the solution for the problem being modeled.
    ///
    /// Returns the value of every variable, in the order of
    /// [UnsolvedProblem::variables].
    fn solve(self) -> Result<Vec<f64>, ResolutionError>;

    /// The name of the solver, for diagnostics
    fn name() -> &'static str;
}

/// A solver backend: turns a problem into a [SolverModel].
pub trait Solver {
    /// The solver's own representation of the problem
    type Model: SolverModel;

    /// Encode the variables, the objective and the constraints of the problem
    fn encode(&self, problem: &UnsolvedProblem<'_>) -> Self::Model;
}

impl<F, M> Solver for F
where
    F: Fn(&UnsolvedProblem<'_>) -> M,
    M: SolverModel,
{
    type Model = M;

    fn encode(&self, problem: &UnsolvedProblem<'_>) -> M {
        self(problem)
    }
}

/// A read-only view of a complete model, handed to a [Solver].
///
/// Every name referenced by the objective and the constraints is guaranteed
/// to be one of the variables.
pub struct UnsolvedProblem<'a> {
    pub(crate) variables: &'a [Variable],
    pub(crate) objective: &'a Objective,
    pub(crate) constraints: &'a [Constraint],
    pub(crate) index: &'a HashMap<String, usize>,
}

impl<'a> UnsolvedProblem<'a> {
    /// The variables, in declaration order
    pub fn variables(&self) -> &'a [Variable] {
        self.variables
    }

    /// The constraints, in the order they were added
    pub fn constraints(&self) -> &'a [Constraint] {
        self.constraints
    }

    /// The optimization direction
    pub fn direction(&self) -> ObjectiveDirection {
        self.objective.direction
    }

    /// The position of a variable in [UnsolvedProblem::variables]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// The coefficient of every variable in the objective, in declaration order
    pub fn objective_coefficients(&self) -> Vec<f64> {
        let mut coefficients = vec![0.; self.variables.len()];
        for (position, coefficient) in self.positions(&self.objective.expression) {
            coefficients[position] += coefficient;
        }
        coefficients
    }

    /// The terms of an expression, with variables replaced by their positions
    pub fn positions<'b>(
        &'b self,
        expression: &'b LinearExpr,
    ) -> impl Iterator<Item = (usize, f64)> + 'b {
        expression
            .iter()
            .filter_map(move |(name, coefficient)| Some((self.position(name)?, coefficient)))
    }
}

/// Encode the problem with `solver`, solve it, and interpret the outcome.
///
/// Solver failures, including panics, become a [SolveStatus::NotSolved] result.
/// A panicking backend still goes through the process panic hook, which by
/// default prints the panic message to stderr before it is caught here.
pub(crate) fn solve<S: Solver>(problem: &UnsolvedProblem<'_>, solver: &S) -> SolveResult {
    let name = <S::Model as SolverModel>::name();
    debug!(
        solver = name,
        variables = problem.variables.len(),
        constraints = problem.constraints.len(),
        "encoding problem"
    );
    let outcome = catch_unwind(AssertUnwindSafe(|| solver.encode(problem).solve()))
        .unwrap_or_else(|_| Err(ResolutionError::Other(format!("{} panicked", name))));
    let values = match outcome {
        Ok(values) if values.len() == problem.variables.len() => values,
        Ok(values) => {
            let message = format!(
                "{} returned {} values for {} variables",
                name,
                values.len(),
                problem.variables.len()
            );
            warn!(solver = name, "{}", message);
            return SolveResult::failed(SolveStatus::NotSolved, Some(message));
        }
        Err(err) => {
            let status = err.status();
            warn!(solver = name, %status, "solve did not reach an optimum");
            let message = match err {
                ResolutionError::Other(message) => Some(message),
                _ => None,
            };
            return SolveResult::failed(status, message);
        }
    };
    let objective: f64 = problem
        .positions(&problem.objective.expression)
        .map(|(position, coefficient)| coefficient * values[position])
        .sum();
    info!(solver = name, objective, "optimal solution found");
    let values = problem
        .variables
        .iter()
        .zip(values)
        .map(|(var, value)| (var.name.clone(), value))
        .collect();
    SolveResult::optimal(values, objective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{variable, Model, Operator};

    struct Fixed(Result<Vec<f64>, ResolutionError>);

    impl SolverModel for Fixed {
        fn solve(self) -> Result<Vec<f64>, ResolutionError> {
            self.0
        }

        fn name() -> &'static str {
            "fixed"
        }
    }

    fn model() -> Model {
        let mut model = Model::default();
        model
            .define_vars([("a", variable().min(0)), ("b", variable().min(0))])
            .unwrap();
        model
            .set_objective([("a", 1.), ("b", 3.)], ObjectiveDirection::Maximisation)
            .unwrap();
        model
            .add_constraints([([("a", 1.), ("b", 1.)], Operator::Le, 4.)])
            .unwrap();
        model
    }

    #[test]
    fn problem_view() {
        let model = model();
        let problem = model.problem().unwrap();
        assert_eq!(problem.objective_coefficients(), vec![1., 3.]);
        assert_eq!(problem.position("b"), Some(1));
        let terms: Vec<_> = problem
            .positions(problem.constraints()[0].expression())
            .collect();
        assert_eq!(terms, vec![(0, 1.), (1, 1.)]);
    }

    #[test]
    fn maps_resolution_errors_to_statuses() {
        let model = model();
        let problem = model.problem().unwrap();
        let cases = [
            (ResolutionError::Infeasible, SolveStatus::Infeasible),
            (ResolutionError::Unbounded, SolveStatus::Unbounded),
            (ResolutionError::Other("boom".into()), SolveStatus::NotSolved),
        ];
        for (err, expected) in cases {
            let result = solve(&problem, &|_: &UnsolvedProblem<'_>| Fixed(Err(err.clone())));
            assert_eq!(result.status(), expected);
        }
    }

    #[test]
    fn panics_and_short_outputs_are_not_solved() {
        let model = model();
        let problem = model.problem().unwrap();

        let result = solve(&problem, &|_: &UnsolvedProblem<'_>| -> Fixed {
            panic!("backend crashed")
        });
        assert_eq!(result.status(), SolveStatus::NotSolved);
        assert_eq!(result.message(), Some("fixed panicked"));

        let result = solve(&problem, &|_: &UnsolvedProblem<'_>| Fixed(Ok(vec![1.])));
        assert_eq!(result.status(), SolveStatus::NotSolved);
    }

    #[test]
    fn objective_is_evaluated_from_values() {
        let model = model();
        let problem = model.problem().unwrap();
        let result = solve(&problem, &|_: &UnsolvedProblem<'_>| Fixed(Ok(vec![0., 4.])));
        assert_eq!(result.objective_value(), Ok(12.));
        assert_eq!(result.value("b"), Ok(4.));
    }
}

//! A solver that uses [microlp](https://docs.rs/microlp), a pure rust solver.

use crate::solvers::{ObjectiveDirection, ResolutionError, SolverModel, UnsolvedProblem};
use crate::{Operator, VarKind};

/// The [microlp](https://docs.rs/microlp) solver,
/// to be used with [Model::solve_using](crate::Model::solve_using).
///
/// Integer bounds are rounded inwards. Infinite integer bounds map to
/// `i32::MIN` and `i32::MAX`; a finite one outside the `i32` range makes the
/// solve fail with [ResolutionError::Other].
pub fn microlp(to_solve: &UnsolvedProblem<'_>) -> MicroLpProblem {
    let mut problem = microlp::Problem::new(match to_solve.direction() {
        ObjectiveDirection::Maximisation => microlp::OptimizationDirection::Maximize,
        ObjectiveDirection::Minimisation => microlp::OptimizationDirection::Minimize,
    });
    let objective = to_solve.objective_coefficients();
    let mut unsupported = None;
    let variables: Vec<microlp::Variable> = to_solve
        .variables()
        .iter()
        .zip(objective)
        .map(|(var, coeff)| {
            let def = var.definition();
            match var.kind() {
                VarKind::Continuous => problem.add_var(coeff, (def.min, def.max)),
                VarKind::Integer => {
                    let bounds = (integer_bound(def.min.ceil()), integer_bound(def.max.floor()));
                    if let (Some(min), Some(max)) = bounds {
                        problem.add_integer_var(coeff, (min, max))
                    } else {
                        unsupported.get_or_insert_with(|| {
                            format!(
                                "bounds of integer variable `{}` exceed the i32 range",
                                var.name()
                            )
                        });
                        problem.add_integer_var(coeff, (def.min as i32, def.max as i32))
                    }
                }
                VarKind::Binary => problem.add_integer_var(coeff, (0, 1)),
            }
        })
        .collect();
    let mut trivially_infeasible = false;
    for constraint in to_solve.constraints() {
        if constraint.expression().is_empty() {
            // 0 <op> rhs does not involve any variable
            trivially_infeasible |= !constraint.operator().holds(0., constraint.rhs());
            continue;
        }
        let op = match constraint.operator() {
            Operator::Le => microlp::ComparisonOp::Le,
            Operator::Ge => microlp::ComparisonOp::Ge,
            Operator::Eq => microlp::ComparisonOp::Eq,
        };
        let mut linear_expr = microlp::LinearExpr::empty();
        for (position, coefficient) in to_solve.positions(constraint.expression()) {
            linear_expr.add(variables[position], coefficient);
        }
        problem.add_constraint(linear_expr, op, constraint.rhs());
    }
    MicroLpProblem {
        problem,
        variables,
        trivially_infeasible,
        unsupported,
    }
}

fn integer_bound(bound: f64) -> Option<i32> {
    let in_range = (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&bound);
    (in_range || bound.is_infinite()).then_some(bound as i32)
}

/// A microlp model
pub struct MicroLpProblem {
    problem: microlp::Problem,
    variables: Vec<microlp::Variable>,
    trivially_infeasible: bool,
    unsupported: Option<String>,
}

impl MicroLpProblem {
    /// Get the inner microlp model
    pub fn as_inner(&self) -> &microlp::Problem {
        &self.problem
    }
}

impl SolverModel for MicroLpProblem {
    fn solve(self) -> Result<Vec<f64>, ResolutionError> {
        if let Some(reason) = self.unsupported {
            return Err(ResolutionError::Other(reason));
        }
        if self.trivially_infeasible {
            return Err(ResolutionError::Infeasible);
        }
        let solution = self.problem.solve()?;
        Ok(self.variables.iter().map(|&var| solution[var]).collect())
    }

    fn name() -> &'static str {
        "Microlp"
    }
}

impl From<microlp::Error> for ResolutionError {
    fn from(microlp_error: microlp::Error) -> Self {
        match microlp_error {
            microlp::Error::Unbounded => Self::Unbounded,
            microlp::Error::Infeasible => Self::Infeasible,
            microlp::Error::InternalError(s) => Self::Other(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::microlp;
    use crate::{variable, Model, ObjectiveDirection, Operator, SolveStatus, VarKind};

    #[test]
    fn can_solve_easy() {
        let mut model = Model::default();
        model
            .define_vars([("x", variable().clamp(0, 2)), ("y", variable().clamp(1, 3))])
            .unwrap();
        model
            .set_objective([("x", 1.), ("y", 1.)], ObjectiveDirection::Maximisation)
            .unwrap();
        model
            .add_constraints([(vec![("x", 2.), ("y", 1.)], Operator::Le, 4.)])
            .unwrap();
        let result = model.optimise(microlp).unwrap();
        assert_float_eq!(result.value("x").unwrap(), 0.5, abs <= 1e-9);
        assert_float_eq!(result.value("y").unwrap(), 3., abs <= 1e-9);
    }

    #[test]
    fn integer_variables() {
        let mut model = Model::default();
        model
            .define_vars([("n", variable().integer().clamp(0, 10))])
            .unwrap();
        model
            .set_objective([("n", 1.)], ObjectiveDirection::Maximisation)
            .unwrap();
        model
            .add_constraints([(vec![("n", 2.)], Operator::Le, 7.)])
            .unwrap();
        let result = model.optimise(microlp).unwrap();
        assert_float_eq!(result.value("n").unwrap(), 3., abs <= 1e-9);
    }

    #[test]
    fn empty_constraint_rows() {
        let mut model = Model::default();
        model.define_vars([("x", variable().clamp(0, 1))]).unwrap();
        model
            .set_objective([("x", 1.)], ObjectiveDirection::Maximisation)
            .unwrap();
        model
            .add_constraints([(Vec::<(&str, f64)>::new(), Operator::Le, 1.)])
            .unwrap();
        assert!(model.optimise(microlp).unwrap().is_optimal());

        model
            .add_constraints([(Vec::<(&str, f64)>::new(), Operator::Ge, 1.)])
            .unwrap();
        let result = model.optimise(microlp).unwrap();
        assert_eq!(result.status(), SolveStatus::Infeasible);
    }

    #[test]
    fn integer_bounds_beyond_i32() {
        let mut model = Model::default();
        model
            .define_var("n", (Some(0.), Some(5e9), VarKind::Integer))
            .unwrap();
        model
            .set_objective([("n", 1.)], ObjectiveDirection::Maximisation)
            .unwrap();
        let result = model.optimise(microlp).unwrap();
        assert_eq!(result.status(), SolveStatus::NotSolved);
        assert!(result.message().unwrap().contains("`n`"));

        let mut model = Model::default();
        model
            .define_var("m", (Some(-1e10), None, VarKind::Integer))
            .unwrap();
        model
            .set_objective([("m", 1.)], ObjectiveDirection::Minimisation)
            .unwrap();
        assert_eq!(model.optimise(microlp).unwrap().status(), SolveStatus::NotSolved);
    }

    #[test]
    fn unbounded_integer_variables_are_accepted() {
        let mut model = Model::default();
        model
            .define_var("n", (Some(0.), None, VarKind::Integer))
            .unwrap();
        model
            .set_objective([("n", 1.)], ObjectiveDirection::Maximisation)
            .unwrap();
        model
            .add_constraints([(vec![("n", 1.)], Operator::Le, 4.5)])
            .unwrap();
        let result = model.optimise(microlp).unwrap();
        assert_float_eq!(result.value("n").unwrap(), 4., abs <= 1e-9);
    }
}

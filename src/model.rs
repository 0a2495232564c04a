//! The [Model] holds the declarative definition of a linear program:
//! its variables, its objective and its constraints.
use std::collections::HashMap as StdHashMap;

use fnv::{FnvHashMap as HashMap, FnvHashSet as HashSet};
use tracing::{debug, warn};

use crate::constraint::IntoOperator;
use crate::solvers::{self, ObjectiveDirection, Solver, UnsolvedProblem};
use crate::variable::VariableDefinition;
use crate::{Constraint, LinearExpr, ModelError, SolveResult, SolveStatus, Variable};

/// The name given to models created with [Model::default]
pub const DEFAULT_MODEL_NAME: &str = "Rule Based Model";

/// The function to optimize, and whether to maximise or minimise it.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub(crate) expression: LinearExpr,
    pub(crate) direction: ObjectiveDirection,
}

impl Objective {
    /// The linear function to optimize
    pub fn expression(&self) -> &LinearExpr {
        &self.expression
    }

    /// Whether the function is maximised or minimised
    pub fn direction(&self) -> ObjectiveDirection {
        self.direction
    }
}

/// A linear program under construction.
///
/// Every mutation validates its whole input before changing anything, so a
/// failed call leaves the model exactly as it was.
///
/// ```
/// # #[cfg(feature = "microlp")] {
/// use rule_lp::{Model, ObjectiveDirection, Operator, VarKind};
///
/// let mut model = Model::new("example");
/// model.define_vars([
///     ("x1", (Some(0.), Some(10.), VarKind::Continuous)),
///     ("x2", (Some(0.), None, VarKind::Continuous)),
/// ])?;
/// model.set_objective([("x1", 1.), ("x2", 2.)], ObjectiveDirection::Maximisation)?;
/// model.add_constraints([(vec![("x1", 1.), ("x2", 1.)], Operator::Le, 10.)])?;
/// assert!(model.solve()?.is_optimal());
/// assert!((model.objective_value()? - 20.).abs() < 1e-9);
/// # }
/// # Ok::<_, rule_lp::ModelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    variables: Vec<Variable>,
    index: HashMap<String, usize>,
    objective: Option<Objective>,
    constraints: Vec<Constraint>,
    last_result: Option<SolveResult>,
}

impl Default for Model {
    fn default() -> Self {
        Model::new(DEFAULT_MODEL_NAME)
    }
}

fn rejected(model: &str, err: ModelError) -> ModelError {
    warn!(model, error = %err, "rejected model update");
    err
}

/// Runs on summed coefficients: an overflowing sum is not finite either
fn check_finite(expression: &LinearExpr) -> Result<(), ModelError> {
    match expression.iter().find(|(_, coefficient)| !coefficient.is_finite()) {
        Some((name, coefficient)) => Err(ModelError::NonFiniteCoefficient(format!(
            "the coefficient of `{}` is {}",
            name, coefficient
        ))),
        None => Ok(()),
    }
}

impl Model {
    /// Create an empty model
    pub fn new<N: Into<String>>(name: N) -> Self {
        let name = name.into();
        debug!(model = %name, "created model");
        Model {
            name,
            variables: vec![],
            index: HashMap::default(),
            objective: None,
            constraints: vec![],
            last_result: None,
        }
    }

    /// The name of the model
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register variables.
    ///
    /// Each definition is either a [VariableDefinition] or a
    /// `(lower, upper, kind)` triple where `None` stands for an unbounded side.
    /// Fails with [ModelError::InvalidVariableSpec] when a bound pair is
    /// inconsistent or when a name is already registered.
    pub fn define_vars<I, N, D>(&mut self, vars: I) -> Result<(), ModelError>
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<VariableDefinition>,
    {
        let mut batch: Vec<Variable> = vec![];
        let mut seen = HashSet::default();
        for (name, definition) in vars {
            let name: String = name.into();
            let definition: VariableDefinition = definition.into();
            let definition = definition
                .validated(&name)
                .map_err(|e| rejected(&self.name, e))?;
            if self.index.contains_key(&name) || !seen.insert(name.clone()) {
                let err = ModelError::invalid_variable(&name, "the name is already defined");
                return Err(rejected(&self.name, err));
            }
            batch.push(Variable { name, definition });
        }
        debug!(model = %self.name, count = batch.len(), "defined variables");
        for var in batch {
            self.index.insert(var.name.clone(), self.variables.len());
            self.variables.push(var);
        }
        self.last_result = None;
        Ok(())
    }

    /// Register a single variable. See [Model::define_vars].
    pub fn define_var<N, D>(&mut self, name: N, definition: D) -> Result<(), ModelError>
    where
        N: Into<String>,
        D: Into<VariableDefinition>,
    {
        self.define_vars(std::iter::once((name, definition)))
    }

    fn check_references(&self, expression: &LinearExpr) -> Result<(), ModelError> {
        match expression.variables().find(|name| !self.index.contains_key(*name)) {
            Some(unknown) => Err(ModelError::UnknownVariable(unknown.to_string())),
            None => Ok(()),
        }
    }

    fn check_constraint(&self, constraint: &Constraint) -> Result<(), ModelError> {
        self.check_references(&constraint.expression)?;
        check_finite(&constraint.expression)?;
        if !constraint.rhs.is_finite() {
            return Err(ModelError::NonFiniteCoefficient(format!(
                "the right hand side of `{}` is {}",
                constraint.expression, constraint.rhs
            )));
        }
        Ok(())
    }

    /// Set the objective, replacing the previous one.
    ///
    /// Fails with [ModelError::UnknownVariable] if a coefficient refers to
    /// a variable that was not defined, and with [ModelError::NonFiniteCoefficient]
    /// if a coefficient is NaN or infinite.
    pub fn set_objective<E, N>(
        &mut self,
        coefficients: E,
        direction: ObjectiveDirection,
    ) -> Result<(), ModelError>
    where
        E: IntoIterator<Item = (N, f64)>,
        N: Into<String>,
    {
        let expression: LinearExpr = coefficients.into_iter().collect();
        self.check_references(&expression)
            .and_then(|()| check_finite(&expression))
            .map_err(|e| rejected(&self.name, e))?;
        debug!(model = %self.name, ?direction, objective = %expression, "set objective");
        self.objective = Some(Objective {
            expression,
            direction,
        });
        self.last_result = None;
        Ok(())
    }

    /// Append constraints given as `(coefficients, operator, rhs)` triples.
    ///
    /// The operator may be an [Operator](crate::Operator) or its textual form
    /// (`"<="`, `">="`, `"="`). Nothing is appended if any of the constraints
    /// refers to an unknown variable ([ModelError::UnknownVariable]) or uses an
    /// unknown operator ([ModelError::InvalidOperator]), or if a coefficient or
    /// a right hand side is not finite ([ModelError::NonFiniteCoefficient]).
    /// Constraints are never deduplicated.
    pub fn add_constraints<I, E, N, O>(&mut self, constraints: I) -> Result<(), ModelError>
    where
        I: IntoIterator<Item = (E, O, f64)>,
        E: IntoIterator<Item = (N, f64)>,
        N: Into<String>,
        O: IntoOperator,
    {
        let batch = constraints
            .into_iter()
            .map(|(expression, operator, rhs)| {
                let expression: LinearExpr = expression.into_iter().collect();
                let constraint = Constraint::new(expression, operator.into_operator()?, rhs);
                self.check_constraint(&constraint)?;
                Ok(constraint)
            })
            .collect::<Result<Vec<_>, ModelError>>()
            .map_err(|e| rejected(&self.name, e))?;
        self.extend_constraints(batch);
        Ok(())
    }

    /// Append an already built constraint
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<(), ModelError> {
        self.check_constraint(&constraint)
            .map_err(|e| rejected(&self.name, e))?;
        self.extend_constraints(vec![constraint]);
        Ok(())
    }

    fn extend_constraints(&mut self, batch: Vec<Constraint>) {
        debug!(
            model = %self.name,
            added = batch.len(),
            total = self.constraints.len() + batch.len(),
            "added constraints"
        );
        self.constraints.extend(batch);
        self.last_result = None;
    }

    /// The variables, in declaration order
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Find a variable by name
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.index.get(name).map(|&i| &self.variables[i])
    }

    /// The current objective, if one was set
    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    /// The constraints, in the order they were added
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// A view of the model ready to be encoded by a solver.
    ///
    /// Fails with [ModelError::IncompleteModel] when there is no variable or no objective.
    pub fn problem(&self) -> Result<UnsolvedProblem<'_>, ModelError> {
        if self.variables.is_empty() {
            return Err(ModelError::IncompleteModel("no variable is defined"));
        }
        let objective = self
            .objective
            .as_ref()
            .ok_or(ModelError::IncompleteModel("the objective is not set"))?;
        Ok(UnsolvedProblem {
            variables: &self.variables,
            objective,
            constraints: &self.constraints,
            index: &self.index,
        })
    }

    /// Solve the model with the given solver, without recording the result.
    ///
    /// Infeasible or unbounded models and solver failures are not errors:
    /// they are reported in the status of the returned result. A panic in the
    /// solver is reported as [SolveStatus::NotSolved], but the panic hook still
    /// runs first and by default prints to stderr.
    pub fn optimise<S: Solver>(&self, solver: S) -> Result<SolveResult, ModelError> {
        let problem = self.problem().map_err(|e| rejected(&self.name, e))?;
        Ok(solvers::solve(&problem, &solver))
    }

    /// Solve the model with the given solver and keep the result for
    /// [Model::values] and [Model::objective_value].
    pub fn solve_using<S: Solver>(&mut self, solver: S) -> Result<SolveStatus, ModelError> {
        let result = self.optimise(solver)?;
        let status = result.status();
        self.last_result = Some(result);
        Ok(status)
    }

    /// Solve the model with the [default solver](crate::default_solver).
    /// See [Model::solve_using].
    #[cfg(feature = "microlp")]
    pub fn solve(&mut self) -> Result<SolveStatus, ModelError> {
        self.solve_using(crate::default_solver)
    }

    /// The result of the last solve, if the model was not modified since
    pub fn result(&self) -> Option<&SolveResult> {
        self.last_result.as_ref()
    }

    fn optimal_result(&self) -> Result<&SolveResult, ModelError> {
        self.last_result.as_ref().ok_or_else(|| {
            ModelError::ResultNotAvailable("the model was not solved since its last change".into())
        })
    }

    /// The value of every variable in the last optimal solution
    pub fn values(&self) -> Result<&StdHashMap<String, f64>, ModelError> {
        self.optimal_result()?.values()
    }

    /// The objective value of the last optimal solution
    pub fn objective_value(&self) -> Result<f64, ModelError> {
        self.optimal_result()?.objective_value()
    }
}

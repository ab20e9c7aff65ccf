use std::fmt;

use log::{debug, info, warn};

use crate::convert::to_solve_result;
use crate::domain::builders::{build_constraints, build_variables, set_objective};
use crate::domain::solver::Solver;
use crate::domain::solver_factory::{
    create_solver, SolverOptions, SolverType, DEFAULT_SOLVER_NAME,
};
use crate::domain::validate::SolveError;
use crate::models::{SolveRequest, SolveResult};

/// Server-wide solve defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveSettings {
    pub default_solver: String,
    pub options: SolverOptions,
}

impl Default for SolveSettings {
    fn default() -> Self {
        SolveSettings {
            default_solver: DEFAULT_SOLVER_NAME.to_string(),
            options: SolverOptions::default(),
        }
    }
}

/// Request lifecycle, used for log context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Received,
    BackendAcquired,
    VariablesBuilt,
    ObjectiveSet,
    ConstraintsBuilt,
    Solved,
    Responded,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Received => "RECEIVED",
            Phase::BackendAcquired => "BACKEND_ACQUIRED",
            Phase::VariablesBuilt => "VARIABLES_BUILT",
            Phase::ObjectiveSet => "OBJECTIVE_SET",
            Phase::ConstraintsBuilt => "CONSTRAINTS_BUILT",
            Phase::Solved => "SOLVED",
            Phase::Responded => "RESPONDED",
        };
        f.write_str(name)
    }
}

/// Solve one request on a fresh backend selected by `solver_name`
/// (or the configured default).
pub fn solve_linear_program(
    request: &SolveRequest,
    settings: &SolveSettings,
) -> Result<SolveResult, SolveError> {
    let solver_name = request
        .solver_name
        .as_deref()
        .unwrap_or(&settings.default_solver);
    debug!("{}: solver '{}'", Phase::Received, solver_name);

    let solver_type = match SolverType::from_name(solver_name) {
        Some(solver_type) => solver_type,
        None => {
            let error = SolveError::Configuration(solver_name.to_string());
            warn!("REJECTED after {}: {}", Phase::Received, error);
            return Err(error);
        }
    };

    let mut solver = create_solver(solver_type, settings.options);
    debug!("{}: {}", Phase::BackendAcquired, solver.name());
    solve_with(solver.as_mut(), request, solver_name)
}

/// Drive the builders and the solve on an already acquired backend.
pub fn solve_with(
    solver: &mut dyn Solver,
    request: &SolveRequest,
    solver_name: &str,
) -> Result<SolveResult, SolveError> {
    let mut phase = Phase::BackendAcquired;
    let rejected = |phase: Phase, error: SolveError| {
        warn!("REJECTED after {}: {}", phase, error);
        error
    };

    let variables =
        build_variables(solver, &request.variables).map_err(|e| rejected(phase, e.into()))?;
    phase = Phase::VariablesBuilt;
    debug!("{}: {} variables", phase, variables.len());

    set_objective(solver, request.objective.as_ref(), &variables)
        .map_err(|e| rejected(phase, e.into()))?;
    phase = Phase::ObjectiveSet;
    debug!("{}", phase);

    build_constraints(solver, &request.constraints, &variables)
        .map_err(|e| rejected(phase, e.into()))?;
    phase = Phase::ConstraintsBuilt;
    debug!("{}: {} constraints", phase, request.constraints.len());

    let stats = solver.solve();
    let result = to_solve_result(solver, &stats, &variables, solver_name);
    debug!("{}: raw status {:?}", Phase::Solved, stats.status);

    info!(
        "{}: {:?} in {} ms, {} iterations ({})",
        Phase::Responded,
        result.status,
        result.wall_time_ms,
        result.iterations,
        solver.name()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RawStatus;
    use crate::domain::solvers::FakeSolver;
    use crate::domain::validate::ErrorKind;
    use crate::models::{Constraint, Objective, Status, VariableBound};
    use serde_json::json;

    fn request(value: serde_json::Value) -> SolveRequest {
        serde_json::from_value(value).unwrap()
    }

    fn simple_request() -> SolveRequest {
        request(json!({
            "objective": {"coefficients": {"x": 1.0, "y": 1.0}, "direction": "max", "offset": 2.0},
            "constraints": [{"coefficients": {"x": 1.0, "y": 1.0}, "sense": "<=", "rhs": 10.0}],
            "variables": {"y": {"lower": 0.0}, "x": {"lower": 0.0}}
        }))
    }

    #[test]
    fn test_solve_with_optimal_should_fill_solution_fields_in_input_order() {
        let mut solver = FakeSolver::new(RawStatus::OPTIMAL).with_value(5.0);

        let result = solve_with(&mut solver, &simple_request(), "GLOP").unwrap();

        assert_eq!(solver.solve_calls, 1);
        assert_eq!(result.status, Status::Optimal);
        assert_eq!(result.solver_name, "GLOP");
        assert_eq!(result.wall_time_ms, 12);
        assert_eq!(result.iterations, 3);
        assert_eq!(result.objective_value, Some(12.0));

        let variables = result.variables.unwrap();
        let names: Vec<&str> = variables.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["y", "x"]);
        assert_eq!(variables["x"], 5.0);

        let reduced_costs = result.reduced_costs.unwrap();
        assert_eq!(reduced_costs["y"], 0.0);
        assert_eq!(reduced_costs["x"], 1.0);
    }

    #[test]
    fn test_solve_with_feasible_should_fill_solution_fields() {
        let mut solver = FakeSolver::new(RawStatus::FEASIBLE);
        let result = solve_with(&mut solver, &simple_request(), "GLOP").unwrap();

        assert_eq!(result.status, Status::Feasible);
        assert!(result.objective_value.is_some());
        assert!(result.variables.is_some());
        assert!(result.reduced_costs.is_some());
    }

    #[test]
    fn test_solve_with_non_solution_statuses_should_omit_solution_fields() {
        let cases = [
            (RawStatus::INFEASIBLE, Status::Infeasible),
            (RawStatus::UNBOUNDED, Status::Unbounded),
            (RawStatus::ABNORMAL, Status::Abnormal),
            (RawStatus::NOT_SOLVED, Status::Unknown),
            (RawStatus(99), Status::Unknown),
        ];

        for (raw, expected) in cases {
            let mut solver = FakeSolver::new(raw);
            let result = solve_with(&mut solver, &simple_request(), "GLOP").unwrap();

            assert_eq!(result.status, expected);
            assert!(result.objective_value.is_none());
            assert!(result.variables.is_none());
            assert!(result.reduced_costs.is_none());
        }
    }

    #[test]
    fn test_solve_with_validation_error_should_not_call_solve() {
        let mut invalid = simple_request();
        invalid.objective = Some(Objective {
            coefficients: [("z".to_string(), 1.0)].into_iter().collect(),
            ..Objective::default()
        });
        let mut solver = FakeSolver::new(RawStatus::OPTIMAL);

        let error = solve_with(&mut solver, &invalid, "GLOP").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::UnknownVariableReference);
        assert_eq!(solver.solve_calls, 0);
    }

    #[test]
    fn test_solve_with_bad_constraint_should_not_call_solve() {
        let mut invalid = simple_request();
        invalid.constraints.push(Constraint {
            coefficients: [("x".to_string(), 1.0)].into_iter().collect(),
            sense: Some("=>".to_string()),
            rhs: Some(1.0),
            name: None,
        });
        let mut solver = FakeSolver::new(RawStatus::OPTIMAL);

        let error = solve_with(&mut solver, &invalid, "GLOP").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::UnsupportedSense);
        assert_eq!(solver.solve_calls, 0);
    }

    #[test]
    fn test_solve_with_inconsistent_bounds_should_not_call_solve() {
        let mut invalid = simple_request();
        invalid
            .variables
            .insert("w".to_string(), VariableBound::new(Some(5.0), Some(2.0)));
        let mut solver = FakeSolver::new(RawStatus::OPTIMAL);

        let error = solve_with(&mut solver, &invalid, "GLOP").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InconsistentBounds);
        assert_eq!(solver.solve_calls, 0);
    }

    #[test]
    fn test_solve_linear_program_given_unknown_backend_should_return_configuration_error() {
        let mut unknown = simple_request();
        unknown.solver_name = Some("CPLEX".to_string());

        let error = solve_linear_program(&unknown, &SolveSettings::default()).unwrap_err();

        assert_eq!(error, SolveError::Configuration("CPLEX".to_string()));
        assert_eq!(error.kind(), ErrorKind::UnknownSolverBackend);
    }

    #[test]
    fn test_solve_linear_program_should_use_default_solver_and_echo_name() {
        let settings = SolveSettings {
            default_solver: "clarabel".to_string(),
            ..SolveSettings::default()
        };

        let result = solve_linear_program(&simple_request(), &settings).unwrap();

        assert_eq!(result.solver_name, "clarabel");
        assert_eq!(result.status, Status::Optimal);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::BackendAcquired.to_string(), "BACKEND_ACQUIRED");
        assert_eq!(Phase::ConstraintsBuilt.to_string(), "CONSTRAINTS_BUILT");
    }
}

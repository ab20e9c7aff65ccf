use crate::domain::builders::VariableHandles;
use crate::domain::model::{RawStatus, SolveStats};
use crate::domain::solver::Solver;
use crate::domain::validate::SolveError;
use crate::models::{ErrorResponse, SolveResult, Status};

impl From<RawStatus> for Status {
    fn from(raw: RawStatus) -> Self {
        match raw {
            RawStatus::OPTIMAL => Status::Optimal,
            RawStatus::FEASIBLE => Status::Feasible,
            RawStatus::INFEASIBLE => Status::Infeasible,
            RawStatus::UNBOUNDED => Status::Unbounded,
            RawStatus::ABNORMAL => Status::Abnormal,
            _ => Status::Unknown,
        }
    }
}

/// Build the response for a finished solve. Solution fields are filled only
/// for OPTIMAL/FEASIBLE, keyed and ordered like `variables`.
pub fn to_solve_result(
    solver: &dyn Solver,
    stats: &SolveStats,
    variables: &VariableHandles,
    solver_name: &str,
) -> SolveResult {
    let status = Status::from(stats.status);
    let mut result = SolveResult {
        status,
        wall_time_ms: stats.wall_time.as_millis() as u64,
        iterations: stats.iterations,
        solver_name: solver_name.to_string(),
        objective_value: None,
        variables: None,
        reduced_costs: None,
    };

    if status.has_solution() {
        result.objective_value = Some(solver.objective_value());
        result.variables = Some(
            variables
                .iter()
                .map(|(name, &col)| (name.clone(), solver.solution_value(col)))
                .collect(),
        );
        result.reduced_costs = Some(
            variables
                .iter()
                .map(|(name, &col)| (name.clone(), solver.reduced_cost(col)))
                .collect(),
        );
    }

    result
}

impl From<&SolveError> for ErrorResponse {
    fn from(error: &SolveError) -> Self {
        ErrorResponse {
            error: error.to_string(),
            kind: Some(error.kind()),
        }
    }
}

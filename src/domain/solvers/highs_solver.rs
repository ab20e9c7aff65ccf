use std::time::Instant;

use ::highs::{HighsModelStatus, RowProblem, Sense};

use crate::domain::model::{Direction, LinearModel, RawStatus, Solution, SolveStats};
use crate::domain::solver::Solver;
use crate::domain::solver_factory::SolverOptions;

/// HiGHS solver implementation
pub struct HighsSolver {
    model: LinearModel,
    options: SolverOptions,
    solution: Option<Solution>,
}

impl HighsSolver {
    pub fn new(options: SolverOptions) -> Self {
        HighsSolver {
            model: LinearModel::new(),
            options,
            solution: None,
        }
    }

    /// Convert HiGHS status to a raw status code
    fn convert_status(model_status: HighsModelStatus) -> RawStatus {
        match model_status {
            HighsModelStatus::Optimal => RawStatus::OPTIMAL,
            HighsModelStatus::ReachedObjectiveBound | HighsModelStatus::ReachedObjectiveTarget => {
                RawStatus::FEASIBLE
            }
            HighsModelStatus::Infeasible => RawStatus::INFEASIBLE,
            HighsModelStatus::UnboundedOrInfeasible => RawStatus::UNBOUNDED,
            HighsModelStatus::Unbounded => RawStatus::UNBOUNDED,
            HighsModelStatus::ModelError => RawStatus::MODEL_INVALID,
            HighsModelStatus::LoadError
            | HighsModelStatus::PresolveError
            | HighsModelStatus::SolveError
            | HighsModelStatus::PostsolveError => RawStatus::ABNORMAL,
            _ => RawStatus::NOT_SOLVED,
        }
    }
}

impl Solver for HighsSolver {
    fn name(&self) -> &str {
        "HiGHS"
    }

    fn model(&self) -> &LinearModel {
        &self.model
    }

    fn model_mut(&mut self) -> &mut LinearModel {
        &mut self.model
    }

    fn solve(&mut self) -> SolveStats {
        let started = Instant::now();
        let mut problem = RowProblem::default();

        // Add variables (columns) first, then constraint rows
        let cols: Vec<_> = self
            .model
            .columns()
            .iter()
            .zip(self.model.objective())
            .map(|(column, &cost)| problem.add_column(cost, column.lower..=column.upper))
            .collect();

        for row in self.model.rows() {
            let factors: Vec<_> = row
                .coefficients
                .iter()
                .map(|&(col, value)| (cols[col.index()], value))
                .collect();
            problem.add_row(row.low..=row.high, &factors);
        }

        let sense = match self.model.direction() {
            Direction::Maximize => Sense::Maximise,
            Direction::Minimize => Sense::Minimise,
        };

        let mut highs_model = problem.optimise(sense);
        highs_model.set_option("output_flag", false);
        if let Some(limit) = self.options.time_limit {
            highs_model.set_option("time_limit", limit.as_secs_f64());
        }
        if let Some(max_iter) = self.options.max_iterations {
            highs_model.set_option(
                "simplex_iteration_limit",
                i32::try_from(max_iter).unwrap_or(i32::MAX),
            );
        }
        let solved = highs_model.solve();

        let status = Self::convert_status(solved.status());
        self.solution = if status == RawStatus::OPTIMAL || status == RawStatus::FEASIBLE {
            let solution = solved.get_solution();
            let values = solution.columns().to_vec();
            Some(Solution {
                objective_value: self.model.evaluate(&values),
                values,
                reduced_costs: solution.dual_columns().to_vec(),
            })
        } else {
            None
        };

        // The safe binding does not expose the simplex iteration counter.
        SolveStats {
            status,
            wall_time: started.elapsed(),
            iterations: 0,
        }
    }

    fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_status() {
        assert_eq!(
            HighsSolver::convert_status(HighsModelStatus::Optimal),
            RawStatus::OPTIMAL
        );
        assert_eq!(
            HighsSolver::convert_status(HighsModelStatus::ReachedObjectiveTarget),
            RawStatus::FEASIBLE
        );
        assert_eq!(
            HighsSolver::convert_status(HighsModelStatus::ModelError),
            RawStatus::MODEL_INVALID
        );
        for failed in [
            HighsModelStatus::LoadError,
            HighsModelStatus::PresolveError,
            HighsModelStatus::SolveError,
            HighsModelStatus::PostsolveError,
        ] {
            assert_eq!(HighsSolver::convert_status(failed), RawStatus::ABNORMAL);
        }
        assert_eq!(
            HighsSolver::convert_status(HighsModelStatus::ReachedTimeLimit),
            RawStatus::NOT_SOLVED
        );
    }

    #[test]
    fn test_solve_maximize() {
        let mut solver = HighsSolver::new(SolverOptions {
            max_iterations: Some(u32::MAX),
            ..SolverOptions::default()
        });
        let x = solver.add_variable(0.0, 3.0, "x");
        let y = solver.add_variable(0.0, f64::INFINITY, "y");
        let cap = solver.add_constraint(f64::NEG_INFINITY, 4.0, "cap");
        solver.set_coefficient(cap, x, 1.0);
        solver.set_coefficient(cap, y, 1.0);
        solver.set_objective_coefficient(x, 3.0);
        solver.set_objective_coefficient(y, 2.0);
        solver.set_direction(Direction::Maximize);

        let stats = solver.solve();

        assert_eq!(stats.status, RawStatus::OPTIMAL);
        assert!((solver.objective_value() - 11.0).abs() < 1e-6);
        assert!((solver.solution_value(x) - 3.0).abs() < 1e-6);
    }
}

use std::time::Duration;

use crate::domain::model::{LinearModel, RawStatus, Solution, SolveStats};
use crate::domain::solver::Solver;

/// Scripted in-memory backend. Records the model and answers `solve` with a
/// fixed status; on OPTIMAL/FEASIBLE every column gets `value` and a reduced
/// cost equal to its index.
pub struct FakeSolver {
    model: LinearModel,
    status: RawStatus,
    value: f64,
    solution: Option<Solution>,
    pub solve_calls: usize,
}

impl FakeSolver {
    pub fn new(status: RawStatus) -> Self {
        FakeSolver {
            model: LinearModel::new(),
            status,
            value: 1.0,
            solution: None,
            solve_calls: 0,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }
}

impl Solver for FakeSolver {
    fn name(&self) -> &str {
        "Fake"
    }

    fn model(&self) -> &LinearModel {
        &self.model
    }

    fn model_mut(&mut self) -> &mut LinearModel {
        &mut self.model
    }

    fn solve(&mut self) -> SolveStats {
        self.solve_calls += 1;
        if self.status == RawStatus::OPTIMAL || self.status == RawStatus::FEASIBLE {
            let values = vec![self.value; self.model.columns().len()];
            self.solution = Some(Solution {
                objective_value: self.model.evaluate(&values),
                reduced_costs: (0..values.len()).map(|j| j as f64).collect(),
                values,
            });
        }

        SolveStats {
            status: self.status,
            wall_time: Duration::from_millis(12),
            iterations: 3,
        }
    }

    fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }
}

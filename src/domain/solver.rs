use crate::domain::model::{Col, Direction, LinearModel, Row, Solution, SolveStats};

/// Common interface for LP solver backends.
///
/// A backend is owned by exactly one solve request. Model mutations are
/// recorded into its [`LinearModel`]; the engine only sees the model when
/// [`Solver::solve`] is called.
pub trait Solver: Send {
    /// Get the solver name for logging/debugging
    fn name(&self) -> &str;

    fn model(&self) -> &LinearModel;

    fn model_mut(&mut self) -> &mut LinearModel;

    /// Run the engine to completion (or to its configured limit).
    fn solve(&mut self) -> SolveStats;

    /// Primal/dual values of the last solve, if the engine produced any.
    fn solution(&self) -> Option<&Solution>;

    /// Sentinel used for unbounded range endpoints.
    fn infinity(&self) -> f64 {
        f64::INFINITY
    }

    fn add_variable(&mut self, lower: f64, upper: f64, name: &str) -> Col {
        self.model_mut().add_column(lower, upper, name)
    }

    fn add_constraint(&mut self, low: f64, high: f64, name: &str) -> Row {
        self.model_mut().add_row(low, high, name)
    }

    fn set_coefficient(&mut self, row: Row, col: Col, value: f64) {
        self.model_mut().set_row_coefficient(row, col, value);
    }

    fn set_objective_coefficient(&mut self, col: Col, value: f64) {
        self.model_mut().set_objective_coefficient(col, value);
    }

    fn set_objective_offset(&mut self, offset: f64) {
        self.model_mut().set_offset(offset);
    }

    fn set_direction(&mut self, direction: Direction) {
        self.model_mut().set_direction(direction);
    }

    fn objective_value(&self) -> f64 {
        self.solution().map_or(0.0, |s| s.objective_value)
    }

    fn solution_value(&self, col: Col) -> f64 {
        self.solution()
            .and_then(|s| s.values.get(col.index()).copied())
            .unwrap_or(0.0)
    }

    fn reduced_cost(&self, col: Col) -> f64 {
        self.solution()
            .and_then(|s| s.reduced_costs.get(col.index()).copied())
            .unwrap_or(0.0)
    }
}

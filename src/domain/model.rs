//! In-memory linear program recorded by a [`Solver`](crate::domain::solver::Solver)
//! before it is handed to a numerical engine.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Maximize,
    Minimize,
}

/// Constraint row sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    LessEq,
    GreaterEq,
    Equal,
}

impl Sense {
    /// Admissible row range for `rhs` under this sense.
    pub fn range(self, rhs: f64, infinity: f64) -> (f64, f64) {
        match self {
            Sense::LessEq => (-infinity, rhs),
            Sense::GreaterEq => (rhs, infinity),
            Sense::Equal => (rhs, rhs),
        }
    }
}

/// Handle to a decision variable (column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Col(usize);

impl Col {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Row(usize);

impl Row {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearRow {
    pub name: String,
    pub low: f64,
    pub high: f64,
    pub coefficients: Vec<(Col, f64)>,
}

#[derive(Debug, Clone, Default)]
pub struct LinearModel {
    columns: Vec<Column>,
    rows: Vec<LinearRow>,
    objective: Vec<f64>,
    offset: f64,
    direction: Option<Direction>,
}

impl LinearModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, lower: f64, upper: f64, name: &str) -> Col {
        self.columns.push(Column {
            name: name.to_string(),
            lower,
            upper,
        });
        self.objective.push(0.0);
        Col(self.columns.len() - 1)
    }

    pub fn add_row(&mut self, low: f64, high: f64, name: &str) -> Row {
        self.rows.push(LinearRow {
            name: name.to_string(),
            low,
            high,
            coefficients: Vec::new(),
        });
        Row(self.rows.len() - 1)
    }

    /// Sets (not adds) the coefficient of `col` in `row`.
    pub fn set_row_coefficient(&mut self, row: Row, col: Col, value: f64) {
        let coefficients = &mut self.rows[row.0].coefficients;
        match coefficients.iter_mut().find(|(c, _)| *c == col) {
            Some(entry) => entry.1 = value,
            None => coefficients.push((col, value)),
        }
    }

    pub fn set_objective_coefficient(&mut self, col: Col, value: f64) {
        self.objective[col.0] = value;
    }

    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = Some(direction);
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[LinearRow] {
        &self.rows
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Minimize until told otherwise.
    pub fn direction(&self) -> Direction {
        self.direction.unwrap_or(Direction::Minimize)
    }

    /// Objective value of `values` including the constant offset.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .zip(values)
            .map(|(c, x)| c * x)
            .sum::<f64>()
            + self.offset
    }
}

/// Engine-level termination code. Only the associated constants are known
/// to the response mapping; anything else is reported as UNKNOWN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawStatus(pub i32);

impl RawStatus {
    pub const OPTIMAL: RawStatus = RawStatus(0);
    pub const FEASIBLE: RawStatus = RawStatus(1);
    pub const INFEASIBLE: RawStatus = RawStatus(2);
    pub const UNBOUNDED: RawStatus = RawStatus(3);
    pub const ABNORMAL: RawStatus = RawStatus(4);
    pub const MODEL_INVALID: RawStatus = RawStatus(5);
    pub const NOT_SOLVED: RawStatus = RawStatus(6);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveStats {
    pub status: RawStatus,
    pub wall_time: Duration,
    pub iterations: u64,
}

/// Primal values and reduced costs, indexed by column.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub objective_value: f64,
    pub values: Vec<f64>,
    pub reduced_costs: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sense_range() {
        let inf = f64::INFINITY;
        assert_eq!(Sense::LessEq.range(4.0, inf), (-inf, 4.0));
        assert_eq!(Sense::GreaterEq.range(4.0, inf), (4.0, inf));
        assert_eq!(Sense::Equal.range(4.0, inf), (4.0, 4.0));
    }

    #[test]
    fn test_set_row_coefficient_should_overwrite_existing_entry() {
        let mut model = LinearModel::new();
        let x = model.add_column(0.0, 1.0, "x");
        let y = model.add_column(0.0, 1.0, "y");
        let row = model.add_row(f64::NEG_INFINITY, 1.0, "r");

        model.set_row_coefficient(row, x, 1.0);
        model.set_row_coefficient(row, y, 2.0);
        model.set_row_coefficient(row, x, 3.0);

        assert_eq!(model.rows()[0].coefficients, vec![(x, 3.0), (y, 2.0)]);
    }

    #[test]
    fn test_evaluate_should_include_offset() {
        let mut model = LinearModel::new();
        let x = model.add_column(0.0, 1.0, "x");
        let y = model.add_column(0.0, 1.0, "y");
        model.set_objective_coefficient(x, 2.0);
        model.set_objective_coefficient(y, -1.0);
        model.set_offset(5.0);

        assert_eq!(model.evaluate(&[3.0, 4.0]), 7.0);
    }
}

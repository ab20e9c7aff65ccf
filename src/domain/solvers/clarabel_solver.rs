use std::time::Instant;

use clarabel::algebra::CscMatrix;
use clarabel::solver::SupportedConeT::{self, NonnegativeConeT, ZeroConeT};
use clarabel::solver::{DefaultSettings, DefaultSolver, IPSolver, SolverStatus};
use log::{debug, warn};

use crate::domain::model::{Direction, LinearModel, RawStatus, Solution, SolveStats};
use crate::domain::solver::Solver;
use crate::domain::solver_factory::SolverOptions;

/// Clarabel (pure Rust interior point) solver implementation
pub struct ClarabelSolver {
    model: LinearModel,
    options: SolverOptions,
    solution: Option<Solution>,
}

impl ClarabelSolver {
    pub fn new(options: SolverOptions) -> Self {
        ClarabelSolver {
            model: LinearModel::new(),
            options,
            solution: None,
        }
    }

    fn settings(&self) -> DefaultSettings<f64> {
        let mut settings = DefaultSettings::<f64>::default();
        settings.verbose = false;
        if let Some(limit) = self.options.time_limit {
            settings.time_limit = limit.as_secs_f64();
        }
        if let Some(max_iter) = self.options.max_iterations {
            settings.max_iter = max_iter;
        }
        settings
    }

    /// Convert Clarabel status to a raw status code
    fn convert_status(status: SolverStatus) -> RawStatus {
        match status {
            SolverStatus::Solved => RawStatus::OPTIMAL,
            SolverStatus::AlmostSolved => RawStatus::FEASIBLE,
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                RawStatus::INFEASIBLE
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                RawStatus::UNBOUNDED
            }
            SolverStatus::NumericalError | SolverStatus::InsufficientProgress => {
                RawStatus::ABNORMAL
            }
            _ => RawStatus::NOT_SOLVED,
        }
    }

    /// Hand the stacked data to the engine. Incoherent data is reported as ABNORMAL.
    fn engine(
        &self,
        q: &[f64],
        a: &CscMatrix<f64>,
        b: &[f64],
        cones: &[SupportedConeT<f64>],
    ) -> Result<DefaultSolver<f64>, RawStatus> {
        let p = CscMatrix::zeros((q.len(), q.len()));
        DefaultSolver::new(&p, q, a, b, cones, self.settings()).map_err(|error| {
            warn!("Clarabel rejected the model: {:?}", error);
            RawStatus::ABNORMAL
        })
    }

    fn run(&self) -> (RawStatus, u64, Option<Solution>) {
        let n = self.model.columns().len();
        let conic = ConicForm::from_model(&self.model);

        // Clarabel minimizes; a maximization is solved as min -c'x.
        let sign = match self.model.direction() {
            Direction::Maximize => -1.0,
            Direction::Minimize => 1.0,
        };
        // Costs are scaled to unit max-norm; large objectives otherwise trip
        // the engine's infeasibility detection on bounded problems.
        let scale = cost_scale(self.model.objective());
        let q: Vec<f64> = self
            .model
            .objective()
            .iter()
            .map(|c| sign * c / scale)
            .collect();

        debug!(
            "Clarabel model: {} columns, {} equality rows, {} inequality rows, cost scale {}",
            n,
            conic.zero.len(),
            conic.nonneg.len(),
            scale
        );

        let mut solver = match self.engine(&q, &conic.matrix(n), &conic.rhs(), &conic.cones()) {
            Ok(solver) => solver,
            Err(status) => return (status, 0, None),
        };
        solver.solve();

        let result = &solver.solution;
        let mut status = Self::convert_status(result.status);
        let iterations = u64::from(result.iterations);

        if status == RawStatus::UNBOUNDED && !conic.certifies_unbounded(&q, &result.x) {
            warn!(
                "Clarabel reported {:?} without a valid improving ray",
                result.status
            );
            status = RawStatus::ABNORMAL;
        }

        if status != RawStatus::OPTIMAL && status != RawStatus::FEASIBLE {
            return (status, iterations, None);
        }

        let values = result.x.clone();
        let dual = |slot: Option<Slot>| slot.map_or(0.0, |s| result.z[conic.position(s)]);
        // Stationarity q + A'z = 0 leaves the reduced cost of column j on its bound rows.
        let reduced_costs = conic
            .bounds
            .iter()
            .map(|rows| sign * scale * (dual(rows.lower) - dual(rows.upper) - dual(rows.fixed)))
            .collect();

        let solution = Solution {
            objective_value: self.model.evaluate(&values),
            values,
            reduced_costs,
        };
        (status, iterations, Some(solution))
    }
}

impl Solver for ClarabelSolver {
    fn name(&self) -> &str {
        "Clarabel"
    }

    fn model(&self) -> &LinearModel {
        &self.model
    }

    fn model_mut(&mut self) -> &mut LinearModel {
        &mut self.model
    }

    fn solve(&mut self) -> SolveStats {
        let started = Instant::now();
        let (status, iterations, solution) = self.run();
        self.solution = solution;

        SolveStats {
            status,
            wall_time: started.elapsed(),
            iterations,
        }
    }

    fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }
}

/// Relative tolerance on the residuals of an unboundedness ray.
const RAY_TOLERANCE: f64 = 1e-6;

fn cost_scale(costs: &[f64]) -> f64 {
    let largest = costs.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
    if largest.is_finite() && largest > 0.0 {
        largest
    } else {
        1.0
    }
}

/// Position of a stacked row inside its cone block.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    Zero(usize),
    Nonneg(usize),
}

/// Rows carrying a column's bounds, if any.
#[derive(Debug, Clone, Copy, Default)]
struct BoundRows {
    lower: Option<Slot>,
    upper: Option<Slot>,
    fixed: Option<Slot>,
}

#[derive(Debug)]
struct StackedRow {
    coefficients: Vec<(usize, f64)>,
    rhs: f64,
}

/// `Ax + s = b` with `s` in a zero cone block followed by a nonnegative cone block.
#[derive(Debug, Default)]
struct ConicForm {
    zero: Vec<StackedRow>,
    nonneg: Vec<StackedRow>,
    bounds: Vec<BoundRows>,
}

impl ConicForm {
    fn from_model(model: &LinearModel) -> Self {
        let mut conic = ConicForm::default();

        for (j, column) in model.columns().iter().enumerate() {
            let mut rows = BoundRows::default();
            if column.lower.is_finite() && column.lower == column.upper {
                rows.fixed = Some(conic.push_equality(vec![(j, 1.0)], column.lower));
            } else {
                if column.lower.is_finite() {
                    rows.lower = Some(conic.push_inequality(vec![(j, -1.0)], -column.lower));
                }
                if column.upper.is_finite() {
                    rows.upper = Some(conic.push_inequality(vec![(j, 1.0)], column.upper));
                }
            }
            conic.bounds.push(rows);
        }

        for row in model.rows() {
            let coefficients: Vec<(usize, f64)> = row
                .coefficients
                .iter()
                .filter(|(_, value)| *value != 0.0)
                .map(|(col, value)| (col.index(), *value))
                .collect();

            if row.low.is_finite() && row.low == row.high {
                conic.push_equality(coefficients, row.high);
                continue;
            }
            if row.high.is_finite() {
                conic.push_inequality(coefficients.clone(), row.high);
            }
            if row.low.is_finite() {
                let negated = coefficients.iter().map(|&(j, v)| (j, -v)).collect();
                conic.push_inequality(negated, -row.low);
            }
        }

        conic
    }

    fn push_equality(&mut self, coefficients: Vec<(usize, f64)>, rhs: f64) -> Slot {
        self.zero.push(StackedRow { coefficients, rhs });
        Slot::Zero(self.zero.len() - 1)
    }

    fn push_inequality(&mut self, coefficients: Vec<(usize, f64)>, rhs: f64) -> Slot {
        self.nonneg.push(StackedRow { coefficients, rhs });
        Slot::Nonneg(self.nonneg.len() - 1)
    }

    fn position(&self, slot: Slot) -> usize {
        match slot {
            Slot::Zero(i) => i,
            Slot::Nonneg(i) => self.zero.len() + i,
        }
    }

    fn stacked(&self) -> impl Iterator<Item = &StackedRow> {
        self.zero.iter().chain(self.nonneg.iter())
    }

    fn matrix(&self, n_cols: usize) -> CscMatrix<f64> {
        let mut columns: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n_cols];
        for (i, row) in self.stacked().enumerate() {
            for &(j, value) in &row.coefficients {
                columns[j].push((i, value));
            }
        }

        let mut colptr = Vec::with_capacity(n_cols + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();
        colptr.push(0);
        for column in columns {
            for (i, value) in column {
                rowval.push(i);
                nzval.push(value);
            }
            colptr.push(rowval.len());
        }

        CscMatrix::new(self.zero.len() + self.nonneg.len(), n_cols, colptr, rowval, nzval)
    }

    fn rhs(&self) -> Vec<f64> {
        self.stacked().map(|row| row.rhs).collect()
    }

    /// Whether `x` is a ray along which the problem improves without bound:
    /// `q'x < 0`, equality rows unchanged, inequality rows not tightened.
    fn certifies_unbounded(&self, q: &[f64], x: &[f64]) -> bool {
        let norm = x.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        if !norm.is_finite() || norm == 0.0 || x.len() != q.len() {
            return false;
        }
        let ray: Vec<f64> = x.iter().map(|v| v / norm).collect();

        let q_norm = q.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        let improvement: f64 = q.iter().zip(&ray).map(|(c, r)| c * r).sum();
        if improvement >= -RAY_TOLERANCE * q_norm {
            return false;
        }

        let activity = |row: &StackedRow| -> f64 {
            row.coefficients.iter().map(|&(j, v)| v * ray[j]).sum()
        };
        let tolerance = |row: &StackedRow| -> f64 {
            RAY_TOLERANCE * row.coefficients.iter().fold(1.0_f64, |m, (_, v)| m.max(v.abs()))
        };

        self.zero.iter().all(|row| activity(row).abs() <= tolerance(row))
            && self.nonneg.iter().all(|row| activity(row) <= tolerance(row))
    }

    fn cones(&self) -> Vec<SupportedConeT<f64>> {
        let mut cones = Vec::new();
        if !self.zero.is_empty() {
            cones.push(ZeroConeT(self.zero.len()));
        }
        if !self.nonneg.is_empty() {
            cones.push(NonnegativeConeT(self.nonneg.len()));
        }
        cones
    }
}

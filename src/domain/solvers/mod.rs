pub mod clarabel_solver;

#[cfg(feature = "highs-solver")]
pub mod highs_solver;

#[cfg(test)]
pub mod fake_solver;

pub use clarabel_solver::ClarabelSolver;

#[cfg(feature = "highs-solver")]
pub use highs_solver::HighsSolver;

#[cfg(test)]
pub use fake_solver::FakeSolver;

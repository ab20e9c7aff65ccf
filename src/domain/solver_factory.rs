use std::time::Duration;

use crate::domain::solver::Solver;
use crate::domain::solvers::ClarabelSolver;

#[cfg(feature = "highs-solver")]
use crate::domain::solvers::HighsSolver;

/// Name used when a request does not pick a backend.
pub const DEFAULT_SOLVER_NAME: &str = "GLOP";

/// Limits forwarded to the engine of every backend created.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolverOptions {
    pub time_limit: Option<Duration>,
    pub max_iterations: Option<u32>,
}

/// Available solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverType {
    Clarabel,
    #[cfg(feature = "highs-solver")]
    Highs,
}

impl SolverType {
    /// Look up a backend by name (case-insensitive). `GLOP` names the default LP engine.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "GLOP" | "CLARABEL" => Some(SolverType::Clarabel),
            #[cfg(feature = "highs-solver")]
            "HIGHS" => Some(SolverType::Highs),
            _ => None,
        }
    }

    /// Every name accepted by [`SolverType::from_name`] in this build.
    pub fn names() -> Vec<&'static str> {
        let mut names = vec!["CLARABEL", "GLOP"];
        #[cfg(feature = "highs-solver")]
        names.push("HIGHS");
        names
    }
}

/// Create a fresh solver instance based on the specified type
pub fn create_solver(solver_type: SolverType, options: SolverOptions) -> Box<dyn Solver> {
    match solver_type {
        SolverType::Clarabel => Box::new(ClarabelSolver::new(options)),
        #[cfg(feature = "highs-solver")]
        SolverType::Highs => Box::new(HighsSolver::new(options)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_type_from_name() {
        assert_eq!(SolverType::from_name("glop"), Some(SolverType::Clarabel));
        assert_eq!(SolverType::from_name("GLOP"), Some(SolverType::Clarabel));
        assert_eq!(SolverType::from_name("Clarabel"), Some(SolverType::Clarabel));
        #[cfg(feature = "highs-solver")]
        assert_eq!(SolverType::from_name("HiGHS"), Some(SolverType::Highs));
        assert_eq!(SolverType::from_name("unknown"), None);
        assert_eq!(SolverType::from_name(""), None);
    }

    #[test]
    fn test_names_should_all_resolve() {
        for name in SolverType::names() {
            assert!(SolverType::from_name(name).is_some(), "{} did not resolve", name);
        }
        assert!(SolverType::names().contains(&DEFAULT_SOLVER_NAME));
    }

    #[test]
    fn test_create_clarabel_solver() {
        let solver = create_solver(SolverType::Clarabel, SolverOptions::default());
        assert_eq!(solver.name(), "Clarabel");
        assert!(solver.model().columns().is_empty());
    }

    #[cfg(feature = "highs-solver")]
    #[test]
    fn test_create_highs_solver() {
        let solver = create_solver(SolverType::Highs, SolverOptions::default());
        assert_eq!(solver.name(), "HiGHS");
    }
}

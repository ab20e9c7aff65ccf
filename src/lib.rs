pub mod api;
pub mod config;
pub mod convert;
pub mod domain;
pub mod models;

pub use domain::solve::{solve_linear_program, SolveSettings};
pub use domain::validate::{ErrorKind, SolveError, ValidationError};
pub use models::{Constraint, Objective, SolveRequest, SolveResult, Status, VariableBound};

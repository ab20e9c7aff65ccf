use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::model::{Direction, Sense};
use crate::models::VariableBound;

/// Where an unknown variable name was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSource {
    Objective,
    Constraint(String),
}

impl fmt::Display for ReferenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceSource::Objective => write!(f, "Objective"),
            ReferenceSource::Constraint(name) => write!(f, "Constraint '{}'", name),
        }
    }
}

/// Caller-input errors. None of these are retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("At least one variable must be provided")]
    EmptyVariableSet,

    #[error("Variable '{name}' has inconsistent bounds: lower={lower} > upper={upper}")]
    InconsistentBounds { name: String, lower: f64, upper: f64 },

    #[error("Objective must define coefficients for at least one variable")]
    MissingObjective,

    #[error("{origin} references unknown variable '{variable}'")]
    UnknownVariableReference {
        origin: ReferenceSource,
        variable: String,
    },

    #[error("Objective direction must be either 'max' or 'min', got '{0}'")]
    InvalidDirection(String),

    #[error("Unsupported constraint sense '{0}'")]
    UnsupportedSense(String),

    #[error("Constraint at position {position} must define an 'rhs' value")]
    MissingRhs { position: usize },

    #[error("Constraint '{constraint}' must define at least one coefficient")]
    EmptyCoefficients { constraint: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("Solver backend '{0}' is not available")]
    Configuration(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Stable, fieldless error tag returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    EmptyVariableSet,
    InconsistentBounds,
    MissingObjective,
    UnknownVariableReference,
    InvalidDirection,
    UnsupportedSense,
    MissingRhs,
    EmptyCoefficients,
    UnknownSolverBackend,
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::EmptyVariableSet => ErrorKind::EmptyVariableSet,
            ValidationError::InconsistentBounds { .. } => ErrorKind::InconsistentBounds,
            ValidationError::MissingObjective => ErrorKind::MissingObjective,
            ValidationError::UnknownVariableReference { .. } => {
                ErrorKind::UnknownVariableReference
            }
            ValidationError::InvalidDirection(_) => ErrorKind::InvalidDirection,
            ValidationError::UnsupportedSense(_) => ErrorKind::UnsupportedSense,
            ValidationError::MissingRhs { .. } => ErrorKind::MissingRhs,
            ValidationError::EmptyCoefficients { .. } => ErrorKind::EmptyCoefficients,
        }
    }
}

impl SolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SolveError::Configuration(_) => ErrorKind::UnknownSolverBackend,
            SolveError::Validation(error) => error.kind(),
        }
    }
}

/// Resolves a variable's bounds, defaulting to `[0, +inf)`.
pub fn resolve_bounds(
    name: &str,
    bound: &VariableBound,
    infinity: f64,
) -> Result<(f64, f64), ValidationError> {
    let lower = bound.lower.unwrap_or(0.0);
    let upper = bound.upper.unwrap_or(infinity);

    if lower > upper {
        return Err(ValidationError::InconsistentBounds {
            name: name.to_string(),
            lower,
            upper,
        });
    }

    Ok((lower, upper))
}

/// Parses an objective direction. Absent (`None`) means maximize; an explicit
/// null (`Some(None)`) is rejected like any other non-direction.
pub fn parse_direction(raw: Option<Option<&str>>) -> Result<Direction, ValidationError> {
    let direction = match raw {
        None => return Ok(Direction::Maximize),
        Some(None) => return Err(ValidationError::InvalidDirection("null".to_string())),
        Some(Some(raw)) => raw.to_lowercase(),
    };
    match direction.as_str() {
        "max" => Ok(Direction::Maximize),
        "min" => Ok(Direction::Minimize),
        _ => Err(ValidationError::InvalidDirection(direction)),
    }
}

pub fn parse_sense(raw: Option<&str>) -> Result<Sense, ValidationError> {
    match raw {
        Some("<=") => Ok(Sense::LessEq),
        Some(">=") => Ok(Sense::GreaterEq),
        Some("==") => Ok(Sense::Equal),
        Some(other) => Err(ValidationError::UnsupportedSense(other.to_string())),
        None => Err(ValidationError::UnsupportedSense("<missing>".to_string())),
    }
}

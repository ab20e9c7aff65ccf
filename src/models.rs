use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::validate::ErrorKind;

// ---------- API (wire) types: owned & serde-friendly ----------

/// Per-variable bounds. Missing `lower` means 0.0, missing `upper` means +inf.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct VariableBound {
    #[serde(default)]
    pub lower: Option<f64>,
    #[serde(default)]
    pub upper: Option<f64>,
}

impl VariableBound {
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        VariableBound { lower, upper }
    }
}

/// Variable name → bounds, in request order.
pub type VariableSet = IndexMap<String, VariableBound>;

/// Variable name → coefficient, in request order.
pub type Coefficients = IndexMap<String, f64>;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Objective {
    #[serde(default)]
    pub coefficients: Coefficients,
    /// `"max"` or `"min"`, matched case-insensitively. Absent means `"max"`;
    /// `Some(None)` is an explicit `null`, which is not a direction.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub direction: Option<Option<String>>,
    #[serde(default)]
    pub offset: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Constraint {
    #[serde(default)]
    pub coefficients: Coefficients,
    /// One of `"<="`, `">="`, `"=="`.
    #[serde(default)]
    pub sense: Option<String>,
    #[serde(default)]
    pub rhs: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Keeps a present-but-null field apart from an absent one.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Arguments of `solve_linear_program`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SolveRequest {
    #[serde(default)]
    pub objective: Option<Objective>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    #[serde(default)]
    pub variables: VariableSet,
    #[serde(default)]
    pub solver_name: Option<String>,
}

// ---------- API response types ----------

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Optimal,
    Feasible,
    Infeasible,
    Unbounded,
    Abnormal,
    Unknown,
}

impl Status {
    /// Whether the result carries objective value, variable values and reduced costs.
    pub fn has_solution(self) -> bool {
        matches!(self, Status::Optimal | Status::Feasible)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SolveResult {
    pub status: Status,
    pub wall_time_ms: u64,
    pub iterations: u64,
    pub solver_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<IndexMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduced_costs: Option<IndexMap<String, f64>>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SolversResponse {
    pub default: String,
    pub solvers: Vec<String>,
}

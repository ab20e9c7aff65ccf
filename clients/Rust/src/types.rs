use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Variable bounds. `None` lower means 0, `None` upper means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableBound {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
}

/// Linear objective: coefficients, `"max"`/`"min"`, constant offset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub coefficients: IndexMap<String, f64>,
    pub direction: String,
    pub offset: f64,
}

/// A constraint row: `sum(coefficients * x) <sense> rhs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub coefficients: IndexMap<String, f64>,
    pub sense: String,
    pub rhs: f64,
    /// Server synthesizes `constraint_<index>` when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Constraint {
    fn new<K: Into<String>>(
        coefficients: impl IntoIterator<Item = (K, f64)>,
        sense: &str,
        rhs: f64,
    ) -> Self {
        Self {
            coefficients: coefficients
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
            sense: sense.to_string(),
            rhs,
            name: None,
        }
    }

    /// `sum(coefficients * x) <= rhs`
    pub fn less_eq<K: Into<String>>(
        coefficients: impl IntoIterator<Item = (K, f64)>,
        rhs: f64,
    ) -> Self {
        Self::new(coefficients, "<=", rhs)
    }

    /// `sum(coefficients * x) >= rhs`
    pub fn greater_eq<K: Into<String>>(
        coefficients: impl IntoIterator<Item = (K, f64)>,
        rhs: f64,
    ) -> Self {
        Self::new(coefficients, ">=", rhs)
    }

    /// `sum(coefficients * x) == rhs`
    pub fn equal<K: Into<String>>(
        coefficients: impl IntoIterator<Item = (K, f64)>,
        rhs: f64,
    ) -> Self {
        Self::new(coefficients, "==", rhs)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Request body of `POST /solve`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    pub objective: Objective,
    pub constraints: Vec<Constraint>,
    pub variables: IndexMap<String, VariableBound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solver_name: Option<String>,
}

/// Solve outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Optimal,
    Feasible,
    Infeasible,
    Unbounded,
    Abnormal,
    Unknown,
}

/// Response of `POST /solve`. The optional fields are only present for
/// `Optimal` and `Feasible`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResult {
    pub status: Status,
    pub wall_time_ms: u64,
    pub iterations: u64,
    pub solver_name: String,
    #[serde(default)]
    pub objective_value: Option<f64>,
    #[serde(default)]
    pub variables: Option<IndexMap<String, f64>>,
    #[serde(default)]
    pub reduced_costs: Option<IndexMap<String, f64>>,
}

/// Response of `GET /solvers`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolversResponse {
    pub default: String,
    pub solvers: Vec<String>,
}

/// Error body returned by the server
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub kind: Option<String>,
}

use indexmap::IndexMap;

use crate::error::{LpApiError, Result};
use crate::types::{Constraint, Objective, SolveRequest, VariableBound};

/// Builder for constructing solve requests with a fluent API
#[derive(Debug, Default)]
pub struct SolveRequestBuilder {
    variables: IndexMap<String, VariableBound>,
    constraints: Vec<Constraint>,
    objective: Option<Objective>,
    solver_name: Option<String>,
}

impl SolveRequestBuilder {
    /// Create a new solve request builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a decision variable. Re-adding a name replaces its bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use lp_api_sdk::SolveRequestBuilder;
    ///
    /// let builder = SolveRequestBuilder::new()
    ///     .add_variable("x", Some(0.0), Some(100.0))
    ///     .add_variable("free", Some(-1e9), None);
    /// ```
    pub fn add_variable(
        mut self,
        name: impl Into<String>,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Self {
        self.variables
            .insert(name.into(), VariableBound { lower, upper });
        self
    }

    /// Add a constraint row
    ///
    /// # Example
    ///
    /// ```
    /// use lp_api_sdk::{Constraint, SolveRequestBuilder};
    ///
    /// // x + 2y <= 10
    /// let builder = SolveRequestBuilder::new()
    ///     .add_constraint(Constraint::less_eq([("x", 1.0), ("y", 2.0)], 10.0).named("cap"));
    /// ```
    pub fn add_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Add multiple constraint rows, in order
    pub fn add_constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    /// Maximize the given linear expression
    pub fn maximize<K: Into<String>>(self, coefficients: impl IntoIterator<Item = (K, f64)>) -> Self {
        self.objective("max", coefficients)
    }

    /// Minimize the given linear expression
    pub fn minimize<K: Into<String>>(self, coefficients: impl IntoIterator<Item = (K, f64)>) -> Self {
        self.objective("min", coefficients)
    }

    fn objective<K: Into<String>>(
        mut self,
        direction: &str,
        coefficients: impl IntoIterator<Item = (K, f64)>,
    ) -> Self {
        let offset = self.objective.as_ref().map_or(0.0, |o| o.offset);
        self.objective = Some(Objective {
            coefficients: coefficients
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
            direction: direction.to_string(),
            offset,
        });
        self
    }

    /// Constant added to the objective value
    pub fn offset(mut self, offset: f64) -> Self {
        self.objective.get_or_insert_with(Objective::default).offset = offset;
        self
    }

    /// Pick a solver backend by name (server default when unset)
    pub fn solver(mut self, name: impl Into<String>) -> Self {
        self.solver_name = Some(name.into());
        self
    }

    /// Build the solve request
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No variables have been added
    /// - No objective (or an objective without coefficients) has been set
    pub fn build(self) -> Result<SolveRequest> {
        if self.variables.is_empty() {
            return Err(LpApiError::InvalidRequest(
                "At least one variable is required".to_string(),
            ));
        }

        let objective = self
            .objective
            .filter(|o| !o.coefficients.is_empty())
            .ok_or_else(|| {
                LpApiError::InvalidRequest("An objective with coefficients is required".to_string())
            })?;

        Ok(SolveRequest {
            objective,
            constraints: self.constraints,
            variables: self.variables,
            solver_name: self.solver_name,
        })
    }
}

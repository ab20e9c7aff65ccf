//! Translates request definitions into backend variables, objective and rows.
//!
//! Each builder validates as it goes and stops at the first problem; the
//! backend is discarded by the caller on error, so a partially built model is
//! never solved.

use indexmap::IndexMap;

use crate::domain::model::Col;
use crate::domain::solver::Solver;
use crate::domain::validate::{
    parse_direction, parse_sense, resolve_bounds, ReferenceSource, ValidationError,
};
use crate::models::{Constraint, Objective, VariableSet};

/// Variable name → backend handle, in request order.
pub type VariableHandles = IndexMap<String, Col>;

pub fn build_variables(
    solver: &mut dyn Solver,
    definitions: &VariableSet,
) -> Result<VariableHandles, ValidationError> {
    if definitions.is_empty() {
        return Err(ValidationError::EmptyVariableSet);
    }

    let infinity = solver.infinity();
    let mut handles = VariableHandles::with_capacity(definitions.len());
    for (name, bound) in definitions {
        let (lower, upper) = resolve_bounds(name, bound, infinity)?;
        handles.insert(name.clone(), solver.add_variable(lower, upper, name));
    }

    Ok(handles)
}

pub fn set_objective(
    solver: &mut dyn Solver,
    objective: Option<&Objective>,
    variables: &VariableHandles,
) -> Result<(), ValidationError> {
    let objective = match objective {
        Some(objective) if !objective.coefficients.is_empty() => objective,
        _ => return Err(ValidationError::MissingObjective),
    };

    for (name, &coefficient) in &objective.coefficients {
        let col = resolve(variables, name, || ReferenceSource::Objective)?;
        solver.set_objective_coefficient(col, coefficient);
    }

    solver.set_objective_offset(objective.offset.unwrap_or(0.0));
    let direction = parse_direction(objective.direction.as_ref().map(Option::as_deref))?;
    solver.set_direction(direction);

    Ok(())
}

pub fn build_constraints(
    solver: &mut dyn Solver,
    constraints: &[Constraint],
    variables: &VariableHandles,
) -> Result<(), ValidationError> {
    let infinity = solver.infinity();

    for (position, constraint) in constraints.iter().enumerate() {
        let sense = parse_sense(constraint.sense.as_deref())?;
        let rhs = constraint
            .rhs
            .ok_or(ValidationError::MissingRhs { position })?;
        let (low, high) = sense.range(rhs, infinity);

        let name = constraint_name(constraint, position);
        if constraint.coefficients.is_empty() {
            return Err(ValidationError::EmptyCoefficients { constraint: name });
        }

        let row = solver.add_constraint(low, high, &name);
        for (variable, &coefficient) in &constraint.coefficients {
            let col = resolve(variables, variable, || ReferenceSource::Constraint(name.clone()))?;
            solver.set_coefficient(row, col, coefficient);
        }
    }

    Ok(())
}

/// Explicit name, or `constraint_<position>` when absent or empty.
pub fn constraint_name(constraint: &Constraint, position: usize) -> String {
    match constraint.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("constraint_{}", position),
    }
}

fn resolve(
    variables: &VariableHandles,
    name: &str,
    origin: impl FnOnce() -> ReferenceSource,
) -> Result<Col, ValidationError> {
    variables
        .get(name)
        .copied()
        .ok_or_else(|| ValidationError::UnknownVariableReference {
            origin: origin(),
            variable: name.to_string(),
        })
}

use thiserror::Error;

use laostar_model::{ModelError, StateId};

#[derive(Debug, Error)]
/// Error type for expansion, backup, and partial-solution operations.
pub enum SolverError {
    /// Usage bug: goal states never belong on the expansion frontier.
    #[error("state '{state}' cannot be expanded because it is a goal state")]
    GoalExpansion { state: StateId },

    #[error("value vector has length {got} but the state index covers {expected} states")]
    ValueLength { expected: usize, got: usize },

    #[error(transparent)]
    Model(#[from] ModelError),
}

use thiserror::Error;

use crate::ids::StateId;

#[derive(Debug, Error)]
/// Error type for graph loading, validation, compilation, and lookups.
pub enum ModelError {
    #[error("failed to read YAML file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("state '{state}' is not present in the graph")]
    MissingState { state: StateId },

    #[error("duplicate state id '{id}'")]
    DuplicateStateId { id: StateId },

    #[error("outcome in state '{state}' references unknown successor '{next}'")]
    UnknownSuccessor { state: StateId, next: StateId },

    #[error("outcome {outcome_index} in state '{state}' declares no actions")]
    EmptyActionMap {
        state: StateId,
        outcome_index: usize,
    },

    #[error(
        "invalid weight for action '{action}' in state '{state}', outcome {outcome_index}: {value}"
    )]
    InvalidWeight {
        state: StateId,
        action: String,
        outcome_index: usize,
        value: f64,
    },

    #[error(
        "weight sum for state '{state}', action '{action}' must be within {tolerance} of 1.0, got {sum}"
    )]
    WeightSum {
        state: StateId,
        action: String,
        sum: f64,
        tolerance: f64,
    },

    #[error("builder referenced unknown state '{state}'")]
    BuilderUnknownState { state: StateId },
}

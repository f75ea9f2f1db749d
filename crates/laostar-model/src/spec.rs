use std::collections::{BTreeMap, HashMap, HashSet};
use std::{fs, path::Path};

use indexmap::IndexMap;

use serde::{Deserialize, Serialize};

use crate::{ActionId, ImplicitGraph, ModelError, Outcome, State, StateId};

/// Floating point tolerance used when validating per-action weight sums.
pub(crate) const WEIGHT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Serializable graph schema used for YAML IO and validation.
pub struct GraphSpec {
    /// Schema version for future compatibility checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// All state declarations, in canonical order.
    pub states: Vec<StateSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A single state declaration in the graph schema.
pub struct StateSpec {
    /// Unique state id.
    pub id: String,
    /// Whether this state is a goal (defaults to `false` if omitted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<bool>,
    /// Stochastic adjacency of this state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adj: Option<Vec<OutcomeSpec>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One successor declaration: target id plus the action→weight map.
pub struct OutcomeSpec {
    pub next: String,
    pub actions: BTreeMap<String, f64>,
}

impl GraphSpec {
    /// Load a graph spec from YAML on disk.
    pub fn load_yaml(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let yaml = fs::read_to_string(path)?;
        let spec: GraphSpec = serde_yaml::from_str(&yaml)?;
        Ok(spec)
    }

    /// Serialize and write this spec to YAML.
    pub fn save_yaml(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate schema invariants using the crate default tolerance.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.validate_with_tolerance(WEIGHT_TOLERANCE)
    }

    /// Validate ids, successor references, and weight constraints.
    ///
    /// For every state and every action it mentions, the weights of the
    /// outcomes carrying that action must sum to 1: they form a probability
    /// distribution over successors.
    pub fn validate_with_tolerance(&self, tolerance: f64) -> Result<(), ModelError> {
        // State ids must be unique.
        let mut ids = HashSet::with_capacity(self.states.len());
        for state in &self.states {
            if !ids.insert(state.id.as_str()) {
                return Err(ModelError::DuplicateStateId {
                    id: StateId::from(state.id.as_str()),
                });
            }
        }

        for state in &self.states {
            let adj = state.adj.as_deref().unwrap_or(&[]);
            let mut sums: HashMap<&str, f64> = HashMap::new();

            for (i, outcome) in adj.iter().enumerate() {
                if outcome.actions.is_empty() {
                    return Err(ModelError::EmptyActionMap {
                        state: StateId::from(state.id.as_str()),
                        outcome_index: i,
                    });
                }

                if !ids.contains(outcome.next.as_str()) {
                    return Err(ModelError::UnknownSuccessor {
                        state: StateId::from(state.id.as_str()),
                        next: StateId::from(outcome.next.as_str()),
                    });
                }

                for (action, weight) in &outcome.actions {
                    if weight.is_nan() || !weight.is_finite() || *weight < 0.0 {
                        return Err(ModelError::InvalidWeight {
                            state: StateId::from(state.id.as_str()),
                            action: action.clone(),
                            outcome_index: i,
                            value: *weight,
                        });
                    }

                    *sums.entry(action.as_str()).or_insert(0.0) += weight;
                }
            }

            for (action, sum) in sums {
                if (sum - 1.0).abs() > tolerance {
                    return Err(ModelError::WeightSum {
                        state: StateId::from(state.id.as_str()),
                        action: action.to_string(),
                        sum,
                        tolerance,
                    });
                }
            }
        }

        Ok(())
    }

    /// Load, validate, and compile a graph from a YAML file.
    pub fn compile_yaml(path: impl AsRef<Path>) -> Result<ImplicitGraph, ModelError> {
        Self::load_yaml(path)?.compile()
    }

    /// Compile this spec into the runtime graph representation.
    pub fn compile(&self) -> Result<ImplicitGraph, ModelError> {
        self.validate()?;

        let mut states = IndexMap::with_capacity(self.states.len());
        for state in &self.states {
            let adj = state
                .adj
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .map(|outcome| {
                    let weights = outcome
                        .actions
                        .iter()
                        .map(|(action, weight)| (ActionId::from(action.as_str()), *weight))
                        .collect();
                    Outcome::new(outcome.next.as_str(), weights)
                })
                .collect();

            states.insert(
                StateId::from(state.id.as_str()),
                State {
                    goal: state.goal.unwrap_or(false),
                    adj,
                },
            );
        }

        Ok(ImplicitGraph::from_states(states))
    }
}

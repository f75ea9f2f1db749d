use std::collections::BTreeMap;

use crate::{GraphSpec, ImplicitGraph, ModelError, OutcomeSpec, StateId, StateSpec};

#[derive(Debug, Clone, Default)]
/// Programmatic construction of implicit graphs, mostly used by tests and
/// drivers that assemble a model in code rather than from YAML.
pub struct GraphBuilder {
    states: Vec<StateSpec>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state. Identifiers are coerced to canonical string form.
    pub fn add_state(&mut self, id: impl Into<StateId>, goal: bool) -> &mut Self {
        self.states.push(StateSpec {
            id: id.into().as_str().to_string(),
            goal: Some(goal),
            adj: Some(Vec::new()),
        });
        self
    }

    /// Add weight `weight` for `action` on the edge `state -> next`.
    ///
    /// The outcome entry for `next` is created on first use; repeated calls
    /// with different actions accumulate into the same entry's action map.
    pub fn add_edge(
        &mut self,
        state: impl Into<StateId>,
        next: impl Into<StateId>,
        action: impl Into<String>,
        weight: f64,
    ) -> Result<&mut Self, ModelError> {
        let state_id = state.into();
        let next = next.into();

        let state = self
            .states
            .iter_mut()
            .find(|s| s.id == state_id.as_str())
            .ok_or(ModelError::BuilderUnknownState { state: state_id })?;

        let adj = state.adj.get_or_insert_with(Vec::new);
        let idx = match adj.iter().position(|o| o.next == next.as_str()) {
            Some(idx) => idx,
            None => {
                adj.push(OutcomeSpec {
                    next: next.as_str().to_string(),
                    actions: BTreeMap::new(),
                });
                adj.len() - 1
            }
        };
        adj[idx].actions.insert(action.into(), weight);

        Ok(self)
    }

    pub fn build_spec(self) -> Result<GraphSpec, ModelError> {
        let spec = GraphSpec {
            version: Some(1),
            states: self.states,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn compile(self) -> Result<ImplicitGraph, ModelError> {
        let spec = self.build_spec()?;
        spec.compile()
    }
}

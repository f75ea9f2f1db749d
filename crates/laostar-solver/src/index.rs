use std::collections::HashMap;

use laostar_model::{ExplicitGraph, ImplicitGraph, ModelError, StateId};

use crate::SolverError;

#[derive(Debug, Clone, Default)]
/// Stable state→dense-index mapping for the value vector and policy.
///
/// Built once per solve from a graph's key order and rebuilt when newly
/// discovered states grow the explicit graph, so vector sizes track what has
/// been explored.
pub struct StateIndex {
    order: Vec<StateId>,
    index: HashMap<StateId, usize>,
}

impl StateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index over the implicit graph's canonical state ordering.
    pub fn from_graph(graph: &ImplicitGraph) -> Self {
        Self::from_ids(graph.state_ids().cloned())
    }

    /// Index over the explicit graph's insertion order.
    pub fn from_explicit(graph: &ExplicitGraph) -> Self {
        Self::from_ids(graph.state_ids().cloned())
    }

    fn from_ids(ids: impl Iterator<Item = StateId>) -> Self {
        let order: Vec<StateId> = ids.collect();
        let index = order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        Self { order, index }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: &StateId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Like [`get`](Self::get) but fails with a lookup error on absence.
    pub fn index_of(&self, id: &StateId) -> Result<usize, SolverError> {
        self.get(id)
            .ok_or_else(|| SolverError::Model(ModelError::MissingState { state: id.clone() }))
    }

    pub fn state_at(&self, index: usize) -> Option<&StateId> {
        self.order.get(index)
    }

    /// States in index order.
    pub fn states(&self) -> &[StateId] {
        &self.order
    }

    /// Zero-initialized value vector sized to this index.
    pub fn zero_values(&self) -> Vec<f64> {
        vec![0.0; self.order.len()]
    }
}

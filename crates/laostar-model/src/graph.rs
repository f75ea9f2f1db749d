use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;

use crate::{ActionId, ModelError, StateId};

#[derive(Debug, Clone, PartialEq)]
/// One successor entry in a state's adjacency list.
///
/// `weights` maps every action under which this successor can be reached to
/// the probability of reaching it with that action. A self-loop is an outcome
/// whose `name` equals the owning state.
pub struct Outcome {
    pub name: StateId,
    pub weights: BTreeMap<ActionId, f64>,
}

impl Outcome {
    pub fn new(name: impl Into<StateId>, weights: BTreeMap<ActionId, f64>) -> Self {
        Self {
            name: name.into(),
            weights,
        }
    }

    /// Weight of this outcome under `action`, if the action applies.
    pub fn weight(&self, action: &ActionId) -> Option<f64> {
        self.weights.get(action).copied()
    }

    pub fn has_action(&self, action: &ActionId) -> bool {
        self.weights.contains_key(action)
    }

    /// Copy of this outcome with the weight map reduced to `action` only.
    ///
    /// Returns `None` when the action does not apply to this outcome. Used by
    /// the partial-solution updater, which commits to a single action per
    /// state.
    pub fn restricted_to(&self, action: &ActionId) -> Option<Outcome> {
        let weight = self.weight(action)?;
        let mut weights = BTreeMap::new();
        weights.insert(action.clone(), weight);
        Some(Outcome {
            name: self.name.clone(),
            weights,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A state of the implicit MDP: goal flag plus stochastic adjacency.
pub struct State {
    pub goal: bool,
    pub adj: Vec<Outcome>,
}

#[derive(Debug, Clone, Default)]
/// The full transition model, keyed by canonical state id.
///
/// Key iteration follows insertion order, which fixes the canonical state
/// ordering used by the value vector and policy.
pub struct ImplicitGraph {
    states: IndexMap<StateId, State>,
}

impl ImplicitGraph {
    pub(crate) fn from_states(states: IndexMap<StateId, State>) -> Self {
        Self { states }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, id: &StateId) -> bool {
        self.states.contains_key(id)
    }

    pub fn get(&self, id: &StateId) -> Option<&State> {
        self.states.get(id)
    }

    /// Like [`get`](Self::get) but fails with a lookup error on absence.
    pub fn state(&self, id: &StateId) -> Result<&State, ModelError> {
        self.states
            .get(id)
            .ok_or_else(|| ModelError::MissingState { state: id.clone() })
    }

    /// State ids in canonical (insertion) order.
    pub fn state_ids(&self) -> impl Iterator<Item = &StateId> {
        self.states.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateId, &State)> {
        self.states.iter()
    }

    /// Distinct action names used anywhere in the graph, sorted.
    ///
    /// The sorted order is the fixed action ordering the Bellman backup uses
    /// to break argmin ties deterministically.
    pub fn actions(&self) -> Vec<ActionId> {
        let mut actions = BTreeSet::new();
        for state in self.states.values() {
            for outcome in &state.adj {
                for action in outcome.weights.keys() {
                    actions.insert(action.clone());
                }
            }
        }
        actions.into_iter().collect()
    }

    /// Outcomes of `state` that can occur under `action`, in adjacency order.
    ///
    /// Each returned outcome keeps its full weight map, not just the entry
    /// for `action`. Fails if `state` is absent from the graph.
    pub fn reachable(
        &self,
        state: &StateId,
        action: &ActionId,
    ) -> Result<Vec<&Outcome>, ModelError> {
        let state = self.state(state)?;
        Ok(state
            .adj
            .iter()
            .filter(|outcome| outcome.has_action(action))
            .collect())
    }
}

#[derive(Debug, Clone)]
/// The implicit graph plus a per-state expansion flag.
///
/// Built once per solve as a deep copy of the implicit graph with every flag
/// false; only the expansion engine flips flags, and states are never
/// removed.
pub struct WorkingGraph {
    graph: ImplicitGraph,
    expanded: IndexMap<StateId, bool>,
}

impl WorkingGraph {
    pub fn new(graph: &ImplicitGraph) -> Self {
        let expanded = graph.state_ids().map(|id| (id.clone(), false)).collect();
        Self {
            graph: graph.clone(),
            expanded,
        }
    }

    pub fn graph(&self) -> &ImplicitGraph {
        &self.graph
    }

    pub fn state(&self, id: &StateId) -> Result<&State, ModelError> {
        self.graph.state(id)
    }

    pub fn is_goal(&self, id: &StateId) -> Result<bool, ModelError> {
        Ok(self.graph.state(id)?.goal)
    }

    pub fn is_expanded(&self, id: &StateId) -> Result<bool, ModelError> {
        self.expanded
            .get(id)
            .copied()
            .ok_or_else(|| ModelError::MissingState { state: id.clone() })
    }

    /// Flip the expansion flag. Safe to call on an already-expanded state.
    pub fn mark_expanded(&mut self, id: &StateId) -> Result<(), ModelError> {
        let flag = self
            .expanded
            .get_mut(id)
            .ok_or_else(|| ModelError::MissingState { state: id.clone() })?;
        *flag = true;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// A node of the partial-solution graph: adjacency only.
///
/// An empty adjacency list marks a leaf, reachable under the current policy
/// but not yet expanded or not yet assigned an action.
pub struct ExplicitNode {
    pub adj: Vec<Outcome>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// The explored, policy-committed subgraph.
///
/// Grows monotonically: states are added as leaves, a state's edges are
/// replaced wholesale when its policy changes, and states are never removed.
/// Key iteration follows insertion order.
pub struct ExplicitGraph {
    nodes: IndexMap<StateId, ExplicitNode>,
}

impl ExplicitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-node graph holding `root` as a leaf; the usual starting point of
    /// a solve.
    pub fn with_root(root: impl Into<StateId>) -> Self {
        let mut graph = Self::new();
        graph.add_state(root);
        graph
    }

    /// Insert `id` as a leaf if absent. Returns whether a node was inserted;
    /// an existing node (leaf or not) is left untouched.
    pub fn add_state(&mut self, id: impl Into<StateId>) -> bool {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, ExplicitNode::default());
        true
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &StateId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: &StateId) -> Option<&ExplicitNode> {
        self.nodes.get(id)
    }

    pub fn node(&self, id: &StateId) -> Result<&ExplicitNode, ModelError> {
        self.nodes
            .get(id)
            .ok_or_else(|| ModelError::MissingState { state: id.clone() })
    }

    /// Replace a state's outgoing edges wholesale.
    pub fn set_adj(&mut self, id: &StateId, adj: Vec<Outcome>) -> Result<(), ModelError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| ModelError::MissingState { state: id.clone() })?;
        node.adj = adj;
        Ok(())
    }

    /// State ids in insertion order.
    pub fn state_ids(&self) -> impl Iterator<Item = &StateId> {
        self.nodes.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateId, &ExplicitNode)> {
        self.nodes.iter()
    }
}

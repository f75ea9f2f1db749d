use std::collections::{HashMap, HashSet, VecDeque};

use laostar_model::{ExplicitGraph, StateId};

/// All states other than `state` from which `state` is reachable through one
/// or more explicit-graph edges.
///
/// Breadth-first search over reversed edges with an explicit frontier and
/// seen set, so arbitrary cycles terminate and a state never appears in its
/// own ancestor set, self-loops included. Pure over the current edges.
pub fn find_ancestors<'a>(state: &'a StateId, explicit: &'a ExplicitGraph) -> HashSet<StateId> {
    let mut predecessors: HashMap<&StateId, Vec<&StateId>> = HashMap::new();
    for (id, node) in explicit.iter() {
        for outcome in &node.adj {
            predecessors.entry(&outcome.name).or_default().push(id);
        }
    }

    let mut seen: HashSet<&StateId> = HashSet::new();
    seen.insert(state);
    let mut frontier: VecDeque<&StateId> = VecDeque::new();
    frontier.push_back(state);

    let mut ancestors = HashSet::new();
    while let Some(current) = frontier.pop_front() {
        let Some(parents) = predecessors.get(current) else {
            continue;
        };
        for &parent in parents {
            if seen.insert(parent) {
                ancestors.insert(parent.clone());
                frontier.push_back(parent);
            }
        }
    }

    ancestors
}

use std::collections::HashSet;

use log::debug;

use laostar_model::{ExplicitGraph, StateId, WorkingGraph};

use crate::SolverError;

/// Expand `state`: mark it expanded in the working graph and insert every
/// distinct successor named in its adjacency into the explicit graph as a
/// leaf, if not already present.
///
/// Expanding a goal state is a usage bug and fails with
/// [`SolverError::GoalExpansion`]. Re-expanding an already-expanded state is
/// a safe no-op for the flag and never duplicates successors.
pub fn expand_state(
    state: &StateId,
    working: &mut WorkingGraph,
    explicit: &mut ExplicitGraph,
) -> Result<(), SolverError> {
    if working.is_goal(state)? {
        return Err(SolverError::GoalExpansion {
            state: state.clone(),
        });
    }

    working.mark_expanded(state)?;

    let mut seen = HashSet::new();
    let successors: Vec<StateId> = working
        .state(state)?
        .adj
        .iter()
        .map(|outcome| outcome.name.clone())
        .filter(|name| seen.insert(name.clone()))
        .collect();

    let mut inserted = 0usize;
    for successor in successors {
        if explicit.add_state(successor) {
            inserted += 1;
        }
    }

    debug!("expanded state '{state}', {inserted} new leaves");
    Ok(())
}

/// States on the expansion frontier: keys of the explicit graph, in its
/// insertion order, that are non-goal and still unexpanded in the working
/// graph. Goal states never appear since they need no outgoing expansion.
pub fn unexpanded_states(
    working: &WorkingGraph,
    explicit: &ExplicitGraph,
) -> Result<Vec<StateId>, SolverError> {
    let mut frontier = Vec::new();
    for id in explicit.state_ids() {
        if working.is_goal(id)? {
            continue;
        }
        if !working.is_expanded(id)? {
            frontier.push(id.clone());
        }
    }
    Ok(frontier)
}

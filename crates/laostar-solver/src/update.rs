use laostar_model::{ActionId, ExplicitGraph, ImplicitGraph, Outcome, StateId};

use crate::SolverError;

/// Rewrite the explicit graph's edges to match a fresh policy.
///
/// For every state with an assigned action (aligned against `states`, the
/// canonical state ordering), its explicit adjacency is replaced wholesale
/// with the implicit graph's outcomes for that action, each weight map
/// reduced to the chosen action only. Successors not yet in the explicit
/// graph are inserted as empty leaves for the next expansion cycle to find.
/// States without an assigned action are left untouched. The implicit graph
/// is never mutated.
pub fn update_partial_solution(
    policy: &[Option<ActionId>],
    states: &[StateId],
    explicit: &mut ExplicitGraph,
    graph: &ImplicitGraph,
) -> Result<(), SolverError> {
    for (state, action) in states.iter().zip(policy) {
        let Some(action) = action else {
            continue;
        };

        let edges: Vec<Outcome> = graph
            .reachable(state, action)?
            .into_iter()
            .filter_map(|outcome| outcome.restricted_to(action))
            .collect();
        let successors: Vec<StateId> = edges.iter().map(|edge| edge.name.clone()).collect();

        explicit.set_adj(state, edges)?;
        for successor in successors {
            explicit.add_state(successor);
        }
    }
    Ok(())
}

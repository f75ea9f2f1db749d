use log::{debug, trace};

use laostar_model::{ActionId, ImplicitGraph, StateId};

use crate::{SolverError, StateIndex};

/// Sweep bound guarding value iteration against misspecified graphs that
/// never reach an epsilon-convergent fixed point.
pub const MAX_SWEEPS: usize = 10_000;

#[derive(Debug, Clone)]
/// Result of one Bellman backup over a restricted state set.
pub struct BackupResult {
    /// Updated value vector; entries outside the restricted set are
    /// unchanged.
    pub values: Vec<f64>,
    /// Best action per state, aligned with the state index; `None` outside
    /// the restricted set and for goal states.
    pub policy: Vec<Option<ActionId>>,
}

#[derive(Debug, Clone)]
/// Result of restricted value iteration.
pub struct ValueIterationOutcome {
    pub values: Vec<f64>,
    pub policy: Vec<Option<ActionId>>,
    /// Number of backup sweeps performed.
    pub sweeps: usize,
    /// Whether the sup-norm delta dropped below epsilon within
    /// [`MAX_SWEEPS`]. On `false` the values are the best effort reached at
    /// the bound.
    pub converged: bool,
}

/// One Bellman backup over the states in `z`, with unit step cost:
/// `cost(s, a) = Σ w(o, a) · (1 + V[o.name])`, minimized over actions.
///
/// Ties break toward the earliest action in the fixed `actions` ordering.
/// Goal states in `z` keep their value (by convention 0, a fixed sink) and
/// get no policy entry. A non-goal state with no outcomes under any action is
/// treated as a terminal of cost 0.
pub fn bellman(
    values: &[f64],
    index: &StateIndex,
    actions: &[ActionId],
    z: &[StateId],
    graph: &ImplicitGraph,
) -> Result<BackupResult, SolverError> {
    backup(values, index, actions, z, graph, 1.0)
}

fn backup(
    values: &[f64],
    index: &StateIndex,
    actions: &[ActionId],
    z: &[StateId],
    graph: &ImplicitGraph,
    discount: f64,
) -> Result<BackupResult, SolverError> {
    if values.len() != index.len() {
        return Err(SolverError::ValueLength {
            expected: index.len(),
            got: values.len(),
        });
    }

    let mut next = values.to_vec();
    let mut policy: Vec<Option<ActionId>> = vec![None; values.len()];

    for state in z {
        let idx = index.index_of(state)?;
        if graph.state(state)?.goal {
            continue;
        }

        let mut best: Option<(f64, &ActionId)> = None;
        for action in actions {
            let outcomes = graph.reachable(state, action)?;
            if outcomes.is_empty() {
                continue;
            }

            let mut cost = 0.0;
            for outcome in outcomes {
                let target = index.index_of(&outcome.name)?;
                if let Some(weight) = outcome.weight(action) {
                    cost += weight * (1.0 + discount * values[target]);
                }
            }

            // Strict comparison keeps the earliest action on ties.
            if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                best = Some((cost, action));
            }
        }

        match best {
            Some((cost, action)) => {
                trace!("backup '{state}': value {cost}, action '{action}'");
                next[idx] = cost;
                policy[idx] = Some(action.clone());
            }
            // No outcomes under any action: unreachable/terminal convention.
            None => next[idx] = 0.0,
        }
    }

    Ok(BackupResult {
        values: next,
        policy,
    })
}

/// Restricted value iteration: repeat the Bellman backup over `z` until the
/// sup-norm difference between successive value vectors drops below
/// `epsilon`, bounded by [`MAX_SWEEPS`].
///
/// `discount` scales successor values inside the backup; 1.0 gives plain
/// stochastic-shortest-path semantics. Non-convergence within the bound is
/// not an error: the outcome carries `converged: false` and the best-effort
/// values.
pub fn value_iteration(
    values: &[f64],
    index: &StateIndex,
    actions: &[ActionId],
    z: &[StateId],
    graph: &ImplicitGraph,
    discount: f64,
    epsilon: f64,
) -> Result<ValueIterationOutcome, SolverError> {
    let mut current = values.to_vec();
    let mut policy: Vec<Option<ActionId>> = vec![None; current.len()];

    for sweep in 1..=MAX_SWEEPS {
        let result = backup(&current, index, actions, z, graph, discount)?;
        let delta = sup_norm(&current, &result.values);
        current = result.values;
        policy = result.policy;
        debug!("value iteration sweep {sweep}: sup-norm delta {delta:e}");

        if delta < epsilon {
            return Ok(ValueIterationOutcome {
                values: current,
                policy,
                sweeps: sweep,
                converged: true,
            });
        }
    }

    Ok(ValueIterationOutcome {
        values: current,
        policy,
        sweeps: MAX_SWEEPS,
        converged: false,
    })
}

fn sup_norm(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

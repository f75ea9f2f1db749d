mod ancestors;
mod dp;
mod error;
mod expand;
mod index;
mod update;

pub use ancestors::find_ancestors;
pub use dp::{BackupResult, MAX_SWEEPS, ValueIterationOutcome, bellman, value_iteration};
pub use error::SolverError;
pub use expand::{expand_state, unexpanded_states};
pub use index::StateIndex;
pub use update::update_partial_solution;

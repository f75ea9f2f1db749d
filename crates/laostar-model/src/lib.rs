mod builder;
mod error;
mod graph;
mod ids;
mod spec;

pub use builder::GraphBuilder;
pub use error::ModelError;
pub use graph::{ExplicitGraph, ExplicitNode, ImplicitGraph, Outcome, State, WorkingGraph};
pub use ids::{ActionId, StateId};
pub use spec::{GraphSpec, OutcomeSpec, StateSpec};

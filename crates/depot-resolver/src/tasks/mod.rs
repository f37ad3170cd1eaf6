//! Graph tasks: each rewrites the graph in place and returns how many
//! nodes or edges it changed.

mod conflicts;
mod cyclic;
mod enabled;
mod excluded;
mod populate;
mod scope;
mod transitive;
mod update_scopes;

pub use conflicts::refine_conflicts;
pub use cyclic::flag_cyclic_edges;
pub use enabled::reduce_enabled_edges;
pub use excluded::flag_excluded_edges;
pub use populate::populate;
pub use scope::{flag_intransitive_edges, reduce_scope};
pub use transitive::reduce_transitive_edges;
pub use update_scopes::update_scopes;

//! Vocabulary of a request planner built on [Graph](crate::graph::Graph).
//!
//! A client query becomes a [MaterializationGraph]: one vertex per selected field or
//! argument, keyed by its [OperationPath], and one edge per [Provenance] relation.
//! Before executing a field, the planner resolves the field's dependency group,
//! i.e., everything reachable from it in breadth-first order.
mod path;
pub use self::path::*;
mod component;
pub use self::component::*;
mod materialization;
pub use self::materialization::*;

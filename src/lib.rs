//! Immutable, structurally-shared graphs in eight flavors.
//!
//! * [graph]: the graphs, their variants and the factory choosing among them.
//! * [plan]: operation paths and provenance-tagged materialization graphs of a query planner.
//! * [error]: errors raised while choosing a variant or parsing identifiers.
pub mod error;
pub mod graph;
pub mod plan;

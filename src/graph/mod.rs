//! Immutable graphs in eight flavors sharing one vertex/edge algebra.
//!
//! # Variants
//!
//! A graph is directed or not, may or may not permit self-loops,
//! and may or may not keep several values on one line (parallel edges).
//! [GraphFactory] turns a [DescriptorSet] into one of the eight [GraphKind]s.
//!
//! # Values, not objects
//!
//! Every write on a [Graph] returns a new graph. The old one is untouched and
//! shares unchanged structure with the new one, so clones are cheap and
//! graphs may be handed to other threads freely.
//!
//! # Behaviors
//!
//! Each variant pairs a storage shape from [data] with a zero-sized behavior from
//! [behavior]. Behaviors carry no state; the storage value is threaded through each call.

mod descriptor;
pub use self::descriptor::*;
mod line;
pub use self::line::*;
pub mod data;
pub mod behavior;
mod factory;
pub use self::factory::*;
mod persistent;
pub use self::persistent::*;
mod graph_debug;
pub use self::graph_debug::*;
pub mod graphviz;

use std::hash::Hash;

/// Identity of a vertex. Equal points denote the same vertex.
pub trait Point: Clone + Hash + Eq + 'static {}

impl<T> Point for T where T: Clone + Hash + Eq + 'static {}

/// Values attached to vertices.
pub trait VertexValue: Clone + 'static {}

impl<T> VertexValue for T where T: Clone + 'static {}

/// Values attached to edges.
///
/// Parallel variants keep a set of these per line, so they must be hashable.
pub trait EdgeValue: Clone + Hash + Eq + 'static {}

impl<T> EdgeValue for T where T: Clone + Hash + Eq + 'static {}

#[cfg(test)]
pub use self::tests::*;

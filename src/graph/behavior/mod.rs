//! The graph algebra, one zero-sized behavior per variant.
//!
//! ```plain
//!                 GraphBehavior  (put/remove/filter/map/flat-map, edge streams)
//!                   ^        ^
//!                   |        |
//!   DirectedGraphBehavior    StandardUndirected<S>, ParallelUndirected<S>
//!   (successors, predecessors, edges from/to a point)
//!                   ^
//!                   |
//!   StandardDirected<S>, ParallelDirected<S>
//! ```
//!
//! `S` is a [SelfLoopPolicy]. Four shapes times two policies make the eight variants.
//!
//! A behavior implements a handful of primitives against its storage shape.
//! Everything else, including every rebuild that must re-check edges, lives in
//! default methods here so that all variants cascade and validate the same way.
mod directed;
pub use self::directed::*;
mod undirected;
pub use self::undirected::*;

use crate::graph::{data::*, *};
use ahash::RandomState;
use std::collections::HashMap;
use tracing::trace;

/// Whether a variant keeps edges whose endpoints are the same point.
pub trait SelfLoopPolicy: 'static {
    const FLAG: DescriptorSet;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ForbidSelfLoops;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PermitSelfLoops;

impl SelfLoopPolicy for ForbidSelfLoops {
    const FLAG: DescriptorSet = DescriptorSet::empty();
}

impl SelfLoopPolicy for PermitSelfLoops {
    const FLAG: DescriptorSet = DescriptorSet::PERMIT_SELF_LOOPS;
}

pub type Directed = StandardDirected<ForbidSelfLoops>;
pub type DirectedWithSelfLoops = StandardDirected<PermitSelfLoops>;
pub type DirectedMulti = ParallelDirected<ForbidSelfLoops>;
pub type DirectedMultiWithSelfLoops = ParallelDirected<PermitSelfLoops>;
pub type Undirected = StandardUndirected<ForbidSelfLoops>;
pub type UndirectedWithSelfLoops = StandardUndirected<PermitSelfLoops>;
pub type UndirectedMulti = ParallelUndirected<ForbidSelfLoops>;
pub type UndirectedMultiWithSelfLoops = ParallelUndirected<PermitSelfLoops>;

/// The vertex/edge algebra of one variant.
///
/// All functions are associated functions: a behavior has no state of its own.
/// Writes never fail. A write that would break the variant's rules returns
/// an unchanged copy of the input.
pub trait GraphBehavior<P, V, E>: Sized + 'static
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    type Data: Clone;

    const DESCRIPTORS: DescriptorSet;

    /// A shape holding `vertices` and no edges.
    fn with_vertices(vertices: PMap<P, V>) -> Self::Data;
    fn vertices(data: &Self::Data) -> &PMap<P, V>;
    fn vertices_mut(data: &mut Self::Data) -> &mut PMap<P, V>;
    /// Number of (line, value) pairs.
    fn edge_count(data: &Self::Data) -> usize;
    /// Every (line, value) pair; one pair per member of a parallel line.
    fn stream_edges<'a>(data: &'a Self::Data)
        -> Box<dyn Iterator<Item = (Line<P>, &'a E)> + 'a>;
    /// Values on `line`, empty if there are none.
    fn get<'a>(data: &'a Self::Data, line: &Line<P>) -> Box<dyn Iterator<Item = &'a E> + 'a>;
    /// Brings a caller's line into this variant's orientation, if that is possible.
    fn orient(line: Line<P>) -> Option<Line<P>>;
    /// Stores an edge on an admitted line.
    fn insert_edge(data: &mut Self::Data, line: Line<P>, edge: E);
    /// Drops every value on an oriented line.
    fn delete_edges(data: &mut Self::Data, line: &Line<P>);

    fn empty() -> Self::Data {
        Self::with_vertices(PMap::default())
    }

    /// The oriented line, if an edge on it would be kept.
    fn admit(data: &Self::Data, line: Line<P>) -> Option<Line<P>> {
        let line = Self::orient(line)?;
        let vertices = Self::vertices(data);
        let (a, b) = line.endpoints();
        if !vertices.contains_key(a) || !vertices.contains_key(b) {
            return None;
        }
        if line.is_self_loop() && !Self::DESCRIPTORS.permits_self_loops() {
            return None;
        }
        Some(line)
    }

    /// Builds a shape from `vertices`, keeping only admissible `edges`.
    fn rebuild<I>(vertices: PMap<P, V>, edges: I) -> Self::Data
    where
        I: IntoIterator<Item = (Line<P>, E)>,
    {
        let mut data = Self::with_vertices(vertices);
        for (line, edge) in edges {
            if let Some(line) = Self::admit(&data, line) {
                Self::insert_edge(&mut data, line, edge);
            }
        }
        data
    }

    fn from_parts<IV, IE>(vertices: IV, edges: IE) -> Self::Data
    where
        IV: IntoIterator<Item = (P, V)>,
        IE: IntoIterator<Item = (Line<P>, E)>,
    {
        Self::rebuild(vertices.into_iter().collect(), edges)
    }

    fn put_vertex(data: &Self::Data, point: P, vertex: V) -> Self::Data {
        let mut res = data.clone();
        Self::vertices_mut(&mut res).insert(point, vertex);
        res
    }

    fn put_edge(data: &Self::Data, line: Line<P>, edge: E) -> Self::Data {
        match Self::admit(data, line) {
            Some(line) => {
                let mut res = data.clone();
                Self::insert_edge(&mut res, line, edge);
                res
            }
            None => {
                trace!(descriptors = %Self::DESCRIPTORS, "edge write ignored");
                data.clone()
            }
        }
    }

    fn remove_vertex(data: &Self::Data, point: &P) -> Self::Data {
        let vertices = Self::vertices(data);
        if !vertices.contains_key(point) {
            return data.clone();
        }
        let edges = Self::stream_edges(data)
            .filter(|(line, _)| !line.touches(point))
            .map(|(line, e)| (line, e.clone()));
        Self::rebuild(vertices.without(point), edges)
    }

    fn remove_edges(data: &Self::Data, line: &Line<P>) -> Self::Data {
        match Self::orient(line.clone()) {
            Some(line) => {
                let mut res = data.clone();
                Self::delete_edges(&mut res, &line);
                res
            }
            None => data.clone(),
        }
    }

    fn filter_vertices<F>(data: &Self::Data, mut pred: F) -> Self::Data
    where
        F: FnMut(&P, &V) -> bool,
    {
        let vertices: PMap<P, V> = Self::vertices(data)
            .iter()
            .filter(|(p, v)| pred(*p, *v))
            .map(|(p, v)| (p.clone(), v.clone()))
            .collect();
        if vertices.len() == Self::vertices(data).len() {
            return data.clone();
        }
        let edges = Self::stream_edges(data).map(|(line, e)| (line, e.clone()));
        Self::rebuild(vertices, edges)
    }

    fn filter_edges<F>(data: &Self::Data, mut pred: F) -> Self::Data
    where
        F: FnMut(&Line<P>, &E) -> bool,
    {
        let edges = Self::stream_edges(data)
            .filter(|(line, e)| pred(line, *e))
            .map(|(line, e)| (line, e.clone()));
        Self::rebuild(Self::vertices(data).clone(), edges)
    }

    /// Re-keys vertices and edges through `f`.
    ///
    /// `f` is called once per point. Vertices whose new points collide keep one of
    /// their values; edges are re-checked, so a collision may turn an edge into a
    /// self-loop that this variant drops.
    fn map_points<P2, F>(
        data: &<Self as GraphBehavior<P, V, E>>::Data,
        mut f: F,
    ) -> <Self as GraphBehavior<P2, V, E>>::Data
    where
        P2: Point,
        F: FnMut(&P) -> P2,
        Self: GraphBehavior<P2, V, E>,
    {
        let vertices = <Self as GraphBehavior<P, V, E>>::vertices(data);
        let mut renamed: HashMap<&P, P2, RandomState> =
            HashMap::with_capacity_and_hasher(vertices.len(), RandomState::new());
        let mut new_vertices = PMap::default();
        for (p, v) in vertices.iter() {
            let q = f(p);
            new_vertices.insert(q.clone(), v.clone());
            renamed.insert(p, q);
        }
        let edges =
            <Self as GraphBehavior<P, V, E>>::stream_edges(data).filter_map(|(line, e)| {
                let (a, b) = line.endpoints();
                let a = renamed.get(a)?.clone();
                let b = renamed.get(b)?.clone();
                Some((Line::new(line.is_directed(), a, b), e.clone()))
            });
        <Self as GraphBehavior<P2, V, E>>::rebuild(new_vertices, edges)
    }

    fn map_vertices<V2, F>(
        data: &<Self as GraphBehavior<P, V, E>>::Data,
        mut f: F,
    ) -> <Self as GraphBehavior<P, V2, E>>::Data
    where
        V2: VertexValue,
        F: FnMut(&P, &V) -> V2,
        Self: GraphBehavior<P, V2, E>,
    {
        let vertices = <Self as GraphBehavior<P, V, E>>::vertices(data)
            .iter()
            .map(|(p, v)| (p.clone(), f(p, v)))
            .collect();
        let edges = <Self as GraphBehavior<P, V, E>>::stream_edges(data)
            .map(|(line, e)| (line, e.clone()));
        <Self as GraphBehavior<P, V2, E>>::rebuild(vertices, edges)
    }

    /// Maps every edge value. On parallel variants values that become equal collapse.
    fn map_edges<E2, F>(
        data: &<Self as GraphBehavior<P, V, E>>::Data,
        mut f: F,
    ) -> <Self as GraphBehavior<P, V, E2>>::Data
    where
        E2: EdgeValue,
        F: FnMut(&Line<P>, &E) -> E2,
        Self: GraphBehavior<P, V, E2>,
    {
        let vertices = <Self as GraphBehavior<P, V, E>>::vertices(data).clone();
        let edges = <Self as GraphBehavior<P, V, E>>::stream_edges(data).map(|(line, e)| {
            let e = f(&line, e);
            (line, e)
        });
        <Self as GraphBehavior<P, V, E2>>::rebuild(vertices, edges)
    }

    /// Replaces every vertex with any number of vertices.
    ///
    /// Existing edges survive where both endpoints are still present afterwards.
    fn flat_map_vertices<V2, I, F>(
        data: &<Self as GraphBehavior<P, V, E>>::Data,
        mut f: F,
    ) -> <Self as GraphBehavior<P, V2, E>>::Data
    where
        V2: VertexValue,
        I: IntoIterator<Item = (P, V2)>,
        F: FnMut(&P, &V) -> I,
        Self: GraphBehavior<P, V2, E>,
    {
        let vertices = <Self as GraphBehavior<P, V, E>>::vertices(data)
            .iter()
            .flat_map(|(p, v)| f(p, v))
            .collect();
        let edges = <Self as GraphBehavior<P, V, E>>::stream_edges(data)
            .map(|(line, e)| (line, e.clone()));
        <Self as GraphBehavior<P, V2, E>>::rebuild(vertices, edges)
    }

    /// Replaces every edge with any number of edges, each checked as if newly put.
    fn flat_map_edges<E2, I, F>(
        data: &<Self as GraphBehavior<P, V, E>>::Data,
        mut f: F,
    ) -> <Self as GraphBehavior<P, V, E2>>::Data
    where
        E2: EdgeValue,
        I: IntoIterator<Item = (Line<P>, E2)>,
        F: FnMut(&Line<P>, &E) -> I,
        Self: GraphBehavior<P, V, E2>,
    {
        let vertices = <Self as GraphBehavior<P, V, E>>::vertices(data).clone();
        let edges = <Self as GraphBehavior<P, V, E>>::stream_edges(data)
            .flat_map(|(line, e)| f(&line, e));
        <Self as GraphBehavior<P, V, E2>>::rebuild(vertices, edges)
    }
}

/// Neighbor queries of directed variants, answered from the adjacency index.
pub trait DirectedGraphBehavior<P, V, E>: GraphBehavior<P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    fn adjacency(data: &Self::Data) -> &Adjacency<P>;

    fn successors<'a>(
        data: &'a Self::Data,
        point: &P,
    ) -> Box<dyn Iterator<Item = (&'a P, &'a V)> + 'a> {
        neighbors(Self::vertices(data), Self::adjacency(data).successors(point))
    }

    fn predecessors<'a>(
        data: &'a Self::Data,
        point: &P,
    ) -> Box<dyn Iterator<Item = (&'a P, &'a V)> + 'a> {
        neighbors(Self::vertices(data), Self::adjacency(data).predecessors(point))
    }

    fn edges_from_point<'a>(
        data: &'a Self::Data,
        point: &P,
    ) -> Box<dyn Iterator<Item = (Line<P>, &'a E)> + 'a> {
        let Some(successors) = Self::adjacency(data).successors(point) else {
            return Box::new(std::iter::empty());
        };
        let source = point.clone();
        let it = successors.iter().flat_map(move |destination| {
            let line = Line::directed(source.clone(), destination.clone());
            Self::get(data, &line).map(move |e| (line.clone(), e))
        });
        Box::new(it)
    }

    fn edges_to_point<'a>(
        data: &'a Self::Data,
        point: &P,
    ) -> Box<dyn Iterator<Item = (Line<P>, &'a E)> + 'a> {
        let Some(predecessors) = Self::adjacency(data).predecessors(point) else {
            return Box::new(std::iter::empty());
        };
        let destination = point.clone();
        let it = predecessors.iter().flat_map(move |source| {
            let line = Line::directed(source.clone(), destination.clone());
            Self::get(data, &line).map(move |e| (line.clone(), e))
        });
        Box::new(it)
    }
}

fn neighbors<'a, P, V>(
    vertices: &'a PMap<P, V>,
    indexed: Option<&'a PSet<P>>,
) -> Box<dyn Iterator<Item = (&'a P, &'a V)> + 'a>
where
    P: Point,
    V: VertexValue,
{
    // indexed neighbors without a vertex are skipped
    let it = indexed
        .into_iter()
        .flat_map(|set| set.iter())
        .filter_map(move |p| vertices.get(p).map(|v| (p, v)));
    Box::new(it)
}

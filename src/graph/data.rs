//! Immutable storage shapes behind the eight graph variants.
//!
//! | shape                     | edges keyed by     | per-line value | adjacency index |
//! | ------------------------- | ------------------ | -------------- | --------------- |
//! | [StandardDirectedData]    | [DirectedLine]     | one            | yes             |
//! | [ParallelDirectedData]    | [DirectedLine]     | non-empty set  | yes             |
//! | [StandardUndirectedData]  | [UndirectedLine]   | one            | no              |
//! | [ParallelUndirectedData]  | [UndirectedLine]   | non-empty set  | no              |
//!
//! Every map is an `imbl` map, so cloning a shape is $O(1)$ and
//! a write copies only the path to the touched entry.
use crate::graph::*;
use ahash::RandomState;

pub type PMap<K, V> = imbl::HashMap<K, V, RandomState>;
pub type PSet<T> = imbl::HashSet<T, RandomState>;

/// Successor and predecessor sets of a directed shape, derived from its edge keys.
#[derive(Clone)]
pub struct Adjacency<P>
where
    P: Point,
{
    successors: PMap<P, PSet<P>>,
    predecessors: PMap<P, PSet<P>>,
}

impl<P> Default for Adjacency<P>
where
    P: Point,
{
    fn default() -> Self {
        Self {
            successors: PMap::default(),
            predecessors: PMap::default(),
        }
    }
}

impl<P> Adjacency<P>
where
    P: Point,
{
    pub(crate) fn link(&mut self, source: &P, destination: &P) {
        let mut succ = self.successors.get(source).cloned().unwrap_or_default();
        succ.insert(destination.clone());
        self.successors.insert(source.clone(), succ);
        let mut pred = self.predecessors.get(destination).cloned().unwrap_or_default();
        pred.insert(source.clone());
        self.predecessors.insert(destination.clone(), pred);
    }

    pub(crate) fn unlink(&mut self, source: &P, destination: &P) {
        Self::unlink_one(&mut self.successors, source, destination);
        Self::unlink_one(&mut self.predecessors, destination, source);
    }

    fn unlink_one(index: &mut PMap<P, PSet<P>>, from: &P, to: &P) {
        if let Some(set) = index.get(from) {
            let set = set.without(to);
            if set.is_empty() {
                index.remove(from);
            } else {
                index.insert(from.clone(), set);
            }
        }
    }

    pub fn successors(&self, p: &P) -> Option<&PSet<P>> {
        self.successors.get(p)
    }

    pub fn predecessors(&self, p: &P) -> Option<&PSet<P>> {
        self.predecessors.get(p)
    }
}

/// Directed storage with at most one value per line.
#[derive(Clone)]
pub struct StandardDirectedData<P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    pub(crate) vertices: PMap<P, V>,
    pub(crate) edges: PMap<DirectedLine<P>, E>,
    pub(crate) adjacency: Adjacency<P>,
}

/// Directed storage with a non-empty set of values per line.
#[derive(Clone)]
pub struct ParallelDirectedData<P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    pub(crate) vertices: PMap<P, V>,
    pub(crate) edges: PMap<DirectedLine<P>, PSet<E>>,
    pub(crate) edge_count: usize,
    pub(crate) adjacency: Adjacency<P>,
}

/// Undirected storage with at most one value per line.
#[derive(Clone)]
pub struct StandardUndirectedData<P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    pub(crate) vertices: PMap<P, V>,
    pub(crate) edges: PMap<UndirectedLine<P>, E>,
}

/// Undirected storage with a non-empty set of values per line.
#[derive(Clone)]
pub struct ParallelUndirectedData<P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    pub(crate) vertices: PMap<P, V>,
    pub(crate) edges: PMap<UndirectedLine<P>, PSet<E>>,
    pub(crate) edge_count: usize,
}

impl<P, V, E> StandardDirectedData<P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    pub(crate) fn with_vertices(vertices: PMap<P, V>) -> Self {
        Self {
            vertices,
            edges: PMap::default(),
            adjacency: Adjacency::default(),
        }
    }
}

impl<P, V, E> ParallelDirectedData<P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    pub(crate) fn with_vertices(vertices: PMap<P, V>) -> Self {
        Self {
            vertices,
            edges: PMap::default(),
            edge_count: 0,
            adjacency: Adjacency::default(),
        }
    }
}

impl<P, V, E> StandardUndirectedData<P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    pub(crate) fn with_vertices(vertices: PMap<P, V>) -> Self {
        Self {
            vertices,
            edges: PMap::default(),
        }
    }
}

impl<P, V, E> ParallelUndirectedData<P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    pub(crate) fn with_vertices(vertices: PMap<P, V>) -> Self {
        Self {
            vertices,
            edges: PMap::default(),
            edge_count: 0,
        }
    }
}

use crate::graph::behavior::{self, DirectedGraphBehavior, GraphBehavior};
use crate::graph::{data::*, *};

/// Read-only point-to-vertex mapping of a graph.
pub type VertexMap<P, V> = PMap<P, V>;

/// An immutable graph of one of the eight [GraphKind]s.
///
/// * `P`: points, i.e., vertex identities.
/// * `V`: values on vertices.
/// * `E`: values on edges.
///
/// Writes return new graphs. Writes that the variant does not allow
/// (an edge to a missing vertex, a forbidden self-loop, an undirected line
/// on a directed graph) return a graph equal to `self`.
///
/// ```rust
/// use immgraph::graph::*;
///
/// let g = GraphFactory::builder()
///     .directed()
///     .build::<char, u32, &str>()
///     .put_vertex('A', 1)
///     .put_vertex('B', 2);
/// let h = g.put_edge(g.line('A', 'B'), "x");
/// assert_eq!(g.edge_count(), 0);
/// assert_eq!(h.edge_count(), 1);
///
/// let directed = h.as_directed().unwrap();
/// assert_eq!(directed.successors(&'A').collect::<Vec<_>>(), vec![(&'B', &2)]);
/// ```
#[derive(Clone)]
pub struct Graph<P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    repr: Repr<P, V, E>,
}

#[derive(Clone)]
enum Repr<P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    Directed(StandardDirectedData<P, V, E>),
    DirectedWithSelfLoops(StandardDirectedData<P, V, E>),
    DirectedMulti(ParallelDirectedData<P, V, E>),
    DirectedMultiWithSelfLoops(ParallelDirectedData<P, V, E>),
    Undirected(StandardUndirectedData<P, V, E>),
    UndirectedWithSelfLoops(StandardUndirectedData<P, V, E>),
    UndirectedMulti(ParallelUndirectedData<P, V, E>),
    UndirectedMultiWithSelfLoops(ParallelUndirectedData<P, V, E>),
}

/// Runs `$body` with `$data` bound to the shape and `$B` to the behavior of the variant.
macro_rules! dispatch {
    ($repr:expr, |$data:ident, $B:ident| $body:expr) => {
        match $repr {
            Repr::Directed($data) => {
                type $B = behavior::Directed;
                $body
            }
            Repr::DirectedWithSelfLoops($data) => {
                type $B = behavior::DirectedWithSelfLoops;
                $body
            }
            Repr::DirectedMulti($data) => {
                type $B = behavior::DirectedMulti;
                $body
            }
            Repr::DirectedMultiWithSelfLoops($data) => {
                type $B = behavior::DirectedMultiWithSelfLoops;
                $body
            }
            Repr::Undirected($data) => {
                type $B = behavior::Undirected;
                $body
            }
            Repr::UndirectedWithSelfLoops($data) => {
                type $B = behavior::UndirectedWithSelfLoops;
                $body
            }
            Repr::UndirectedMulti($data) => {
                type $B = behavior::UndirectedMulti;
                $body
            }
            Repr::UndirectedMultiWithSelfLoops($data) => {
                type $B = behavior::UndirectedMultiWithSelfLoops;
                $body
            }
        }
    };
}

/// Like `dispatch!`, but `$body` yields a new shape of the same variant.
macro_rules! rewrap {
    ($repr:expr, |$data:ident, $B:ident| $body:expr) => {
        match $repr {
            Repr::Directed($data) => Repr::Directed({
                type $B = behavior::Directed;
                $body
            }),
            Repr::DirectedWithSelfLoops($data) => Repr::DirectedWithSelfLoops({
                type $B = behavior::DirectedWithSelfLoops;
                $body
            }),
            Repr::DirectedMulti($data) => Repr::DirectedMulti({
                type $B = behavior::DirectedMulti;
                $body
            }),
            Repr::DirectedMultiWithSelfLoops($data) => Repr::DirectedMultiWithSelfLoops({
                type $B = behavior::DirectedMultiWithSelfLoops;
                $body
            }),
            Repr::Undirected($data) => Repr::Undirected({
                type $B = behavior::Undirected;
                $body
            }),
            Repr::UndirectedWithSelfLoops($data) => Repr::UndirectedWithSelfLoops({
                type $B = behavior::UndirectedWithSelfLoops;
                $body
            }),
            Repr::UndirectedMulti($data) => Repr::UndirectedMulti({
                type $B = behavior::UndirectedMulti;
                $body
            }),
            Repr::UndirectedMultiWithSelfLoops($data) => Repr::UndirectedMultiWithSelfLoops({
                type $B = behavior::UndirectedMultiWithSelfLoops;
                $body
            }),
        }
    };
}

/// Builds a fresh shape for `$kind` with `$B` bound to its behavior.
macro_rules! by_kind {
    ($kind:expr, |$B:ident| $body:expr) => {
        match $kind {
            GraphKind::Directed => Repr::Directed({
                type $B = behavior::Directed;
                $body
            }),
            GraphKind::DirectedWithSelfLoops => Repr::DirectedWithSelfLoops({
                type $B = behavior::DirectedWithSelfLoops;
                $body
            }),
            GraphKind::DirectedMulti => Repr::DirectedMulti({
                type $B = behavior::DirectedMulti;
                $body
            }),
            GraphKind::DirectedMultiWithSelfLoops => Repr::DirectedMultiWithSelfLoops({
                type $B = behavior::DirectedMultiWithSelfLoops;
                $body
            }),
            GraphKind::Undirected => Repr::Undirected({
                type $B = behavior::Undirected;
                $body
            }),
            GraphKind::UndirectedWithSelfLoops => Repr::UndirectedWithSelfLoops({
                type $B = behavior::UndirectedWithSelfLoops;
                $body
            }),
            GraphKind::UndirectedMulti => Repr::UndirectedMulti({
                type $B = behavior::UndirectedMulti;
                $body
            }),
            GraphKind::UndirectedMultiWithSelfLoops => Repr::UndirectedMultiWithSelfLoops({
                type $B = behavior::UndirectedMultiWithSelfLoops;
                $body
            }),
        }
    };
}

impl<P, V, E> Graph<P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    pub(crate) fn empty(kind: GraphKind) -> Self {
        let repr = by_kind!(kind, |B| <B as GraphBehavior<P, V, E>>::empty());
        Self { repr }
    }

    pub(crate) fn from_parts<IV, IE>(kind: GraphKind, vertices: IV, edges: IE) -> Self
    where
        IV: IntoIterator<Item = (P, V)>,
        IE: IntoIterator<Item = (Line<P>, E)>,
    {
        let repr = by_kind!(kind, |B| <B as GraphBehavior<P, V, E>>::from_parts(
            vertices, edges
        ));
        Self { repr }
    }

    pub fn kind(&self) -> GraphKind {
        match &self.repr {
            Repr::Directed(_) => GraphKind::Directed,
            Repr::DirectedWithSelfLoops(_) => GraphKind::DirectedWithSelfLoops,
            Repr::DirectedMulti(_) => GraphKind::DirectedMulti,
            Repr::DirectedMultiWithSelfLoops(_) => GraphKind::DirectedMultiWithSelfLoops,
            Repr::Undirected(_) => GraphKind::Undirected,
            Repr::UndirectedWithSelfLoops(_) => GraphKind::UndirectedWithSelfLoops,
            Repr::UndirectedMulti(_) => GraphKind::UndirectedMulti,
            Repr::UndirectedMultiWithSelfLoops(_) => GraphKind::UndirectedMultiWithSelfLoops,
        }
    }

    pub fn descriptors(&self) -> DescriptorSet {
        dispatch!(&self.repr, |_d, B| <B as GraphBehavior<P, V, E>>::DESCRIPTORS)
    }

    pub fn is_directed(&self) -> bool {
        self.descriptors().is_directed()
    }

    pub fn permits_self_loops(&self) -> bool {
        self.descriptors().permits_self_loops()
    }

    pub fn permits_parallel_edges(&self) -> bool {
        self.descriptors().permits_parallel_edges()
    }

    /// A line of this graph's orientation.
    pub fn line(&self, p1: P, p2: P) -> Line<P> {
        Line::new(self.is_directed(), p1, p2)
    }

    /// Inserts or replaces a vertex. Edges are kept.
    pub fn put_vertex(&self, point: P, vertex: V) -> Self {
        let repr = rewrap!(&self.repr, |d, B| <B as GraphBehavior<P, V, E>>::put_vertex(
            d, point, vertex
        ));
        Self { repr }
    }

    /// Inserts an edge if both endpoints exist and the variant allows the line.
    pub fn put_edge(&self, line: Line<P>, edge: E) -> Self {
        let repr = rewrap!(&self.repr, |d, B| <B as GraphBehavior<P, V, E>>::put_edge(
            d, line, edge
        ));
        Self { repr }
    }

    /// Removes a vertex with every edge touching it.
    pub fn remove_vertex(&self, point: &P) -> Self {
        let repr = rewrap!(&self.repr, |d, B| {
            <B as GraphBehavior<P, V, E>>::remove_vertex(d, point)
        });
        Self { repr }
    }

    /// Removes every value on `line`.
    pub fn remove_edges(&self, line: &Line<P>) -> Self {
        let repr = rewrap!(&self.repr, |d, B| {
            <B as GraphBehavior<P, V, E>>::remove_edges(d, line)
        });
        Self { repr }
    }

    /// Keeps vertices satisfying `pred`, and the edges between them.
    pub fn filter_vertices<F>(&self, pred: F) -> Self
    where
        F: FnMut(&P, &V) -> bool,
    {
        let repr = rewrap!(&self.repr, |d, B| {
            <B as GraphBehavior<P, V, E>>::filter_vertices(d, pred)
        });
        Self { repr }
    }

    pub fn filter_edges<F>(&self, pred: F) -> Self
    where
        F: FnMut(&Line<P>, &E) -> bool,
    {
        let repr = rewrap!(&self.repr, |d, B| {
            <B as GraphBehavior<P, V, E>>::filter_edges(d, pred)
        });
        Self { repr }
    }

    /// Re-keys the graph. See [GraphBehavior::map_points] for collisions.
    pub fn map_points<P2, F>(&self, f: F) -> Graph<P2, V, E>
    where
        P2: Point,
        F: FnMut(&P) -> P2,
    {
        let repr = rewrap!(&self.repr, |d, B| {
            <B as GraphBehavior<P, V, E>>::map_points::<P2, F>(d, f)
        });
        Graph { repr }
    }

    pub fn map_vertices<V2, F>(&self, f: F) -> Graph<P, V2, E>
    where
        V2: VertexValue,
        F: FnMut(&P, &V) -> V2,
    {
        let repr = rewrap!(&self.repr, |d, B| {
            <B as GraphBehavior<P, V, E>>::map_vertices::<V2, F>(d, f)
        });
        Graph { repr }
    }

    pub fn map_edges<E2, F>(&self, f: F) -> Graph<P, V, E2>
    where
        E2: EdgeValue,
        F: FnMut(&Line<P>, &E) -> E2,
    {
        let repr = rewrap!(&self.repr, |d, B| {
            <B as GraphBehavior<P, V, E>>::map_edges::<E2, F>(d, f)
        });
        Graph { repr }
    }

    pub fn flat_map_vertices<V2, I, F>(&self, f: F) -> Graph<P, V2, E>
    where
        V2: VertexValue,
        I: IntoIterator<Item = (P, V2)>,
        F: FnMut(&P, &V) -> I,
    {
        let repr = rewrap!(&self.repr, |d, B| {
            <B as GraphBehavior<P, V, E>>::flat_map_vertices::<V2, I, F>(d, f)
        });
        Graph { repr }
    }

    pub fn flat_map_edges<E2, I, F>(&self, f: F) -> Graph<P, V, E2>
    where
        E2: EdgeValue,
        I: IntoIterator<Item = (Line<P>, E2)>,
        F: FnMut(&Line<P>, &E) -> I,
    {
        let repr = rewrap!(&self.repr, |d, B| {
            <B as GraphBehavior<P, V, E>>::flat_map_edges::<E2, I, F>(d, f)
        });
        Graph { repr }
    }

    pub fn vertices_by_point(&self) -> &VertexMap<P, V> {
        dispatch!(&self.repr, |d, B| <B as GraphBehavior<P, V, E>>::vertices(d))
    }

    pub fn vertex(&self, point: &P) -> Option<&V> {
        self.vertices_by_point().get(point)
    }

    pub fn contains_vertex(&self, point: &P) -> bool {
        self.vertices_by_point().contains_key(point)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices_by_point().len()
    }

    /// Iterates vertices without any specific order.
    pub fn iter_vertices(&self) -> Box<dyn Iterator<Item = (&P, &V)> + '_> {
        Box::new(self.vertices_by_point().iter())
    }

    /// Number of (line, value) pairs.
    pub fn edge_count(&self) -> usize {
        dispatch!(&self.repr, |d, B| <B as GraphBehavior<P, V, E>>::edge_count(d))
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Every (line, value) pair, one per value on parallel lines, without any specific order.
    ///
    /// The iterator is lazy; calling this again starts over.
    pub fn stream_edges(&self) -> Box<dyn Iterator<Item = (Line<P>, &E)> + '_> {
        dispatch!(&self.repr, |d, B| <B as GraphBehavior<P, V, E>>::stream_edges(d))
    }

    /// Values on `line`. Undirected graphs ignore the order of its endpoints.
    pub fn get(&self, line: &Line<P>) -> Box<dyn Iterator<Item = &E> + '_> {
        dispatch!(&self.repr, |d, B| <B as GraphBehavior<P, V, E>>::get(d, line))
    }

    pub fn contains_edge(&self, line: &Line<P>) -> bool {
        self.get(line).next().is_some()
    }

    /// Neighbor queries, for directed graphs only.
    pub fn as_directed(&self) -> Option<DirectedView<'_, P, V, E>> {
        self.is_directed().then_some(DirectedView { graph: self })
    }
}

/// Neighbor queries on a directed [Graph], answered from its adjacency index.
pub struct DirectedView<'a, P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    graph: &'a Graph<P, V, E>,
}

impl<'a, P, V, E> Clone for DirectedView<'a, P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, P, V, E> Copy for DirectedView<'a, P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
}

/// Runs `$body` for directed variants; undirected ones yield nothing.
macro_rules! dispatch_directed {
    ($repr:expr, |$data:ident, $B:ident| $body:expr) => {
        match $repr {
            Repr::Directed($data) => {
                type $B = behavior::Directed;
                $body
            }
            Repr::DirectedWithSelfLoops($data) => {
                type $B = behavior::DirectedWithSelfLoops;
                $body
            }
            Repr::DirectedMulti($data) => {
                type $B = behavior::DirectedMulti;
                $body
            }
            Repr::DirectedMultiWithSelfLoops($data) => {
                type $B = behavior::DirectedMultiWithSelfLoops;
                $body
            }
            // a view is only handed out for directed graphs
            _ => Box::new(std::iter::empty()),
        }
    };
}

impl<'a, P, V, E> DirectedView<'a, P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    pub fn graph(&self) -> &'a Graph<P, V, E> {
        self.graph
    }

    /// Points reachable over one edge from `point`, with their vertices.
    pub fn successors(&self, point: &P) -> Box<dyn Iterator<Item = (&'a P, &'a V)> + 'a> {
        let graph = self.graph;
        dispatch_directed!(&graph.repr, |d, B| {
            <B as DirectedGraphBehavior<P, V, E>>::successors(d, point)
        })
    }

    /// Points with an edge into `point`, with their vertices.
    pub fn predecessors(&self, point: &P) -> Box<dyn Iterator<Item = (&'a P, &'a V)> + 'a> {
        let graph = self.graph;
        dispatch_directed!(&graph.repr, |d, B| {
            <B as DirectedGraphBehavior<P, V, E>>::predecessors(d, point)
        })
    }

    pub fn edges_from_point(&self, point: &P) -> Box<dyn Iterator<Item = (Line<P>, &'a E)> + 'a> {
        let graph = self.graph;
        dispatch_directed!(&graph.repr, |d, B| {
            <B as DirectedGraphBehavior<P, V, E>>::edges_from_point(d, point)
        })
    }

    pub fn edges_to_point(&self, point: &P) -> Box<dyn Iterator<Item = (Line<P>, &'a E)> + 'a> {
        let graph = self.graph;
        dispatch_directed!(&graph.repr, |d, B| {
            <B as DirectedGraphBehavior<P, V, E>>::edges_to_point(d, point)
        })
    }
}

/// Graphs are equal when they are of one kind and hold the same vertices and edges.
impl<P, V, E> PartialEq for Graph<P, V, E>
where
    P: Point,
    V: VertexValue + PartialEq,
    E: EdgeValue,
{
    fn eq(&self, other: &Self) -> bool {
        if self.kind() != other.kind()
            || self.vertex_count() != other.vertex_count()
            || self.edge_count() != other.edge_count()
        {
            return false;
        }
        let same_vertices = self
            .iter_vertices()
            .all(|(p, v)| other.vertex(p) == Some(v));
        same_vertices
            && self
                .stream_edges()
                .all(|(line, e)| other.get(&line).any(|x| x == e))
    }
}

impl<P, V, E> Eq for Graph<P, V, E>
where
    P: Point,
    V: VertexValue + Eq,
    E: EdgeValue,
{
}

impl<P, V, E> std::fmt::Debug for Graph<P, V, E>
where
    P: Point + std::fmt::Debug,
    V: VertexValue + std::fmt::Debug,
    E: EdgeValue + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Graph<{}> {{", self.kind())?;
        write!(f, "{:?}", self.debug().indent(2, 2))?;
        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::*;
    use petgraph::graphmap::GraphMap;
    use quickcheck_macros::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn sorted<T: Ord>(it: impl Iterator<Item = T>) -> Vec<T> {
        let mut res: Vec<_> = it.collect();
        res.sort();
        res
    }

    fn abc(kind: GraphKind) -> Graph<&'static str, u32, &'static str> {
        Graph::from_parts(kind, [("A", 1), ("B", 2), ("C", 3)], std::iter::empty())
    }

    #[test]
    fn scenario_standard_directed() {
        let g = abc(GraphKind::Directed);
        let g = g.put_edge(g.line("A", "B"), "x");
        assert_eq!(sorted(g.get(&g.line("A", "B"))), vec![&"x"]);
        assert_eq!(g.get(&g.line("B", "A")).count(), 0);
        let directed = g.as_directed().unwrap();
        assert_eq!(sorted(directed.successors(&"A")), vec![(&"B", &2)]);
        assert_eq!(sorted(directed.predecessors(&"B")), vec![(&"A", &1)]);
    }

    #[test]
    fn scenario_parallel_undirected() {
        let g = abc(GraphKind::UndirectedMulti);
        let g = g
            .put_edge(g.line("A", "B"), "x")
            .put_edge(g.line("A", "B"), "y");
        assert_eq!(sorted(g.get(&g.line("A", "B"))), vec![&"x", &"y"]);
        assert_eq!(sorted(g.get(&g.line("B", "A"))), vec![&"x", &"y"]);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn scenario_remove_cascades() {
        for kind in GraphKind::ALL {
            let g = abc(kind);
            let g = g
                .put_edge(g.line("A", "B"), "ab")
                .put_edge(g.line("B", "C"), "bc");
            assert_eq!(g.edge_count(), 2, "{}", kind);
            let h = g.remove_vertex(&"B");
            assert_eq!(sorted(h.iter_vertices().map(|(p, _)| *p)), vec!["A", "C"]);
            assert_eq!(h.edge_count(), 0, "{}", kind);
            assert_eq!(h.stream_edges().count(), 0, "{}", kind);
            if let Some(directed) = h.as_directed() {
                assert_eq!(directed.successors(&"A").count(), 0);
                assert_eq!(directed.predecessors(&"C").count(), 0);
            }
        }
    }

    #[test]
    fn scenario_self_loop_rejected_by_default() {
        let g = Graph::from_parts(GraphKind::Directed, [("A", 1u32)], std::iter::empty());
        let h = g.put_edge(g.line("A", "A"), "e");
        assert_eq!(h.get(&h.line("A", "A")).count(), 0);
        assert_eq!(h, g);
    }

    #[test]
    fn self_loop_policy_of_every_kind() {
        for kind in GraphKind::ALL {
            let g = abc(kind);
            let g = g.put_edge(g.line("C", "C"), "loop");
            assert_eq!(
                g.contains_edge(&g.line("C", "C")),
                kind.descriptors().permits_self_loops(),
                "{}",
                kind
            );
        }
    }

    #[test]
    fn parallel_policy_of_every_kind() {
        for kind in GraphKind::ALL {
            let g = abc(kind);
            let g = g
                .put_edge(g.line("A", "B"), "x")
                .put_edge(g.line("A", "B"), "y");
            let expected: Vec<&&str> = if kind.descriptors().permits_parallel_edges() {
                vec![&"x", &"y"]
            } else {
                vec![&"y"]
            };
            assert_eq!(sorted(g.get(&g.line("A", "B"))), expected, "{}", kind);
        }
    }

    #[test]
    fn writes_leave_the_original_untouched() {
        for kind in GraphKind::ALL {
            let g = abc(kind);
            let g = g.put_edge(g.line("A", "B"), "x");
            let before = g.clone();
            let _ = g.put_vertex("D", 4);
            let _ = g.put_edge(g.line("B", "C"), "y");
            let _ = g.remove_vertex(&"A");
            let _ = g.remove_edges(&g.line("A", "B"));
            let _ = g.filter_vertices(|p, _| *p != "B");
            let _ = g.map_edges(|_, e| e.len());
            assert_eq!(g, before, "{}", kind);
            assert_eq!(g.vertex_count(), 3);
            assert_eq!(g.edge_count(), 1);
        }
    }

    #[test]
    fn invalid_writes_are_silent_noops() {
        for kind in GraphKind::ALL {
            let g = abc(kind);
            let h = g.put_edge(g.line("A", "Z"), "x").put_edge(g.line("Z", "A"), "y");
            assert_eq!(h, g, "{}", kind);
            assert_eq!(g.remove_vertex(&"Z"), g, "{}", kind);
            assert_eq!(g.remove_edges(&g.line("A", "B")), g, "{}", kind);
            if !g.permits_self_loops() {
                assert_eq!(g.put_edge(g.line("A", "A"), "x"), g, "{}", kind);
            }
            if g.is_directed() {
                assert_eq!(g.put_edge(Line::undirected("A", "B"), "x"), g, "{}", kind);
            }
        }
    }

    #[test]
    fn put_vertex_keeps_edges() {
        let g = abc(GraphKind::DirectedMulti);
        let g = g.put_edge(g.line("A", "B"), "x").put_vertex("A", 10);
        assert_eq!(g.vertex(&"A"), Some(&10));
        assert!(g.contains_edge(&g.line("A", "B")));
    }

    #[test]
    fn undirected_symmetry() {
        for kind in GraphKind::ALL.into_iter().filter(|k| !k.is_directed()) {
            let g = abc(kind);
            let g = g.put_edge(Line::directed("B", "A"), "x");
            assert!(g.as_directed().is_none());
            for line in [
                Line::undirected("A", "B"),
                Line::undirected("B", "A"),
                Line::directed("A", "B"),
            ] {
                assert_eq!(sorted(g.get(&line)), vec![&"x"], "{}", kind);
            }
            let h = g.remove_edges(&Line::undirected("A", "B"));
            assert_eq!(h.edge_count(), 0, "{}", kind);
        }
    }

    #[test]
    fn directed_graphs_ignore_undirected_lines() {
        let g = abc(GraphKind::DirectedWithSelfLoops);
        let g = g.put_edge(g.line("A", "B"), "x");
        assert_eq!(g.put_edge(Line::undirected("B", "C"), "y"), g);
        assert_eq!(g.remove_edges(&Line::undirected("A", "B")), g);
        assert_eq!(g.get(&Line::undirected("A", "B")).count(), 0);
    }

    #[test]
    fn round_trip() {
        for kind in GraphKind::ALL {
            let g = abc(kind);
            let g = g
                .put_edge(g.line("A", "B"), "x")
                .put_edge(g.line("A", "B"), "y")
                .put_edge(g.line("C", "A"), "z")
                .put_edge(g.line("B", "B"), "w");
            let vertices: Vec<_> = g.iter_vertices().map(|(p, v)| (*p, *v)).collect();
            let edges: Vec<_> = g.stream_edges().map(|(l, e)| (l, *e)).collect();
            let h = Graph::from_parts(kind, vertices, edges);
            assert_eq!(h, g, "{}", kind);
        }
    }

    #[test]
    fn edges_from_and_to_points() {
        let g = abc(GraphKind::DirectedMultiWithSelfLoops);
        let g = g
            .put_edge(g.line("A", "B"), "x")
            .put_edge(g.line("A", "B"), "y")
            .put_edge(g.line("A", "A"), "z")
            .put_edge(g.line("C", "A"), "w");
        let directed = g.as_directed().unwrap();
        assert_eq!(
            sorted(directed.edges_from_point(&"A").map(|(_, e)| *e)),
            vec!["x", "y", "z"]
        );
        assert_eq!(
            sorted(directed.edges_to_point(&"A").map(|(l, _)| l.into_endpoints())),
            vec![("A", "A"), ("C", "A")]
        );
        assert_eq!(directed.edges_from_point(&"Z").count(), 0);
    }

    #[test]
    fn filters() {
        let g = abc(GraphKind::Directed);
        let g = g
            .put_edge(g.line("A", "B"), "x")
            .put_edge(g.line("B", "C"), "y");
        let h = g.filter_vertices(|_, v| *v != 3);
        assert_eq!(h.vertex_count(), 2);
        assert_eq!(sorted(h.stream_edges().map(|(_, e)| *e)), vec!["x"]);
        let h = g.filter_edges(|line, _| line.touches(&"C"));
        assert_eq!(h.vertex_count(), 3);
        assert_eq!(sorted(h.stream_edges().map(|(_, e)| *e)), vec!["y"]);
        let succ = h.as_directed().unwrap().successors(&"A").count();
        assert_eq!(succ, 0);
    }

    #[test]
    fn mapping_points_may_merge_vertices() {
        for kind in GraphKind::ALL {
            let g = abc(kind);
            let g = g
                .put_edge(g.line("A", "B"), "x")
                .put_edge(g.line("B", "C"), "y");
            // A and B become one point, so A-B turns into a self-loop
            let h = g.map_points(|p| if *p == "C" { 'c' } else { 'a' });
            assert_eq!(h.vertex_count(), 2, "{}", kind);
            assert!(matches!(h.vertex(&'a'), Some(&1) | Some(&2)), "{}", kind);
            assert_eq!(h.vertex(&'c'), Some(&3), "{}", kind);
            assert!(h.contains_edge(&h.line('a', 'c')), "{}", kind);
            let edges = sorted(h.stream_edges().map(|(_, e)| *e));
            if h.permits_self_loops() {
                assert_eq!(edges, vec!["x", "y"], "{}", kind);
                assert!(h.contains_edge(&h.line('a', 'a')), "{}", kind);
            } else {
                assert_eq!(edges, vec!["y"], "{}", kind);
                assert!(!h.contains_edge(&h.line('a', 'a')), "{}", kind);
            }
        }
    }

    #[test]
    fn mapping_values() {
        let g = abc(GraphKind::DirectedMulti);
        let g = g
            .put_edge(g.line("A", "B"), "xx")
            .put_edge(g.line("A", "B"), "yy");
        let h = g.map_vertices(|p, v| format!("{}{}", p, v));
        assert_eq!(h.vertex(&"B").map(String::as_str), Some("B2"));
        assert_eq!(h.edge_count(), 2);
        // equal values on one line collapse
        let h = g.map_edges(|_, e| e.len());
        assert_eq!(sorted(h.get(&h.line("A", "B"))), vec![&2]);
    }

    #[test]
    fn flat_mapping() {
        let g = abc(GraphKind::DirectedMulti);
        let g = g.put_edge(g.line("A", "B"), "x");
        let h = g.flat_map_vertices(|p, v| {
            if *p == "A" {
                vec![("A", *v as u64), ("D", 4)]
            } else {
                vec![(*p, *v as u64)]
            }
        });
        assert_eq!(h.vertex_count(), 4);
        assert_eq!(h.edge_count(), 1);
        let h = g.flat_map_vertices(|p, v| (*p != "A").then_some((*p, *v)));
        assert_eq!(h.edge_count(), 0);

        let h = g.flat_map_edges(|line, e| {
            let back = line.clone().map_points(|p| if p == "A" { "C" } else { p });
            [
                (line.clone(), e.to_string()),
                (back, e.to_uppercase()),
                (g.line("A", "Z"), "z".to_owned()),
            ]
        });
        assert_eq!(h.edge_count(), 2);
        assert!(h.contains_edge(&h.line("C", "B")));
    }

    #[test]
    fn graphs_are_send_and_sync() {
        fn check<T: Send + Sync>() {}
        check::<Graph<u64, String, u8>>();
    }

    #[test]
    fn debug_lists_vertices_and_edges() {
        let g = Graph::from_parts(
            GraphKind::Directed,
            [(1u8, 'a'), (2, 'b')],
            [(Line::directed(1, 2), 7u8)],
        );
        let text = format!("{:?}", g);
        assert!(text.starts_with("Graph<directed> {\n"));
        assert!(text.contains("  1: 'a'\n"));
        assert!(text.contains("    --7-> 2\n"));
    }

    type Triples = BTreeSet<(TestPoint, TestPoint, u8)>;

    fn triples(g: &Graph<TestPoint, u16, u8>) -> Triples {
        g.stream_edges()
            .map(|(line, e)| {
                let (a, b) = line.into_endpoints();
                if g.is_directed() {
                    (a, b, *e)
                } else {
                    (a.min(b), a.max(b), *e)
                }
            })
            .collect()
    }

    fn vertex_map(g: &Graph<TestPoint, u16, u8>) -> BTreeMap<TestPoint, u16> {
        g.iter_vertices().map(|(p, v)| (*p, *v)).collect()
    }

    fn check_invariants(g: &Graph<TestPoint, u16, u8>) {
        let edges = triples(g);
        assert_eq!(edges.len(), g.edge_count());
        for (a, b, _) in edges.iter() {
            assert!(g.contains_vertex(a) && g.contains_vertex(b));
            assert!(a != b || g.permits_self_loops());
        }
        if let Some(directed) = g.as_directed() {
            let indexed: Triples = g
                .iter_vertices()
                .flat_map(|(p, _)| directed.edges_from_point(p))
                .map(|(line, e)| {
                    let (a, b) = line.into_endpoints();
                    (a, b, *e)
                })
                .collect();
            assert_eq!(indexed, edges);
            for (p, _) in g.iter_vertices() {
                let succ: BTreeSet<_> = directed.successors(p).map(|(q, _)| *q).collect();
                let expected: BTreeSet<_> = edges
                    .iter()
                    .filter(|(a, _, _)| a == p)
                    .map(|(_, b, _)| *b)
                    .collect();
                assert_eq!(succ, expected);
            }
        }
    }

    struct Oracle<Ty: petgraph::EdgeType> {
        vertices: BTreeMap<TestPoint, u16>,
        graph: GraphMap<TestPoint, u8, Ty>,
        self_loops: bool,
    }

    impl<Ty: petgraph::EdgeType> Oracle<Ty> {
        fn new(self_loops: bool) -> Self {
            Self {
                vertices: BTreeMap::new(),
                graph: GraphMap::new(),
                self_loops,
            }
        }

        fn apply(&mut self, op: &Op) {
            match *op {
                Op::PutVertex(p, v) => {
                    self.vertices.insert(p, v);
                    self.graph.add_node(p);
                }
                Op::RemoveVertex(p) => {
                    self.vertices.remove(&p);
                    self.graph.remove_node(p);
                }
                Op::PutEdge(a, b, e) => {
                    let known = self.graph.contains_node(a) && self.graph.contains_node(b);
                    if known && (a != b || self.self_loops) {
                        self.graph.add_edge(a, b, e);
                    }
                }
                Op::RemoveEdges(a, b) => {
                    self.graph.remove_edge(a, b);
                }
            }
        }

        fn triples(&self) -> Triples {
            self.graph
                .all_edges()
                .map(|(a, b, e)| {
                    if Ty::is_directed() {
                        (a, b, *e)
                    } else {
                        (a.min(b), a.max(b), *e)
                    }
                })
                .collect()
        }
    }

    fn against_petgraph<Ty: petgraph::EdgeType>(kind: GraphKind, ops: &Ops) {
        let mut oracle = Oracle::<Ty>::new(kind.descriptors().permits_self_loops());
        let trials = ops.replay(Graph::empty(kind));
        for (op, g) in ops.iter().zip(trials.iter().skip(1)) {
            oracle.apply(op);
            check_invariants(g);
            assert_eq!(vertex_map(g), oracle.vertices);
            assert_eq!(triples(g), oracle.triples());
        }
    }

    #[quickcheck]
    fn standard_variants_match_petgraph(ops: Ops) {
        use petgraph::{Directed, Undirected};
        against_petgraph::<Directed>(GraphKind::Directed, &ops);
        against_petgraph::<Directed>(GraphKind::DirectedWithSelfLoops, &ops);
        against_petgraph::<Undirected>(GraphKind::Undirected, &ops);
        against_petgraph::<Undirected>(GraphKind::UndirectedWithSelfLoops, &ops);
    }

    /// Parallel variants keep every distinct value of a line.
    #[derive(Default)]
    struct Model {
        vertices: BTreeMap<TestPoint, u16>,
        edges: Triples,
    }

    impl Model {
        fn apply(&mut self, kind: GraphKind, op: &Op) {
            let key = |a: TestPoint, b: TestPoint| {
                if kind.is_directed() {
                    (a, b)
                } else {
                    (a.min(b), a.max(b))
                }
            };
            match *op {
                Op::PutVertex(p, v) => {
                    self.vertices.insert(p, v);
                }
                Op::RemoveVertex(p) => {
                    self.vertices.remove(&p);
                    self.edges.retain(|(a, b, _)| *a != p && *b != p);
                }
                Op::PutEdge(a, b, e) => {
                    let known = self.vertices.contains_key(&a) && self.vertices.contains_key(&b);
                    if known && (a != b || kind.descriptors().permits_self_loops()) {
                        let (a, b) = key(a, b);
                        self.edges.insert((a, b, e));
                    }
                }
                Op::RemoveEdges(a, b) => {
                    let k = key(a, b);
                    self.edges.retain(|(a, b, _)| (*a, *b) != k);
                }
            }
        }
    }

    #[quickcheck]
    fn parallel_variants_match_model(ops: Ops) {
        for kind in GraphKind::ALL
            .into_iter()
            .filter(|k| k.descriptors().permits_parallel_edges())
        {
            let mut model = Model::default();
            let trials = ops.replay(Graph::empty(kind));
            for (op, g) in ops.iter().zip(trials.iter().skip(1)) {
                model.apply(kind, op);
                check_invariants(g);
                assert_eq!(vertex_map(g), model.vertices);
                assert_eq!(triples(g), model.edges);
            }
        }
    }

    #[quickcheck]
    fn history_is_never_rewritten(ops: Ops) {
        for kind in GraphKind::ALL {
            let trials = ops.replay(Graph::empty(kind));
            let snapshots: Vec<_> = trials.iter().map(|g| (vertex_map(g), triples(g))).collect();
            let again = ops.replay(Graph::empty(kind));
            for ((g, snapshot), h) in trials.iter().zip(snapshots.iter()).zip(again.iter()) {
                assert_eq!(&(vertex_map(g), triples(g)), snapshot);
                assert_eq!(g, h);
            }
        }
    }
}

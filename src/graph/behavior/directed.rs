use super::{DirectedGraphBehavior, GraphBehavior, SelfLoopPolicy};
use crate::graph::{data::*, *};
use std::marker::PhantomData;

/// Directed variants keeping at most one value per line; a later write replaces the value.
///
/// | operation           | complexity                                                   |
/// | ------------------- | ------------------------------------------------------------ |
/// | `put_vertex`        | $O(\log \|V\|)$                                              |
/// | `put_edge`          | $O(\log \|V\| + \log \|E\|)$                                 |
/// | `remove_edges`      | $O(\log \|E\|)$                                              |
/// | `remove_vertex`     | $O(\|V\| + \|E\|)$, a rebuild                                |
/// | `get`               | $O(\log \|E\|)$                                              |
/// | `successors`        | $O(\log \|V\|)$ to start, amortized $O(1)$ per neighbor      |
/// | `edges_from_point`  | $O(\log \|V\|)$ to start, $O(\log \|E\|)$ per neighbor       |
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDirected<S>(PhantomData<S>);

/// Directed variants keeping a set of values per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelDirected<S>(PhantomData<S>);

fn directed_line<P>(line: &Line<P>) -> Option<&DirectedLine<P>> {
    match line {
        Line::Directed(l) => Some(l),
        Line::Undirected(_) => None,
    }
}

impl<S, P, V, E> GraphBehavior<P, V, E> for StandardDirected<S>
where
    S: SelfLoopPolicy,
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    type Data = StandardDirectedData<P, V, E>;

    const DESCRIPTORS: DescriptorSet = DescriptorSet::DIRECTED.union(S::FLAG);

    fn with_vertices(vertices: PMap<P, V>) -> Self::Data {
        StandardDirectedData::with_vertices(vertices)
    }

    fn vertices(data: &Self::Data) -> &PMap<P, V> {
        &data.vertices
    }

    fn vertices_mut(data: &mut Self::Data) -> &mut PMap<P, V> {
        &mut data.vertices
    }

    fn edge_count(data: &Self::Data) -> usize {
        data.edges.len()
    }

    fn stream_edges<'a>(
        data: &'a Self::Data,
    ) -> Box<dyn Iterator<Item = (Line<P>, &'a E)> + 'a> {
        let it = data
            .edges
            .iter()
            .map(|(l, e)| (Line::Directed(l.clone()), e));
        Box::new(it)
    }

    fn get<'a>(data: &'a Self::Data, line: &Line<P>) -> Box<dyn Iterator<Item = &'a E> + 'a> {
        match directed_line(line) {
            Some(l) => Box::new(data.edges.get(l).into_iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn orient(line: Line<P>) -> Option<Line<P>> {
        line.is_directed().then_some(line)
    }

    fn insert_edge(data: &mut Self::Data, line: Line<P>, edge: E) {
        if let Line::Directed(l) = line {
            data.adjacency.link(&l.source, &l.destination);
            data.edges.insert(l, edge);
        }
    }

    fn delete_edges(data: &mut Self::Data, line: &Line<P>) {
        if let Some(l) = directed_line(line) {
            if data.edges.remove(l).is_some() {
                data.adjacency.unlink(&l.source, &l.destination);
            }
        }
    }
}

impl<S, P, V, E> DirectedGraphBehavior<P, V, E> for StandardDirected<S>
where
    S: SelfLoopPolicy,
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    fn adjacency(data: &Self::Data) -> &Adjacency<P> {
        &data.adjacency
    }
}

impl<S, P, V, E> GraphBehavior<P, V, E> for ParallelDirected<S>
where
    S: SelfLoopPolicy,
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    type Data = ParallelDirectedData<P, V, E>;

    const DESCRIPTORS: DescriptorSet = DescriptorSet::DIRECTED
        .union(DescriptorSet::PERMIT_PARALLEL_EDGES)
        .union(S::FLAG);

    fn with_vertices(vertices: PMap<P, V>) -> Self::Data {
        ParallelDirectedData::with_vertices(vertices)
    }

    fn vertices(data: &Self::Data) -> &PMap<P, V> {
        &data.vertices
    }

    fn vertices_mut(data: &mut Self::Data) -> &mut PMap<P, V> {
        &mut data.vertices
    }

    fn edge_count(data: &Self::Data) -> usize {
        data.edge_count
    }

    fn stream_edges<'a>(
        data: &'a Self::Data,
    ) -> Box<dyn Iterator<Item = (Line<P>, &'a E)> + 'a> {
        let it = data.edges.iter().flat_map(|(l, values)| {
            values
                .iter()
                .map(move |e| (Line::Directed(l.clone()), e))
        });
        Box::new(it)
    }

    fn get<'a>(data: &'a Self::Data, line: &Line<P>) -> Box<dyn Iterator<Item = &'a E> + 'a> {
        match directed_line(line).and_then(|l| data.edges.get(l)) {
            Some(values) => Box::new(values.iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn orient(line: Line<P>) -> Option<Line<P>> {
        line.is_directed().then_some(line)
    }

    fn insert_edge(data: &mut Self::Data, line: Line<P>, edge: E) {
        if let Line::Directed(l) = line {
            let mut values = data.edges.get(&l).cloned().unwrap_or_default();
            if values.insert(edge).is_none() {
                data.edge_count += 1;
            }
            data.adjacency.link(&l.source, &l.destination);
            data.edges.insert(l, values);
        }
    }

    fn delete_edges(data: &mut Self::Data, line: &Line<P>) {
        if let Some(l) = directed_line(line) {
            if let Some(values) = data.edges.remove(l) {
                data.edge_count -= values.len();
                data.adjacency.unlink(&l.source, &l.destination);
            }
        }
    }
}

impl<S, P, V, E> DirectedGraphBehavior<P, V, E> for ParallelDirected<S>
where
    S: SelfLoopPolicy,
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    fn adjacency(data: &Self::Data) -> &Adjacency<P> {
        &data.adjacency
    }
}

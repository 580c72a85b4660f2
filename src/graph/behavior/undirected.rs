use super::{GraphBehavior, SelfLoopPolicy};
use crate::graph::{data::*, *};
use std::marker::PhantomData;

/// Undirected variants keeping at most one value per line.
///
/// Directed lines handed in are read as undirected ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardUndirected<S>(PhantomData<S>);

/// Undirected variants keeping a set of values per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelUndirected<S>(PhantomData<S>);

fn undirected_line<P: Clone>(line: &Line<P>) -> UndirectedLine<P> {
    line.clone().into_undirected()
}

impl<S, P, V, E> GraphBehavior<P, V, E> for StandardUndirected<S>
where
    S: SelfLoopPolicy,
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    type Data = StandardUndirectedData<P, V, E>;

    const DESCRIPTORS: DescriptorSet = S::FLAG;

    fn with_vertices(vertices: PMap<P, V>) -> Self::Data {
        StandardUndirectedData::with_vertices(vertices)
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
            .map(|(l, e)| (Line::Undirected(l.clone()), e));
        Box::new(it)
    }

    fn get<'a>(data: &'a Self::Data, line: &Line<P>) -> Box<dyn Iterator<Item = &'a E> + 'a> {
        Box::new(data.edges.get(&undirected_line(line)).into_iter())
    }

    fn orient(line: Line<P>) -> Option<Line<P>> {
        Some(Line::Undirected(line.into_undirected()))
    }

    fn insert_edge(data: &mut Self::Data, line: Line<P>, edge: E) {
        data.edges.insert(line.into_undirected(), edge);
    }

    fn delete_edges(data: &mut Self::Data, line: &Line<P>) {
        data.edges.remove(&undirected_line(line));
    }
}

impl<S, P, V, E> GraphBehavior<P, V, E> for ParallelUndirected<S>
where
    S: SelfLoopPolicy,
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    type Data = ParallelUndirectedData<P, V, E>;

    const DESCRIPTORS: DescriptorSet = DescriptorSet::PERMIT_PARALLEL_EDGES.union(S::FLAG);

    fn with_vertices(vertices: PMap<P, V>) -> Self::Data {
        ParallelUndirectedData::with_vertices(vertices)
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
                .map(move |e| (Line::Undirected(l.clone()), e))
        });
        Box::new(it)
    }

    fn get<'a>(data: &'a Self::Data, line: &Line<P>) -> Box<dyn Iterator<Item = &'a E> + 'a> {
        match data.edges.get(&undirected_line(line)) {
            Some(values) => Box::new(values.iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn orient(line: Line<P>) -> Option<Line<P>> {
        Some(Line::Undirected(line.into_undirected()))
    }

    fn insert_edge(data: &mut Self::Data, line: Line<P>, edge: E) {
        let line = line.into_undirected();
        let mut values = data.edges.get(&line).cloned().unwrap_or_default();
        if values.insert(edge).is_none() {
            data.edge_count += 1;
        }
        data.edges.insert(line, values);
    }

    fn delete_edges(data: &mut Self::Data, line: &Line<P>) {
        if let Some(values) = data.edges.remove(&undirected_line(line)) {
            data.edge_count -= values.len();
        }
    }
}

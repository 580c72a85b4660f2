use crate::graph::*;
use std::fmt::Debug;

/// Inspects a graph with customized indentation.
///
/// Directed graphs print each vertex followed by its outgoing edges.
/// Undirected graphs print vertices first, then each edge once.
pub struct GraphDebug<'a, P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    graph: &'a Graph<P, V, E>,
    init_indent: usize,
    indent_step: usize,
}

impl<'a, P, V, E> GraphDebug<'a, P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    pub fn new(graph: &'a Graph<P, V, E>) -> Self {
        Self {
            graph,
            init_indent: 0,
            indent_step: 2,
        }
    }

    pub fn indent(mut self, init: usize, step: usize) -> Self {
        self.init_indent = init;
        self.indent_step = step;
        self
    }

    fn display_indent(&self, f: &mut std::fmt::Formatter<'_>, level: usize) -> std::fmt::Result {
        let indention = self.init_indent + self.indent_step * level;
        write!(f, "{:indention$}", "")
    }
}

impl<P, V, E> Graph<P, V, E>
where
    P: Point,
    V: VertexValue,
    E: EdgeValue,
{
    pub fn debug(&self) -> GraphDebug<'_, P, V, E> {
        GraphDebug::new(self)
    }
}

impl<'a, P, V, E> Debug for GraphDebug<'a, P, V, E>
where
    P: Point + Debug,
    V: VertexValue + Debug,
    E: EdgeValue + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.graph.as_directed() {
            Some(directed) => {
                for (p, v) in self.graph.iter_vertices() {
                    self.display_indent(f, 0)?;
                    writeln!(f, "{:?}: {:?}", p, v)?;
                    for (line, e) in directed.edges_from_point(p) {
                        let (_, destination) = line.endpoints();
                        self.display_indent(f, 1)?;
                        writeln!(f, "--{:?}-> {:?}", e, destination)?;
                    }
                }
            }
            None => {
                for (p, v) in self.graph.iter_vertices() {
                    self.display_indent(f, 0)?;
                    writeln!(f, "{:?}: {:?}", p, v)?;
                }
                for (line, e) in self.graph.stream_edges() {
                    let (a, b) = line.endpoints();
                    self.display_indent(f, 0)?;
                    writeln!(f, "{:?} --{:?}-- {:?}", a, e, b)?;
                }
            }
        }
        Ok(())
    }
}

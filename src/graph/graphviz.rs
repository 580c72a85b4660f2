//! Visualize graphs in the graphviz format.
use crate::graph::*;
use ahash::RandomState;
use std::collections::HashMap;

/**
 * Provides graphviz labels for vertex values.
 *
 * See [Graph::dump_in_graphviz] for details.
 */
pub trait GraphvizLabelForVertex {
    /**
     * Returns a string for graphviz name and an optional label.
     */
    fn label(&self) -> (String, Option<String>);
}

/**
 * Provides graphviz labels for edge values.
 */
pub trait GraphvizLabelForEdge {
    /**
     * Returns an optional label.
     */
    fn label(&self) -> Option<String>;
}

impl<P, V, E> Graph<P, V, E>
where
    P: Point,
    V: VertexValue + GraphvizLabelForVertex,
    E: EdgeValue + GraphvizLabelForEdge,
{
    /**
     * Dumps the graph to a `std::io::Write` object in the graphviz format.
     *
     * Directed graphs become a `digraph` with `->` edges, undirected ones a `graph` with `--`.
     * Vertices come first, then one statement per edge value. Neither is in any specific order.
     *
     * # Examples
     *
     * ```rust
     * use immgraph::graph::{graphviz::*, *};
     *
     * #[derive(Debug, Clone)]
     * struct Task {
     *     name: &'static str,
     *     urgent: bool,
     * }
     *
     * impl GraphvizLabelForVertex for Task {
     *     fn label(&self) -> (String, Option<String>) {
     *         let label = self.urgent.then(|| "shape=rectangle".to_owned());
     *         (self.name.to_owned(), label)
     *     }
     * }
     *
     * #[derive(Debug, Clone, Hash, PartialEq, Eq)]
     * struct Blocks;
     *
     * impl GraphvizLabelForEdge for Blocks {
     *     fn label(&self) -> Option<String> {
     *         Some("color=red".to_owned())
     *     }
     * }
     *
     * let g = GraphFactory::builder().directed().build_from(
     *     [
     *         (0, Task { name: "build", urgent: false }),
     *         (1, Task { name: "ship", urgent: true }),
     *     ],
     *     [(Line::directed(0, 1), Blocks)],
     * );
     * let mut buf = vec![];
     * g.dump_in_graphviz(&mut buf, "plan").unwrap();
     * let text = String::from_utf8(buf).unwrap();
     * assert!(text.starts_with("digraph plan {\n"));
     * assert!(text.contains("  ship [shape=rectangle] ;\n"));
     * assert!(text.contains("  build -> ship [color=red] ;\n"));
     * assert!(text.ends_with("}\n"));
     * ```
     */
    pub fn dump_in_graphviz<W>(&self, out: &mut W, graph_name: &str) -> std::io::Result<()>
    where
        W: std::io::Write,
    {
        let directed = self.is_directed();
        if directed {
            writeln!(out, "digraph {} {{", graph_name)?;
        } else {
            writeln!(out, "graph {} {{", graph_name)?;
        }
        let mut vkey = HashMap::with_capacity_and_hasher(self.vertex_count(), RandomState::new());
        for (p, vert) in self.iter_vertices() {
            let (key, label) = vert.label();
            if let Some(label) = label {
                writeln!(out, "  {} [{}] ;", key, label)?;
            } else {
                writeln!(out, "  {} ;", key)?;
            }
            vkey.insert(p, key);
        }
        let dir = if directed { "->" } else { "--" };
        for (line, e) in self.stream_edges() {
            let (a, b) = line.endpoints();
            // every edge has both endpoints among the vertices
            let (Some(src), Some(snk)) = (vkey.get(a), vkey.get(b)) else {
                continue;
            };
            if let Some(label) = e.label() {
                writeln!(out, "  {} {} {} [{}] ;", src, dir, snk, label)?;
            } else {
                writeln!(out, "  {} {} {} ;", src, dir, snk)?;
            }
        }
        writeln!(out, "}}")?;
        Ok(())
    }
}

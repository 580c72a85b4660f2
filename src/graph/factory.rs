use crate::error::{GraphError, Result};
use crate::graph::*;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The eight supported graph variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphKind {
    Directed,
    DirectedWithSelfLoops,
    DirectedMulti,
    DirectedMultiWithSelfLoops,
    Undirected,
    UndirectedWithSelfLoops,
    UndirectedMulti,
    UndirectedMultiWithSelfLoops,
}

impl GraphKind {
    pub const ALL: [GraphKind; 8] = [
        GraphKind::Directed,
        GraphKind::DirectedWithSelfLoops,
        GraphKind::DirectedMulti,
        GraphKind::DirectedMultiWithSelfLoops,
        GraphKind::Undirected,
        GraphKind::UndirectedWithSelfLoops,
        GraphKind::UndirectedMulti,
        GraphKind::UndirectedMultiWithSelfLoops,
    ];

    /// Picks the variant implementing exactly `descriptors`.
    ///
    /// Sets carrying bits that name no descriptor are rejected.
    pub fn resolve(descriptors: DescriptorSet) -> Result<GraphKind> {
        let descriptors = DescriptorSet::try_from_bits(descriptors.bits())?;
        Ok(GraphKind::of_known(descriptors))
    }

    fn of_known(descriptors: DescriptorSet) -> GraphKind {
        match (
            descriptors.is_directed(),
            descriptors.permits_parallel_edges(),
            descriptors.permits_self_loops(),
        ) {
            (true, false, false) => GraphKind::Directed,
            (true, false, true) => GraphKind::DirectedWithSelfLoops,
            (true, true, false) => GraphKind::DirectedMulti,
            (true, true, true) => GraphKind::DirectedMultiWithSelfLoops,
            (false, false, false) => GraphKind::Undirected,
            (false, false, true) => GraphKind::UndirectedWithSelfLoops,
            (false, true, false) => GraphKind::UndirectedMulti,
            (false, true, true) => GraphKind::UndirectedMultiWithSelfLoops,
        }
    }

    pub fn from_bits(bits: u8) -> Result<GraphKind> {
        DescriptorSet::try_from_bits(bits).map(GraphKind::of_known)
    }

    pub fn descriptors(&self) -> DescriptorSet {
        let (directed, parallel, self_loops) = match self {
            GraphKind::Directed => (true, false, false),
            GraphKind::DirectedWithSelfLoops => (true, false, true),
            GraphKind::DirectedMulti => (true, true, false),
            GraphKind::DirectedMultiWithSelfLoops => (true, true, true),
            GraphKind::Undirected => (false, false, false),
            GraphKind::UndirectedWithSelfLoops => (false, false, true),
            GraphKind::UndirectedMulti => (false, true, false),
            GraphKind::UndirectedMultiWithSelfLoops => (false, true, true),
        };
        let mut res = DescriptorSet::empty();
        res.set(DescriptorSet::DIRECTED, directed);
        res.set(DescriptorSet::PERMIT_PARALLEL_EDGES, parallel);
        res.set(DescriptorSet::PERMIT_SELF_LOOPS, self_loops);
        res
    }

    pub fn is_directed(&self) -> bool {
        self.descriptors().is_directed()
    }
}

impl TryFrom<DescriptorSet> for GraphKind {
    type Error = GraphError;

    fn try_from(descriptors: DescriptorSet) -> Result<Self> {
        GraphKind::resolve(descriptors)
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptors())
    }
}

/// Parses the descriptor syntax of [DescriptorSet], e.g. `directed|permit_parallel_edges`.
impl FromStr for GraphKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<DescriptorSet>().and_then(GraphKind::resolve)
    }
}

/// Entry point for building graphs.
///
/// ```rust
/// use immgraph::graph::*;
///
/// let g = GraphFactory::builder()
///     .directed()
///     .permit_parallel_edges()
///     .build::<&str, u32, &str>()
///     .put_vertex("A", 1)
///     .put_vertex("B", 2);
/// let g = g.put_edge(g.line("A", "B"), "x").put_edge(g.line("A", "B"), "y");
/// assert_eq!(g.get(&g.line("A", "B")).count(), 2);
/// assert_eq!(g.get(&g.line("B", "A")).count(), 0);
/// ```
pub struct GraphFactory;

impl GraphFactory {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// An empty graph of the variant implementing `descriptors`.
    pub fn create<P, V, E>(descriptors: DescriptorSet) -> Result<Graph<P, V, E>>
    where
        P: Point,
        V: VertexValue,
        E: EdgeValue,
    {
        let kind = GraphKind::resolve(descriptors).map_err(|err| {
            debug!(bits = descriptors.bits(), error = %err, "rejected graph descriptors");
            err
        })?;
        Ok(Graph::empty(kind))
    }

    /// Like [GraphFactory::create], but from raw descriptor bits.
    pub fn from_bits<P, V, E>(bits: u8) -> Result<Graph<P, V, E>>
    where
        P: Point,
        V: VertexValue,
        E: EdgeValue,
    {
        let kind = GraphKind::from_bits(bits).map_err(|err| {
            debug!(bits, error = %err, "rejected graph descriptors");
            err
        })?;
        Ok(Graph::empty(kind))
    }

    /// Like [GraphFactory::create], but from descriptor names such as
    /// `directed|permit_self_loops`.
    pub fn from_config<P, V, E>(text: &str) -> Result<Graph<P, V, E>>
    where
        P: Point,
        V: VertexValue,
        E: EdgeValue,
    {
        let kind = text.parse::<GraphKind>().map_err(|err| {
            debug!(config = text, error = %err, "rejected graph descriptors");
            err
        })?;
        debug!(config = text, %kind, "resolved graph variant");
        Ok(Graph::empty(kind))
    }
}

/// Collects descriptors for a graph to build. Graphs are undirected unless asked otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder {
    descriptors: DescriptorSet,
}

impl GraphBuilder {
    pub fn directed(mut self) -> Self {
        self.descriptors.insert(DescriptorSet::DIRECTED);
        self
    }

    pub fn undirected(mut self) -> Self {
        self.descriptors.remove(DescriptorSet::DIRECTED);
        self
    }

    pub fn permit_self_loops(mut self) -> Self {
        self.descriptors.insert(DescriptorSet::PERMIT_SELF_LOOPS);
        self
    }

    pub fn permit_parallel_edges(mut self) -> Self {
        self.descriptors.insert(DescriptorSet::PERMIT_PARALLEL_EDGES);
        self
    }

    /// Replaces every descriptor collected so far.
    pub fn with_descriptors(mut self, descriptors: DescriptorSet) -> Result<Self> {
        self.descriptors = DescriptorSet::try_from_bits(descriptors.bits())?;
        Ok(self)
    }

    pub fn descriptors(&self) -> DescriptorSet {
        self.descriptors
    }

    pub fn kind(&self) -> GraphKind {
        // only known flags are ever collected
        GraphKind::of_known(self.descriptors)
    }

    pub fn build<P, V, E>(self) -> Graph<P, V, E>
    where
        P: Point,
        V: VertexValue,
        E: EdgeValue,
    {
        Graph::empty(self.kind())
    }

    /// Builds in one pass over two sequences.
    ///
    /// Later vertices replace earlier ones on the same point. Edges are checked
    /// against the complete vertex set, exactly as [Graph::put_edge] checks them.
    pub fn build_from<P, V, E, IV, IE>(self, vertices: IV, edges: IE) -> Graph<P, V, E>
    where
        P: Point,
        V: VertexValue,
        E: EdgeValue,
        IV: IntoIterator<Item = (P, V)>,
        IE: IntoIterator<Item = (Line<P>, E)>,
    {
        Graph::from_parts(self.kind(), vertices, edges)
    }

    /// Builds from a vertex collection and a line-to-values collection.
    ///
    /// Variants without parallel edges keep the last value of each line.
    pub fn build_from_edge_sets<P, V, E, IV, IE, ES>(
        self,
        vertices: IV,
        edge_sets: IE,
    ) -> Graph<P, V, E>
    where
        P: Point,
        V: VertexValue,
        E: EdgeValue,
        IV: IntoIterator<Item = (P, V)>,
        IE: IntoIterator<Item = (Line<P>, ES)>,
        ES: IntoIterator<Item = E>,
    {
        let edges = edge_sets.into_iter().flat_map(|(line, values)| {
            values.into_iter().map(move |e| (line.clone(), e))
        });
        self.build_from(vertices, edges)
    }
}

use crate::graph::*;
use crate::plan::*;
use ahash::RandomState;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashSet, VecDeque};
use tracing::trace;

/// The graph a planner builds for one request.
///
/// Points are [OperationPath]s, vertices are query components and an edge from
/// `dependent` to `dependency` says the dependent's value is obtained from the
/// dependency, tagged with its [Provenance]. Two components may be related by
/// several provenances at once, so the underlying graph is directed with parallel edges.
#[derive(Clone, PartialEq, Eq)]
pub struct MaterializationGraph<V = QueryComponent>
where
    V: VertexValue,
{
    graph: Graph<OperationPath, V, Provenance>,
}

impl<V> Default for MaterializationGraph<V>
where
    V: VertexValue,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MaterializationGraph<V>
where
    V: VertexValue,
{
    pub fn new() -> Self {
        let graph = GraphFactory::builder()
            .directed()
            .permit_parallel_edges()
            .build();
        Self { graph }
    }

    pub fn graph(&self) -> &Graph<OperationPath, V, Provenance> {
        &self.graph
    }

    pub fn component(&self, path: &OperationPath) -> Option<&V> {
        self.graph.vertex(path)
    }

    pub fn len(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Adds or replaces the component at `path`.
    pub fn with_component(&self, path: OperationPath, component: V) -> Self {
        Self {
            graph: self.graph.put_vertex(path, component),
        }
    }

    /// Records that `dependent` is obtained from `dependency`.
    ///
    /// Ignored unless both components exist and are distinct.
    pub fn with_provenance(
        &self,
        dependent: OperationPath,
        dependency: OperationPath,
        provenance: Provenance,
    ) -> Self {
        Self {
            graph: self
                .graph
                .put_edge(Line::directed(dependent, dependency), provenance),
        }
    }

    /// Provenances recorded from `dependent` to `dependency`.
    pub fn provenance_of(
        &self,
        dependent: &OperationPath,
        dependency: &OperationPath,
    ) -> Box<dyn Iterator<Item = Provenance> + '_> {
        let line = Line::directed(dependent.clone(), dependency.clone());
        Box::new(self.graph.get(&line).copied())
    }

    /// Every component `path` transitively depends on, nearest first.
    ///
    /// `path` itself is not part of the group, and a component reached twice is listed once.
    pub fn dependency_group(&self, path: &OperationPath) -> Vec<OperationPath> {
        let mut group = vec![];
        let Some(directed) = self.graph.as_directed() else {
            return group;
        };
        let mut visited = HashSet::with_hasher(RandomState::new());
        let mut queue = VecDeque::new();
        visited.insert(path.clone());
        queue.push_back(path.clone());
        while let Some(current) = queue.pop_front() {
            for (line, _) in directed.edges_from_point(&current) {
                let (_, next) = line.into_endpoints();
                if visited.insert(next.clone()) {
                    group.push(next.clone());
                    queue.push_back(next);
                }
            }
        }
        trace!(%path, size = group.len(), "resolved dependency group");
        group
    }
}

impl<V> MaterializationGraph<V>
where
    V: VertexValue + Borrow<QueryComponent>,
{
    /// The dependency group of every field component, keyed by the field's path.
    pub fn argument_dependency_groups(&self) -> BTreeMap<OperationPath, Vec<OperationPath>> {
        self.graph
            .iter_vertices()
            .filter(|(_, v)| Borrow::<QueryComponent>::borrow(*v).is_field())
            .map(|(p, _)| (p.clone(), self.dependency_group(p)))
            .collect()
    }
}

impl<V> std::fmt::Debug for MaterializationGraph<V>
where
    V: VertexValue + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "MaterializationGraph {{")?;
        write!(f, "{:?}", self.graph.debug().indent(2, 2))?;
        writeln!(f, "}}")
    }
}

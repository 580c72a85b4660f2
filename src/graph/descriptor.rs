use crate::error::{GraphError, Result};
use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

/// A trait a graph may carry. A graph without [GraphDescriptor::Directed] is undirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GraphDescriptor {
    Directed,
    PermitSelfLoops,
    PermitParallelEdges,
}

bitflags! {
    /// A set of [GraphDescriptor]s, fixed when a graph is built.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DescriptorSet: u8 {
        const DIRECTED = 0b001;
        const PERMIT_SELF_LOOPS = 0b010;
        const PERMIT_PARALLEL_EDGES = 0b100;
    }
}

impl GraphDescriptor {
    pub const ALL: [GraphDescriptor; 3] = [
        GraphDescriptor::Directed,
        GraphDescriptor::PermitSelfLoops,
        GraphDescriptor::PermitParallelEdges,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GraphDescriptor::Directed => "directed",
            GraphDescriptor::PermitSelfLoops => "permit_self_loops",
            GraphDescriptor::PermitParallelEdges => "permit_parallel_edges",
        }
    }

    fn flag(&self) -> DescriptorSet {
        match self {
            GraphDescriptor::Directed => DescriptorSet::DIRECTED,
            GraphDescriptor::PermitSelfLoops => DescriptorSet::PERMIT_SELF_LOOPS,
            GraphDescriptor::PermitParallelEdges => DescriptorSet::PERMIT_PARALLEL_EDGES,
        }
    }
}

impl fmt::Display for GraphDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GraphDescriptor {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        GraphDescriptor::ALL
            .iter()
            .find(|d| d.name() == normalized)
            .copied()
            .ok_or_else(|| GraphError::UnknownDescriptor(s.trim().to_owned()))
    }
}

impl DescriptorSet {
    /// Rejects bits that name no descriptor.
    pub fn try_from_bits(bits: u8) -> Result<Self> {
        Self::from_bits(bits).ok_or(GraphError::UnsupportedDescriptorBits { bits })
    }

    pub fn has(&self, descriptor: GraphDescriptor) -> bool {
        self.contains(descriptor.flag())
    }

    pub fn with(self, descriptor: GraphDescriptor) -> Self {
        self | descriptor.flag()
    }

    pub fn without(self, descriptor: GraphDescriptor) -> Self {
        self - descriptor.flag()
    }

    pub fn is_directed(&self) -> bool {
        self.contains(Self::DIRECTED)
    }

    pub fn permits_self_loops(&self) -> bool {
        self.contains(Self::PERMIT_SELF_LOOPS)
    }

    pub fn permits_parallel_edges(&self) -> bool {
        self.contains(Self::PERMIT_PARALLEL_EDGES)
    }

    /// Iterates over descriptors in the set, in declaration order.
    pub fn descriptors(&self) -> impl Iterator<Item = GraphDescriptor> + '_ {
        GraphDescriptor::ALL.into_iter().filter(move |d| self.has(*d))
    }
}

impl From<GraphDescriptor> for DescriptorSet {
    fn from(descriptor: GraphDescriptor) -> Self {
        descriptor.flag()
    }
}

impl FromIterator<GraphDescriptor> for DescriptorSet {
    fn from_iter<I: IntoIterator<Item = GraphDescriptor>>(iter: I) -> Self {
        iter.into_iter()
            .fold(DescriptorSet::empty(), |set, d| set.with(d))
    }
}

/// Formats as `directed|permit_self_loops`; the empty set prints as `undirected`.
impl fmt::Display for DescriptorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_directed() {
            f.write_str("undirected")?;
        }
        let mut separate = !self.is_directed();
        for d in self.descriptors() {
            if separate {
                f.write_str("|")?;
            }
            write!(f, "{}", d)?;
            separate = true;
        }
        Ok(())
    }
}

/// Parses descriptor names separated by `|` or `,`.
///
/// `undirected` is accepted as the explicit absence of `directed`; naming both is an error.
impl FromStr for DescriptorSet {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        let mut set = DescriptorSet::empty();
        let mut undirected = false;
        for token in s.split(|c| c == '|' || c == ',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if token.eq_ignore_ascii_case("undirected") {
                undirected = true;
                continue;
            }
            set = set.with(token.parse()?);
        }
        if undirected && set.is_directed() {
            return Err(GraphError::ConflictingOrientation);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let set: DescriptorSet = "directed | Permit-Parallel-Edges".parse().unwrap();
        assert!(set.is_directed());
        assert!(set.permits_parallel_edges());
        assert!(!set.permits_self_loops());
        assert_eq!(set.to_string(), "directed|permit_parallel_edges");

        let set: DescriptorSet = "undirected,permit_self_loops".parse().unwrap();
        assert_eq!(set, DescriptorSet::PERMIT_SELF_LOOPS);
        assert_eq!(set.to_string(), "undirected|permit_self_loops");
        assert_eq!(DescriptorSet::empty().to_string(), "undirected");

        let roundtrip: DescriptorSet = DescriptorSet::all().to_string().parse().unwrap();
        assert_eq!(roundtrip, DescriptorSet::all());
    }

    #[test]
    fn parse_rejects() {
        assert_eq!(
            "directed|weighted".parse::<DescriptorSet>(),
            Err(GraphError::UnknownDescriptor("weighted".to_owned()))
        );
        assert_eq!(
            "directed,undirected".parse::<DescriptorSet>(),
            Err(GraphError::ConflictingOrientation)
        );
    }

    #[test]
    fn bits() {
        assert_eq!(
            DescriptorSet::try_from_bits(0b101),
            Ok(DescriptorSet::DIRECTED | DescriptorSet::PERMIT_PARALLEL_EDGES)
        );
        assert_eq!(
            DescriptorSet::try_from_bits(0b1000),
            Err(GraphError::UnsupportedDescriptorBits { bits: 0b1000 })
        );
    }

    #[test]
    fn collect_descriptors() {
        let set: DescriptorSet = [GraphDescriptor::PermitSelfLoops, GraphDescriptor::Directed]
            .into_iter()
            .collect();
        assert_eq!(
            set.descriptors().collect::<Vec<_>>(),
            vec![GraphDescriptor::Directed, GraphDescriptor::PermitSelfLoops]
        );
        assert_eq!(set.without(GraphDescriptor::Directed), DescriptorSet::PERMIT_SELF_LOOPS);
    }
}

use ahash::RandomState;
use std::hash::{BuildHasher, Hash, Hasher};

/// A location for directed edges, from `source` to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectedLine<P> {
    pub source: P,
    pub destination: P,
}

/// A location for undirected edges.
///
/// Equality and hashing ignore the order in which endpoints were given.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UndirectedLine<P> {
    first: P,
    second: P,
}

/// Where an edge lives: a directed or an undirected pair of points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Line<P> {
    Directed(DirectedLine<P>),
    Undirected(UndirectedLine<P>),
}

impl<P> DirectedLine<P> {
    pub fn new(source: P, destination: P) -> Self {
        Self {
            source,
            destination,
        }
    }

    pub fn reversed(self) -> Self {
        Self {
            source: self.destination,
            destination: self.source,
        }
    }
}

impl<P: PartialEq> DirectedLine<P> {
    pub fn is_self_loop(&self) -> bool {
        self.source == self.destination
    }
}

impl<P> UndirectedLine<P> {
    pub fn new(a: P, b: P) -> Self {
        Self {
            first: a,
            second: b,
        }
    }

    /// Both endpoints, in the order they were supplied.
    pub fn endpoints(&self) -> (&P, &P) {
        (&self.first, &self.second)
    }

    pub fn into_endpoints(self) -> (P, P) {
        (self.first, self.second)
    }
}

impl<P: PartialEq> UndirectedLine<P> {
    pub fn is_self_loop(&self) -> bool {
        self.first == self.second
    }

    pub fn touches(&self, p: &P) -> bool {
        &self.first == p || &self.second == p
    }

    /// The endpoint across from `p`, if `p` is an endpoint.
    pub fn opposite(&self, p: &P) -> Option<&P> {
        if &self.first == p {
            Some(&self.second)
        } else if &self.second == p {
            Some(&self.first)
        } else {
            None
        }
    }
}

impl<P: PartialEq> PartialEq for UndirectedLine<P> {
    fn eq(&self, other: &Self) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }
}

impl<P: Eq> Eq for UndirectedLine<P> {}

// Fixed seeds: endpoint hashes are combined order-independently,
// so each must be stable for the lifetime of the process.
const ENDPOINT_SEEDS: (u64, u64, u64, u64) = (
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
);

fn endpoint_hash<P: Hash>(p: &P) -> u64 {
    let (k0, k1, k2, k3) = ENDPOINT_SEEDS;
    let mut hasher = RandomState::with_seeds(k0, k1, k2, k3).build_hasher();
    p.hash(&mut hasher);
    hasher.finish()
}

impl<P: Hash> Hash for UndirectedLine<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let a = endpoint_hash(&self.first);
        let b = endpoint_hash(&self.second);
        state.write_u64(a.min(b));
        state.write_u64(a.max(b));
    }
}

impl<P> Line<P> {
    pub fn new(directed: bool, p1: P, p2: P) -> Self {
        if directed {
            Self::directed(p1, p2)
        } else {
            Self::undirected(p1, p2)
        }
    }

    pub fn directed(source: P, destination: P) -> Self {
        Line::Directed(DirectedLine::new(source, destination))
    }

    pub fn undirected(a: P, b: P) -> Self {
        Line::Undirected(UndirectedLine::new(a, b))
    }

    pub fn is_directed(&self) -> bool {
        matches!(self, Line::Directed(_))
    }

    /// Both endpoints; source first for directed lines.
    pub fn endpoints(&self) -> (&P, &P) {
        match self {
            Line::Directed(l) => (&l.source, &l.destination),
            Line::Undirected(l) => l.endpoints(),
        }
    }

    pub fn into_endpoints(self) -> (P, P) {
        match self {
            Line::Directed(l) => (l.source, l.destination),
            Line::Undirected(l) => l.into_endpoints(),
        }
    }

    /// Same orientation, endpoints replaced by `f`.
    pub fn map_points<Q, F>(self, mut f: F) -> Line<Q>
    where
        F: FnMut(P) -> Q,
    {
        let directed = self.is_directed();
        let (a, b) = self.into_endpoints();
        let a = f(a);
        let b = f(b);
        Line::new(directed, a, b)
    }

    /// Forgets the orientation. Lossless for lines that are already undirected.
    pub fn into_undirected(self) -> UndirectedLine<P> {
        match self {
            Line::Directed(l) => UndirectedLine::new(l.source, l.destination),
            Line::Undirected(l) => l,
        }
    }
}

impl<P: PartialEq> Line<P> {
    pub fn is_self_loop(&self) -> bool {
        let (a, b) = self.endpoints();
        a == b
    }

    pub fn touches(&self, p: &P) -> bool {
        let (a, b) = self.endpoints();
        a == p || b == p
    }
}

impl<P> From<DirectedLine<P>> for Line<P> {
    fn from(l: DirectedLine<P>) -> Self {
        Line::Directed(l)
    }
}

impl<P> From<UndirectedLine<P>> for Line<P> {
    fn from(l: UndirectedLine<P>) -> Self {
        Line::Undirected(l)
    }
}

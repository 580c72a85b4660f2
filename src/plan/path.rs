use crate::error::{GraphError, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A hierarchical identifier of one operation of a request, e.g. `user.posts.limit`.
///
/// Paths share their prefixes, so `child` and `clone` are cheap.
/// The root path has no segments and displays as the empty string.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct OperationPath {
    segments: imbl::Vector<Arc<str>>,
}

fn check_segment(segment: &str) -> Result<()> {
    if segment.is_empty() || segment.contains('.') {
        return Err(GraphError::InvalidOperationPath(segment.to_owned()));
    }
    Ok(())
}

impl OperationPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// The path one level below `self`. Segments must be non-empty and free of `.`.
    pub fn child(&self, segment: &str) -> Result<Self> {
        check_segment(segment)?;
        let mut segments = self.segments.clone();
        segments.push_back(Arc::from(segment));
        Ok(Self { segments })
    }

    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let segments = self.segments.take(self.segments.len() - 1);
        Some(Self { segments })
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.iter().map(|s| &**s)
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(|s| &**s)
    }

    /// Whether `self` is a strict prefix of `other`.
    pub fn is_ancestor_of(&self, other: &OperationPath) -> bool {
        self.depth() < other.depth()
            && self
                .segments
                .iter()
                .eq(other.segments.iter().take(self.depth()))
    }
}

impl fmt::Display for OperationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(s)?;
        }
        Ok(())
    }
}

impl fmt::Debug for OperationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OperationPath({})", self)
    }
}

impl FromStr for OperationPath {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        let mut segments = imbl::Vector::new();
        for segment in s.split('.') {
            if segment.is_empty() {
                return Err(GraphError::InvalidOperationPath(s.to_owned()));
            }
            segments.push_back(Arc::from(segment));
        }
        Ok(Self { segments })
    }
}

impl From<OperationPath> for String {
    fn from(path: OperationPath) -> Self {
        path.to_string()
    }
}

impl TryFrom<String> for OperationPath {
    type Error = GraphError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::*;

    fn path(s: &str) -> OperationPath {
        s.parse().unwrap()
    }

    #[test]
    fn hierarchy() {
        let root = OperationPath::root();
        let posts = root.child("user").unwrap().child("posts").unwrap();
        assert_eq!(posts, path("user.posts"));
        assert_eq!(posts.depth(), 2);
        assert_eq!(posts.last(), Some("posts"));
        assert_eq!(posts.parent(), Some(path("user")));
        assert_eq!(path("user").parent(), Some(root.clone()));
        assert_eq!(root.parent(), None);
        assert_eq!(posts.segments().collect::<Vec<_>>(), vec!["user", "posts"]);
    }

    #[test]
    fn ancestry() {
        assert!(OperationPath::root().is_ancestor_of(&path("a")));
        assert!(path("a").is_ancestor_of(&path("a.b.c")));
        assert!(!path("a").is_ancestor_of(&path("a")));
        assert!(!path("a.b").is_ancestor_of(&path("a.c.b")));
        assert!(!path("a.b").is_ancestor_of(&path("a")));
    }

    #[test]
    fn malformed() {
        for s in [".a", "a.", "a..b", "."] {
            assert_eq!(
                s.parse::<OperationPath>(),
                Err(GraphError::InvalidOperationPath(s.to_owned()))
            );
        }
        assert!(path("a").child("b.c").is_err());
        assert!(path("a").child("").is_err());
    }

    #[quickcheck]
    fn display_parses_back(segments: Vec<u16>) {
        let p = segments
            .iter()
            .try_fold(OperationPath::root(), |p, s| p.child(&format!("s{}", s)))
            .unwrap();
        assert_eq!(p.to_string().parse::<OperationPath>(), Ok(p.clone()));
        assert_eq!(p.depth(), segments.len());
    }
}

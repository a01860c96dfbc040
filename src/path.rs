use std::fmt;

use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position of a node in the tree: the child index taken at every level,
/// starting from the root.
///
/// The empty path is the root itself (which is never a visible row). Paths
/// are plain values: compared and hashed as whole sequences, never tied to
/// a live node structure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct NodePath {
    segments: SmallVec<[usize; 8]>,
}

impl NodePath {
    /// Returns the root path (no segments).
    pub const fn root() -> Self {
        Self {
            segments: SmallVec::new_const(),
        }
    }

    /// Builds a path from a slice of child indices.
    pub fn from_slice(segments: &[usize]) -> Self {
        Self {
            segments: SmallVec::from_slice(segments),
        }
    }

    /// Returns `true` for the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Indentation level for display: top-level rows sit at 0.
    pub fn indent_level(&self) -> usize {
        self.depth().saturating_sub(1)
    }

    /// Returns the path of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(index);
        Self { segments }
    }

    /// Returns the parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: SmallVec::from_slice(&self.segments[..self.segments.len() - 1]),
        })
    }

    /// Child index of this node within its parent, or `None` for the root.
    pub fn last(&self) -> Option<usize> {
        self.segments.last().copied()
    }

    /// The raw child-index sequence.
    pub fn segments(&self) -> &[usize] {
        &self.segments
    }

    /// Proper ancestors from shallowest to deepest, excluding the root and
    /// the path itself.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + '_ {
        (1..self.depth()).map(|len| Self::from_slice(&self.segments[..len]))
    }
}

impl From<&[usize]> for NodePath {
    fn from(segments: &[usize]) -> Self {
        Self::from_slice(segments)
    }
}

impl<const N: usize> From<[usize; N]> for NodePath {
    fn from(segments: [usize; N]) -> Self {
        Self::from_slice(&segments)
    }
}

impl FromIterator<usize> for NodePath {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("·");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_and_parent_invert() {
        let path = NodePath::from([0, 2]);
        assert_eq!(path.child(1), NodePath::from([0, 2, 1]));
        assert_eq!(path.child(1).parent(), Some(path.clone()));
        assert_eq!(path.parent(), Some(NodePath::from([0])));
        assert_eq!(path.last(), Some(2));
        assert_eq!(NodePath::root().parent(), None);
        assert_eq!(NodePath::root().last(), None);
    }

    #[test]
    fn depth_and_indent() {
        assert_eq!(NodePath::root().depth(), 0);
        assert_eq!(NodePath::from([3]).indent_level(), 0);
        assert_eq!(NodePath::from([3, 0, 1]).indent_level(), 2);
    }

    #[test]
    fn ancestors_exclude_root_and_self() {
        let path = NodePath::from([1, 0, 4]);
        let ancestors: Vec<_> = path.ancestors().collect();
        assert_eq!(
            ancestors,
            vec![NodePath::from([1]), NodePath::from([1, 0])]
        );
        assert!(NodePath::from([2]).ancestors().next().is_none());
    }

    #[test]
    fn display_is_dotted() {
        assert_eq!(NodePath::from([0, 2, 1]).to_string(), "0.2.1");
        assert_eq!(NodePath::root().to_string(), "·");
    }
}

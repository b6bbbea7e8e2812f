//! Addressing nodes inside a tree

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;

/// Deepest path a node may sit at, for the editor and the wire reader alike
///
/// Each level costs two JSON nesting levels (node object and `conditions`
/// array) plus one for a value payload, which keeps documents well inside
/// serde_json's parser recursion limit.
pub const MAX_DEPTH: usize = 32;

/// Child indices leading from the root group to a node; empty is the root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(SmallVec<[usize; 8]>);

impl NodePath {
    pub fn root() -> Self {
        Self(SmallVec::new())
    }

    pub fn from_slice(indices: &[usize]) -> Self {
        Self(SmallVec::from_slice(indices))
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Path of the `index`-th child of this node
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.0.push(index);
        path
    }

    /// Parent path and own index, or `None` for the root
    pub fn split_last(&self) -> Option<(NodePath, usize)> {
        let (&last, parent) = self.0.split_last()?;
        Some((NodePath::from_slice(parent), last))
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for idx in &self.0 {
            write!(f, "/{}", idx)?;
        }
        Ok(())
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for NodePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let indices = Vec::<usize>::deserialize(deserializer)?;
        Ok(NodePath::from_slice(&indices))
    }
}

impl From<&[usize]> for NodePath {
    fn from(indices: &[usize]) -> Self {
        NodePath::from_slice(indices)
    }
}

impl<const N: usize> From<[usize; N]> for NodePath {
    fn from(indices: [usize; N]) -> Self {
        NodePath::from_slice(&indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(NodePath::root().to_string(), "/");
        assert_eq!(NodePath::from([1, 0, 3]).to_string(), "/1/0/3");
    }

    #[test]
    fn test_child_and_split() {
        let path = NodePath::root().child(2).child(0);
        assert_eq!(path.indices(), &[2, 0]);
        let (parent, idx) = path.split_last().unwrap();
        assert_eq!(parent, NodePath::from([2]));
        assert_eq!(idx, 0);
        assert!(NodePath::root().split_last().is_none());
    }

    #[test]
    fn test_json_is_index_list() {
        let path = NodePath::from([0, 4]);
        assert_eq!(serde_json::to_string(&path).unwrap(), "[0,4]");
        let back: NodePath = serde_json::from_str("[0,4]").unwrap();
        assert_eq!(back, path);
    }
}

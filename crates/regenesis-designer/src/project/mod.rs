//! Project tree: projects at the roots, regions nested beneath them.
//!
//! Nodes are kept in a map keyed by [`NodeId`]; parent/child links are
//! stored on the nodes themselves and kept consistent by every mutating
//! operation. On disk the tree is a flat pre-order node list, validated on
//! load.

mod properties;
mod sample;
mod types;

use std::collections::{HashMap, HashSet};

use regenesis_core::{Error, Result};
use serde::{Deserialize, Serialize};

pub use sample::sample_project;
pub use types::{
    NodeId, NodeKind, ProjectProperties, RegionProperties, RegionType, SoilMoisture, SoilType,
    SunExposure,
};

/// One node of the project tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

impl TreeNode {
    pub fn is_project(&self) -> bool {
        self.kind.is_project()
    }

    pub fn is_region(&self) -> bool {
        self.kind.is_region()
    }

    pub fn project_properties(&self) -> Option<&ProjectProperties> {
        match &self.kind {
            NodeKind::Project(props) => Some(props),
            NodeKind::Region(_) => None,
        }
    }

    pub fn region_properties(&self) -> Option<&RegionProperties> {
        match &self.kind {
            NodeKind::Region(props) => Some(props),
            NodeKind::Project(_) => None,
        }
    }
}

/// Forest of projects and their regions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TreeNode>", into = "Vec<TreeNode>")]
pub struct ProjectTree {
    nodes: HashMap<NodeId, TreeNode>,
    roots: Vec<NodeId>,
}

impl ProjectTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new top-level project.
    pub fn add_project(&mut self, name: impl Into<String>, props: ProjectProperties) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(
            id,
            TreeNode {
                id,
                name: name.into(),
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Project(props),
            },
        );
        self.roots.push(id);
        tracing::debug!("Added project {}", id);
        id
    }

    /// Adds a region under `parent`, which may be a project or another region.
    pub fn add_region(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        props: RegionProperties,
    ) -> Result<NodeId> {
        let parent_node = self
            .nodes
            .get_mut(&parent)
            .ok_or_else(|| Error::NodeNotFound(parent.to_string()))?;

        let id = NodeId::new();
        parent_node.children.push(id);
        self.nodes.insert(
            id,
            TreeNode {
                id,
                name: name.into(),
                parent: Some(parent),
                children: Vec::new(),
                kind: NodeKind::Region(props),
            },
        );
        tracing::debug!("Added region {} under {}", id, parent);
        Ok(id)
    }

    /// Removes `id` and its whole subtree, returning the removed ids
    /// (pre-order, `id` first).
    pub fn remove(&mut self, id: NodeId) -> Result<Vec<NodeId>> {
        let parent = self
            .nodes
            .get(&id)
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))?
            .parent;

        match parent {
            Some(parent) => {
                if let Some(parent_node) = self.nodes.get_mut(&parent) {
                    parent_node.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }

        let removed = self.subtree(id);
        for removed_id in &removed {
            self.nodes.remove(removed_id);
        }
        tracing::debug!("Removed {} node(s) starting at {}", removed.len(), id);
        Ok(removed)
    }

    pub fn rename(&mut self, id: NodeId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid("name", "must not be empty"));
        }
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))?;
        node.name = name;
        Ok(())
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Walks parent links up to the project that owns `id`.
    pub fn find_root(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.nodes.get(&id)?;
        while let Some(parent) = current.parent {
            current = self.nodes.get(&parent)?;
        }
        Some(current.id)
    }

    /// Distance from the root; projects are at depth 0.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut current = self.nodes.get(&id)?;
        let mut depth = 0;
        while let Some(parent) = current.parent {
            current = self.nodes.get(&parent)?;
            depth += 1;
        }
        Some(depth)
    }

    /// Properties of the project that owns `id`.
    pub fn project_of(&self, id: NodeId) -> Option<&ProjectProperties> {
        self.find_root(id)
            .and_then(|root| self.nodes.get(&root))
            .and_then(TreeNode::project_properties)
    }

    /// Depth-first pre-order traversal yielding `(depth, node)`.
    pub fn walk(&self) -> Vec<(usize, &TreeNode)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, NodeId)> =
            self.roots.iter().rev().map(|id| (0, *id)).collect();

        while let Some((depth, id)) = stack.pop() {
            if let Some(node) = self.nodes.get(&id) {
                out.push((depth, node));
                stack.extend(node.children.iter().rev().map(|c| (depth + 1, *c)));
            }
        }
        out
    }

    /// First node in pre-order with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.walk()
            .into_iter()
            .find(|(_, node)| node.name == name)
            .map(|(_, node)| node.id)
    }

    /// Position of `id` among its siblings.
    pub fn sibling_index(&self, id: NodeId) -> Option<usize> {
        let siblings = match self.parent(id) {
            Some(parent) => self.children(parent),
            None => &self.roots,
        };
        siblings.iter().position(|s| *s == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }
}

impl From<ProjectTree> for Vec<TreeNode> {
    fn from(tree: ProjectTree) -> Self {
        tree.walk().into_iter().map(|(_, n)| n.clone()).collect()
    }
}

impl TryFrom<Vec<TreeNode>> for ProjectTree {
    type Error = Error;

    fn try_from(list: Vec<TreeNode>) -> Result<Self> {
        let mut tree = ProjectTree::new();
        for node in list {
            if tree.nodes.contains_key(&node.id) {
                return Err(Error::InvalidHierarchy(format!(
                    "duplicate node id {}",
                    node.id
                )));
            }
            match (node.parent, &node.kind) {
                (None, NodeKind::Project(_)) => tree.roots.push(node.id),
                (Some(parent), NodeKind::Region(_)) => {
                    // Pre-order guarantees the parent was seen first.
                    let parent_node = tree.nodes.get(&parent).ok_or_else(|| {
                        Error::InvalidHierarchy(format!(
                            "region {} refers to unknown parent {}",
                            node.id, parent
                        ))
                    })?;
                    if !parent_node.children.contains(&node.id) {
                        return Err(Error::InvalidHierarchy(format!(
                            "parent {} does not list child {}",
                            parent, node.id
                        )));
                    }
                }
                (Some(_), NodeKind::Project(_)) => {
                    return Err(Error::InvalidHierarchy(format!(
                        "project {} has a parent",
                        node.id
                    )));
                }
                (None, NodeKind::Region(_)) => {
                    return Err(Error::InvalidHierarchy(format!(
                        "region {} has no parent",
                        node.id
                    )));
                }
            }
            tree.nodes.insert(node.id, node);
        }

        for node in tree.nodes.values() {
            let distinct: HashSet<&NodeId> = node.children.iter().collect();
            if distinct.len() != node.children.len() {
                return Err(Error::InvalidHierarchy(format!(
                    "{} lists a child more than once",
                    node.id
                )));
            }
            for child in &node.children {
                if tree.nodes.get(child).and_then(|c| c.parent) != Some(node.id) {
                    return Err(Error::InvalidHierarchy(format!(
                        "child {} of {} is missing or has another parent",
                        child, node.id
                    )));
                }
            }
        }
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_regions() -> (ProjectTree, NodeId, NodeId, NodeId) {
        let mut tree = ProjectTree::new();
        let project = tree.add_project("Plot", ProjectProperties::default());
        let a = tree
            .add_region(project, "A", RegionProperties::default())
            .unwrap();
        let b = tree.add_region(a, "B", RegionProperties::default()).unwrap();
        (tree, project, a, b)
    }

    #[test]
    fn test_find_root_and_depth() {
        let (tree, project, a, b) = tree_with_regions();
        assert_eq!(tree.find_root(b), Some(project));
        assert_eq!(tree.find_root(project), Some(project));
        assert_eq!(tree.depth(project), Some(0));
        assert_eq!(tree.depth(a), Some(1));
        assert_eq!(tree.depth(b), Some(2));
        assert_eq!(tree.parent(project), None);
    }

    #[test]
    fn test_add_region_requires_parent() {
        let mut tree = ProjectTree::new();
        let err = tree
            .add_region(NodeId::new(), "Orphan", RegionProperties::default())
            .unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(_)));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_remove_subtree() {
        let (mut tree, project, a, b) = tree_with_regions();
        let removed = tree.remove(a).unwrap();
        assert_eq!(removed, vec![a, b]);
        assert_eq!(tree.len(), 1);
        assert!(tree.children(project).is_empty());
        assert!(tree.remove(a).is_err());
    }

    #[test]
    fn test_rename_rejects_blank() {
        let (mut tree, project, _, _) = tree_with_regions();
        assert!(tree.rename(project, "  ").is_err());
        tree.rename(project, "Renamed").unwrap();
        assert_eq!(tree.get(project).unwrap().name, "Renamed");
    }

    #[test]
    fn test_walk_is_preorder() {
        let (mut tree, project, a, b) = tree_with_regions();
        let c = tree
            .add_region(project, "C", RegionProperties::default())
            .unwrap();
        let order: Vec<(usize, NodeId)> = tree.walk().iter().map(|(d, n)| (*d, n.id)).collect();
        assert_eq!(order, vec![(0, project), (1, a), (2, b), (1, c)]);
        assert_eq!(tree.sibling_index(c), Some(1));
    }

    #[test]
    fn test_serde_round_trip_and_validation() {
        let (tree, _, _, b) = tree_with_regions();
        let json = serde_json::to_string(&tree).unwrap();
        let back: ProjectTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);

        // Dropping the project leaves regions without a parent.
        let mut nodes: Vec<TreeNode> = tree.clone().into();
        nodes.remove(0);
        assert!(ProjectTree::try_from(nodes).is_err());

        // A project that claims a parent is rejected.
        let mut nodes: Vec<TreeNode> = tree.into();
        nodes[0].parent = Some(b);
        assert!(matches!(
            ProjectTree::try_from(nodes),
            Err(Error::InvalidHierarchy(_))
        ));
    }

    #[test]
    fn test_duplicate_child_is_rejected() {
        let (tree, _, a, _) = tree_with_regions();
        let mut nodes: Vec<TreeNode> = tree.into();
        nodes[0].children.push(a);
        assert!(matches!(
            ProjectTree::try_from(nodes),
            Err(Error::InvalidHierarchy(_))
        ));
    }
}

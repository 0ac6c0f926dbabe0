use crate::node::{Node, NodeKind};
use glam::{Mat4, Vec3};
use scenekit_common::{NodeId, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The scene root.
///
/// Owns every node. Nodes are stored in a map keyed by id; hierarchy lives in
/// the per-node child lists plus the root child list, so draw and dump order
/// follows insertion order rather than id order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Root transform. Identity unless the caller moves the whole scene.
    pub transform: Transform,
    nodes: BTreeMap<NodeId, Node>,
    root: Vec<NodeId>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// World-space origin of the scene root.
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Total number of nodes at any depth.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach a node directly under the scene root. Returns its id.
    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId::new();
        self.insert(id, None, node);
        self.root.push(id);
        id
    }

    /// Attach a node under `parent`. Returns `None` if the parent is unknown.
    pub fn add_to(&mut self, parent: NodeId, node: Node) -> Option<NodeId> {
        if !self.nodes.contains_key(&parent) {
            return None;
        }
        let id = NodeId::new();
        self.insert(id, Some(parent), node);
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        Some(id)
    }

    fn insert(&mut self, id: NodeId, parent: Option<NodeId>, mut node: Node) {
        node.parent = parent;
        node.children.clear();
        tracing::trace!(
            "scene: add {} '{}' ({})",
            node.kind.kind_name(),
            node.name,
            id.short()
        );
        self.nodes.insert(id, node);
    }

    /// Detach and drop a node and its whole subtree. Returns the removed node.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.remove(&id)?;
        match node.parent {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(&parent) {
                    p.children.retain(|c| *c != id);
                }
            }
            None => self.root.retain(|c| *c != id),
        }
        let mut stack = node.children.clone();
        while let Some(child) = stack.pop() {
            if let Some(n) = self.nodes.remove(&child) {
                stack.extend(n.children);
            }
        }
        Some(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Ids attached directly to the scene root, in insertion order.
    pub fn root_children(&self) -> &[NodeId] {
        &self.root
    }

    /// Children of a node, in insertion order. Empty for unknown ids.
    pub fn children(&self, parent: NodeId) -> &[NodeId] {
        self.nodes
            .get(&parent)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// First node with the given name in depth-first order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.walk()
            .into_iter()
            .find(|entry| entry.node.name == name)
            .map(|entry| entry.id)
    }

    /// Count root-level nodes matching a predicate.
    pub fn count_root(&self, pred: impl Fn(&NodeKind) -> bool) -> usize {
        self.root
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .filter(|n| pred(&n.kind))
            .count()
    }

    /// Local-to-world matrix of a node, including the scene root transform.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut m = self.nodes.get(&id)?.transform.matrix();
        let mut cursor = self.nodes.get(&id)?.parent;
        while let Some(parent) = cursor {
            let p = self.nodes.get(&parent)?;
            m = p.transform.matrix() * m;
            cursor = p.parent;
        }
        Some(self.transform.matrix() * m)
    }

    /// Depth-first traversal in child order, skipping invisible subtrees.
    pub fn walk(&self) -> Vec<WalkEntry<'_>> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let root = self.transform.matrix();
        for id in &self.root {
            self.walk_node(*id, root, 0, &mut out);
        }
        out
    }

    fn walk_node<'a>(&'a self, id: NodeId, parent: Mat4, depth: usize, out: &mut Vec<WalkEntry<'a>>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if !node.visible {
            return;
        }
        let world = parent * node.transform.matrix();
        out.push(WalkEntry {
            id,
            node,
            world,
            depth,
        });
        for child in &node.children {
            self.walk_node(*child, world, depth + 1, out);
        }
    }
}

/// One visited node from [`Scene::walk`].
#[derive(Debug, Clone, Copy)]
pub struct WalkEntry<'a> {
    pub id: NodeId,
    pub node: &'a Node,
    pub world: Mat4,
    pub depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Geometry, Light, StandardMaterial};
    use scenekit_common::Color;

    fn cube() -> Node {
        Node::mesh(
            Geometry::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            StandardMaterial::default(),
        )
    }

    #[test]
    fn scene_starts_empty() {
        let s = Scene::new();
        assert!(s.is_empty());
        assert!(s.root_children().is_empty());
        assert_eq!(s.position(), Vec3::ZERO);
    }

    #[test]
    fn add_and_nest() {
        let mut s = Scene::new();
        let group = s.add(Node::group().named("g"));
        let mesh = s.add_to(group, cube()).unwrap();
        let light = s
            .add_to(group, Node::light(Light::ambient(Color::WHITE, 1.0)))
            .unwrap();

        assert_eq!(s.len(), 3);
        assert_eq!(s.root_children(), &[group]);
        assert_eq!(s.children(group), &[mesh, light]);
        assert_eq!(s.get(mesh).unwrap().parent(), Some(group));
        assert_eq!(s.get(group).unwrap().parent(), None);
    }

    #[test]
    fn add_to_unknown_parent_fails() {
        let mut s = Scene::new();
        assert!(s.add_to(NodeId::new(), cube()).is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn remove_drops_subtree() {
        let mut s = Scene::new();
        let group = s.add(Node::group());
        let inner = s.add_to(group, Node::group()).unwrap();
        s.add_to(inner, cube()).unwrap();
        let other = s.add(cube());

        assert!(s.remove(group).is_some());
        assert_eq!(s.len(), 1);
        assert_eq!(s.root_children(), &[other]);
        assert!(s.remove(group).is_none());
    }

    #[test]
    fn world_matrix_composes_parents() {
        let mut s = Scene::new();
        let group = s.add(Node::group().with_transform(Transform::from_position(Vec3::X)));
        let child = s
            .add_to(group, cube().with_transform(Transform::from_position(Vec3::Y)))
            .unwrap();
        let m = s.world_matrix(child).unwrap();
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn walk_is_depth_first_in_insertion_order() {
        let mut s = Scene::new();
        let a = s.add(Node::group().named("a"));
        s.add_to(a, cube().named("a1")).unwrap();
        s.add(cube().named("b"));

        let names: Vec<&str> = s.walk().iter().map(|e| e.node.name.as_str()).collect();
        assert_eq!(names, vec!["a", "a1", "b"]);
        assert_eq!(s.walk()[1].depth, 1);
        assert!(s.find_by_name("a1").is_some());
        assert!(s.find_by_name("zzz").is_none());
    }

    #[test]
    fn walk_skips_hidden_subtrees() {
        let mut s = Scene::new();
        let a = s.add(Node::group());
        s.add_to(a, cube()).unwrap();
        s.get_mut(a).unwrap().visible = false;
        assert!(s.walk().is_empty());
    }

    #[test]
    fn count_root_by_kind() {
        let mut s = Scene::new();
        s.add(Node::light(Light::ambient(Color::WHITE, 0.1)));
        s.add(cube());
        assert_eq!(s.count_root(NodeKind::is_light), 1);
    }

    #[test]
    fn scene_serializes_to_json() {
        let mut s = Scene::new();
        s.add(cube().named("box"));
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"box\""));
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
    }
}

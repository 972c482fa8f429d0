//! Node arena and scene-graph operations.
//!
//! The [`Scene`] owns every [`Node`] in a flat map keyed by [`NodeId`]; the
//! hierarchy is expressed with parent/child id links. There is always a root
//! node, created with the scene and never destroyed.
//!
//! Matrices are refreshed lazily: [`Scene::update_matrix`] only recomputes a
//! node when `matrix_auto_update`, `matrix_needs_update` or `force` says so,
//! and a parent's change does not invalidate its children. The renderer walks
//! the whole tree top-down every frame, which keeps every cached matrix
//! current.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::box2::Box2;
use crate::camera::Camera2D;
use crate::consts::DRAG_SLOP_PX;
use crate::matrix2::Matrix2;
use crate::node::{Behavior, DefaultBehavior, Node, NodeId, PointerContext, PointerEvent};
use crate::pointer::Pointer;
use crate::vector2::Vector2;

/// In-memory scene graph.
#[derive(Debug)]
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene holding only an empty root node.
    #[must_use]
    pub fn new() -> Self {
        let root = Node::default().named("root");
        let id = root.id;
        let mut nodes = HashMap::new();
        nodes.insert(id, root);
        Self { nodes, root: id }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes in the arena, attached or not, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // --- Hierarchy ---

    /// Put a detached node into the arena without attaching it.
    pub fn insert(&mut self, mut node: Node) -> NodeId {
        let id = node.id;
        node.parent = None;
        node.children.clear();
        node.level = 0;
        self.nodes.insert(id, node);
        id
    }

    /// Insert `node` and attach it under `parent`.
    pub fn spawn(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.insert(node);
        self.add(parent, id);
        id
    }

    /// Attach `child` under `parent`, re-parenting it if needed.
    ///
    /// Returns whether `child` ends up attached under `parent`. Attaching a
    /// node under itself or one of its descendants is refused.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            warn!(%parent, %child, "add: unknown node");
            return false;
        }
        if parent == child || self.is_ancestor(child, parent) {
            warn!(%parent, %child, "add: refusing to attach a node under its own subtree");
            return false;
        }

        let old_parent = self.nodes.get(&child).and_then(|n| n.parent);
        if old_parent == Some(parent) {
            return true;
        }
        if let Some(old) = old_parent {
            self.remove(old, child);
        }

        let parent_level = match self.nodes.get_mut(&parent) {
            Some(p) => {
                p.children.push(child);
                p.level
            }
            None => return false,
        };
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
            c.level = parent_level + 1;
        }

        let subtree = self.descendants(child);
        self.refresh_levels(&subtree);
        for id in subtree {
            self.with_behavior(id, |b, scene| b.on_add(scene, id));
        }
        true
    }

    /// Detach `child` from `parent` without dropping it.
    ///
    /// Returns false if `child` was not a child of `parent`.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(p) = self.nodes.get_mut(&parent) else {
            return false;
        };
        let Some(index) = p.children.iter().position(|c| *c == child) else {
            return false;
        };
        p.children.remove(index);
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = None;
            c.level = 0;
        }

        let subtree = self.descendants(child);
        self.refresh_levels(&subtree);
        for id in subtree {
            self.with_behavior(id, |b, scene| b.on_remove(scene, id));
        }
        true
    }

    /// Detach every child of `parent`.
    pub fn remove_all(&mut self, parent: NodeId) {
        let children = self.nodes.get(&parent).map(|p| p.children.clone()).unwrap_or_default();
        for child in children {
            self.remove(parent, child);
        }
    }

    /// Detach `id` and drop it together with its whole subtree.
    ///
    /// Returns the number of nodes dropped. The root cannot be destroyed.
    pub fn destroy(&mut self, id: NodeId) -> usize {
        if id == self.root {
            warn!("destroy: the root node cannot be destroyed");
            return 0;
        }
        if let Some(parent) = self.nodes.get(&id).and_then(|n| n.parent) {
            self.remove(parent, id);
        }
        let subtree = self.descendants(id);
        for node_id in &subtree {
            self.nodes.remove(node_id);
        }
        debug!(%id, count = subtree.len(), "destroyed subtree");
        subtree.len()
    }

    /// Whether `ancestor` lies on the parent chain above `id`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.traverse_ancestors(id, |n| n.id == ancestor).is_some()
    }

    /// First node named `name`, in traversal order from the root.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.traverse(self.root, |n| n.name == name)
    }

    fn refresh_levels(&mut self, preorder: &[NodeId]) {
        for id in preorder {
            let parent_level = self
                .nodes
                .get(id)
                .and_then(|n| n.parent)
                .and_then(|p| self.nodes.get(&p))
                .map(|p| p.level);
            if let Some(node) = self.nodes.get_mut(id) {
                node.level = parent_level.map_or(0, |l| l + 1);
            }
        }
    }

    // --- Traversal ---

    /// Depth-first pre-order walk from `from`. Stops at, and returns, the
    /// first node for which `f` returns true.
    pub fn traverse(&self, from: NodeId, mut f: impl FnMut(&Node) -> bool) -> Option<NodeId> {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            if f(node) {
                return Some(id);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Walk the parent chain above `id`, nearest first. Stops at, and returns,
    /// the first ancestor for which `f` returns true.
    pub fn traverse_ancestors(&self, id: NodeId, mut f: impl FnMut(&Node) -> bool) -> Option<NodeId> {
        let mut current = self.nodes.get(&id).and_then(|n| n.parent);
        while let Some(pid) = current {
            let node = self.nodes.get(&pid)?;
            if f(node) {
                return Some(pid);
            }
            current = node.parent;
        }
        None
    }

    /// `from` and everything below it, pre-order.
    #[must_use]
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.traverse(from, |n| {
            out.push(n.id);
            false
        });
        out
    }

    /// Visible nodes below `from` in pre-order. An invisible node hides its
    /// whole subtree.
    #[must_use]
    pub fn visible_nodes(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            out.push(id);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    // --- Transforms ---

    /// Refresh one node's cached matrices and global opacity from its local
    /// transform and its parent's cached state.
    pub fn update_matrix(&mut self, id: NodeId, force: bool) {
        let parent = self
            .nodes
            .get(&id)
            .and_then(|n| n.parent)
            .and_then(|p| self.nodes.get(&p))
            .map(|p| (p.global_matrix, p.global_opacity));
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        if !(node.matrix_auto_update || node.matrix_needs_update || force) {
            return;
        }

        node.global_opacity = node.opacity * parent.map_or(1.0, |(_, opacity)| opacity);
        node.compose_matrix();
        node.global_matrix = node.matrix;
        if let Some((parent_matrix, _)) = parent {
            node.global_matrix.premultiply(&parent_matrix);
        }
        node.inverse_global_matrix = node.global_matrix.get_inverse();
        node.matrix_needs_update = false;
    }

    /// Update every node below `from`, parents before children.
    pub fn update_matrices(&mut self, from: NodeId, force: bool) {
        for id in self.descendants(from) {
            self.update_matrix(id, force);
        }
    }

    /// Recompute `id`'s local bounding box from its shape.
    pub fn refresh_bounding_box(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.bounding_box = node.shape.compute_bounding_box();
        }
    }

    /// Axis-aligned world bounds of the node's local box. Overestimates
    /// under rotation.
    #[must_use]
    pub fn world_bounding_box(&self, id: NodeId) -> Box2 {
        self.nodes
            .get(&id)
            .map_or_else(Box2::empty, |n| n.bounding_box.transformed(&n.global_matrix))
    }

    // --- Hit testing ---

    /// Whether the world point hits `id`'s shape, or with `recursive` any
    /// shape below it.
    #[must_use]
    pub fn is_world_point_inside(&self, id: NodeId, world: Vector2, recursive: bool) -> bool {
        let Some(node) = self.nodes.get(&id) else {
            return false;
        };
        if node.is_inside(node.world_to_local(world)) {
            return true;
        }
        recursive && node.children.iter().any(|c| self.is_world_point_inside(*c, world, true))
    }

    /// Every visible node below `from` whose shape contains the world point,
    /// in document (pre-order) order.
    #[must_use]
    pub fn world_point_intersections(&self, from: NodeId, world: Vector2) -> Vec<NodeId> {
        self.visible_nodes(from)
            .into_iter()
            .filter(|id| self.is_world_point_inside(*id, world, false))
            .collect()
    }

    // --- Behaviour dispatch ---

    /// Run `f` with `id`'s behaviour detached so it can mutate the scene.
    fn with_behavior(&mut self, id: NodeId, f: impl FnOnce(&mut dyn Behavior, &mut Scene)) {
        let Some(mut behavior) = self.nodes.get_mut(&id).and_then(|n| n.behavior.take()) else {
            return;
        };
        f(behavior.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(&id)
            && node.behavior.is_none()
        {
            node.behavior = Some(behavior);
        }
    }

    /// Deliver a pointer event to `id`. Nodes without a behaviour get the
    /// default hooks.
    pub fn dispatch(&mut self, id: NodeId, event: PointerEvent, pointer: &Pointer, camera: &Camera2D) {
        if !self.contains(id) {
            return;
        }
        let taken = self.nodes.get_mut(&id).and_then(|n| n.behavior.take());
        match taken {
            Some(mut behavior) => {
                behavior.handle(event, &mut PointerContext { scene: self, id, pointer, camera });
                if let Some(node) = self.nodes.get_mut(&id)
                    && node.behavior.is_none()
                {
                    node.behavior = Some(behavior);
                }
            }
            None => DefaultBehavior.handle(event, &mut PointerContext { scene: self, id, pointer, camera }),
        }
    }

    /// Run `id`'s per-frame hook.
    pub fn update_behavior(&mut self, id: NodeId, camera: &Camera2D) {
        self.with_behavior(id, |b, scene| b.on_update(scene, id, camera));
    }

    /// Cursor `id` asks for: the behaviour's, else the node's own.
    #[must_use]
    pub fn cursor_for(&self, id: NodeId, camera: &Camera2D) -> Option<String> {
        let node = self.nodes.get(&id)?;
        node.behavior
            .as_ref()
            .and_then(|b| b.cursor(self, id, camera))
            .or_else(|| node.cursor.clone())
    }

    /// Move `id` with the pointer's last movement, expressed in its parent's
    /// space. Nothing moves until the pointer has left the drag slop around
    /// where the drag started.
    pub fn default_drag(&mut self, id: NodeId, pointer: &Pointer, camera: &Camera2D) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if let Some(origin) = node.drag_origin
            && pointer.position.manhattan_distance_to(origin) * pointer.pixel_ratio() <= DRAG_SLOP_PX
        {
            return;
        }
        let parent_inverse = node
            .parent
            .and_then(|p| self.nodes.get(&p))
            .map_or_else(Matrix2::identity, |p| p.inverse_global_matrix);
        let camera_inverse = camera.inverse_matrix();
        let to_parent = |screen: Vector2| parent_inverse.transform_point(camera_inverse.transform_point(screen));

        let mut delta = to_parent(pointer.position);
        delta.sub(to_parent(pointer.previous_position()));

        if let Some(node) = self.nodes.get_mut(&id) {
            node.position.add(delta);
            node.matrix_needs_update = true;
        }
    }
}

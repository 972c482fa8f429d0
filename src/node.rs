//! Scene-graph node records and the behaviour hook trait.
//!
//! A [`Node`] is plain data: transform, hierarchy links, interaction flags and
//! a [`Shape`]. Per-node logic (reacting to the pointer, animating in
//! `on_update`, custom cursors) lives in an optional [`Behavior`]. Nodes are
//! owned by a [`Scene`] arena and addressed by [`NodeId`].

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;

use uuid::Uuid;

use crate::box2::Box2;
use crate::camera::Camera2D;
use crate::matrix2::Matrix2;
use crate::pointer::Pointer;
use crate::scene::Scene;
use crate::shape::Shape;
use crate::vector2::Vector2;

/// Unique identifier for a scene node.
pub type NodeId = Uuid;

/// Pointer events the renderer dispatches to nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Over,
    Leave,
    Down,
    Up,
    DoubleClick,
    DragStart,
    Drag,
    DragEnd,
}

/// Everything a pointer hook may look at or change.
pub struct PointerContext<'a> {
    pub scene: &'a mut Scene,
    /// The node receiving the event.
    pub id: NodeId,
    pub pointer: &'a Pointer,
    pub camera: &'a Camera2D,
}

/// Optional per-node logic. Every hook has a default; implement only the
/// ones the node reacts to.
///
/// While a hook runs, the behaviour is detached from its node, so hooks may
/// freely mutate the scene (including the node itself) through the `scene`
/// argument.
pub trait Behavior: std::fmt::Debug {
    /// The node was attached under a parent.
    fn on_add(&mut self, _scene: &mut Scene, _id: NodeId) {}

    /// The node was detached from its parent.
    fn on_remove(&mut self, _scene: &mut Scene, _id: NodeId) {}

    /// Called every frame after the node's matrices are refreshed.
    fn on_update(&mut self, _scene: &mut Scene, _id: NodeId, _camera: &Camera2D) {}

    /// Cursor while hovered. `None` falls back to [`Node::cursor`].
    fn cursor(&self, _scene: &Scene, _id: NodeId, _camera: &Camera2D) -> Option<String> {
        None
    }

    fn on_pointer_enter(&mut self, _cx: &mut PointerContext<'_>) {}
    fn on_pointer_over(&mut self, _cx: &mut PointerContext<'_>) {}
    fn on_pointer_leave(&mut self, _cx: &mut PointerContext<'_>) {}
    fn on_pointer_down(&mut self, _cx: &mut PointerContext<'_>) {}
    fn on_pointer_up(&mut self, _cx: &mut PointerContext<'_>) {}
    fn on_double_click(&mut self, _cx: &mut PointerContext<'_>) {}

    fn on_pointer_drag_start(&mut self, _cx: &mut PointerContext<'_>) {}

    /// Defaults to moving the node with the pointer.
    fn on_pointer_drag(&mut self, cx: &mut PointerContext<'_>) {
        cx.scene.default_drag(cx.id, cx.pointer, cx.camera);
    }

    fn on_pointer_drag_end(&mut self, _cx: &mut PointerContext<'_>) {}

    /// Route `event` to the matching hook.
    fn handle(&mut self, event: PointerEvent, cx: &mut PointerContext<'_>) {
        match event {
            PointerEvent::Enter => self.on_pointer_enter(cx),
            PointerEvent::Over => self.on_pointer_over(cx),
            PointerEvent::Leave => self.on_pointer_leave(cx),
            PointerEvent::Down => self.on_pointer_down(cx),
            PointerEvent::Up => self.on_pointer_up(cx),
            PointerEvent::DoubleClick => self.on_double_click(cx),
            PointerEvent::DragStart => self.on_pointer_drag_start(cx),
            PointerEvent::Drag => self.on_pointer_drag(cx),
            PointerEvent::DragEnd => self.on_pointer_drag_end(cx),
        }
    }
}

/// Behaviour used for nodes that have none of their own.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultBehavior;

impl Behavior for DefaultBehavior {}

/// One node in the scene graph.
#[derive(Debug)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,

    pub visible: bool,
    /// Primary draw-order key; higher layers draw on top.
    pub layer: i32,
    /// Depth below the root, maintained by the scene.
    pub(crate) level: u32,

    pub position: Vector2,
    pub scale: Vector2,
    /// Radians.
    pub rotation: f64,
    /// Local pivot for rotation and scale.
    pub origin: Vector2,
    pub opacity: f64,
    pub global_opacity: f64,

    pub matrix: Matrix2,
    pub global_matrix: Matrix2,
    pub inverse_global_matrix: Matrix2,
    pub matrix_auto_update: bool,
    pub matrix_needs_update: bool,

    /// Local-space bounds, refreshed from the shape every frame.
    pub bounding_box: Box2,
    /// Nodes whose shapes clip this node when drawn.
    pub masks: Vec<NodeId>,

    pub draggable: bool,
    pub selectable: bool,
    pub focusable: bool,
    pub pointer_events: bool,
    /// Draw in screen space and never cull.
    pub ignore_viewport: bool,
    pub cursor: Option<String>,

    pub shape: Shape,
    pub behavior: Option<Box<dyn Behavior>>,

    pub(crate) pointer_inside: bool,
    pub(crate) being_dragged: bool,
    pub(crate) drag_origin: Option<Vector2>,
}

impl Default for Node {
    fn default() -> Self {
        Self::new(Shape::Empty)
    }
}

impl Node {
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        let bounding_box = shape.compute_bounding_box();
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            parent: None,
            children: Vec::new(),
            visible: true,
            layer: 0,
            level: 0,
            position: Vector2::zero(),
            scale: Vector2::one(),
            rotation: 0.0,
            origin: Vector2::zero(),
            opacity: 1.0,
            global_opacity: 1.0,
            matrix: Matrix2::identity(),
            global_matrix: Matrix2::identity(),
            inverse_global_matrix: Matrix2::identity(),
            matrix_auto_update: true,
            matrix_needs_update: true,
            bounding_box,
            masks: Vec::new(),
            draggable: false,
            selectable: false,
            focusable: false,
            pointer_events: true,
            ignore_viewport: false,
            cursor: None,
            shape,
            behavior: None,
            pointer_inside: false,
            being_dragged: false,
            drag_origin: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.set_position(x, y);
        self
    }

    #[must_use]
    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position.set(x, y);
        self.matrix_needs_update = true;
    }

    pub fn set_scale(&mut self, x: f64, y: f64) {
        self.scale.set(x, y);
        self.matrix_needs_update = true;
    }

    pub fn set_rotation(&mut self, radians: f64) {
        self.rotation = radians;
        self.matrix_needs_update = true;
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Whether the pointer was over this node at the last dispatch.
    #[must_use]
    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    #[must_use]
    pub fn being_dragged(&self) -> bool {
        self.being_dragged
    }

    /// Rebuild the local matrix from position, scale, origin and rotation.
    pub fn compose_matrix(&mut self) {
        self.matrix.compose(
            self.position.x,
            self.position.y,
            self.scale.x,
            self.scale.y,
            self.origin.x,
            self.origin.y,
            self.rotation,
        );
    }

    /// Local-space hit test against the shape.
    #[must_use]
    pub fn is_inside(&self, local: Vector2) -> bool {
        self.shape.is_inside(local)
    }

    /// Map a world point into this node's local space.
    #[must_use]
    pub fn world_to_local(&self, world: Vector2) -> Vector2 {
        self.inverse_global_matrix.transform_point(world)
    }

    #[must_use]
    pub fn local_to_world(&self, local: Vector2) -> Vector2 {
        self.global_matrix.transform_point(local)
    }
}

//! Resize / rotate gizmo for a single node.
//!
//! [`ResizeTool::attach`] builds an overlay subtree under the scene root, one
//! layer above its target:
//!
//! ```text
//! tool root (Empty, lays out the handles every frame)
//!   ├─ 4 corner boxes      resize both axes
//!   ├─ 4 edge lines        resize one axis
//!   ├─ connector line      decoration only
//!   └─ rotate circle       rotate about the box centre
//! ```
//!
//! Handles live in world space and keep a constant size on screen by scaling
//! with `1 / camera.scale`. Drag math works in the target's local frame scaled
//! by its `scale`, so it stays correct under camera rotation, object rotation
//! and mirrored (negative) scale.

#[cfg(test)]
#[path = "resize_tool_test.rs"]
mod resize_tool_test;

use tracing::{debug, warn};

use crate::camera::Camera2D;
use crate::consts::{
    EDGE_HANDLE_WIDTH_PX, HANDLE_HALF_SIZE_PX, LINE_HIT_SLOP, RESIZE_CURSORS, ROTATE_HANDLE_OFFSET_PX,
    ROTATE_HANDLE_RADIUS_PX,
};
use crate::node::{Behavior, Node, NodeId, PointerContext};
use crate::pointer::Pointer;
use crate::scene::Scene;
use crate::shape::{BoxShape, CircleShape, LineShape, Shape};
use crate::style::Style;
use crate::vector2::Vector2;

const HANDLE_COLOR: &str = "#00AAFF";

/// One interactive (or decorative) part of the gizmo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    Rotate,
    Connector,
}

impl Handle {
    /// Build order. Corners come first so they win picking where they
    /// overlap an edge.
    pub const ALL: [Handle; 10] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomRight,
        Handle::BottomLeft,
        Handle::Top,
        Handle::Right,
        Handle::Bottom,
        Handle::Left,
        Handle::Rotate,
        Handle::Connector,
    ];

    /// Which side of the box a resize handle sits on, per axis, in `{-1, 0, 1}`
    /// (y grows downwards). `None` for the rotate parts.
    #[must_use]
    pub fn alignment(self) -> Option<Vector2> {
        let (x, y) = match self {
            Handle::TopLeft => (-1.0, -1.0),
            Handle::Top => (0.0, -1.0),
            Handle::TopRight => (1.0, -1.0),
            Handle::Right => (1.0, 0.0),
            Handle::BottomRight => (1.0, 1.0),
            Handle::Bottom => (0.0, 1.0),
            Handle::BottomLeft => (-1.0, 1.0),
            Handle::Left => (-1.0, 0.0),
            Handle::Rotate | Handle::Connector => return None,
        };
        Some(Vector2::new(x, y))
    }

    #[must_use]
    pub fn is_corner(self) -> bool {
        self.alignment().is_some_and(|a| a.x != 0.0 && a.y != 0.0)
    }

    #[must_use]
    pub fn is_edge(self) -> bool {
        self.alignment().is_some_and(|a| a.x == 0.0 || a.y == 0.0)
    }

    /// Screen angle of the handle on an unrotated, unmirrored target, in
    /// degrees clockwise from pointing right.
    fn baseline_degrees(self) -> Option<f64> {
        self.alignment().map(|a| a.y.atan2(a.x).to_degrees().rem_euclid(360.0))
    }

    fn build(self) -> Node {
        let stroke = Style::color(HANDLE_COLOR);
        let shape = if self.is_corner() {
            let mut shape = BoxShape::new(HANDLE_HALF_SIZE_PX * 2.0, HANDLE_HALF_SIZE_PX * 2.0);
            shape.style.stroke = Some(stroke);
            Shape::Box(shape)
        } else if self == Handle::Rotate {
            let mut shape = CircleShape::new(ROTATE_HANDLE_RADIUS_PX);
            shape.style.stroke = Some(stroke);
            Shape::Circle(shape)
        } else {
            let mut shape = LineShape::new(Vector2::zero(), Vector2::zero());
            shape.stroke = stroke;
            Shape::Line(shape)
        };

        let mut node = Node::new(shape).named(format!("resize_tool:{self:?}"));
        node.selectable = false;
        match self {
            Handle::Connector => node.pointer_events = false,
            Handle::Rotate => {
                node.draggable = true;
                node.cursor = Some("grab".to_owned());
            }
            _ => node.draggable = true,
        }
        node
    }
}

/// Map a screen bucket angle to its resize cursor.
fn cursor_for_angle(degrees: f64) -> &'static str {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bucket = ((degrees.rem_euclid(360.0) / 45.0).round() as usize) % RESIZE_CURSORS.len();
    RESIZE_CURSORS[bucket]
}

/// An attached gizmo. Dropping it leaves the overlay in the scene; call
/// [`ResizeTool::detach`] to remove it.
#[derive(Debug, Clone)]
pub struct ResizeTool {
    root: NodeId,
    target: NodeId,
    handles: Vec<(Handle, NodeId)>,
}

impl ResizeTool {
    /// Build the overlay for `target`. Returns `None` when the target is
    /// unknown or has no extent to manipulate.
    pub fn attach(scene: &mut Scene, target: NodeId) -> Option<Self> {
        let Some(node) = scene.get(target) else {
            warn!(%target, "resize tool target not in scene");
            return None;
        };
        if node.bounding_box.is_empty() {
            warn!(%target, "resize tool target has no bounding box");
            return None;
        }
        let layer = node.layer + 1;

        let mut handles = Vec::with_capacity(Handle::ALL.len());
        let mut root_node = Node::new(Shape::Empty).named("resize_tool");
        root_node.layer = layer;
        root_node.selectable = false;
        let root = scene.insert(root_node);

        for handle in Handle::ALL {
            let mut node = handle.build();
            node.layer = layer;
            node.behavior = Some(Box::new(HandleDrag { target, handle }));
            let id = scene.insert(node);
            scene.add(root, id);
            handles.push((handle, id));
        }

        if let Some(node) = scene.get_mut(root) {
            node.behavior = Some(Box::new(HandleLayout { target, handles: handles.clone() }));
        }
        scene.add(scene.root(), root);
        debug!(%target, %root, "resize tool attached");
        Some(Self { root, target, handles })
    }

    /// Remove the overlay from the scene. Returns the number of nodes dropped.
    pub fn detach(self, scene: &mut Scene) -> usize {
        let dropped = scene.destroy(self.root);
        debug!(target = %self.target, dropped, "resize tool detached");
        dropped
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Node id of one handle.
    #[must_use]
    pub fn handle(&self, handle: Handle) -> Option<NodeId> {
        self.handles.iter().find(|(h, _)| *h == handle).map(|(_, id)| *id)
    }
}

/// Tool-root behaviour: keeps every handle glued to the target.
#[derive(Debug)]
struct HandleLayout {
    target: NodeId,
    handles: Vec<(Handle, NodeId)>,
}

impl Behavior for HandleLayout {
    fn on_update(&mut self, scene: &mut Scene, id: NodeId, camera: &Camera2D) {
        let Some(target) = scene.get(self.target) else {
            if let Some(root) = scene.get_mut(id) {
                root.visible = false;
            }
            return;
        };
        let bbox = target.bounding_box;
        if bbox.is_empty() {
            return;
        }
        let global = target.global_matrix;
        let rotation = global.get_rotation();
        let px = 1.0 / camera.scale();

        // Local point on the box for an alignment in {-1, 0, 1}².
        let center = bbox.get_center();
        let half = *bbox.get_size().multiply_scalar(0.5);
        let anchor = |a: Vector2| {
            global.transform_point(Vector2::new(center.x + a.x * half.x, center.y + a.y * half.y))
        };

        let top_mid = anchor(Vector2::new(0.0, -1.0));
        let mut up = global.transform_vector(Vector2::new(0.0, -1.0));
        if up.length_squared() <= f64::EPSILON {
            up.set(0.0, -1.0);
        }
        up.set_length(ROTATE_HANDLE_OFFSET_PX * px);
        let mut rotate_at = top_mid;
        rotate_at.add(up);

        for &(handle, handle_id) in &self.handles {
            let Some(node) = scene.get_mut(handle_id) else {
                continue;
            };
            node.matrix_needs_update = true;
            match handle {
                Handle::Rotate => {
                    node.position = rotate_at;
                    node.rotation = rotation;
                    node.scale.set(px, px);
                }
                Handle::Connector => {
                    if let Shape::Line(line) = &mut node.shape {
                        line.from = top_mid;
                        line.to = rotate_at;
                        line.width = px;
                        line.hit_slop = LINE_HIT_SLOP * px;
                    }
                }
                _ if handle.is_corner() => {
                    if let Some(a) = handle.alignment() {
                        node.position = anchor(a);
                    }
                    node.rotation = rotation;
                    node.scale.set(px, px);
                }
                _ => {
                    // Edge: span the two corners on that side.
                    if let Some(a) = handle.alignment()
                        && let Shape::Line(line) = &mut node.shape
                    {
                        let (from, to) = if a.x == 0.0 {
                            (Vector2::new(-1.0, a.y), Vector2::new(1.0, a.y))
                        } else {
                            (Vector2::new(a.x, -1.0), Vector2::new(a.x, 1.0))
                        };
                        line.from = anchor(from);
                        line.to = anchor(to);
                        line.width = EDGE_HANDLE_WIDTH_PX * px;
                        line.hit_slop = LINE_HIT_SLOP * px;
                    }
                }
            }
        }
    }
}

/// Handle behaviour: turns drags into scale / position / rotation changes on
/// the target.
#[derive(Debug)]
struct HandleDrag {
    target: NodeId,
    handle: Handle,
}

impl HandleDrag {
    /// Pointer at `screen` in the target's local frame, multiplied by its scale.
    fn to_scaled_local(scene: &Scene, target: NodeId, camera: &Camera2D, screen: Vector2) -> Option<Vector2> {
        let node = scene.get(target)?;
        let mut p = node.world_to_local(camera.screen_to_world(screen));
        p.multiply(node.scale);
        Some(p)
    }

    fn resize(&self, scene: &mut Scene, pointer: &Pointer, camera: &Camera2D, alignment: Vector2) {
        let (Some(now), Some(before)) = (
            Self::to_scaled_local(scene, self.target, camera, pointer.position),
            Self::to_scaled_local(scene, self.target, camera, pointer.previous_position()),
        ) else {
            return;
        };
        let Some(node) = scene.get_mut(self.target) else {
            return;
        };
        let mut delta = now;
        delta.sub(before);
        delta.multiply(Vector2::new(alignment.x.abs(), alignment.y.abs()));

        let size = node.bounding_box.get_size();
        if size.x > 0.0 {
            node.scale.x += alignment.x * delta.x / size.x;
        }
        if size.y > 0.0 {
            node.scale.y += alignment.y * delta.y / size.y;
        }

        // The opposite side is the anchor, so the centre moves half as far.
        delta.multiply_scalar(0.5);
        delta.rotate_around(Vector2::zero(), node.rotation);
        node.position.add(delta);
        node.matrix_needs_update = true;
    }

    fn rotate(&self, scene: &mut Scene, pointer: &Pointer, camera: &Camera2D) {
        let Some(node) = scene.get(self.target) else {
            return;
        };
        let mut center = node.bounding_box.get_center();
        center.multiply(node.scale);

        let (Some(mut now), Some(mut before)) = (
            Self::to_scaled_local(scene, self.target, camera, pointer.position),
            Self::to_scaled_local(scene, self.target, camera, pointer.previous_position()),
        ) else {
            return;
        };
        now.sub(center);
        before.sub(center);
        if now.length_squared() <= f64::EPSILON || before.length_squared() <= f64::EPSILON {
            return;
        }
        let angle = before.cross(now).atan2(before.dot(now));
        if let Some(node) = scene.get_mut(self.target) {
            node.rotation += angle;
            node.matrix_needs_update = true;
        }
    }
}

impl Behavior for HandleDrag {
    fn cursor(&self, scene: &Scene, _id: NodeId, camera: &Camera2D) -> Option<String> {
        let baseline = self.handle.baseline_degrees()?;
        let target = scene.get(self.target)?;
        let mirrored = (target.scale.x < 0.0) != (target.scale.y < 0.0);
        let baseline = if mirrored { -baseline } else { baseline };
        let degrees = target.global_matrix.get_rotation().to_degrees() + baseline + camera.rotation().to_degrees();
        Some(cursor_for_angle(degrees).to_owned())
    }

    fn on_pointer_drag(&mut self, cx: &mut PointerContext<'_>) {
        match self.handle.alignment() {
            Some(alignment) => self.resize(cx.scene, cx.pointer, cx.camera, alignment),
            None if self.handle == Handle::Rotate => self.rotate(cx.scene, cx.pointer, cx.camera),
            None => {}
        }
    }
}

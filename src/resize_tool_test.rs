#![allow(clippy::float_cmp)]

use std::f64::consts::FRAC_PI_2;

use super::*;
use crate::context::RecordingContext;
use crate::input::Button;
use crate::node::PointerEvent;
use crate::renderer::Renderer;

// =============================================================
// Helpers
// =============================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn camera() -> Camera2D {
    let mut camera = Camera2D::new();
    camera.update_matrix(0.0, 0.0);
    camera
}

fn scene_with_target(x: f64, y: f64) -> (Scene, NodeId) {
    let mut scene = Scene::new();
    let target = scene.spawn(scene.root(), Node::new(Shape::Box(BoxShape::new(100.0, 100.0))).at(x, y));
    scene.update_matrices(scene.root(), false);
    (scene, target)
}

/// Pointer that moved from `from` to `to` during the last frame.
fn pointer_moved(from: Vector2, to: Vector2) -> Pointer {
    let mut pointer = Pointer::default();
    pointer.on_pointer_enter();
    pointer.on_pointer_move(from.x, from.y, 0.0, 0.0);
    pointer.update();
    pointer.on_pointer_move(to.x, to.y, to.x - from.x, to.y - from.y);
    pointer.update();
    pointer
}

fn drag(scene: &mut Scene, handle: NodeId, from: Vector2, to: Vector2) {
    let pointer = pointer_moved(from, to);
    scene.dispatch(handle, PointerEvent::Drag, &pointer, &camera());
    scene.update_matrices(scene.root(), false);
}

fn layout(scene: &mut Scene, tool: &ResizeTool, camera: &Camera2D) {
    scene.update_behavior(tool.root(), camera);
    scene.update_matrices(scene.root(), false);
}

// =============================================================
// Attach / detach
// =============================================================

#[test]
fn attach_builds_overlay_one_layer_up() {
    let (mut scene, target) = scene_with_target(100.0, 100.0);
    scene.get_mut(target).unwrap().layer = 3;
    let before = scene.len();
    let tool = ResizeTool::attach(&mut scene, target).unwrap();

    assert_eq!(scene.len(), before + 1 + Handle::ALL.len());
    let root = scene.get(tool.root()).unwrap();
    assert_eq!(root.parent(), Some(scene.root()));
    assert_eq!(root.layer, 4);
    for handle in Handle::ALL {
        let node = scene.get(tool.handle(handle).unwrap()).unwrap();
        assert_eq!(node.layer, 4);
        assert!(!node.selectable);
        assert_eq!(node.parent(), Some(tool.root()));
    }
    assert!(!scene.get(tool.handle(Handle::Connector).unwrap()).unwrap().pointer_events);
    assert!(scene.get(tool.handle(Handle::BottomRight).unwrap()).unwrap().draggable);
}

#[test]
fn attach_to_empty_target_warns_and_returns_none() {
    init_tracing();
    let mut scene = Scene::new();
    let empty = scene.spawn(scene.root(), Node::new(Shape::Empty));
    let before = scene.len();
    assert!(ResizeTool::attach(&mut scene, empty).is_none());
    assert_eq!(scene.len(), before);
}

#[test]
fn attach_to_unknown_target_returns_none() {
    init_tracing();
    let mut scene = Scene::new();
    assert!(ResizeTool::attach(&mut scene, uuid::Uuid::new_v4()).is_none());
}

#[test]
fn detach_removes_overlay() {
    let (mut scene, target) = scene_with_target(0.0, 0.0);
    let before = scene.len();
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    assert_eq!(tool.detach(&mut scene), 1 + Handle::ALL.len());
    assert_eq!(scene.len(), before);
    assert!(scene.contains(target));
}

#[test]
fn handle_classification() {
    assert!(Handle::TopLeft.is_corner());
    assert!(!Handle::TopLeft.is_edge());
    assert!(Handle::Left.is_edge());
    assert!(!Handle::Rotate.is_corner());
    assert!(!Handle::Rotate.is_edge());
    assert_eq!(Handle::Bottom.alignment(), Some(Vector2::new(0.0, 1.0)));
}

// =============================================================
// Layout
// =============================================================

#[test]
fn handles_follow_target_at_constant_screen_size() {
    let (mut scene, target) = scene_with_target(100.0, 100.0);
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    let mut camera = Camera2D::new();
    camera.set_scale(2.0);
    camera.update_matrix(0.0, 0.0);
    layout(&mut scene, &tool, &camera);

    let br = scene.get(tool.handle(Handle::BottomRight).unwrap()).unwrap();
    assert!(br.position.approx_eq(Vector2::new(150.0, 150.0), 1e-9));
    assert_eq!(br.scale, Vector2::new(0.5, 0.5));

    let rotate = scene.get(tool.handle(Handle::Rotate).unwrap()).unwrap();
    assert!(rotate.position.approx_eq(Vector2::new(100.0, 50.0 - ROTATE_HANDLE_OFFSET_PX * 0.5), 1e-9));

    let top = scene.get(tool.handle(Handle::Top).unwrap()).unwrap();
    let Shape::Line(line) = &top.shape else { panic!("edge handle is a line") };
    assert!(line.from.approx_eq(Vector2::new(50.0, 50.0), 1e-9));
    assert!(line.to.approx_eq(Vector2::new(150.0, 50.0), 1e-9));
    assert_eq!(line.width, EDGE_HANDLE_WIDTH_PX * 0.5);
}

#[test]
fn handles_follow_rotated_target() {
    let (mut scene, target) = scene_with_target(100.0, 100.0);
    scene.get_mut(target).unwrap().set_rotation(FRAC_PI_2);
    scene.update_matrices(scene.root(), false);
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    layout(&mut scene, &tool, &camera());

    let br = scene.get(tool.handle(Handle::BottomRight).unwrap()).unwrap();
    assert!(br.position.approx_eq(Vector2::new(50.0, 150.0), 1e-9));
    assert!((br.rotation - FRAC_PI_2).abs() < 1e-9);
}

#[test]
fn overlay_hides_when_target_destroyed() {
    let (mut scene, target) = scene_with_target(0.0, 0.0);
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    scene.destroy(target);
    layout(&mut scene, &tool, &camera());
    assert!(!scene.get(tool.root()).unwrap().visible);
}

// =============================================================
// Resize
// =============================================================

#[test]
fn bottom_right_drag_grows_scale_and_shifts_centre() {
    let (mut scene, target) = scene_with_target(100.0, 100.0);
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    let br = tool.handle(Handle::BottomRight).unwrap();

    drag(&mut scene, br, Vector2::new(150.0, 150.0), Vector2::new(170.0, 170.0));

    let node = scene.get(target).unwrap();
    assert!(node.scale.approx_eq(Vector2::new(1.2, 1.2), 1e-9));
    assert!(node.position.approx_eq(Vector2::new(110.0, 110.0), 1e-9));
    // Top-left corner stays put.
    assert!(node.local_to_world(Vector2::new(-50.0, -50.0)).approx_eq(Vector2::new(50.0, 50.0), 1e-9));
}

#[test]
fn left_edge_drag_only_changes_x() {
    let (mut scene, target) = scene_with_target(100.0, 100.0);
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    let left = tool.handle(Handle::Left).unwrap();

    drag(&mut scene, left, Vector2::new(50.0, 100.0), Vector2::new(30.0, 130.0));

    let node = scene.get(target).unwrap();
    assert!(node.scale.approx_eq(Vector2::new(1.2, 1.0), 1e-9));
    assert!(node.position.approx_eq(Vector2::new(90.0, 100.0), 1e-9));
}

#[test]
fn edge_drag_on_rotated_target_uses_local_axes() {
    let (mut scene, target) = scene_with_target(100.0, 100.0);
    scene.get_mut(target).unwrap().set_rotation(FRAC_PI_2);
    scene.update_matrices(scene.root(), false);
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    let right = tool.handle(Handle::Right).unwrap();

    // Local +x points down the screen after a quarter turn.
    drag(&mut scene, right, Vector2::new(100.0, 150.0), Vector2::new(100.0, 170.0));

    let node = scene.get(target).unwrap();
    assert!(node.scale.approx_eq(Vector2::new(1.2, 1.0), 1e-9));
    assert!(node.position.approx_eq(Vector2::new(100.0, 110.0), 1e-9));
}

#[test]
fn drag_on_mirrored_target_grows_magnitude() {
    let (mut scene, target) = scene_with_target(100.0, 100.0);
    scene.get_mut(target).unwrap().set_scale(-1.0, 1.0);
    scene.update_matrices(scene.root(), false);
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    let right = tool.handle(Handle::Right).unwrap();

    // Local right edge is drawn on the screen's left.
    drag(&mut scene, right, Vector2::new(50.0, 100.0), Vector2::new(30.0, 100.0));

    let node = scene.get(target).unwrap();
    assert!(node.scale.approx_eq(Vector2::new(-1.2, 1.0), 1e-9));
    assert!(node.position.approx_eq(Vector2::new(90.0, 100.0), 1e-9));
}

#[test]
fn resize_through_zoomed_camera_tracks_pointer() {
    let (mut scene, target) = scene_with_target(100.0, 100.0);
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    let br = tool.handle(Handle::BottomRight).unwrap();

    let mut camera = Camera2D::new();
    camera.set_scale(2.0);
    camera.update_matrix(0.0, 0.0);
    let pointer = pointer_moved(Vector2::new(300.0, 300.0), Vector2::new(340.0, 340.0));
    scene.dispatch(br, PointerEvent::Drag, &pointer, &camera);

    let node = scene.get(target).unwrap();
    assert!(node.scale.approx_eq(Vector2::new(1.2, 1.2), 1e-9));
}

// =============================================================
// Rotate
// =============================================================

#[test]
fn rotate_handle_adds_signed_angle() {
    let (mut scene, target) = scene_with_target(0.0, 0.0);
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    let rotate = tool.handle(Handle::Rotate).unwrap();

    drag(&mut scene, rotate, Vector2::new(100.0, 0.0), Vector2::new(0.0, 100.0));
    assert!((scene.get(target).unwrap().rotation - FRAC_PI_2).abs() < 1e-9);

    drag(&mut scene, rotate, Vector2::new(0.0, 100.0), Vector2::new(100.0, 100.0));
    assert!((scene.get(target).unwrap().rotation - FRAC_PI_2 / 2.0).abs() < 1e-9);
}

#[test]
fn rotate_ignores_pointer_at_centre() {
    let (mut scene, target) = scene_with_target(0.0, 0.0);
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    let rotate = tool.handle(Handle::Rotate).unwrap();

    drag(&mut scene, rotate, Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0));
    assert_eq!(scene.get(target).unwrap().rotation, 0.0);
}

// =============================================================
// Cursors
// =============================================================

#[test]
fn cursor_bucket_table() {
    assert_eq!(cursor_for_angle(0.0), "ew-resize");
    assert_eq!(cursor_for_angle(44.0), "nwse-resize");
    assert_eq!(cursor_for_angle(-45.0), "nesw-resize");
    assert_eq!(cursor_for_angle(359.0), "ew-resize");
    assert_eq!(cursor_for_angle(630.0), "ns-resize");
}

#[test]
fn corner_cursor_tracks_rotation_mirroring_and_camera() {
    let (mut scene, target) = scene_with_target(0.0, 0.0);
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    let br = tool.handle(Handle::BottomRight).unwrap();
    let right = tool.handle(Handle::Right).unwrap();
    let mut camera = camera();

    assert_eq!(scene.cursor_for(br, &camera).as_deref(), Some("nwse-resize"));
    assert_eq!(scene.cursor_for(right, &camera).as_deref(), Some("ew-resize"));

    scene.get_mut(target).unwrap().set_rotation(FRAC_PI_2 / 2.0);
    scene.update_matrices(scene.root(), false);
    assert_eq!(scene.cursor_for(br, &camera).as_deref(), Some("ns-resize"));

    scene.get_mut(target).unwrap().set_rotation(0.0);
    scene.get_mut(target).unwrap().set_scale(-1.0, 1.0);
    scene.update_matrices(scene.root(), false);
    assert_eq!(scene.cursor_for(br, &camera).as_deref(), Some("nesw-resize"));

    scene.get_mut(target).unwrap().set_scale(1.0, 1.0);
    scene.update_matrices(scene.root(), false);
    camera.set_rotation(FRAC_PI_2);
    camera.update_matrix(0.0, 0.0);
    assert_eq!(scene.cursor_for(right, &camera).as_deref(), Some("ns-resize"));
}

#[test]
fn rotate_handle_uses_grab_cursor() {
    let (mut scene, target) = scene_with_target(0.0, 0.0);
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    let rotate = tool.handle(Handle::Rotate).unwrap();
    assert_eq!(scene.cursor_for(rotate, &camera()).as_deref(), Some("grab"));
}

// =============================================================
// Through the renderer
// =============================================================

#[test]
fn renderer_drag_on_corner_resizes_target() {
    let (mut scene, target) = scene_with_target(200.0, 200.0);
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    let mut renderer = Renderer::default();
    renderer.set_viewport(400.0, 400.0);
    let mut ctx = RecordingContext::new();
    let mut camera = Camera2D::new();
    let mut pointer = Pointer::default();
    pointer.on_pointer_enter();

    let mut frame = |scene: &mut Scene, pointer: &mut Pointer| {
        pointer.update();
        ctx.clear();
        renderer.render(&mut ctx, scene, &mut camera, pointer).unwrap();
    };

    pointer.on_pointer_move(250.0, 250.0, 0.0, 0.0);
    frame(&mut scene, &mut pointer);
    pointer.on_pointer_down(Button::Left);
    frame(&mut scene, &mut pointer);
    assert!(scene.get(tool.handle(Handle::BottomRight).unwrap()).unwrap().being_dragged());
    assert!(!scene.get(target).unwrap().being_dragged());

    pointer.on_pointer_move(270.0, 270.0, 20.0, 20.0);
    frame(&mut scene, &mut pointer);

    let node = scene.get(target).unwrap();
    assert!(node.scale.approx_eq(Vector2::new(1.2, 1.2), 1e-9));
    assert!(node.position.approx_eq(Vector2::new(210.0, 210.0), 1e-9));
}

/// Press at `at` under a 50× zoom centred on a draggable 100×100 target;
/// returns the scene, the tool and the renderer after the press frame.
fn press_zoomed(at: Vector2) -> (Scene, NodeId, ResizeTool, Renderer) {
    let (mut scene, target) = scene_with_target(0.0, 0.0);
    scene.get_mut(target).unwrap().draggable = true;
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    let mut renderer = Renderer::default();
    renderer.set_viewport(6000.0, 6000.0);
    let mut ctx = RecordingContext::new();
    let mut camera = Camera2D::new();
    camera.set_scale(50.0);
    camera.set_position(Vector2::new(3000.0, 3000.0));
    let mut pointer = Pointer::default();
    pointer.on_pointer_enter();

    pointer.on_pointer_move(at.x, at.y, 0.0, 0.0);
    pointer.update();
    renderer.render(&mut ctx, &mut scene, &mut camera, &pointer).unwrap();
    pointer.on_pointer_down(Button::Left);
    pointer.update();
    renderer.render(&mut ctx, &mut scene, &mut camera, &pointer).unwrap();
    (scene, target, tool, renderer)
}

#[test]
fn zoomed_in_press_inside_target_skips_edge_handle() {
    // Right edge sits at screen x = 5500; this is 100 screen px inside it.
    let (scene, target, tool, renderer) = press_zoomed(Vector2::new(5400.0, 3000.0));
    assert_eq!(renderer.dragging(), Some(target));
    assert!(!scene.get(tool.handle(Handle::Right).unwrap()).unwrap().being_dragged());
    assert_ne!(renderer.cursor(), "ew-resize");
}

#[test]
fn zoomed_in_press_on_edge_grabs_edge_handle() {
    let (_scene, _target, tool, renderer) = press_zoomed(Vector2::new(5501.0, 3000.0));
    assert_eq!(renderer.dragging(), tool.handle(Handle::Right));
}

#[test]
fn edge_hit_slop_tracks_camera_scale() {
    let (mut scene, target) = scene_with_target(0.0, 0.0);
    let tool = ResizeTool::attach(&mut scene, target).unwrap();
    let mut camera = camera();
    camera.set_scale(4.0);
    camera.update_matrix(0.0, 0.0);
    layout(&mut scene, &tool, &camera);

    let Shape::Line(line) = &scene.get(tool.handle(Handle::Top).unwrap()).unwrap().shape else {
        panic!("edge handle is a line");
    };
    assert_eq!(line.hit_slop, LINE_HIT_SLOP / 4.0);
}

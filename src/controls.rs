//! Mouse-driven camera controls.
//!
//! - Wheel zooms around the cursor: the world point under the pointer stays
//!   under the pointer.
//! - The rotate button (middle by default) rotates the view around the
//!   viewport centre. The angle is recomputed each frame from where the drag
//!   started, so it never drifts.
//! - The drag button (right by default) pans.
//! - Left double-click focuses the first focusable node under the pointer, or
//!   the whole scene when there is none, with a linear tween.
//!
//! The focus tween is polled from the caller's clock at the start of every
//! [`CameraControls::update`]. It does not yield to user input: both write the
//! camera and the last write in a tick wins.

#[cfg(test)]
#[path = "controls_test.rs"]
mod controls_test;

use tracing::debug;

use crate::box2::Box2;
use crate::camera::Camera2D;
use crate::config::ControlsConfig;
use crate::consts::{FOCUS_OBJECT_COVERAGE, FOCUS_SCENE_COVERAGE};
use crate::input::Button;
use crate::node::NodeId;
use crate::pointer::Pointer;
use crate::scene::Scene;
use crate::vector2::Vector2;
use crate::viewport::Viewport;

/// In-flight focus animation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FocusTween {
    start_ms: f64,
    duration_ms: f64,
    from_position: Vector2,
    to_position: Vector2,
    from_scale: f64,
    to_scale: f64,
}

/// Pan / zoom / rotate / focus controller for a [`Camera2D`].
#[derive(Debug, Clone, Default)]
pub struct CameraControls {
    config: ControlsConfig,
    rotation_point: Option<Vector2>,
    rotation_initial: f64,
    focus: Option<FocusTween>,
}

impl CameraControls {
    #[must_use]
    pub fn new(config: ControlsConfig) -> Self {
        Self { config, ..Self::default() }
    }

    #[must_use]
    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    /// Whether a focus tween is running.
    #[must_use]
    pub fn is_focusing(&self) -> bool {
        self.focus.is_some()
    }

    /// Apply this frame's pointer input to the camera.
    pub fn update(&mut self, scene: &Scene, camera: &mut Camera2D, pointer: &Pointer, viewport: Viewport, now_ms: f64) {
        self.poll_focus(camera, now_ms);

        if self.config.focus_on_double_click && pointer.button_double_clicked(Button::Left) {
            refresh(camera, viewport);
            let world = camera.screen_to_world(pointer.position);
            let target = scene
                .world_point_intersections(scene.root(), world)
                .into_iter()
                .find(|id| scene.get(*id).is_some_and(|n| n.focusable));
            match target {
                Some(id) => self.focus_node(scene, id, camera, viewport, now_ms),
                None => self.focus_scene(scene, camera, viewport, now_ms),
            };
        }

        if self.config.allow_scale && pointer.wheel != 0.0 {
            self.zoom(camera, pointer.position, pointer.wheel, viewport);
        }

        if self.config.allow_rotation
            && let Some(button) = Button::from_dom(self.config.rotate_button)
        {
            self.rotate(camera, pointer, button);
        }

        if self.config.allow_drag
            && let Some(button) = Button::from_dom(self.config.drag_button)
            && pointer.button_pressed(button)
        {
            self.pan(camera, pointer, viewport);
        }
    }

    /// Zoom by `wheel` units keeping the world point under `screen` fixed.
    pub fn zoom(&self, camera: &mut Camera2D, screen: Vector2, wheel: f64, viewport: Viewport) {
        refresh(camera, viewport);
        let world = camera.screen_to_world(screen);
        let scale = camera.scale();
        let requested = scale - wheel * self.config.zoom_sensitivity * scale;
        let next = requested.clamp(self.config.min_scale, self.config.max_scale);
        let factor = scale - next;

        let mut offset = world;
        offset.multiply_scalar(factor);
        let mut position = camera.position();
        position.add(offset);
        camera.set_scale(next);
        camera.set_position(position);
        refresh(camera, viewport);
    }

    /// Absolute pivot rotation while `button` is held.
    fn rotate(&mut self, camera: &mut Camera2D, pointer: &Pointer, button: Button) {
        if pointer.button_just_pressed(button) {
            self.rotation_point = Some(pointer.position);
            self.rotation_initial = camera.rotation();
        }
        if pointer.button_pressed(button)
            && let Some(start) = self.rotation_point
        {
            let dx = pointer.position.x - start.x;
            camera.set_rotation(self.rotation_initial + dx * self.config.rotation_sensitivity);
        }
        if pointer.button_just_released(button) {
            self.rotation_point = None;
        }
    }

    /// Move the camera so content follows the pointer's last movement.
    pub fn pan(&self, camera: &mut Camera2D, pointer: &Pointer, viewport: Viewport) {
        if pointer.delta.x == 0.0 && pointer.delta.y == 0.0 {
            return;
        }
        refresh(camera, viewport);
        let mut delta = camera.screen_to_world(pointer.position);
        delta.sub(camera.screen_to_world(pointer.previous_position()));
        delta.multiply_scalar(camera.scale());

        let mut position = camera.position();
        position.add(delta);
        camera.set_position(position);
    }

    /// Start a tween framing `id` at object coverage. Returns false when the
    /// node has no extent.
    pub fn focus_node(&mut self, scene: &Scene, id: NodeId, camera: &Camera2D, viewport: Viewport, now_ms: f64) -> bool {
        self.focus_box(scene.world_bounding_box(id), FOCUS_OBJECT_COVERAGE, camera, viewport, now_ms)
    }

    /// Start a tween framing every visible node at scene coverage. Returns
    /// false when nothing in the scene has extent.
    pub fn focus_scene(&mut self, scene: &Scene, camera: &Camera2D, viewport: Viewport, now_ms: f64) -> bool {
        let mut bounds = Box2::empty();
        for id in scene.visible_nodes(scene.root()) {
            if scene.get(id).is_some_and(|n| n.ignore_viewport) {
                continue;
            }
            let b = scene.world_bounding_box(id);
            if !b.is_empty() {
                bounds.union(&b);
            }
        }
        self.focus_box(bounds, FOCUS_SCENE_COVERAGE, camera, viewport, now_ms)
    }

    fn focus_box(&mut self, bounds: Box2, coverage: f64, camera: &Camera2D, viewport: Viewport, now_ms: f64) -> bool {
        if bounds.is_empty() {
            return false;
        }
        let size = bounds.get_size();
        let fit = (viewport.width / size.x).min(viewport.height / size.y);
        let to_scale = (coverage * fit).clamp(self.config.min_scale, self.config.max_scale);

        // Centre the box: position + scale * centre lands on the pivot.
        let mut to_position = viewport.center();
        to_position.sub(*bounds.get_center().multiply_scalar(to_scale));

        self.focus = Some(FocusTween {
            start_ms: now_ms,
            duration_ms: self.config.focus_duration_ms,
            from_position: camera.position(),
            to_position,
            from_scale: camera.scale(),
            to_scale,
        });
        debug!(to_scale, x = to_position.x, y = to_position.y, "focus started");
        true
    }

    fn poll_focus(&mut self, camera: &mut Camera2D, now_ms: f64) {
        let Some(tween) = self.focus else {
            return;
        };
        let t = if tween.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - tween.start_ms) / tween.duration_ms).clamp(0.0, 1.0)
        };
        camera.lerp_position(tween.from_position, tween.to_position, t);
        camera.set_scale(tween.from_scale + (tween.to_scale - tween.from_scale) * t);
        if t >= 1.0 {
            self.focus = None;
            debug!("focus finished");
        }
    }
}

/// Bring the camera matrix up to date around the viewport centre.
fn refresh(camera: &mut Camera2D, viewport: Viewport) {
    let center = viewport.center();
    camera.update_matrix(center.x, center.y);
}

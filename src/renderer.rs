//! Per-frame driver: update → cull → pick → dispatch → draw.
//!
//! The renderer owns no scene state. Each [`Renderer::render`] call receives
//! the scene, camera and the published pointer snapshot, dispatches pointer
//! events to nodes, refreshes every node's matrices and draws the visible ones
//! through a [`DrawingContext`].
//!
//! Draw order is `(layer desc, level desc)` reversed: the list is sorted
//! topmost-first so picking can stop at the first hit, then drawn back to
//! front.

#[cfg(test)]
#[path = "renderer_test.rs"]
mod renderer_test;

use std::cmp::Reverse;
use std::collections::HashSet;

use tracing::{debug, trace};

use crate::camera::Camera2D;
use crate::config::RendererConfig;
use crate::context::{DrawingContext, RenderError};
use crate::input::Button;
use crate::matrix2::Matrix2;
use crate::node::{NodeId, PointerEvent};
use crate::pointer::Pointer;
use crate::scene::Scene;
use crate::style::Paint;
use crate::vector2::Vector2;
use crate::viewport::Viewport;

/// Frame renderer plus the interaction state that spans frames.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RendererConfig,
    viewport: Viewport,
    selection: Vec<NodeId>,
    cursor: String,
    dragging: Option<NodeId>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

impl Renderer {
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        let cursor = config.default_cursor.clone();
        Self { config, viewport: Viewport::new(0.0, 0.0), selection: Vec::new(), cursor, dragging: None }
    }

    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        self.config.pixel_ratio = ratio;
    }

    /// Viewport size in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Nodes selected by the last left click.
    #[must_use]
    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    #[must_use]
    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selection.contains(&id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Cursor resolved by the last frame.
    #[must_use]
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    /// Node currently captured by a drag.
    #[must_use]
    pub fn dragging(&self) -> Option<NodeId> {
        self.dragging
    }

    /// Run one frame.
    ///
    /// # Errors
    ///
    /// Returns the first drawing backend failure. Hooks and matrix updates
    /// for the frame have already run when drawing fails.
    pub fn render(
        &mut self,
        ctx: &mut dyn DrawingContext,
        scene: &mut Scene,
        camera: &mut Camera2D,
        pointer: &Pointer,
    ) -> Result<(), RenderError> {
        let center = self.viewport.center();
        camera.update_matrix(center.x, center.y);
        let camera: &Camera2D = camera;

        let mut order = scene.visible_nodes(scene.root());
        order.sort_by_key(|id| scene.get(*id).map(|n| Reverse((n.layer, n.level()))));
        let view = camera.matrix();
        let visible: Vec<NodeId> = order.into_iter().filter(|id| self.in_view(scene, *id, &view)).collect();

        if pointer.button_just_pressed(Button::Left) {
            self.selection = scene
                .visible_nodes(scene.root())
                .into_iter()
                .filter(|id| scene.get(*id).is_some_and(|n| n.selectable))
                .filter(|id| scene.is_world_point_inside(*id, Self::pointer_space(scene, *id, camera, pointer), false))
                .collect();
        }

        let cursor = self.dispatch(scene, camera, pointer, &visible);
        self.cursor = cursor.unwrap_or_else(|| self.config.default_cursor.clone());

        for id in scene.descendants(scene.root()) {
            scene.update_matrix(id, false);
            scene.refresh_bounding_box(id);
            scene.update_behavior(id, camera);
        }

        self.draw(ctx, scene, camera, &visible)?;
        trace!(visible = visible.len(), total = scene.len(), "frame rendered");
        Ok(())
    }

    fn in_view(&self, scene: &Scene, id: NodeId, view: &Matrix2) -> bool {
        let Some(node) = scene.get(id) else {
            return false;
        };
        if !self.config.culling || node.ignore_viewport {
            return true;
        }
        self.viewport.is_visible(&scene.world_bounding_box(id), view)
    }

    /// Pointer position in the space `id` is placed in.
    fn pointer_space(scene: &Scene, id: NodeId, camera: &Camera2D, pointer: &Pointer) -> Vector2 {
        if scene.get(id).is_some_and(|n| n.ignore_viewport) {
            pointer.position
        } else {
            camera.screen_to_world(pointer.position)
        }
    }

    /// Hover, click and drag dispatch. Returns the cursor the nodes asked for.
    fn dispatch(&mut self, scene: &mut Scene, camera: &Camera2D, pointer: &Pointer, visible: &[NodeId]) -> Option<String> {
        let mut cursor = None;
        let mut cursor_resolved = false;

        for &id in visible {
            let world = Self::pointer_space(scene, id, camera, pointer);
            let Some(node) = scene.get(id) else {
                continue;
            };
            if !node.pointer_events {
                continue;
            }
            let inside = pointer.inside_dom() && node.is_inside(node.world_to_local(world));
            let was_inside = node.pointer_inside;
            let draggable = node.draggable;

            if !cursor_resolved && (inside || node.being_dragged) {
                cursor = scene.cursor_for(id, camera);
                cursor_resolved = true;
            }

            if inside && self.dragging.is_none() {
                if !was_inside {
                    Self::set_inside(scene, id, true);
                    scene.dispatch(id, PointerEvent::Enter, pointer, camera);
                }
                scene.dispatch(id, PointerEvent::Over, pointer, camera);
                if pointer.button_double_clicked(Button::Left) {
                    scene.dispatch(id, PointerEvent::DoubleClick, pointer, camera);
                }
                if pointer.button_just_pressed(Button::Left) {
                    scene.dispatch(id, PointerEvent::Down, pointer, camera);
                    if draggable {
                        self.capture(scene, id, pointer, camera);
                    }
                }
                if pointer.button_just_released(Button::Left) {
                    scene.dispatch(id, PointerEvent::Up, pointer, camera);
                }
            } else if !inside && was_inside && self.dragging != Some(id) {
                Self::set_inside(scene, id, false);
                scene.dispatch(id, PointerEvent::Leave, pointer, camera);
            }
        }
        self.leave_hidden(scene, camera, pointer, visible);

        if let Some(id) = self.dragging {
            if !scene.contains(id) {
                self.dragging = None;
            } else if pointer.button_just_released(Button::Left) {
                scene.dispatch(id, PointerEvent::DragEnd, pointer, camera);
                self.release(scene, id);
            } else {
                scene.dispatch(id, PointerEvent::Drag, pointer, camera);
            }
        }

        cursor
    }

    /// Hovered nodes that were culled or hidden this frame still get their
    /// leave, unless they are being dragged.
    fn leave_hidden(&self, scene: &mut Scene, camera: &Camera2D, pointer: &Pointer, visible: &[NodeId]) {
        let visible: HashSet<NodeId> = visible.iter().copied().collect();
        let stale: Vec<NodeId> = scene
            .descendants(scene.root())
            .into_iter()
            .filter(|id| !visible.contains(id) && self.dragging != Some(*id))
            .filter(|id| scene.get(*id).is_some_and(|n| n.pointer_inside))
            .collect();
        for id in stale {
            Self::set_inside(scene, id, false);
            scene.dispatch(id, PointerEvent::Leave, pointer, camera);
        }
    }

    fn set_inside(scene: &mut Scene, id: NodeId, inside: bool) {
        if let Some(node) = scene.get_mut(id) {
            node.pointer_inside = inside;
        }
    }

    fn capture(&mut self, scene: &mut Scene, id: NodeId, pointer: &Pointer, camera: &Camera2D) {
        if let Some(node) = scene.get_mut(id) {
            node.being_dragged = true;
            node.drag_origin = Some(pointer.position);
        }
        self.dragging = Some(id);
        debug!(%id, "drag captured");
        scene.dispatch(id, PointerEvent::DragStart, pointer, camera);
    }

    fn release(&mut self, scene: &mut Scene, id: NodeId) {
        if let Some(node) = scene.get_mut(id) {
            node.being_dragged = false;
            node.drag_origin = None;
        }
        self.dragging = None;
        debug!(%id, "drag released");
    }

    fn draw(
        &self,
        ctx: &mut dyn DrawingContext,
        scene: &mut Scene,
        camera: &Camera2D,
        visible: &[NodeId],
    ) -> Result<(), RenderError> {
        let ratio = Matrix2::from_scale(self.config.pixel_ratio, self.config.pixel_ratio);
        let mut screen = ratio;
        screen.multiply(&camera.matrix());

        if self.config.auto_clear {
            ctx.set_transform(&ratio)?;
            ctx.clear_rect(0.0, 0.0, self.viewport.width, self.viewport.height);
        }

        for &id in visible.iter().rev() {
            if scene.get(id).is_none_or(|n| n.shape.is_mask()) {
                continue;
            }
            ctx.save();
            let drawn = Self::draw_node(ctx, scene, id, &screen, &ratio);
            ctx.restore();
            drawn?;

            if self.is_selected(id) {
                ctx.save();
                let outlined = self.draw_selection(ctx, scene, id, camera, &screen, &ratio);
                ctx.restore();
                outlined?;
            }
        }
        Ok(())
    }

    fn draw_node(
        ctx: &mut dyn DrawingContext,
        scene: &mut Scene,
        id: NodeId,
        screen: &Matrix2,
        ratio: &Matrix2,
    ) -> Result<(), RenderError> {
        let masks = scene.get(id).map(|n| n.masks.clone()).unwrap_or_default();
        for mask_id in masks {
            scene.update_matrix(mask_id, false);
            let Some(mask) = scene.get(mask_id) else {
                continue;
            };
            ctx.set_transform(if mask.ignore_viewport { ratio } else { screen })?;
            ctx.transform(&mask.global_matrix)?;
            mask.shape.clip(ctx);
        }

        let Some(node) = scene.get_mut(id) else {
            return Ok(());
        };
        ctx.set_transform(if node.ignore_viewport { ratio } else { screen })?;
        ctx.transform(&node.global_matrix)?;
        ctx.set_global_alpha(node.global_opacity);
        node.shape.style(ctx)?;
        node.shape.draw(ctx)
    }

    fn draw_selection(
        &self,
        ctx: &mut dyn DrawingContext,
        scene: &Scene,
        id: NodeId,
        camera: &Camera2D,
        screen: &Matrix2,
        ratio: &Matrix2,
    ) -> Result<(), RenderError> {
        let bbox = scene.world_bounding_box(id);
        if bbox.is_empty() {
            return Ok(());
        }
        // Screen-space nodes are outlined in screen space, at unit zoom.
        let (transform, zoom) = if scene.get(id).is_some_and(|n| n.ignore_viewport) {
            (ratio, 1.0)
        } else {
            (screen, camera.scale())
        };
        ctx.set_transform(transform)?;
        ctx.set_line_width(self.config.selection_line_width / zoom);
        let color = ctx.resolve_color(&self.config.selection_color);
        ctx.set_stroke_style(&Paint::Color(color))?;
        let size = bbox.get_size();
        let dash = self.config.selection_dash / zoom;
        if dash > 0.0 {
            ctx.set_line_dash(&[dash, dash])?;
            ctx.stroke_rect(bbox.min.x, bbox.min.y, size.x, size.y);
            return ctx.set_line_dash(&[]);
        }
        ctx.stroke_rect(bbox.min.x, bbox.min.y, size.x, size.y);
        Ok(())
    }
}

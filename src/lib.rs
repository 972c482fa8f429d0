//! Interactive 2D scene-graph engine for an HTML canvas.
//!
//! Nodes form an affine-transform hierarchy inside a [`scene::Scene`] arena.
//! Each frame, [`engine::EngineCore::tick`] publishes buffered input, applies
//! camera controls, and hands the scene to the [`renderer::Renderer`], which
//! refreshes matrices, culls against the viewport, dispatches pointer events
//! and draws through a [`context::DrawingContext`]. The core never touches the
//! browser; [`web`] and [`engine::Engine`] bind it to a real canvas element.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser [`engine::Engine`] and headless [`engine::EngineCore`] |
//! | [`scene`] | Node arena: hierarchy, traversal, matrices, hit tests, default drag |
//! | [`node`] | Node record, [`node::NodeId`] and the [`node::Behavior`] hook trait |
//! | [`shape`] | Drawable payloads: box, circle, line, text, clip mask |
//! | [`renderer`] | Per-frame update, cull, pick, dispatch and draw |
//! | [`camera`] | Pan/zoom/rotate view transform and coordinate conversions |
//! | [`viewport`] | Screen rectangle and culling test |
//! | [`controls`] | Wheel zoom, pan, rotate and animated focus for the camera |
//! | [`resize_tool`] | Resize / rotate gizmo built from scene nodes |
//! | [`pointer`] | Double-buffered pointer state |
//! | [`keyboard`] | Double-buffered keyboard state |
//! | [`input`] | [`input::Key`] edge state machine and pointer buttons |
//! | [`style`] | Lazily resolved fill / stroke paints |
//! | [`context`] | Drawing capability trait and the headless recorder |
//! | [`web`] | `CanvasRenderingContext2d` backend |
//! | [`vector2`], [`matrix2`], [`box2`] | Math primitives |
//! | [`config`] | Serde-loaded engine configuration |
//! | [`consts`] | Shared numeric constants (slop, sensitivities, handle sizes) |

pub mod box2;
pub mod camera;
pub mod config;
pub mod consts;
pub mod context;
pub mod controls;
pub mod engine;
pub mod input;
pub mod keyboard;
pub mod matrix2;
pub mod node;
pub mod pointer;
pub mod renderer;
pub mod resize_tool;
pub mod scene;
pub mod shape;
pub mod style;
pub mod vector2;
pub mod viewport;
pub mod web;

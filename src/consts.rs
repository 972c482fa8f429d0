//! Shared numeric constants for the scene2d crate.

// ── Dragging ────────────────────────────────────────────────────

/// Manhattan distance in device pixels a pointer must travel from the drag's
/// start before a default node drag commits any movement.
pub const DRAG_SLOP_PX: f64 = 2.0;

// ── Camera controls ─────────────────────────────────────────────

/// Wheel units → fraction of the current scale.
pub const ZOOM_SENSITIVITY: f64 = 0.001;

/// Radians of camera rotation per horizontal pixel of pointer travel.
pub const ROTATION_SENSITIVITY: f64 = 0.01;

/// Focus animation length in milliseconds.
pub const FOCUS_DURATION_MS: f64 = 300.0;

/// Fraction of the viewport a focused single node should cover.
pub const FOCUS_OBJECT_COVERAGE: f64 = 0.1;

/// Fraction of the viewport the whole scene should cover when focused.
pub const FOCUS_SCENE_COVERAGE: f64 = 0.5;

pub const MIN_CAMERA_SCALE: f64 = 1e-3;
pub const MAX_CAMERA_SCALE: f64 = 1e3;

// ── Hit-testing ─────────────────────────────────────────────────

/// Extra tolerance, in local units, on each side of a line's stroke.
pub const LINE_HIT_SLOP: f64 = 2.0;

// ── Resize gizmo ────────────────────────────────────────────────

/// Half the side of a corner handle, in screen pixels.
pub const HANDLE_HALF_SIZE_PX: f64 = 5.0;

/// Edge handle stroke width, in screen pixels.
pub const EDGE_HANDLE_WIDTH_PX: f64 = 4.0;

/// Radius of the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_RADIUS_PX: f64 = 6.0;

/// Distance from the top edge to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

/// Cursor names indexed by 45° bucket, starting at 0° (pointing right) and
/// turning clockwise in screen space.
pub const RESIZE_CURSORS: [&str; 8] = [
    "ew-resize",
    "nwse-resize",
    "ns-resize",
    "nesw-resize",
    "ew-resize",
    "nwse-resize",
    "ns-resize",
    "nesw-resize",
];

// ── Masks ───────────────────────────────────────────────────────

/// Half-extent of the outer frame used when clipping with an inverted mask.
pub const INVERTED_MASK_EXTENT: f64 = 1e5;

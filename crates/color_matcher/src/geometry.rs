use bevy::math::{Rect, Vec2};

/// True when the two frames share a region of positive area.
///
/// Frames that only touch along an edge, and zero-area frames, never intersect.
pub fn frames_intersect(a: Rect, b: Rect) -> bool {
    !a.intersect(b).is_empty()
}

/// True when `point` lies inside `frame`, edges included. A zero-area frame contains nothing.
pub fn frame_contains(frame: Rect, point: Vec2) -> bool {
    !frame.is_empty() && frame.contains(point)
}

//! Horizontal scroll tracking

use super::rect::Rect;
use crate::consts::SCREEN_WIDTH;

/// Scroll offset that centers `target` in the viewport, clamped so the
/// viewport never shows past either end of the world
pub fn scroll_for(target: &Rect, world_width: f32) -> f32 {
    let desired = target.center_x() - SCREEN_WIDTH * 0.5;
    desired.min(world_width - SCREEN_WIDTH).max(0.0)
}

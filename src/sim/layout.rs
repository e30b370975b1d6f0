//! Display area and reel placement
//!
//! The display area is derived once from the frame bounds. Reels are laid
//! out as horizontal strips stacked top to bottom inside it.

use glam::Vec2;

use crate::consts::REEL_COUNT;

/// Inset of the visible window from the frame edge
pub const COVER_MARGIN: Vec2 = Vec2::new(30.0, 30.0);
/// Horizontal inset of the reels inside the window
pub const HORIZONTAL_CONTENT_MARGIN: f32 = 100.0;
pub const TOP_CONTENT_MARGIN: f32 = 55.0;
pub const BOTTOM_CONTENT_MARGIN: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachineLayout {
    /// Width/height of the area the reels move in
    pub display_area: Vec2,
}

impl MachineLayout {
    /// Derive the display area from frame bounds. `None` if nothing is left
    /// after the margins.
    pub fn from_frame_size(frame: Vec2) -> Option<Self> {
        let window = frame - COVER_MARGIN * 2.0;
        let width = window.x - 2.0 * HORIZONTAL_CONTENT_MARGIN;
        let height = window.y - 2.0 * (TOP_CONTENT_MARGIN + BOTTOM_CONTENT_MARGIN);
        if width > 0.0 && height > 0.0 {
            Some(Self::from_display_area(width, height))
        } else {
            None
        }
    }

    pub fn from_display_area(width: f32, height: f32) -> Self {
        Self {
            display_area: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.display_area.x
    }

    pub fn height(&self) -> f32 {
        self.display_area.y
    }

    /// Top-left origin of reel `index`, relative to the machine center
    pub fn reel_origin(&self, index: usize) -> Vec2 {
        let vertical_offset = TOP_CONTENT_MARGIN - BOTTOM_CONTENT_MARGIN;
        let row_step = self.height() / (REEL_COUNT - 1) as f32;
        Vec2::new(
            -self.width() / 2.0,
            -self.height() / 2.0 + vertical_offset + index as f32 * row_step,
        )
    }
}

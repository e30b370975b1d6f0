//! Reel Spin - looping reel motion for a four-reel slot machine
//!
//! Core modules:
//! - `sim`: Reel motion, spin orchestration and layout (pure, time-stepped)
//! - `assets`: Texture and skeleton lookup
//! - `audio`: Named sound playback
//! - `animation`: Skeletal animation collaborator
//! - `tuning`: Data-driven motion and timing constants
//! - `ui`: Spin trigger control

pub mod animation;
pub mod assets;
pub mod audio;
pub mod settings;
pub mod sim;
pub mod symbols;
pub mod tuning;
pub mod ui;

pub use settings::Settings;
pub use tuning::Tuning;

/// Machine configuration constants
pub mod consts {
    use glam::Vec2;

    /// Number of reels on the machine
    pub const REEL_COUNT: usize = 4;
    /// Wall-clock length of one frame at `delta == 1.0` (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Frame bounds used when the frame skeleton is unavailable
    pub const DEFAULT_FRAME_SIZE: Vec2 = Vec2::new(860.0, 570.0);
}

/// Wrap `x` onto the loop `[left, right)`.
///
/// Works for any magnitude of `x`, including values several loop widths
/// below `left`.
#[inline]
pub fn wrap_offset(x: f32, left: f32, right: f32) -> f32 {
    let loop_width = right - left;
    let wrapped = ((x - left) % loop_width + loop_width) % loop_width + left;
    // Rounding can land exactly on `right`, which is the same loop point as `left`
    if wrapped >= right { left } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_inside_window_is_identity() {
        assert_eq!(wrap_offset(100.0, -120.0, 840.0), 100.0);
        assert_eq!(wrap_offset(-120.0, -120.0, 840.0), -120.0);
    }

    #[test]
    fn test_wrap_below_left() {
        // 10 past the left edge reappears 10 short of the right edge
        assert!((wrap_offset(-130.0, -120.0, 840.0) - 830.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_many_loops() {
        let x = -120.0 - 960.0 * 7.0 - 25.0;
        assert!((wrap_offset(x, -120.0, 840.0) - 815.0).abs() < 1e-2);
        let y = 840.0 + 960.0 * 3.0 + 5.0;
        assert!((wrap_offset(y, -120.0, 840.0) - (-115.0)).abs() < 1e-2);
    }

    #[test]
    fn test_wrap_right_edge_maps_to_left() {
        assert_eq!(wrap_offset(840.0, -120.0, 840.0), -120.0);
    }
}

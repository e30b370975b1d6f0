//! A single horizontal reel
//!
//! The reel owns a ring of `visible + extra` slots that scroll leftward. A
//! slot that passes `left_limit` is recycled: it gets a fresh random symbol
//! and reappears at the right end, keeping its overshoot. Stopping only
//! clears the spin flag; the speed then decays on each update until it
//! drops below the threshold and the slots snap to the grid.

use std::rc::Rc;

use rand_pcg::Pcg32;

use crate::assets::{SymbolTextures, TextureRef};
use crate::symbols::SymbolKey;
use crate::tuning::ReelTuning;
use crate::wrap_offset;

/// One renderable position on the reel
#[derive(Debug, Clone)]
pub struct SymbolSlot {
    /// Horizontal offset from the reel origin
    pub offset: f32,
    pub symbol: SymbolKey,
    pub texture: TextureRef,
}

pub struct Reel {
    slots: Vec<SymbolSlot>,
    spacing: f32,
    left_limit: f32,
    right_limit: f32,
    speed: f32,
    spinning: bool,
    tuning: ReelTuning,
    textures: Rc<dyn SymbolTextures>,
    rng: Pcg32,
}

impl Reel {
    /// Build a resting reel spanning `display_width`
    pub fn new(
        display_width: f32,
        tuning: ReelTuning,
        textures: Rc<dyn SymbolTextures>,
        mut rng: Pcg32,
    ) -> Self {
        let total = tuning.total_symbols();
        let spacing = display_width / (tuning.visible_symbols - 1) as f32;

        let slots = (0..total)
            .map(|i| {
                let symbol = SymbolKey::random(&mut rng);
                SymbolSlot {
                    offset: spacing * i as f32,
                    symbol,
                    texture: textures.symbol_texture(symbol),
                }
            })
            .collect();

        Self {
            slots,
            spacing,
            left_limit: -spacing,
            right_limit: spacing * (total - 1) as f32,
            speed: 0.0,
            spinning: false,
            tuning,
            textures,
            rng,
        }
    }

    /// Advance motion by `delta` frames
    pub fn update(&mut self, delta: f32) {
        if !self.spinning && self.speed == 0.0 {
            return;
        }
        // No elapsed time: no movement and no decay
        if delta.is_nan() || delta <= 0.0 {
            return;
        }

        let step = self.speed * delta;
        // Last to first; each slot is read and written only in its own iteration
        for i in (0..self.slots.len()).rev() {
            self.slots[i].offset -= step;
            let from_left = self.slots[i].offset - self.left_limit;
            if from_left < 0.0 {
                self.recycle(i, from_left);
            }
        }

        if !self.spinning && self.speed > 0.0 {
            self.speed *= self.tuning.slowdown_rate;
            if self.speed < self.tuning.stop_threshold {
                self.speed = 0.0;
                self.snap_to_grid();
            }
        }
    }

    /// Jump to full speed
    pub fn start_spin(&mut self) {
        self.spinning = true;
        self.speed = self.tuning.spin_speed;
    }

    /// Release the reel; it decelerates over the following updates
    pub fn stop_spin(&mut self) {
        self.spinning = false;
    }

    fn recycle(&mut self, index: usize, from_left: f32) {
        let symbol = SymbolKey::random(&mut self.rng);
        let slot = &mut self.slots[index];
        slot.offset = wrap_offset(self.right_limit + from_left, self.left_limit, self.right_limit);
        slot.symbol = symbol;
        slot.texture = self.textures.symbol_texture(symbol);
    }

    fn snap_to_grid(&mut self) {
        self.slots.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.offset = self.spacing * i as f32;
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Fully at rest: released and snapped
    pub fn is_settled(&self) -> bool {
        !self.spinning && self.speed == 0.0
    }

    pub fn slots(&self) -> &[SymbolSlot] {
        &self.slots
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn left_limit(&self) -> f32 {
        self.left_limit
    }

    pub fn right_limit(&self) -> f32 {
        self.right_limit
    }

    /// Symbols currently inside the display window, left to right
    pub fn visible_symbols(&self) -> Vec<SymbolKey> {
        let mut visible: Vec<&SymbolSlot> = self
            .slots
            .iter()
            .filter(|s| s.offset >= 0.0 && s.offset <= self.spacing * (self.tuning.visible_symbols - 1) as f32)
            .collect();
        visible.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        visible.into_iter().map(|s| s.symbol).collect()
    }

    /// Whether every slot sits on `spacing * index` in ascending order
    pub fn is_grid_aligned(&self) -> bool {
        self.slots
            .iter()
            .enumerate()
            .all(|(i, s)| (s.offset - self.spacing * i as f32).abs() < 1e-3)
    }

    #[cfg(test)]
    pub(crate) fn set_motion(&mut self, speed: f32, spinning: bool) {
        self.speed = speed;
        self.spinning = spinning;
    }

    #[cfg(test)]
    pub(crate) fn set_offsets(&mut self, offsets: &[f32]) {
        for (slot, offset) in self.slots.iter_mut().zip(offsets) {
            slot.offset = *offset;
        }
    }
}

impl std::fmt::Debug for Reel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reel")
            .field("slots", &self.slots.len())
            .field("spacing", &self.spacing)
            .field("speed", &self.speed)
            .field("spinning", &self.spinning)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::assets::AssetCatalog;
    use crate::sim::random::reel_rng;

    fn reel() -> Reel {
        reel_with_seed(12345)
    }

    fn reel_with_seed(seed: u64) -> Reel {
        Reel::new(600.0, ReelTuning::default(), Rc::new(AssetCatalog::default()), reel_rng(seed, 0))
    }

    fn offsets(reel: &Reel) -> Vec<f32> {
        reel.slots().iter().map(|s| s.offset).collect()
    }

    #[test]
    fn test_geometry() {
        let reel = reel();
        assert_eq!(reel.slots().len(), 8);
        assert_eq!(reel.spacing(), 120.0);
        assert_eq!(reel.left_limit(), -120.0);
        assert_eq!(reel.right_limit(), 840.0);
        assert!(reel.is_grid_aligned());
        assert_eq!(reel.visible_symbols().len(), 6);
    }

    #[test]
    fn test_start_spin() {
        let mut reel = reel();
        reel.start_spin();
        assert!(reel.is_spinning());
        assert_eq!(reel.speed(), 50.0);

        // Restarting mid-decay resets to full speed
        reel.stop_spin();
        reel.update(1.0);
        assert!(reel.speed() < 50.0);
        reel.start_spin();
        assert_eq!(reel.speed(), 50.0);
    }

    #[test]
    fn test_stop_spin_keeps_speed() {
        let mut reel = reel();
        reel.start_spin();
        reel.stop_spin();
        assert!(!reel.is_spinning());
        assert_eq!(reel.speed(), 50.0);
    }

    #[test]
    fn test_idle_update_is_noop() {
        let mut reel = reel();
        let before = offsets(&reel);
        let symbols: Vec<SymbolKey> = reel.slots().iter().map(|s| s.symbol).collect();
        reel.update(1.0);
        reel.update(1e6);
        assert_eq!(offsets(&reel), before);
        let after: Vec<SymbolKey> = reel.slots().iter().map(|s| s.symbol).collect();
        assert_eq!(after, symbols);
        assert_eq!(reel.speed(), 0.0);
    }

    #[test]
    fn test_zero_delta_changes_nothing() {
        let mut reel = reel();
        reel.start_spin();
        reel.update(1.3);
        reel.stop_spin();
        let before = offsets(&reel);
        let speed = reel.speed();
        for _ in 0..10 {
            reel.update(0.0);
        }
        assert_eq!(offsets(&reel), before);
        assert_eq!(reel.speed(), speed);
    }

    #[test]
    fn test_spinning_moves_left_at_constant_speed() {
        let mut reel = reel();
        reel.start_spin();
        reel.update(1.0);
        assert_eq!(reel.speed(), 50.0);
        // Slot 1 started at 120, well clear of the left edge
        assert_eq!(reel.slots()[1].offset, 70.0);
    }

    #[test]
    fn test_full_stop_below_threshold() {
        let mut reel = reel();
        reel.set_motion(0.1, false);
        reel.update(1.0);
        assert_eq!(reel.speed(), 0.0);
        assert!(reel.is_settled());
        assert!(reel.is_grid_aligned());
    }

    #[test]
    fn test_recycle_preserves_overshoot() {
        let mut reel = reel();
        reel.set_offsets(&[-119.0, 0.0, 120.0, 240.0, 360.0, 480.0, 600.0, 720.0]);
        reel.set_motion(50.0, true);
        reel.update(0.1);
        // Moved 5: slot 0 overshoots the left edge by 4
        assert!((reel.slots()[0].offset - 836.0).abs() < 1e-3);
        assert!((reel.slots()[1].offset - -5.0).abs() < 1e-3);
    }

    #[test]
    fn test_recycle_does_not_disturb_other_slots() {
        let mut reel = reel();
        let start = [-110.0, -100.0, 10.0, 130.0, 250.0, 370.0, 490.0, 610.0];
        reel.set_offsets(&start);
        reel.set_motion(50.0, true);
        reel.update(0.5);

        let (left, right) = (reel.left_limit(), reel.right_limit());
        for (slot, x0) in reel.slots().iter().zip(start) {
            let moved = x0 - 25.0;
            let expected = if moved < left { wrap_offset(right + (moved - left), left, right) } else { moved };
            assert!((slot.offset - expected).abs() < 1e-3, "{} != {}", slot.offset, expected);
        }
        // Both wrapped slots kept their relative spacing
        assert!((reel.slots()[1].offset - reel.slots()[0].offset - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_huge_delta_stays_in_window() {
        let mut reel = reel();
        reel.start_spin();
        // Tens of thousands of loop widths in one update
        reel.update(1.0e6);
        for slot in reel.slots() {
            assert!(slot.offset >= reel.left_limit() && slot.offset <= reel.right_limit());
        }
    }

    #[test]
    fn test_deceleration_converges_to_grid() {
        let mut reel = reel();
        reel.start_spin();
        reel.stop_spin();

        let mut updates = 0;
        while !reel.is_settled() {
            reel.update(1.0);
            updates += 1;
            assert!(updates < 1000, "reel never settled");
        }
        // 50 * 0.95^n < 0.5 first holds at n = 90
        assert_eq!(updates, 90);
        assert_eq!(reel.speed(), 0.0);
        assert!(reel.is_grid_aligned());
        assert_eq!(reel.slots().len(), 8);
    }

    proptest! {
        #[test]
        fn prop_offsets_stay_in_window(
            seed in any::<u64>(),
            deltas in prop::collection::vec(0.0f32..5_000.0, 1..40),
            stop_after in 0usize..40,
        ) {
            let mut reel = reel_with_seed(seed);
            reel.start_spin();
            for (i, delta) in deltas.iter().enumerate() {
                if i == stop_after {
                    reel.stop_spin();
                }
                reel.update(*delta);
                for slot in reel.slots() {
                    prop_assert!(slot.offset >= reel.left_limit(), "{} below left", slot.offset);
                    prop_assert!(slot.offset <= reel.right_limit(), "{} beyond right", slot.offset);
                }
            }
        }

        #[test]
        fn prop_slots_only_move_left_modulo_wrap(delta in 0.001f32..2.0) {
            let mut reel = reel();
            reel.start_spin();
            let before = offsets(&reel);
            reel.update(delta);
            let step = 50.0 * delta;
            let loop_width = reel.right_limit() - reel.left_limit();
            for (x0, slot) in before.iter().zip(reel.slots()) {
                // Distance travelled, measured around the loop
                let travelled = (x0 - slot.offset).rem_euclid(loop_width);
                prop_assert!((travelled - step).abs() < 1e-2, "travelled {} expected {}", travelled, step);
            }
        }

        #[test]
        fn prop_settled_reel_ignores_updates(delta in 0.0f32..1.0e6) {
            let mut reel = reel();
            let before = offsets(&reel);
            reel.update(delta);
            prop_assert_eq!(offsets(&reel), before);
            prop_assert_eq!(reel.speed(), 0.0);
        }
    }
}

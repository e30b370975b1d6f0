//! Four-reel machine and its spin cycle
//!
//! Two clocks feed the machine. `update(delta)` is called once per frame
//! and moves the reels. `advance(elapsed_ms)` consumes wall-clock time and
//! fires the staggered start/stop signals and the final resolve. A spin only
//! flips reel flags; all motion happens in `update`.

use std::rc::Rc;

use crate::animation::{CompletionHook, Skeleton};
use crate::assets::SymbolTextures;
use crate::audio::{SoundKey, SoundPlayer};
use crate::consts::REEL_COUNT;
use crate::tuning::Tuning;

use super::layout::MachineLayout;
use super::random::{RandomSource, reel_rng};
use super::reel::Reel;
use super::sequence::{SpinPhase, SpinSequence, SpinStep};

/// Win overlay animation name
pub const WIN_ANIMATION: &str = "start";
/// Frame animation while idle
pub const FRAME_IDLE_ANIMATION: &str = "idle";
/// Frame animation while spinning
pub const FRAME_SPIN_ANIMATION: &str = "spin";

/// Lifecycle events for outside controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineEvent {
    SpinStarted,
    SpinFinished { won: bool },
}

/// Capabilities the machine is built with
pub struct Collaborators {
    pub textures: Rc<dyn SymbolTextures>,
    pub sound: Rc<dyn SoundPlayer>,
    /// One-shot win overlay; `None` disables it
    pub win_animation: Option<Box<dyn Skeleton>>,
    pub frame_animation: Option<Box<dyn Skeleton>>,
    /// Source for the win check
    pub random: Box<dyn RandomSource>,
}

pub struct SlotMachine {
    reels: Vec<Reel>,
    layout: MachineLayout,
    sequence: SpinSequence,
    win_probability: f64,
    sound: Rc<dyn SoundPlayer>,
    win_animation: Option<Box<dyn Skeleton>>,
    frame_animation: Option<Box<dyn Skeleton>>,
    random: Box<dyn RandomSource>,
    events: Vec<MachineEvent>,
    spins: u64,
    wins: u64,
}

impl SlotMachine {
    pub fn new(layout: MachineLayout, tuning: &Tuning, seed: u64, collaborators: Collaborators) -> Self {
        let Collaborators {
            textures,
            sound,
            mut win_animation,
            mut frame_animation,
            random,
        } = collaborators;

        let reels = (0..REEL_COUNT)
            .map(|i| Reel::new(layout.width(), tuning.reels, textures.clone(), reel_rng(seed, i)))
            .collect();

        if let Some(win) = win_animation.as_mut() {
            win.set_visible(false);
        }
        if let Some(frame) = frame_animation.as_mut() {
            play_looping_if_present(frame.as_mut(), FRAME_IDLE_ANIMATION);
        }

        log::info!(
            "Slot machine ready: {} reels, display area {}x{}",
            REEL_COUNT,
            layout.width(),
            layout.height()
        );

        Self {
            reels,
            layout,
            sequence: SpinSequence::new(REEL_COUNT, tuning.timing),
            win_probability: tuning.win_probability,
            sound,
            win_animation,
            frame_animation,
            random,
            events: Vec::new(),
            spins: 0,
            wins: 0,
        }
    }

    /// Frame tick: move every reel
    pub fn update(&mut self, delta: f32) {
        for reel in &mut self.reels {
            reel.update(delta);
        }
    }

    /// Wall-clock tick: fire due spin steps and advance animations
    pub fn advance(&mut self, elapsed_ms: f64) {
        // Animations started by a step below begin from zero
        if let Some(frame) = self.frame_animation.as_mut() {
            frame.advance(elapsed_ms);
        }
        if let Some(win) = self.win_animation.as_mut() {
            win.advance(elapsed_ms);
        }
        for step in self.sequence.advance(elapsed_ms) {
            self.apply(step);
        }
    }

    /// Begin a spin cycle. Ignored while one is running.
    pub fn spin(&mut self) {
        let Some(first) = self.sequence.begin() else {
            log::debug!("Spin ignored: already spinning");
            return;
        };

        self.spins += 1;
        log::debug!("Spin {} started", self.spins);
        self.events.push(MachineEvent::SpinStarted);
        self.sound.play(SoundKey::Spin);
        if let Some(frame) = self.frame_animation.as_mut() {
            play_looping_if_present(frame.as_mut(), FRAME_SPIN_ANIMATION);
        }

        self.apply(first);
    }

    fn apply(&mut self, step: SpinStep) {
        match step {
            SpinStep::StartReel(i) => {
                log::trace!("Reel {} start", i);
                self.reels[i].start_spin();
            }
            SpinStep::StopReel(i) => {
                log::trace!("Reel {} stop", i);
                self.reels[i].stop_spin();
            }
            SpinStep::Resolve => self.resolve(),
        }
    }

    fn resolve(&mut self) {
        self.sound.stop(SoundKey::Spin);
        if let Some(frame) = self.frame_animation.as_mut() {
            play_looping_if_present(frame.as_mut(), FRAME_IDLE_ANIMATION);
        }

        let won = self.check_win();
        if won {
            self.wins += 1;
        }
        log::debug!("Spin {} finished (won: {})", self.spins, won);
        self.events.push(MachineEvent::SpinFinished { won });
    }

    /// Flat-probability win check
    fn check_win(&mut self) -> bool {
        let won = self.random.next_unit() < self.win_probability;
        if won {
            self.sound.play(SoundKey::Win);
            log::info!("Winner!");
            if let Some(win) = self.win_animation.as_mut() {
                show_win(win.as_mut());
            }
        }
        won
    }

    pub fn is_spinning(&self) -> bool {
        !self.sequence.is_idle()
    }

    pub fn phase(&self) -> SpinPhase {
        self.sequence.phase()
    }

    pub fn reels(&self) -> &[Reel] {
        &self.reels
    }

    pub fn layout(&self) -> &MachineLayout {
        &self.layout
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<MachineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn spin_count(&self) -> u64 {
        self.spins
    }

    pub fn win_count(&self) -> u64 {
        self.wins
    }

    pub fn win_animation(&self) -> Option<&dyn Skeleton> {
        self.win_animation.as_deref()
    }
}

/// Show the overlay, play the win clip once, hide again when it completes
fn show_win(win: &mut dyn Skeleton) {
    if !win.has_animation(WIN_ANIMATION) {
        log::warn!("Win skeleton has no {:?} animation", WIN_ANIMATION);
        return;
    }
    win.set_visible(true);
    win.reset_to_start_pose();
    win.play_once(WIN_ANIMATION);
    win.on_complete(CompletionHook::new(|s| s.set_visible(false)));
}

fn play_looping_if_present(skeleton: &mut dyn Skeleton, name: &str) {
    if skeleton.has_animation(name) {
        skeleton.play(name, true);
    }
}

//! Skeletal animation collaborator
//!
//! The machine drives the win overlay and the frame through `Skeleton`.
//! Completion is reported through a single `CompletionHook` slot: the hook is
//! taken out before it runs, so it fires at most once and nothing lingers
//! into the next spin.

use glam::Vec2;

use crate::assets::SkeletonData;

/// One-shot completion callback
pub struct CompletionHook(Box<dyn FnOnce(&mut dyn Skeleton)>);

impl CompletionHook {
    pub fn new(f: impl FnOnce(&mut dyn Skeleton) + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn fire(self, target: &mut dyn Skeleton) {
        (self.0)(target)
    }
}

impl std::fmt::Debug for CompletionHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CompletionHook")
    }
}

/// A posed, animatable skeleton
pub trait Skeleton {
    fn has_animation(&self, name: &str) -> bool;

    /// Replace the current track with `name`
    fn play(&mut self, name: &str, looping: bool);

    fn play_once(&mut self, name: &str) {
        self.play(name, false);
    }

    /// Clear tracks and return to the setup pose
    fn reset_to_start_pose(&mut self);

    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;

    /// Local bounds of the setup pose
    fn local_size(&self) -> Vec2;

    /// Register the hook fired when the current non-looping track ends.
    /// Replaces any unfired hook.
    fn on_complete(&mut self, hook: CompletionHook);

    /// Advance animation time
    fn advance(&mut self, elapsed_ms: f64);
}

#[derive(Debug, Clone)]
struct Track {
    name: String,
    looping: bool,
    elapsed_ms: f64,
}

/// In-process skeleton: tracks run for a fixed clip length
#[derive(Debug)]
pub struct TimelineSkeleton {
    data: SkeletonData,
    clip_ms: f64,
    track: Option<Track>,
    visible: bool,
    hook: Option<CompletionHook>,
}

impl TimelineSkeleton {
    pub fn new(data: SkeletonData, clip_ms: f64) -> Self {
        Self {
            data,
            clip_ms,
            track: None,
            visible: true,
            hook: None,
        }
    }

    /// Name of the running track
    pub fn current_animation(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.name.as_str())
    }

    pub fn is_looping(&self) -> bool {
        self.track.as_ref().is_some_and(|t| t.looping)
    }

    pub fn has_pending_hook(&self) -> bool {
        self.hook.is_some()
    }
}

impl Skeleton for TimelineSkeleton {
    fn has_animation(&self, name: &str) -> bool {
        self.data.has_animation(name)
    }

    fn play(&mut self, name: &str, looping: bool) {
        if !self.data.has_animation(name) {
            log::warn!("Skeleton {} has no animation {:?}", self.data.name, name);
            return;
        }
        self.track = Some(Track {
            name: name.to_string(),
            looping,
            elapsed_ms: 0.0,
        });
    }

    fn reset_to_start_pose(&mut self) {
        self.track = None;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn local_size(&self) -> Vec2 {
        self.data.size
    }

    fn on_complete(&mut self, hook: CompletionHook) {
        self.hook = Some(hook);
    }

    fn advance(&mut self, elapsed_ms: f64) {
        let Some(track) = self.track.as_mut() else { return };
        track.elapsed_ms += elapsed_ms;
        if track.looping {
            if self.clip_ms > 0.0 {
                track.elapsed_ms %= self.clip_ms;
            }
            return;
        }
        if track.elapsed_ms >= self.clip_ms {
            self.track = None;
            if let Some(hook) = self.hook.take() {
                hook.fire(self);
            }
        }
    }
}

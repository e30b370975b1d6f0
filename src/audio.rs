//! Named sound playback
//!
//! The machine only ever fires `play`/`stop` by key. `AudioManager` owns the
//! key → source registry and volume state, and hands the actual output to an
//! `AudioBackend`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound effect keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundKey {
    /// Looping reel spin
    Spin,
    /// Win sting
    Win,
    /// Spin button click
    SpinButton,
}

/// Fire-and-forget sound playback
pub trait SoundPlayer {
    fn play(&self, key: SoundKey);
    fn stop(&self, key: SoundKey);
}

/// Output device for registered sounds
pub trait AudioBackend {
    fn start(&self, key: SoundKey, source: &Path, volume: f32);
    fn halt(&self, key: SoundKey);
}

/// Backend that only logs what it would play
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn start(&self, key: SoundKey, source: &Path, volume: f32) {
        log::debug!("play {:?} ({}) at volume {:.2}", key, source.display(), volume);
    }

    fn halt(&self, key: SoundKey) {
        log::debug!("stop {:?}", key);
    }
}

/// Audio manager for the machine
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    sounds: BTreeMap<SoundKey, PathBuf>,
    loaded: bool,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            sounds: BTreeMap::new(),
            loaded: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Register sound sources under `base`. Only the first call has effect.
    pub fn load(&mut self, manifest: &BTreeMap<SoundKey, String>, base: &Path) {
        if self.loaded {
            return;
        }
        for (key, file) in manifest {
            self.sounds.entry(*key).or_insert_with(|| base.join(file));
        }
        self.loaded = true;
        log::info!("Registered {} sounds", self.sounds.len());
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl SoundPlayer for AudioManager {
    fn play(&self, key: SoundKey) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(source) = self.sounds.get(&key) else { return };
        self.backend.start(key, source, vol);
    }

    fn stop(&self, key: SoundKey) {
        if self.sounds.contains_key(&key) {
            self.backend.halt(key);
        }
    }
}


#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::testing::RecordingSound;
    use super::*;

    fn manifest() -> BTreeMap<SoundKey, String> {
        let mut m = BTreeMap::new();
        m.insert(SoundKey::Spin, "Reel spin.webm".to_string());
        m.insert(SoundKey::Win, "win.webm".to_string());
        m
    }

    #[test]
    fn test_play_registered_sound() {
        let rec = Rc::new(RecordingSound::default());
        let mut audio = AudioManager::new(Box::new(rec.clone()));
        audio.load(&manifest(), Path::new("assets/sounds"));

        audio.play(SoundKey::Spin);
        audio.stop(SoundKey::Spin);
        assert_eq!(rec.played(SoundKey::Spin), 1);
        assert_eq!(rec.stopped(SoundKey::Spin), 1);
    }

    #[test]
    fn test_unknown_sound_is_silent() {
        let rec = Rc::new(RecordingSound::default());
        let mut audio = AudioManager::new(Box::new(rec.clone()));
        audio.load(&manifest(), Path::new("assets/sounds"));

        audio.play(SoundKey::SpinButton);
        audio.stop(SoundKey::SpinButton);
        assert!(rec.calls.borrow().is_empty());
    }

    #[test]
    fn test_muted_skips_playback() {
        let rec = Rc::new(RecordingSound::default());
        let mut audio = AudioManager::new(Box::new(rec.clone()));
        audio.load(&manifest(), Path::new("assets/sounds"));
        audio.set_muted(true);

        audio.play(SoundKey::Win);
        assert_eq!(rec.played(SoundKey::Win), 0);
    }

    #[test]
    fn test_load_only_once() {
        let mut audio = AudioManager::default();
        audio.load(&manifest(), Path::new("a"));
        let mut more = manifest();
        more.insert(SoundKey::SpinButton, "Spin button.webm".to_string());
        audio.load(&more, Path::new("b"));
        assert!(audio.is_loaded());
        assert_eq!(audio.sounds.len(), 2);
    }
}

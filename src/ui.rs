//! Spin trigger control

use std::rc::Rc;

use crate::audio::{SoundKey, SoundPlayer};
use crate::sim::MachineEvent;
use crate::symbols::ImageKey;

/// Button that requests spins and locks itself while one runs
pub struct SpinButton {
    interactive: bool,
    sound: Rc<dyn SoundPlayer>,
}

impl SpinButton {
    pub fn new(sound: Rc<dyn SoundPlayer>) -> Self {
        Self {
            interactive: true,
            sound,
        }
    }

    /// Press the button. Returns true if a spin should be requested.
    pub fn press(&self) -> bool {
        if !self.interactive {
            return false;
        }
        self.sound.play(SoundKey::SpinButton);
        true
    }

    pub fn enable(&mut self) {
        self.interactive = true;
    }

    pub fn disable(&mut self) {
        self.interactive = false;
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Image for the current state
    pub fn texture(&self) -> ImageKey {
        if self.interactive {
            ImageKey::SpinButtonActive
        } else {
            ImageKey::SpinButtonInactive
        }
    }

    /// Follow the machine lifecycle
    pub fn handle_event(&mut self, event: &MachineEvent) {
        match event {
            MachineEvent::SpinStarted => self.disable(),
            MachineEvent::SpinFinished { .. } => self.enable(),
        }
    }
}

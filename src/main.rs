//! Reel Spin headless driver
//!
//! Builds the machine from an asset folder and runs a number of spins on a
//! simulated 60 Hz frame clock.
//!
//! Usage: `reel-spin [spins] [seed] [assets_dir]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    use reel_spin::animation::{Skeleton, TimelineSkeleton};
    use reel_spin::assets::{AssetCatalog, AssetManifest, SpineKey};
    use reel_spin::audio::AudioManager;
    use reel_spin::consts::{DEFAULT_FRAME_SIZE, FRAME_MS};
    use reel_spin::sim::{Collaborators, MachineEvent, MachineLayout, SeededRandom, SlotMachine};
    use reel_spin::ui::SpinButton;
    use reel_spin::{Settings, Tuning};

    /// Upper bound on simulated frames per requested spin
    const MAX_FRAMES_PER_SPIN: u64 = 60 * 60;

    /// Game instance holding all state
    struct Game {
        machine: SlotMachine,
        button: SpinButton,
        frame: u64,
    }

    impl Game {
        fn new(assets: &Path, seed: u64) -> Self {
            let tuning = Tuning::load(&assets.join("tuning.json"));
            let settings = Settings::load(&assets.join("settings.json"));
            let manifest = AssetManifest::default();

            let catalog = Rc::new(AssetCatalog::load(&manifest, assets));

            let mut audio = AudioManager::default();
            audio.load(&manifest.sounds, &assets.join("sounds"));
            audio.apply_settings(&settings);
            let audio = Rc::new(audio);

            let frame_animation = skeleton(&catalog, SpineKey::Frame, tuning.win_clip_ms);
            let win_animation = if settings.win_overlay {
                skeleton(&catalog, SpineKey::Win, tuning.win_clip_ms)
            } else {
                None
            };

            let frame_size = frame_animation
                .as_ref()
                .map(|f| f.local_size())
                .unwrap_or(DEFAULT_FRAME_SIZE);
            let layout = MachineLayout::from_frame_size(frame_size).unwrap_or_else(|| {
                log::warn!("Frame {:?} too small for the reels, using default bounds", frame_size);
                MachineLayout::from_frame_size(DEFAULT_FRAME_SIZE).unwrap_or(MachineLayout::from_display_area(600.0, 300.0))
            });

            let machine = SlotMachine::new(
                layout,
                &tuning,
                seed,
                Collaborators {
                    textures: catalog,
                    sound: audio.clone(),
                    win_animation,
                    frame_animation,
                    random: Box::new(SeededRandom::new(seed ^ 0x5EED)),
                },
            );

            Self {
                machine,
                button: SpinButton::new(audio),
                frame: 0,
            }
        }

        /// One 60 Hz frame on both clocks
        fn step(&mut self) {
            self.machine.update(1.0);
            self.machine.advance(FRAME_MS);
            self.frame += 1;

            for event in self.machine.drain_events() {
                self.button.handle_event(&event);
                if let MachineEvent::SpinFinished { won } = event {
                    log::info!(
                        "Spin {} finished at frame {}{}",
                        self.machine.spin_count(),
                        self.frame,
                        if won { " - WIN" } else { "" }
                    );
                }
            }
        }

        fn settled(&self) -> bool {
            !self.machine.is_spinning() && self.machine.reels().iter().all(|r| r.is_settled())
        }

        fn run(&mut self, spins: u64) {
            let budget = spins.max(1) * MAX_FRAMES_PER_SPIN;
            while self.frame < budget {
                if self.settled() {
                    if self.machine.spin_count() >= spins {
                        break;
                    }
                    if self.button.press() {
                        self.machine.spin();
                    }
                }
                self.step();
            }

            for (i, reel) in self.machine.reels().iter().enumerate() {
                log::info!("Reel {}: {:?}", i, reel.visible_symbols());
            }
            log::info!(
                "{} spins, {} wins over {} frames",
                self.machine.spin_count(),
                self.machine.win_count(),
                self.frame
            );
        }
    }

    fn skeleton(catalog: &AssetCatalog, key: SpineKey, clip_ms: f64) -> Option<Box<dyn Skeleton>> {
        match catalog.spine(key) {
            Ok(data) => Some(Box::new(TimelineSkeleton::new(data.clone(), clip_ms))),
            Err(e) => {
                log::warn!("{:?} animation disabled: {}", key, e);
                None
            }
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Reel Spin (native) starting...");

        let mut args = std::env::args().skip(1);
        let spins = args.next().and_then(|s| s.parse().ok()).unwrap_or(5);
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xC0FFEE);
        let assets = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("assets"));

        let mut game = Game::new(&assets, seed);
        game.run(spins);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The headless driver is native only
}

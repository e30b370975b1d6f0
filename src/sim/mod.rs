//! Reel simulation module
//!
//! Everything that moves lives here. No rendering, no real clocks:
//! - Frame time arrives through `update(delta)`
//! - Wall-clock time arrives through `advance(elapsed_ms)`
//! - Seeded RNG only

pub mod layout;
pub mod machine;
pub mod random;
pub mod reel;
pub mod sequence;

pub use layout::MachineLayout;
pub use machine::{Collaborators, MachineEvent, SlotMachine};
pub use random::{RandomSource, SeededRandom};
pub use reel::{Reel, SymbolSlot};
pub use sequence::{SpinPhase, SpinSequence, SpinStep};

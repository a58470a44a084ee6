// Emulator boundary: the raw game and its discrete-action adapter.

pub mod actions;
pub mod joypad;
pub mod levels;

use crate::core::{Result, Step};
use crate::spaces::Discrete;
use crate::utils::frame::RawFrame;

pub use actions::{ActionType, Button, COMPLEX_MOVEMENT, RIGHT_ONLY, SIMPLE_MOVEMENT};
pub use joypad::JoypadSpace;
pub use levels::{Level, LevelCursor, LevelPolicy, LevelSelection, RandomStages, Sequential};

/// The NES emulator running the game, driven by raw joypad register values.
///
/// `step` may report no frame on a terminal step.
pub trait Emulator {
    fn reset(&mut self) -> Result<RawFrame>;
    fn step(&mut self, buttons: u8) -> Result<Step<Option<RawFrame>>>;
    /// Load `level` on the next reset.
    fn select_level(&mut self, level: Level) -> Result<()>;
    fn close(&mut self) {}
}

/// The game as seen by the wrappers: a discrete action index per step.
pub trait DiscreteEnv {
    fn reset(&mut self) -> Result<RawFrame>;
    fn step(&mut self, action: u32) -> Result<Step<Option<RawFrame>>>;
    fn action_space(&self) -> &Discrete;
    /// Load `level` on the next reset.
    fn select_level(&mut self, level: Level) -> Result<()>;
    fn close(&mut self) {}
}

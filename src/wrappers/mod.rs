// Wrapper stages composed on top of the emulator boundary.
//
// - RewardShaping: raw game -> shaped reward, processed single frames
// - FrameSkipStack: any processed-frame Env -> action repeat + frame stack

pub mod frame_stack;
pub mod reward;

pub use frame_stack::{FrameSkipStack, DEFAULT_SKIP};
pub use reward::{EpisodeState, Phase, RewardBreakdown, RewardShaping};

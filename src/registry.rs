// Assembly of the full training pipeline around an emulator.

use crate::config::{EnvConfig, KwArgs};
use crate::core::Result;
use crate::envs::joypad::JoypadSpace;
use crate::envs::levels::LevelCursor;
use crate::envs::Emulator;
use crate::utils::frame::{NES_HEIGHT, NES_WIDTH};
use crate::utils::rng::SeedSequence;
use crate::utils::video::VideoSink;
use crate::wrappers::{FrameSkipStack, RewardShaping};

/// The composed pipeline: joypad adapter, reward shaping, frame skip/stack.
pub type TrainEnv<E> = FrameSkipStack<RewardShaping<JoypadSpace<E>>>;

/// Wrap `emulator` according to `config`.
///
/// Returns the environment, the number of observation channels and the
/// number of discrete actions.
pub fn make_train_env<E: Emulator>(config: &EnvConfig, emulator: E) -> Result<(TrainEnv<E>, usize, usize)> {
    let start = config.level()?;
    let mut seeds = SeedSequence::from_optional(config.seed);
    let cursor = LevelCursor::from_selection(config.level_selection, start, seeds.next_rng());

    let actions = config.action_type.actions();
    let joypad = JoypadSpace::new(emulator, actions);
    let mut shaping = RewardShaping::new(joypad, cursor, seeds.next_rng());
    if let Some(path) = &config.output_path {
        shaping = shaping.with_video(VideoSink::new(NES_WIDTH, NES_HEIGHT, path));
    }

    let env = FrameSkipStack::new(shaping, config.skip);
    let channels = env.channels();
    Ok((env, channels, actions.len()))
}

/// Build from an environment id such as `SuperMarioBros-1-1-v0`, with
/// `kwargs` overriding the id's defaults.
pub fn make<E: Emulator>(id: &str, kwargs: &KwArgs, emulator: E) -> Result<(TrainEnv<E>, usize, usize)> {
    let mut config = EnvConfig::from_env_id(id)?;
    config.apply_kwargs(kwargs)?;
    make_train_env(&config, emulator)
}

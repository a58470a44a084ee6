//! Dense reward shaping with stall detection and recovery.

use log::debug;

use crate::core::{Env, GymError, Result, Step, StepInfo};
use crate::envs::levels::{Level, LevelCursor};
use crate::envs::DiscreteEnv;
use crate::spaces::Space;
use crate::utils::frame::{process_frame, ProcessedFrame, RawFrame};
use crate::utils::rng::RngStream;
use crate::utils::video::VideoSink;

/// Score points worth one unit of reward.
pub const SCORE_DIVISOR: f32 = 40.0;
/// Added on reaching the flag, subtracted on any other episode end.
pub const GOAL_BONUS: f32 = 50.0;
/// Steps without a new maximum x before each further step is penalized.
pub const STALL_LIMIT: u32 = 50;
pub const STALL_PENALTY: f32 = 1.0;
/// Penalized stall steps tolerated before random actions are forced.
pub const STALL_RECOVERY_THRESHOLD: u32 = 25;
pub const FORCED_RANDOM_STEPS: usize = 2;
/// Every returned reward is divided by this after shaping.
pub const REWARD_SCALE: f32 = 10.0;

/// Progress bookkeeping for one episode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EpisodeState {
    pub previous_score: i64,
    pub max_x_pos: i64,
    pub stall_steps: u32,
    pub forced_random_steps: u32,
}

/// Additive terms of one shaped step, before scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RewardBreakdown {
    /// Reward reported by the game.
    pub base: f32,
    pub score: f32,
    pub terminal: f32,
    pub stall: f32,
}

impl RewardBreakdown {
    pub fn total(&self) -> f32 { self.base + self.score + self.terminal + self.stall }
}

impl EpisodeState {
    pub fn new() -> Self { Self::default() }

    /// Apply score, terminal and stall shaping, in that order, to one step.
    pub fn shape(&mut self, base: f32, done: bool, info: &StepInfo) -> RewardBreakdown {
        let mut terms = RewardBreakdown { base, ..RewardBreakdown::default() };

        terms.score = (info.score - self.previous_score) as f32 / SCORE_DIVISOR;
        self.previous_score = info.score;

        if done {
            self.max_x_pos = 0;
            self.stall_steps = 0;
            self.forced_random_steps = 0;
            terms.terminal = if info.flag_get { GOAL_BONUS } else { -GOAL_BONUS };
        }

        if info.x_pos > self.max_x_pos {
            self.max_x_pos = info.x_pos;
            self.stall_steps = 0;
            self.forced_random_steps = 0;
        } else {
            self.stall_steps += 1;
            if self.stall_steps > STALL_LIMIT {
                terms.stall = -STALL_PENALTY;
                self.forced_random_steps += 1;
            }
        }
        terms
    }

    pub fn needs_recovery(&self) -> bool { self.forced_random_steps > STALL_RECOVERY_THRESHOLD }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Active,
    /// The next step starts with a burst of random actions.
    StallRecovery,
    /// The episode ended; `reset` is required.
    Done,
}

/// Turns the raw game into shaped-reward, preprocessed single-frame steps.
///
/// Each `reset` advances the level cursor and loads the selected level. Each
/// `step` returns the processed frame and `shaped / REWARD_SCALE`; the info
/// record is passed through untouched.
pub struct RewardShaping<E: DiscreteEnv> {
    env: E,
    cursor: LevelCursor,
    rng: RngStream,
    sink: Option<VideoSink>,
    state: EpisodeState,
    last: RewardBreakdown,
    done: bool,
}

impl<E: DiscreteEnv> RewardShaping<E> {
    /// `rng` drives the stall-recovery action sampler.
    pub fn new(env: E, cursor: LevelCursor, rng: RngStream) -> Self {
        Self {
            env,
            cursor,
            rng,
            sink: None,
            state: EpisodeState::new(),
            last: RewardBreakdown::default(),
            done: true,
        }
    }

    /// Record every raw frame produced by `step` to `sink`.
    pub fn with_video(mut self, sink: VideoSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn episode_state(&self) -> &EpisodeState { &self.state }

    pub fn last_breakdown(&self) -> &RewardBreakdown { &self.last }

    /// Level of the current episode.
    pub fn level(&self) -> Level { self.cursor.current() }

    pub fn phase(&self) -> Phase {
        if self.done {
            Phase::Done
        } else if self.state.needs_recovery() {
            Phase::StallRecovery
        } else {
            Phase::Active
        }
    }

    pub fn inner(&self) -> &E { &self.env }
    pub fn inner_mut(&mut self) -> &mut E { &mut self.env }

    /// Run the random-action burst. Returns the last step if it ended the episode.
    fn recover_from_stall(&mut self) -> Result<Option<Step<Option<RawFrame>>>> {
        debug!(
            "no progress past x={} on {}, forcing {} random actions",
            self.state.max_x_pos, self.cursor.current(), FORCED_RANDOM_STEPS
        );
        let mut ended = None;
        for _ in 0..FORCED_RANDOM_STEPS {
            let action = self.env.action_space().sample(&mut self.rng);
            let step = self.env.step(action)?;
            if step.done {
                ended = Some(step);
                break;
            }
        }
        self.state.forced_random_steps = 0;
        Ok(ended)
    }
}

impl<E: DiscreteEnv> Env for RewardShaping<E> {
    type Obs = ProcessedFrame;
    type Act = u32;

    fn reset(&mut self) -> Result<Self::Obs> {
        self.state = EpisodeState::new();
        self.last = RewardBreakdown::default();
        let level = self.cursor.advance();
        self.env.select_level(level)?;
        let frame = self.env.reset()?;
        self.done = false;
        Ok(process_frame(Some(&frame)))
    }

    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> {
        if self.done {
            return Err(GymError::NotReady("episode is over, call reset()".into()));
        }
        let ended = if self.state.needs_recovery() { self.recover_from_stall()? } else { None };
        let raw = match ended {
            Some(step) => step,
            None => self.env.step(action)?,
        };

        let Step { observation, reward, done, info } = raw;
        if let (Some(sink), Some(frame)) = (self.sink.as_mut(), observation.as_ref()) {
            sink.record(frame);
        }
        let frame = process_frame(observation.as_ref());

        self.last = self.state.shape(reward, done, &info);
        self.done = done;
        Ok(Step::new(frame, self.last.total() / REWARD_SCALE, done, info))
    }

    fn close(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            sink.close();
        }
        self.env.close();
    }
}

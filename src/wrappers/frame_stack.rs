use ndarray::{concatenate, Axis};

use crate::core::{Env, Result, Step};
use crate::utils::frame::{ProcessedFrame, StackedObservation};

pub const DEFAULT_SKIP: usize = 4;

/// Repeats each action for `skip + 1` inner steps and stacks their frames
/// along the channel axis.
///
/// The returned reward is the reward of the most recent inner step only. The
/// sum over the repeated steps is available from [`FrameSkipStack::skipped_reward`].
pub struct FrameSkipStack<E>
where
    E: Env<Obs = ProcessedFrame>,
{
    inner: E,
    skip: usize,
    skipped_reward: f32,
}

impl<E> FrameSkipStack<E>
where
    E: Env<Obs = ProcessedFrame>,
{
    pub fn new(inner: E, skip: usize) -> Self { Self { inner, skip, skipped_reward: 0.0 } }

    /// Number of frames per observation.
    pub fn channels(&self) -> usize { self.skip + 1 }

    /// Rewards of the repeated steps after the first one in the last `step` call.
    pub fn skipped_reward(&self) -> f32 { self.skipped_reward }

    pub fn inner(&self) -> &E { &self.inner }
    pub fn inner_mut(&mut self) -> &mut E { &mut self.inner }
    pub fn into_inner(self) -> E { self.inner }
}

fn stack(frames: &[ProcessedFrame]) -> Result<StackedObservation> {
    let views: Vec<_> = frames.iter().map(|f| f.view()).collect();
    Ok(concatenate(Axis(0), &views)?)
}

impl<E> Env for FrameSkipStack<E>
where
    E: Env<Obs = ProcessedFrame>,
    E::Act: Clone,
{
    type Obs = StackedObservation;
    type Act = E::Act;

    fn reset(&mut self) -> Result<Self::Obs> {
        self.skipped_reward = 0.0;
        let frame = self.inner.reset()?;
        stack(&vec![frame; self.channels()])
    }

    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> {
        let Step { observation, mut reward, mut done, mut info } = self.inner.step(action.clone())?;
        let mut frames = Vec::with_capacity(self.channels());
        frames.push(observation);

        let mut total_reward = 0.0;
        for _ in 0..self.skip {
            if done {
                let last = frames[frames.len() - 1].clone();
                frames.push(last);
                continue;
            }
            let s = self.inner.step(action.clone())?;
            total_reward += s.reward;
            reward = s.reward;
            done = s.done;
            info = s.info;
            frames.push(s.observation);
        }
        self.skipped_reward = total_reward;

        Ok(Step::new(stack(&frames)?, reward, done, info))
    }

    fn close(&mut self) { self.inner.close() }
}

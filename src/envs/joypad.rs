use crate::core::{GymError, Result, Step};
use crate::spaces::{Discrete, Space};
use crate::utils::frame::RawFrame;

use super::actions::{joypad_mask, Combo};
use super::levels::Level;
use super::{DiscreteEnv, Emulator};

/// Maps action indices to joypad button combinations of one catalog.
pub struct JoypadSpace<E: Emulator> {
    inner: E,
    combos: &'static [Combo],
    masks: Vec<u8>,
    action_space: Discrete,
}

impl<E: Emulator> JoypadSpace<E> {
    pub fn new(inner: E, combos: &'static [Combo]) -> Self {
        let masks = combos.iter().map(|c| joypad_mask(c)).collect();
        Self { inner, combos, masks, action_space: Discrete::new(combos.len() as u32) }
    }

    /// Human-readable button names for each action index.
    pub fn action_meanings(&self) -> Vec<String> {
        self.combos
            .iter()
            .map(|c| {
                if c.is_empty() {
                    "NOOP".to_string()
                } else {
                    c.iter().map(|b| format!("{:?}", b)).collect::<Vec<_>>().join("+")
                }
            })
            .collect()
    }

    pub fn inner(&self) -> &E { &self.inner }
    pub fn inner_mut(&mut self) -> &mut E { &mut self.inner }
    pub fn into_inner(self) -> E { self.inner }
}

impl<E: Emulator> DiscreteEnv for JoypadSpace<E> {
    fn reset(&mut self) -> Result<RawFrame> { self.inner.reset() }

    fn step(&mut self, action: u32) -> Result<Step<Option<RawFrame>>> {
        if !self.action_space.contains(&action) {
            return Err(GymError::InvalidAction(format!(
                "action {} outside Discrete({})", action, self.action_space.n()
            )));
        }
        self.inner.step(self.masks[action as usize])
    }

    fn action_space(&self) -> &Discrete { &self.action_space }

    fn select_level(&mut self, level: Level) -> Result<()> { self.inner.select_level(level) }

    fn close(&mut self) { self.inner.close() }
}

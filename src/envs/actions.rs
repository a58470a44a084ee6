//! Controller buttons and the three discrete action catalogs.

use std::fmt;

use crate::core::{GymError, Result};

/// NES controller buttons with their bit in the joypad register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Right,
    Left,
    Down,
    Up,
    Start,
    Select,
    B,
    A,
}

impl Button {
    pub const fn mask(self) -> u8 {
        match self {
            Button::Right => 0b1000_0000,
            Button::Left => 0b0100_0000,
            Button::Down => 0b0010_0000,
            Button::Up => 0b0001_0000,
            Button::Start => 0b0000_1000,
            Button::Select => 0b0000_0100,
            Button::B => 0b0000_0010,
            Button::A => 0b0000_0001,
        }
    }
}

/// A set of buttons held together for one step. Empty means NOOP.
pub type Combo = &'static [Button];

/// Combine buttons into the joypad register value.
pub fn joypad_mask(combo: &[Button]) -> u8 {
    combo.iter().fold(0, |acc, b| acc | b.mask())
}

use Button::{A, B, Down, Left, Right, Up};

pub const RIGHT_ONLY: &[Combo] = &[
    &[],
    &[Right],
    &[Right, A],
    &[Right, B],
    &[Right, A, B],
];

pub const SIMPLE_MOVEMENT: &[Combo] = &[
    &[],
    &[Right],
    &[Right, A],
    &[Right, B],
    &[Right, A, B],
    &[A],
    &[Left],
];

pub const COMPLEX_MOVEMENT: &[Combo] = &[
    &[],
    &[Right],
    &[Right, A],
    &[Right, B],
    &[Right, A, B],
    &[A],
    &[Left],
    &[Left, A],
    &[Left, B],
    &[Left, A, B],
    &[Down],
    &[Up],
];

/// Which action catalog the agent acts in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ActionType {
    Right,
    #[default]
    Simple,
    Complex,
}

impl ActionType {
    pub fn actions(self) -> &'static [Combo] {
        match self {
            ActionType::Right => RIGHT_ONLY,
            ActionType::Simple => SIMPLE_MOVEMENT,
            ActionType::Complex => COMPLEX_MOVEMENT,
        }
    }

    pub fn num_actions(self) -> usize { self.actions().len() }
}

impl std::str::FromStr for ActionType {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "right" => Ok(ActionType::Right),
            "simple" => Ok(ActionType::Simple),
            "complex" => Ok(ActionType::Complex),
            other => Err(GymError::InvalidConfig(format!("unknown action type: {}", other))),
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionType::Right => "right",
            ActionType::Simple => "simple",
            ActionType::Complex => "complex",
        })
    }
}

//! Level grid and the cursor that picks the level for each new episode.

use std::fmt;

use log::{info, warn};

use crate::core::{GymError, Result};
use crate::spaces::{Discrete, Space};
use crate::utils::rng::RngStream;

pub const WORLDS: u8 = 8;
pub const STAGES: u8 = 4;

/// Auto-scrolling castle levels (4-4 and 7-4) that never terminate normally
/// under this pipeline's reward and stall handling.
pub const UNSUPPORTED_LEVELS: [Level; 2] = [Level { world: 3, stage: 3 }, Level { world: 6, stage: 3 }];

/// A cell of the world/stage grid, zero-indexed.
///
/// Only constructible through [`Level::new`] and [`Level::from_one_indexed`],
/// so every value lies on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Level {
    world: u8,
    stage: u8,
}

impl Level {
    pub const FIRST: Level = Level { world: 0, stage: 0 };
    pub const LAST: Level = Level { world: WORLDS - 1, stage: STAGES - 1 };

    /// Zero-indexed constructor.
    pub fn new(world: u8, stage: u8) -> Result<Self> {
        if world >= WORLDS || stage >= STAGES {
            return Err(GymError::InvalidConfig(format!(
                "level ({}, {}) outside the {}x{} grid", world, stage, WORLDS, STAGES
            )));
        }
        Ok(Self { world, stage })
    }

    /// Build from the in-game numbering, e.g. `(1, 1)` for the first level.
    pub fn from_one_indexed(world: u8, stage: u8) -> Result<Self> {
        if world == 0 || stage == 0 {
            return Err(GymError::InvalidConfig(format!("level {}-{} is not one-indexed", world, stage)));
        }
        Self::new(world - 1, stage - 1)
    }

    pub const fn world(&self) -> u8 { self.world }

    pub const fn stage(&self) -> u8 { self.stage }

    pub fn is_supported(&self) -> bool { !UNSUPPORTED_LEVELS.contains(self) }

    /// The following cell in row-major order, wrapping to the first cell.
    pub fn successor(self) -> Level {
        let mut world = self.world;
        let mut stage = self.stage + 1;
        if stage > STAGES - 1 {
            stage = 0;
            world += 1;
        }
        if world > WORLDS - 1 {
            world = 0;
            stage = 0;
        }
        Level { world, stage }
    }
}

impl Default for Level {
    fn default() -> Self { Level::FIRST }
}

/// Displays in the in-game one-indexed form, e.g. `4-4`.
impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.world + 1, self.stage + 1)
    }
}

/// Which policy the cursor uses between episodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LevelSelection {
    #[default]
    Sequential,
    Random,
}

impl std::str::FromStr for LevelSelection {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" | "next" => Ok(LevelSelection::Sequential),
            "random" => Ok(LevelSelection::Random),
            other => Err(GymError::InvalidConfig(format!("unknown level selection: {}", other))),
        }
    }
}

/// Chooses the level of the next episode from the current one.
pub trait LevelPolicy {
    fn next_level(&mut self, current: Level) -> Level;
}

/// Walks the grid row-major: 1-1, 1-2, ..., 8-4, 1-1, ...
#[derive(Clone, Copy, Debug, Default)]
pub struct Sequential;

impl LevelPolicy for Sequential {
    fn next_level(&mut self, current: Level) -> Level { current.successor() }
}

/// Uniform draw over the grid, redrawing unsupported levels.
#[derive(Clone, Debug)]
pub struct RandomStages {
    rng: RngStream,
    worlds: Discrete,
    stages: Discrete,
}

impl RandomStages {
    pub fn new(rng: RngStream) -> Self {
        Self { rng, worlds: Discrete::new(WORLDS as u32), stages: Discrete::new(STAGES as u32) }
    }
}

impl LevelPolicy for RandomStages {
    fn next_level(&mut self, _current: Level) -> Level {
        loop {
            let level = Level {
                world: self.worlds.sample(&mut self.rng) as u8,
                stage: self.stages.sample(&mut self.rng) as u8,
            };
            if level.is_supported() {
                return level;
            }
        }
    }
}

/// Owns the current grid cell. Advanced exactly once per episode reset.
pub struct LevelCursor {
    current: Level,
    policy: Box<dyn LevelPolicy + Send>,
}

impl LevelCursor {
    pub fn new(start: Level, policy: Box<dyn LevelPolicy + Send>) -> Self {
        Self { current: start, policy }
    }

    pub fn sequential(start: Level) -> Self { Self::new(start, Box::new(Sequential)) }

    pub fn random(start: Level, rng: RngStream) -> Self { Self::new(start, Box::new(RandomStages::new(rng))) }

    pub fn from_selection(selection: LevelSelection, start: Level, rng: RngStream) -> Self {
        match selection {
            LevelSelection::Sequential => Self::sequential(start),
            LevelSelection::Random => Self::random(start, rng),
        }
    }

    pub fn current(&self) -> Level { self.current }

    /// Move to the next level and return it.
    pub fn advance(&mut self) -> Level {
        self.current = self.policy.next_level(self.current);
        if !self.current.is_supported() {
            warn!("level {} auto-scrolls and may not terminate normally", self.current);
        }
        info!("selecting level: {}", self.current);
        self.current
    }
}

impl fmt::Debug for LevelCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelCursor").field("current", &self.current).finish_non_exhaustive()
    }
}

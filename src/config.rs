//! Construction parameters for a training environment.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::core::{GymError, Result};
use crate::envs::actions::ActionType;
use crate::envs::levels::{Level, LevelSelection};
use crate::wrappers::frame_stack::DEFAULT_SKIP;

/// Key-value construction arguments, as passed on a command line.
pub type KwArgs = HashMap<String, String>;

const ID_PREFIX: &str = "SuperMarioBros";
const RANDOM_STAGES_ID: &str = "SuperMarioBrosRandomStages-v0";

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvConfig {
    /// One-indexed world the level cursor starts from.
    pub world: u8,
    /// One-indexed stage the level cursor starts from.
    pub stage: u8,
    pub action_type: ActionType,
    /// Where to write an mpeg4 recording of every frame, if anywhere.
    pub output_path: Option<PathBuf>,
    pub level_selection: LevelSelection,
    /// Extra repeats of each action; observations have `skip + 1` channels.
    pub skip: usize,
    /// Root seed for level sampling and stall recovery. Entropy when unset.
    pub seed: Option<u64>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            world: 1,
            stage: 1,
            action_type: ActionType::default(),
            output_path: None,
            level_selection: LevelSelection::default(),
            skip: DEFAULT_SKIP,
            seed: None,
        }
    }
}

impl EnvConfig {
    pub fn new(world: u8, stage: u8) -> Self { Self { world, stage, ..Self::default() } }

    pub fn with_action_type(mut self, action_type: ActionType) -> Self {
        self.action_type = action_type;
        self
    }

    pub fn with_output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_level_selection(mut self, selection: LevelSelection) -> Self {
        self.level_selection = selection;
        self
    }

    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Zero-indexed starting level.
    pub fn level(&self) -> Result<Level> { Level::from_one_indexed(self.world, self.stage) }

    pub fn validate(&self) -> Result<()> {
        self.level().map(|_| ())
    }

    /// Identifier in the `SuperMarioBros-<world>-<stage>-v0` form.
    pub fn env_id(&self) -> String {
        match self.level_selection {
            LevelSelection::Random => RANDOM_STAGES_ID.to_string(),
            LevelSelection::Sequential => format!("{}-{}-{}-v0", ID_PREFIX, self.world, self.stage),
        }
    }

    /// Parse `SuperMarioBros-<world>-<stage>-v0` or `SuperMarioBrosRandomStages-v0`.
    pub fn from_env_id(id: &str) -> Result<Self> {
        if id == RANDOM_STAGES_ID {
            return Ok(Self::default().with_level_selection(LevelSelection::Random));
        }
        let invalid = || GymError::InvalidConfig(format!("unrecognized environment id: {}", id));
        let parts: Vec<&str> = id.split('-').collect();
        let [prefix, world, stage, version] = parts.as_slice() else {
            return Err(invalid());
        };
        if *prefix != ID_PREFIX || *version != "v0" {
            return Err(invalid());
        }
        let world = world.parse().map_err(|_| invalid())?;
        let stage = stage.parse().map_err(|_| invalid())?;
        let config = Self::new(world, stage);
        config.validate()?;
        Ok(config)
    }

    pub fn from_kwargs(kwargs: &KwArgs) -> Result<Self> {
        let mut config = Self::default();
        config.apply_kwargs(kwargs)?;
        Ok(config)
    }

    /// Override fields from string arguments. Unknown keys are rejected.
    pub fn apply_kwargs(&mut self, kwargs: &KwArgs) -> Result<()> {
        for (key, value) in kwargs {
            match key.as_str() {
                "world" => self.world = parse_value(key, value)?,
                "stage" => self.stage = parse_value(key, value)?,
                "action_type" => self.action_type = value.parse()?,
                "output_path" => self.output_path = Some(PathBuf::from(value)),
                "level_selection" => self.level_selection = value.parse()?,
                "skip" => self.skip = parse_value(key, value)?,
                "seed" => self.seed = Some(parse_value(key, value)?),
                other => return Err(GymError::InvalidConfig(format!("unknown argument: {}", other))),
            }
        }
        self.validate()
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| GymError::InvalidConfig(format!("invalid value for {}: {:?}", key, value)))
}

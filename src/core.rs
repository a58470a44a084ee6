// Core traits and types shared by the emulator boundary and the wrapper stages.

/// A small ordered key-value map for auxiliary per-step emulator fields
/// (coins, time, life, status, ...). The wrappers never read it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Info {
    entries: Vec<(String, InfoValue)>,
}

impl Info {
    /// Create an empty Info map.
    pub fn new() -> Self { Self { entries: Vec::new() } }

    /// Insert or replace a key with the given value.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: InfoValue) {
        let k = key.into();
        if let Some((_, v)) = self.entries.iter_mut().find(|(kk, _)| kk == &k) {
            *v = value;
        } else {
            self.entries.push((k, value));
        }
    }

    /// Get a reference to a value by key.
    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InfoValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn len(&self) -> usize { self.entries.len() }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoValue {
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
}

impl From<bool> for InfoValue { fn from(v: bool) -> Self { InfoValue::Bool(v) } }
impl From<i64> for InfoValue { fn from(v: i64) -> Self { InfoValue::I64(v) } }
impl From<i32> for InfoValue { fn from(v: i32) -> Self { InfoValue::I64(v as i64) } }
impl From<f64> for InfoValue { fn from(v: f64) -> Self { InfoValue::F64(v) } }
impl From<&str> for InfoValue { fn from(v: &str) -> Self { InfoValue::Str(v.to_string()) } }
impl From<String> for InfoValue { fn from(v: String) -> Self { InfoValue::Str(v) } }

/// Structured metadata the emulator reports on every step.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepInfo {
    /// Cumulative in-game score.
    pub score: i64,
    /// Horizontal position of the player in level coordinates.
    pub x_pos: i64,
    /// Whether the goal flag was reached on this step.
    pub flag_get: bool,
    /// Anything else the emulator wants to pass through.
    pub extra: Info,
}

impl StepInfo {
    pub fn new(score: i64, x_pos: i64, flag_get: bool) -> Self {
        Self { score, x_pos, flag_get, extra: Info::new() }
    }
}

/// A step result.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<Obs> {
    pub observation: Obs,
    pub reward: f32,
    pub done: bool,
    pub info: StepInfo,
}

impl<Obs> Step<Obs> {
    pub fn new(observation: Obs, reward: f32, done: bool, info: StepInfo) -> Self {
        Self { observation, reward, done, info }
    }
}

/// Errors surfaced by environments, wrappers and construction.
#[derive(thiserror::Error, Debug)]
pub enum GymError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Environment not ready: {0}")]
    NotReady(String),
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
    #[error("Other error: {0}")]
    Other(String),
}

/// Convenience alias for results using GymError.
pub type Result<T> = std::result::Result<T, GymError>;

/// A composable pipeline stage with the reset/step contract.
///
/// Failures of the underlying emulator are not handled by any stage; they
/// propagate to the caller through `Result`.
pub trait Env {
    type Obs;
    type Act;

    /// Start a new episode and return its first observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Apply an action and advance the environment.
    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>>;

    /// Close and release any external resources.
    fn close(&mut self) {}
}

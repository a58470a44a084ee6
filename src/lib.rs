//! Super Mario Bros. environment wrappers for reinforcement learning.
//!
//! The emulator is supplied by the caller through [`envs::Emulator`]; this
//! crate turns it into a training environment:
//!
//! ```text
//! Emulator -> JoypadSpace -> RewardShaping -> FrameSkipStack
//! ```
//!
//! with a [`envs::LevelCursor`] choosing the level of every episode and an
//! optional [`utils::VideoSink`] recording raw frames.

pub mod core;
pub mod config;
pub mod envs;
pub mod registry;
pub mod spaces;
pub mod utils;
pub mod wrappers;

pub use crate::core::{Env, GymError, Info, InfoValue, Result, Step, StepInfo};
pub use crate::config::{EnvConfig, KwArgs};
pub use crate::envs::{ActionType, DiscreteEnv, Emulator, JoypadSpace, Level, LevelCursor, LevelSelection};
pub use crate::registry::{make, make_train_env, TrainEnv};
pub use crate::spaces::{Discrete, Space};
pub use crate::utils::{process_frame, ProcessedFrame, RawFrame, StackedObservation, VideoSink};
pub use crate::wrappers::{EpisodeState, FrameSkipStack, Phase, RewardBreakdown, RewardShaping};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_map_inserts_and_replaces() {
        let mut info = Info::new();
        assert!(info.is_empty());
        info.insert("coins", InfoValue::from(3));
        info.insert("status", InfoValue::from("small"));
        info.insert("coins", InfoValue::from(4));
        assert_eq!(info.len(), 2);
        assert_eq!(info.get("coins"), Some(&InfoValue::I64(4)));
        let keys: Vec<&str> = info.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["coins", "status"]);
    }

    #[test]
    fn shape_errors_convert_into_gym_errors() {
        let err = ndarray::Array3::<f32>::from_shape_vec((1, 2, 2), vec![0.0; 3]).unwrap_err();
        let gym: GymError = err.into();
        assert!(matches!(gym, GymError::Shape(_)));
    }

    #[test]
    fn every_error_kind_has_a_message() {
        let errors = [
            GymError::InvalidAction("9".into()),
            GymError::InvalidConfig("world 0".into()),
            GymError::NotReady("done".into()),
            GymError::Other("emulator".into()),
        ];
        for err in &errors {
            let prefix = match err {
                GymError::InvalidAction(_) => "Invalid action",
                GymError::InvalidConfig(_) => "Invalid configuration",
                GymError::NotReady(_) => "Environment not ready",
                GymError::Shape(_) => "",
                GymError::Other(_) => "Other error",
            };
            assert!(err.to_string().starts_with(prefix), "{}", err);
        }
    }
}

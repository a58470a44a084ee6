mod common;

use std::collections::HashSet;

use common::{ScriptedEmulator, init_logging};
use smb_gymnasium::envs::actions::{joypad_mask, SIMPLE_MOVEMENT};
use smb_gymnasium::envs::levels::UNSUPPORTED_LEVELS;
use smb_gymnasium::utils::frame::FRAME_SIZE;
use smb_gymnasium::{ActionType, EnvConfig, Env, KwArgs, Level, LevelSelection, make, make_train_env};

#[test]
fn sequential_cycle_wraps_from_last_level() {
    let config = EnvConfig::new(8, 4).with_seed(1);
    let (mut env, _, _) = make_train_env(&config, ScriptedEmulator::default()).unwrap();
    env.reset().unwrap();
    assert_eq!(env.inner().level(), Level::FIRST);
    env.reset().unwrap();
    assert_eq!(env.inner().level(), Level::new(0, 1).unwrap());
    let emulator = env.inner().inner().inner();
    assert_eq!(emulator.levels, vec![Level::FIRST, Level::new(0, 1).unwrap()]);
    assert_eq!(emulator.resets, 2);
}

#[test]
fn random_selection_avoids_auto_scrolling_levels() {
    let config = EnvConfig::default().with_level_selection(LevelSelection::Random).with_seed(77);
    let (mut env, _, _) = make_train_env(&config, ScriptedEmulator::default()).unwrap();
    let mut seen = HashSet::new();
    for _ in 0..3_000 {
        env.reset().unwrap();
        seen.insert(env.inner().level());
    }
    assert!(UNSUPPORTED_LEVELS.iter().all(|l| !seen.contains(l)));
    assert_eq!(seen.len(), 30);
}

#[test]
fn same_seed_gives_same_level_sequence() {
    let config = EnvConfig::default().with_level_selection(LevelSelection::Random).with_seed(9);
    let run = || {
        let (mut env, _, _) = make_train_env(&config, ScriptedEmulator::default()).unwrap();
        (0..20).map(|_| { env.reset().unwrap(); env.inner().level() }).collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn flag_episode_through_full_pipeline() {
    init_logging();
    // Two blocks of five inner steps: steady progress, then the flag on step 7.
    let script = [
        (10, 0, false, false),
        (20, 0, false, false),
        (30, 40, false, false),
        (40, 40, false, false),
        (50, 40, false, false),
        (60, 40, false, false),
        (70, 1040, true, true),
    ];
    let config = EnvConfig::new(1, 1).with_action_type(ActionType::Simple).with_seed(0);
    let (mut env, channels, actions) = make_train_env(&config, ScriptedEmulator::new(script)).unwrap();
    assert_eq!((channels, actions), (5, SIMPLE_MOVEMENT.len()));

    let obs = env.reset().unwrap();
    assert_eq!(obs.shape(), &[5, FRAME_SIZE, FRAME_SIZE]);

    let first = env.step(2).unwrap();
    assert!(!first.done);
    // Last inner step: no score change, x improved.
    assert_eq!(first.reward, 0.0);
    assert_eq!(env.skipped_reward(), 0.1);

    let second = env.step(2).unwrap();
    assert!(second.done);
    assert!(second.info.flag_get);
    // (1040 - 40) / 40 + 50, scaled by 1/10.
    assert!((second.reward - 7.5).abs() < 1e-5);
    assert_eq!(second.observation.shape(), &[5, FRAME_SIZE, FRAME_SIZE]);

    let emulator = env.inner().inner().inner();
    assert_eq!(emulator.buttons.len(), 7);
    assert!(emulator.buttons.iter().all(|&b| b == joypad_mask(SIMPLE_MOVEMENT[2])));
}

#[test]
fn recording_never_disturbs_the_episode() {
    let mut kwargs = KwArgs::new();
    kwargs.insert("output_path".into(), std::env::temp_dir().join("smb-gymnasium-test.mp4").display().to_string());
    kwargs.insert("seed".into(), "4".into());
    let (mut env, _, _) = make("SuperMarioBros-1-1-v0", &kwargs, ScriptedEmulator::new([(5, 0, true, false)])).unwrap();
    env.reset().unwrap();
    let s = env.step(0).unwrap();
    assert!(s.done);
    env.close();
}

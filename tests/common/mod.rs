#![allow(dead_code)]

use std::collections::VecDeque;

use image::{Rgb, RgbImage};
use smb_gymnasium::{Emulator, Level, RawFrame, Result, Step, StepInfo};
use smb_gymnasium::utils::frame::{NES_HEIGHT, NES_WIDTH};

/// One scripted emulator step: (x_pos, score, done, flag_get).
pub type Beat = (i64, i64, bool, bool);

/// Plays back a fixed list of steps, then keeps repeating a neutral one.
#[derive(Default)]
pub struct ScriptedEmulator {
    pub script: VecDeque<Beat>,
    pub buttons: Vec<u8>,
    pub levels: Vec<Level>,
    pub resets: usize,
}

impl ScriptedEmulator {
    pub fn new<I: IntoIterator<Item = Beat>>(script: I) -> Self {
        Self { script: script.into_iter().collect(), ..Self::default() }
    }
}

pub fn frame(shade: u8) -> RawFrame {
    RgbImage::from_pixel(NES_WIDTH, NES_HEIGHT, Rgb([shade, shade, shade]))
}

impl Emulator for ScriptedEmulator {
    fn reset(&mut self) -> Result<RawFrame> {
        self.resets += 1;
        Ok(frame(0))
    }

    fn step(&mut self, buttons: u8) -> Result<Step<Option<RawFrame>>> {
        self.buttons.push(buttons);
        let (x_pos, score, done, flag_get) = self.script.pop_front().unwrap_or((0, 0, false, false));
        let shade = (self.buttons.len() % 256) as u8;
        Ok(Step::new(Some(frame(shade)), 0.0, done, StepInfo::new(score, x_pos, flag_get)))
    }

    fn select_level(&mut self, level: Level) -> Result<()> {
        self.levels.push(level);
        Ok(())
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

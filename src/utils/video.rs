//! Best-effort video capture through an external `ffmpeg` process.
//!
//! Raw RGB frames are streamed to the encoder's stdin. A sink whose encoder
//! could not be started, or has gone away, silently turns into a no-op; no
//! error ever leaves this module.

use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};

use log::{debug, warn};

use super::frame::RawFrame;

/// Frame rate written into the container. Purely a playback hint.
pub const ENCODER_FPS: u32 = 80;

pub const DEFAULT_ENCODER: &str = "ffmpeg";

enum Sink {
    Recording { child: Child, stdin: ChildStdin },
    Disabled,
}

pub struct VideoSink {
    width: u32,
    height: u32,
    sink: Sink,
    skipped: u64,
}

impl VideoSink {
    /// Spawn `ffmpeg` writing an mpeg4 video of `width` x `height` frames to `path`.
    pub fn new<P: AsRef<Path>>(width: u32, height: u32, path: P) -> Self {
        Self::with_encoder(DEFAULT_ENCODER, width, height, path)
    }

    /// Same as [`VideoSink::new`] with an explicit encoder executable.
    pub fn with_encoder<S, P>(program: S, width: u32, height: u32, path: P) -> Self
    where
        S: AsRef<OsStr>,
        P: AsRef<Path>,
    {
        let program = program.as_ref();
        let spawned = Command::new(program)
            .args(encoder_args(width, height, path.as_ref()))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        let sink = match spawned {
            Ok(mut child) => match child.stdin.take() {
                Some(stdin) => {
                    debug!("recording {}x{} video to {}", width, height, path.as_ref().display());
                    Sink::Recording { child, stdin }
                }
                None => {
                    let _ = child.kill();
                    let _ = child.wait();
                    Sink::Disabled
                }
            },
            Err(e) => {
                warn!("video recording disabled, cannot start {:?}: {}", program, e);
                Sink::Disabled
            }
        };
        Self { width, height, sink, skipped: 0 }
    }

    /// A sink that never records.
    pub fn disabled(width: u32, height: u32) -> Self {
        Self { width, height, sink: Sink::Disabled, skipped: 0 }
    }

    pub fn is_recording(&self) -> bool { matches!(self.sink, Sink::Recording { .. }) }

    pub fn dimensions(&self) -> (u32, u32) { (self.width, self.height) }

    /// Frames dropped because their size did not match the encoder's.
    pub fn skipped_frames(&self) -> u64 { self.skipped }

    /// Write one frame to the encoder.
    ///
    /// Frames of the wrong size are dropped; only the first one is reported.
    pub fn record(&mut self, frame: &RawFrame) {
        if !self.is_recording() {
            return;
        }
        if frame.dimensions() != (self.width, self.height) {
            if self.skipped == 0 {
                warn!(
                    "skipping {}x{} frames, encoder expects {}x{}; further mismatches are not reported",
                    frame.width(), frame.height(), self.width, self.height
                );
            }
            self.skipped += 1;
            return;
        }
        let written = match &mut self.sink {
            Sink::Recording { stdin, .. } => stdin.write_all(frame.as_raw()),
            Sink::Disabled => return,
        };
        if let Err(e) = written {
            warn!("video recording disabled, encoder stopped accepting frames: {}", e);
            self.close();
        }
    }

    /// Close the encoder input and wait for the process to finish the file.
    pub fn close(&mut self) {
        if let Sink::Recording { mut child, stdin } = std::mem::replace(&mut self.sink, Sink::Disabled) {
            drop(stdin);
            if let Err(e) = child.wait() {
                warn!("failed to wait for video encoder: {}", e);
            }
        }
    }
}

impl Drop for VideoSink {
    fn drop(&mut self) { self.close() }
}

impl std::fmt::Debug for VideoSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoSink")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("recording", &self.is_recording())
            .field("skipped", &self.skipped)
            .finish()
    }
}

fn encoder_args(width: u32, height: u32, path: &Path) -> Vec<OsString> {
    let size = format!("{}X{}", width, height);
    let fps = ENCODER_FPS.to_string();
    let mut args: Vec<OsString> = [
        "-y", "-f", "rawvideo", "-vcodec", "rawvideo", "-s", size.as_str(),
        "-pix_fmt", "rgb24", "-r", fps.as_str(), "-i", "-", "-an", "-vcodec", "mpeg4",
    ]
    .iter()
    .map(OsString::from)
    .collect();
    args.push(path.as_os_str().to_owned());
    args
}

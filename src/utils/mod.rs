pub mod frame;
pub mod rng;
pub mod video;

pub use frame::{FRAME_SIZE, NES_HEIGHT, NES_WIDTH, ProcessedFrame, RawFrame, StackedObservation, blank_frame, process_frame};
pub use rng::{RngStream, SeedSequence, rng_from_seed};
pub use video::VideoSink;

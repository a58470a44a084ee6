use image::imageops::{self, FilterType};
use image::RgbImage;
use ndarray::Array3;

/// Raw emulator frame: row-major interleaved RGB, 3 bytes per pixel.
pub type RawFrame = RgbImage;

/// Single-channel normalized frame of shape (1, FRAME_SIZE, FRAME_SIZE).
pub type ProcessedFrame = Array3<f32>;

/// Multi-channel observation of shape (skip + 1, FRAME_SIZE, FRAME_SIZE).
pub type StackedObservation = Array3<f32>;

/// Side length of a processed frame.
pub const FRAME_SIZE: usize = 84;

/// Native NES output resolution.
pub const NES_WIDTH: u32 = 256;
pub const NES_HEIGHT: u32 = 240;

/// Convert a raw frame into the network input: luminance, 84x84, scaled to [0, 1].
///
/// `None` stands for a terminal step that produced no frame and maps to an
/// all-zero frame of the same shape.
pub fn process_frame(frame: Option<&RawFrame>) -> ProcessedFrame {
    let Some(frame) = frame else {
        return blank_frame();
    };
    let gray = imageops::grayscale(frame);
    let small = imageops::resize(&gray, FRAME_SIZE as u32, FRAME_SIZE as u32, FilterType::Triangle);
    Array3::from_shape_fn((1, FRAME_SIZE, FRAME_SIZE), |(_, y, x)| {
        small.get_pixel(x as u32, y as u32).0[0] as f32 / 255.0
    })
}

/// The all-zero processed frame.
pub fn blank_frame() -> ProcessedFrame {
    Array3::zeros((1, FRAME_SIZE, FRAME_SIZE))
}

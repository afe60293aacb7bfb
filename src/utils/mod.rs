//! Utility Module
//!
//! - [`FrameTimer`]: batched frame time measurement
//! - color space conversion helpers shared by image decoding and the demo
//!   output path

pub mod frame_timer;

pub use frame_timer::FrameTimer;

/// Converts one sRGB-encoded channel value to linear.
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Converts one linear channel value to sRGB encoding.
#[must_use]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

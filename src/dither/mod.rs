//! Retro styling for pasted images: ordered dither, then palette quantization.

pub mod bayer;
pub mod palette;
pub mod pipeline;

pub use pipeline::{decode_data_url, process_bytes, process_image, MAX_IMAGE_WIDTH};

use crate::dither::bayer::disperse;
use crate::dither::palette::nearest_color;
use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose, Engine as _};
use image::imageops::FilterType;
use image::{DynamicImage, ImageOutputFormat, RgbaImage};
use std::io::Cursor;

/// Pasted images wider than this are scaled down to it.
pub const MAX_IMAGE_WIDTH: u32 = 450;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Output size for an image of `width` x `height`. Never upscales.
pub fn target_size(width: u32, height: u32) -> (u32, u32) {
    if width <= MAX_IMAGE_WIDTH {
        return (width, height);
    }
    let h = (height as u64 * MAX_IMAGE_WIDTH as u64 / width as u64) as u32;
    (MAX_IMAGE_WIDTH, h.max(1))
}

pub fn downscale(img: &DynamicImage) -> RgbaImage {
    let (w, h) = target_size(img.width(), img.height());
    let rgba = img.to_rgba8();
    if (w, h) == rgba.dimensions() {
        return rgba;
    }
    image::imageops::resize(&rgba, w, h, FilterType::Triangle)
}

/// Ordered dither plus palette quantization, in place. Alpha is untouched.
pub fn dither_in_place(img: &mut RgbaImage) {
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let [nr, ng, nb] = nearest_color(disperse([r, g, b], x, y));
        pixel.0[0] = nr;
        pixel.0[1] = ng;
        pixel.0[2] = nb;
    }
}

/// Downscale and dither, without encoding.
pub fn stylize(img: &DynamicImage) -> RgbaImage {
    let mut out = downscale(img);
    dither_in_place(&mut out);
    out
}

pub fn encode_data_url(img: &RgbaImage) -> Result<String> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
        .context("failed to encode png")?;
    Ok(format!(
        "{DATA_URL_PREFIX}{}",
        general_purpose::STANDARD.encode(buf)
    ))
}

/// Decode any `data:image/...;base64,` URL back into pixels.
pub fn decode_data_url(url: &str) -> Result<RgbaImage> {
    let Some(rest) = url.strip_prefix("data:image/") else {
        bail!("not an image data url");
    };
    let Some((_, payload)) = rest.split_once(";base64,") else {
        bail!("image data url is not base64");
    };
    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .context("invalid base64 in image data url")?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

/// Full paste pipeline for decoded pixels.
pub fn process_image(img: &DynamicImage) -> Result<String> {
    let out = stylize(img);
    tracing::debug!(
        "stylized pasted image {}x{} -> {}x{}",
        img.width(),
        img.height(),
        out.width(),
        out.height()
    );
    encode_data_url(&out)
}

/// Full paste pipeline for encoded image bytes (png, jpeg, ...).
pub fn process_bytes(bytes: &[u8]) -> Result<String> {
    let img = image::load_from_memory(bytes).context("pasted data is not a decodable image")?;
    process_image(&img)
}

use crate::dither;
use arboard::Clipboard;
use image::{DynamicImage, RgbaImage};

/// Stylize the image currently on the system clipboard.
///
/// Returns `Ok(None)` when the clipboard holds no image; such pastes are
/// ignored.
pub fn paste_image() -> anyhow::Result<Option<String>> {
    let mut cb = Clipboard::new()?;
    let img = match cb.get_image() {
        Ok(img) => img,
        Err(e) => {
            tracing::debug!("clipboard has no image: {e}");
            return Ok(None);
        }
    };
    let Some(buf) = RgbaImage::from_raw(img.width as u32, img.height as u32, img.bytes.into_owned())
    else {
        tracing::debug!("clipboard image has inconsistent dimensions");
        return Ok(None);
    };
    let url = dither::process_image(&DynamicImage::ImageRgba8(buf))?;
    Ok(Some(url))
}

/// Stylize raw clipboard/file bytes if they decode as an image.
pub fn paste_image_bytes(bytes: &[u8]) -> Option<String> {
    match dither::process_bytes(bytes) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("ignoring paste: {e:#}");
            None
        }
    }
}

pub fn set_text(text: &str) -> anyhow::Result<()> {
    let mut cb = Clipboard::new()?;
    cb.set_text(text.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_image_bytes_are_ignored() {
        assert_eq!(paste_image_bytes(b"plain text"), None);
    }
}

use crate::dither;
use eframe::egui;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

/// Decoded note images keyed by a hash of their data URL.
///
/// Failed decodes are remembered too so a broken marker is not retried
/// every frame.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<u64, Option<egui::TextureHandle>>,
}

fn key_for(data_url: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    data_url.hash(&mut hasher);
    hasher.finish()
}

impl TextureCache {
    pub fn get(&mut self, ctx: &egui::Context, data_url: &str) -> Option<egui::TextureHandle> {
        let key = key_for(data_url);
        self.textures
            .entry(key)
            .or_insert_with(|| match dither::decode_data_url(data_url) {
                Ok(img) => {
                    let size = [img.width() as usize, img.height() as usize];
                    Some(ctx.load_texture(
                        format!("note-image-{key:x}"),
                        egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw()),
                        egui::TextureOptions::NEAREST,
                    ))
                }
                Err(e) => {
                    tracing::warn!("failed to decode note image: {e:#}");
                    None
                }
            })
            .clone()
    }

    /// Drop every texture whose data URL is not in `referenced`.
    pub fn retain_referenced<'a>(&mut self, referenced: impl IntoIterator<Item = &'a str>) {
        let keep: HashSet<u64> = referenced.into_iter().map(key_for).collect();
        let before = self.textures.len();
        self.textures.retain(|key, _| keep.contains(key));
        if self.textures.len() != before {
            tracing::debug!("released {} note images", before - self.textures.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn data_url(shade: u8) -> String {
        let img = RgbaImage::from_pixel(2, 2, image::Rgba([shade, shade, shade, 255]));
        dither::pipeline::encode_data_url(&img).unwrap()
    }

    #[test]
    fn unreferenced_images_are_released() {
        let ctx = egui::Context::default();
        let mut cache = TextureCache::default();
        let kept = data_url(10);
        let dropped = data_url(200);
        assert!(cache.get(&ctx, &kept).is_some());
        assert!(cache.get(&ctx, &dropped).is_some());
        assert!(cache.get(&ctx, "data:image/png;base64,broken").is_none());
        assert_eq!(cache.textures.len(), 3);

        cache.retain_referenced([kept.as_str()]);
        assert_eq!(cache.textures.len(), 1);
        assert!(cache.textures.contains_key(&key_for(&kept)));
    }
}

/// 8x8 ordered-dither threshold matrix, values 0..=63.
pub const BAYER_8X8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Signed channel offset for pixel `(x, y)`: `(cell / 64 - 0.5) * 64`.
pub fn threshold_offset(x: u32, y: u32) -> i32 {
    BAYER_8X8[(y % 8) as usize][(x % 8) as usize] as i32 - 32
}

/// Add the pattern offset to each RGB channel, clamped to `0..=255`.
pub fn disperse(rgb: [u8; 3], x: u32, y: u32) -> [u8; 3] {
    let offset = threshold_offset(x, y);
    rgb.map(|c| (c as i32 + offset).clamp(0, 255) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn matrix_holds_each_level_once() {
        let values: HashSet<u8> = BAYER_8X8.iter().flatten().copied().collect();
        assert_eq!(values.len(), 64);
        assert!(values.iter().all(|&v| v < 64));
    }

    #[test]
    fn offsets_tile_every_eight_pixels() {
        assert_eq!(threshold_offset(0, 0), -32);
        assert_eq!(threshold_offset(8, 16), -32);
        assert_eq!(threshold_offset(0, 7), 31);
        assert_eq!(threshold_offset(13, 2), threshold_offset(5, 2));
    }

    #[test]
    fn disperse_clamps() {
        assert_eq!(disperse([10, 128, 250], 0, 0), [0, 96, 218]);
        assert_eq!(disperse([240, 0, 128], 0, 7), [255, 31, 159]);
    }
}

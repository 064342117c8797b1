/// Fixed palette pasted images are reduced to.
pub const PALETTE: [[u8; 3]; 26] = [
    // note colors
    [232, 228, 160],
    [160, 200, 232],
    [232, 160, 160],
    [160, 232, 176],
    [232, 200, 160],
    [200, 160, 232],
    // board chrome
    [26, 42, 42],
    [122, 158, 158],
    [240, 240, 232],
    // grayscale ramp
    [0, 0, 0],
    [32, 32, 32],
    [64, 64, 64],
    [96, 96, 96],
    [128, 128, 128],
    [160, 160, 160],
    [192, 192, 192],
    [224, 224, 224],
    [255, 255, 255],
    // skin tones
    [200, 160, 140],
    [180, 130, 110],
    [140, 100, 80],
    [100, 70, 50],
    // muted accents
    [180, 180, 160],
    [160, 140, 120],
    [140, 160, 140],
    [120, 140, 160],
];

/// Nearest palette entry by squared RGB distance. Ties go to the entry
/// declared first.
pub fn nearest_color(rgb: [u8; 3]) -> [u8; 3] {
    let mut best = PALETTE[0];
    let mut best_dist = u32::MAX;
    for color in PALETTE {
        let dist = distance_sq(rgb, color);
        if dist < best_dist {
            best_dist = dist;
            best = color;
        }
    }
    best
}

fn distance_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

//! Viridis colormap

/// Viridis sampled at eight evenly spaced stops
const VIRIDIS_STOPS: [[u8; 3]; 8] = [
    [0x44, 0x01, 0x54],
    [0x46, 0x33, 0x7e],
    [0x36, 0x5c, 0x8d],
    [0x27, 0x7f, 0x8e],
    [0x1f, 0xa1, 0x87],
    [0x4a, 0xc1, 0x6d],
    [0x9f, 0xda, 0x3a],
    [0xfd, 0xe7, 0x25],
];

/// Opaque RGBA for a normalized value; input outside `[0, 1]` is clamped
pub fn viridis(t: f64) -> [u8; 4] {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let segments = (VIRIDIS_STOPS.len() - 1) as f64;
    let position = t * segments;
    let lower = (position.floor() as usize).min(VIRIDIS_STOPS.len() - 2);
    let fraction = position - lower as f64;

    let lo = VIRIDIS_STOPS.get(lower).copied().unwrap_or([0, 0, 0]);
    let hi = VIRIDIS_STOPS.get(lower + 1).copied().unwrap_or(lo);

    let mix = |a: u8, b: u8| {
        let value = f64::from(a) + (f64::from(b) - f64::from(a)) * fraction;
        value.round().clamp(0.0, 255.0) as u8
    };

    [mix(lo[0], hi[0]), mix(lo[1], hi[1]), mix(lo[2], hi[2]), 255]
}

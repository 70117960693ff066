//! Procedural checkerboard texture.

/// Texel format of the checkerboard.
pub const CHECKER_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

const LIGHT: u8 = 0xFF;
const DARK: u8 = 0x0A;

/// Bit of `x ^ y` that selects light squares (64-texel checks).
const CHECK_BIT: u32 = 0b100_0000;

/// Whether texel `(x, y)` is a light square.
#[inline]
pub fn is_light(x: u32, y: u32) -> bool {
    (x ^ y) & CHECK_BIT != 0
}

/// Generates a `size`×`size` RGBA8 checkerboard, rows top to bottom.
///
/// Light texels are `0xFF`, dark texels `0x0A`; alpha is always opaque.
pub fn checkerboard_rgba(size: u32) -> Vec<u8> {
    let mut texels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let c = if is_light(x, y) { LIGHT } else { DARK };
            texels.extend_from_slice(&[c, c, c, 0xFF]);
        }
    }
    texels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texel(data: &[u8], size: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * size + x) * 4) as usize;
        [data[i], data[i + 1], data[i + 2], data[i + 3]]
    }

    #[test]
    fn sample_points() {
        assert!(!is_light(0, 0));
        assert!(is_light(64, 0));
        assert!(is_light(0, 64));
        assert!(!is_light(64, 64));
        assert!(!is_light(63, 63));
        assert!(is_light(127, 0));
    }

    #[test]
    fn rgba_matches_predicate() {
        let size = 128;
        let data = checkerboard_rgba(size);
        assert_eq!(data.len(), 128 * 128 * 4);

        for (x, y) in [(0, 0), (64, 0), (0, 64), (64, 64), (100, 3), (5, 127)] {
            let expected = if is_light(x, y) { 0xFF } else { 0x0A };
            assert_eq!(texel(&data, size, x, y), [expected, expected, expected, 0xFF]);
        }
    }

    #[test]
    fn alpha_is_always_opaque() {
        let data = checkerboard_rgba(128);
        assert!(data.chunks_exact(4).all(|px| px[3] == 0xFF));
    }
}

//! Small color helpers.
//!
//! Colors travel through the crate as `Vec3` RGB in 0.0-1.0, with alpha
//! carried separately where a draw call needs it.

use glam::Vec3;

/// Convert HSL to RGB.
///
/// * `hue` - degrees, wraps at 360 (red -> yellow -> green -> cyan -> blue -> magenta)
/// * `saturation` - 0.0 (gray) to 1.0 (vivid)
/// * `lightness` - 0.0 (black) to 1.0 (white)
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Vec3 {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

/// RGB color from a packed `0xRRGGBB` literal.
pub fn hex(rgb: u32) -> Vec3 {
    Vec3::new(
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 0.005
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(hsl_to_rgb(120.0, 1.0, 0.5), Vec3::new(0.0, 1.0, 0.0)));
        assert!(close(hsl_to_rgb(240.0, 1.0, 0.5), Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_hsl_desaturated_is_gray() {
        let gray = hsl_to_rgb(137.0, 0.0, 0.42);
        assert!(close(gray, Vec3::splat(0.42)));
    }

    #[test]
    fn test_hsl_hue_wraps() {
        assert!(close(hsl_to_rgb(360.0, 1.0, 0.5), hsl_to_rgb(0.0, 1.0, 0.5)));
        assert!(close(hsl_to_rgb(-120.0, 1.0, 0.5), hsl_to_rgb(240.0, 1.0, 0.5)));
    }

    #[test]
    fn test_hex_unpacks_channels() {
        let c = hex(0x667eea);
        assert!((c.x - 102.0 / 255.0).abs() < 1e-6);
        assert!((c.y - 126.0 / 255.0).abs() < 1e-6);
        assert!((c.z - 234.0 / 255.0).abs() < 1e-6);
    }
}

// src/visual/color.rs
//! Hue-based colors and linear range mapping.

use ratatui::style::Color;

/// Re-map `value` from `[in_lo, in_hi]` onto `[out_lo, out_hi]` without clamping.
pub fn map_range(value: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    out_lo + (value - in_lo) * (out_hi - out_lo) / (in_hi - in_lo)
}

/// Convert hue (degrees, wrapped into `[0, 360)`), saturation and brightness
/// (both percent) into an RGB color.
pub fn hsb(hue: f64, saturation: f64, brightness: f64) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let v = (brightness / 100.0).clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |channel: f64| ((channel + m) * 255.0).round() as u8;
    Color::Rgb(to_byte(r), to_byte(g), to_byte(b))
}

/// Fully saturated, full-brightness color for `hue`.
pub fn vivid(hue: f64) -> Color {
    hsb(hue, 100.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range_endpoints_and_reversal() {
        assert_eq!(map_range(-1.0, -1.0, 1.0, -5.0, 55.0), -5.0);
        assert_eq!(map_range(1.0, -1.0, 1.0, -5.0, 55.0), 55.0);
        assert_eq!(map_range(0.0, -1.0, 1.0, 240.0, 180.0), 210.0);
        assert_eq!(map_range(255.0, 0.0, 255.0, -150.0, 150.0), 150.0);
    }

    #[test]
    fn test_primary_hues() {
        assert_eq!(vivid(0.0), Color::Rgb(255, 0, 0));
        assert_eq!(vivid(120.0), Color::Rgb(0, 255, 0));
        assert_eq!(vivid(240.0), Color::Rgb(0, 0, 255));
        assert_eq!(hsb(0.0, 0.0, 100.0), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_negative_hue_wraps() {
        assert_eq!(vivid(-5.0), vivid(355.0));
        assert_eq!(vivid(405.0), vivid(45.0));
    }
}

//! Color reporters.

/// Convert a signed 24-bit color integer to a CSS hex string.
///
/// The integer is interpreted as `0xRRGGBB`. Negative inputs wrap via two's
/// complement into the 24-bit range, so `-1` is `"#ffffff"`. The result is
/// always `#` plus exactly six lowercase hex digits.
pub fn color_to_hex(color: i32) -> String {
    format!("#{:06x}", (color as u32) & 0xff_ffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries() {
        assert_eq!(color_to_hex(0xff0000), "#ff0000");
        assert_eq!(color_to_hex(0x00ff00), "#00ff00");
        assert_eq!(color_to_hex(255), "#0000ff");
    }

    #[test]
    fn negative_values_wrap() {
        assert_eq!(color_to_hex(-1), "#ffffff");
        assert_eq!(color_to_hex(-16777216), "#000000");
        assert_eq!(color_to_hex(-256), "#ffff00");
    }

    #[test]
    fn small_values_pad_to_six_digits() {
        assert_eq!(color_to_hex(0), "#000000");
        assert_eq!(color_to_hex(0xabc), "#000abc");
    }

    #[test]
    fn round_trips_modulo_24_bits() {
        for c in (-16777216..=16777215).step_by(65537) {
            let hex = color_to_hex(c);
            assert_eq!(hex.len(), 7);
            let parsed = u32::from_str_radix(&hex[1..], 16).unwrap();
            assert_eq!(parsed, (c as u32) & 0xff_ffff);
        }
    }
}

//! CSS hex color parsing.
//!
//! Persisted elements carry their color as the hex string the web editor
//! wrote; the renderer converts it to a [`peniko::Color`] here. Unparseable
//! colors fall back to black rather than failing the draw.

use peniko::Color;

/// Parse a CSS hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`) or `transparent`.
pub fn parse_hex_color(color: &str) -> Color {
    if color == "transparent" {
        return Color::from_rgba8(0, 0, 0, 0);
    }

    // Colors arrive unvalidated from persisted documents; only slice into
    // the string once it is known to be plain ASCII.
    if let Some(hex) = color.strip_prefix('#').filter(|hex| hex.is_ascii()) {
        let hex = hex.trim();
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).unwrap_or(0) * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).unwrap_or(0) * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).unwrap_or(0) * 17;
                return Color::from_rgba8(r, g, b, 255);
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                return Color::from_rgba8(r, g, b, 255);
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                let a = u8::from_str_radix(&hex[6..8], 16).unwrap_or(255);
                return Color::from_rgba8(r, g, b, a);
            }
            _ => {}
        }
    }

    log::warn!("unparseable color {color:?}, falling back to black");
    Color::from_rgba8(0, 0, 0, 255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        let color = parse_hex_color("#ff8000").to_rgba8();
        assert_eq!((color.r, color.g, color.b, color.a), (255, 128, 0, 255));
    }

    #[test]
    fn test_parse_short_hex() {
        let color = parse_hex_color("#f00").to_rgba8();
        assert_eq!((color.r, color.g, color.b, color.a), (255, 0, 0, 255));
    }

    #[test]
    fn test_parse_hex_with_alpha() {
        let color = parse_hex_color("#00ff0080").to_rgba8();
        assert_eq!((color.r, color.g, color.b, color.a), (0, 255, 0, 128));
    }

    #[test]
    fn test_transparent_keyword() {
        assert_eq!(parse_hex_color("transparent").to_rgba8().a, 0);
    }

    #[test]
    fn test_garbage_falls_back_to_black() {
        let color = parse_hex_color("magenta-ish").to_rgba8();
        assert_eq!((color.r, color.g, color.b, color.a), (0, 0, 0, 255));
    }

    #[test]
    fn test_multibyte_input_falls_back_without_panicking() {
        // A corrupt document can carry non-ASCII bytes where hex digits
        // should be; these must degrade to black, not panic on a slice.
        for input in ["#a\u{e9}", "#\u{e9}\u{e9}\u{e9}", "#éééééé"] {
            let color = parse_hex_color(input).to_rgba8();
            assert_eq!((color.r, color.g, color.b, color.a), (0, 0, 0, 255));
        }
    }
}

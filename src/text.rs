//! 5x7 bitmap text for RGBA frames.
//!
//! Titles, equations and watermarks are drawn straight into the frame
//! buffer with a fixed glyph table and integer scaling. Lowercase input is
//! folded to uppercase; unknown characters render as blanks. A few math
//! glyphs (pi, degree, squared) cover the formula overlays.

use image::{Rgba, RgbaImage};

pub const GLYPH_W: i32 = 5;
pub const GLYPH_H: i32 = 7;

/// Column-spacing included; one glyph cell at scale 1.
const ADVANCE: i32 = GLYPH_W + 1;

fn glyph(c: char) -> [u8; 7] {
    match c {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b11111, 0b00010, 0b00010, 0b00010, 0b10010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],

        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b10000, 0b11110, 0b00001, 0b00001, 0b11110],
        '6' => [0b01110, 0b10000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00001, 0b01110],

        ':' => [0b00000, 0b00100, 0b00100, 0b00000, 0b00100, 0b00100, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100, 0b01000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '=' => [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        '/' => [0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000, 0b00000],
        '\'' => [0b00100, 0b00100, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '@' => [0b01110, 0b10001, 0b10111, 0b10101, 0b10111, 0b10000, 0b01110],
        '%' => [0b11001, 0b11010, 0b00100, 0b01000, 0b10110, 0b00110, 0b00000],
        '*' => [0b00000, 0b10101, 0b01110, 0b11111, 0b01110, 0b10101, 0b00000],
        '<' => [0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010],
        '>' => [0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000],

        // math extras for the formula overlays
        'π' => [0b00000, 0b00000, 0b11111, 0b01010, 0b01010, 0b01010, 0b10011],
        'θ' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b01110],
        '°' => [0b01100, 0b10010, 0b10010, 0b01100, 0b00000, 0b00000, 0b00000],
        '²' => [0b01100, 0b00010, 0b00100, 0b01110, 0b00000, 0b00000, 0b00000],

        ' ' => [0, 0, 0, 0, 0, 0, 0],
        _ => [0, 0, 0, 0, 0, 0, 0],
    }
}

/// Draw `text` with its top-left corner at (x, y).
pub fn draw_text(
    img: &mut RgbaImage,
    x: i32,
    y: i32,
    text: &str,
    scale: i32,
    color: Rgba<u8>,
) {
    let scale = scale.max(1);
    let (w, h) = (img.width() as i32, img.height() as i32);
    let mut cx = x;
    for ch in text.chars() {
        let c = if ch.is_ascii_lowercase() {
            ch.to_ascii_uppercase()
        } else {
            ch
        };
        let g = glyph(c);
        for (row, bits) in g.iter().enumerate() {
            for col in 0..GLYPH_W {
                if (bits >> (GLYPH_W - 1 - col)) & 1 == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        let px = cx + col * scale + sx;
                        let py = y + row as i32 * scale + sy;
                        if px >= 0 && py >= 0 && px < w && py < h {
                            img.put_pixel(px as u32, py as u32, color);
                        }
                    }
                }
            }
        }
        cx += ADVANCE * scale;
    }
}

/// Pixel width of `text` at the given scale.
pub fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 {
        0
    } else {
        n * ADVANCE * scale.max(1) - scale.max(1)
    }
}

pub fn text_height(scale: i32) -> i32 {
    GLYPH_H * scale.max(1)
}

/// Draw `text` horizontally centered on `cx`.
pub fn draw_text_centered(
    img: &mut RgbaImage,
    cx: i32,
    y: i32,
    text: &str,
    scale: i32,
    color: Rgba<u8>,
) {
    draw_text(img, cx - text_width(text, scale) / 2, y, text, scale, color);
}

/// Draw `text` ending at `right` (right-aligned).
pub fn draw_text_right(
    img: &mut RgbaImage,
    right: i32,
    y: i32,
    text: &str,
    scale: i32,
    color: Rgba<u8>,
) {
    draw_text(img, right - text_width(text, scale), y, text, scale, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_scales_linearly() {
        assert_eq!(text_width("AB", 1), 2 * ADVANCE - 1);
        assert_eq!(text_width("AB", 2), 2 * (2 * ADVANCE) - 2);
        assert_eq!(text_width("", 3), 0);
    }

    #[test]
    fn test_draw_lights_pixels_inside_bounds() {
        let mut img = RgbaImage::from_pixel(40, 12, Rgba([0, 0, 0, 255]));
        draw_text(&mut img, 1, 1, "HI", 1, Rgba([255, 255, 255, 255]));
        let lit = img.pixels().filter(|p| p[0] > 0).count();
        assert!(lit > 10, "expected glyph pixels, got {}", lit);
    }

    #[test]
    fn test_draw_clips_at_edges() {
        // Must not panic when text runs off the image.
        let mut img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        draw_text(&mut img, -3, -3, "CLIPPED TEXT", 2, Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_lowercase_folds_to_uppercase() {
        let mut upper = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        let mut lower = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        draw_text(&mut upper, 0, 0, "A", 1, Rgba([255, 255, 255, 255]));
        draw_text(&mut lower, 0, 0, "a", 1, Rgba([255, 255, 255, 255]));
        assert_eq!(upper.as_raw(), lower.as_raw());
    }
}

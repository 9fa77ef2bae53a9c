//! Deterministic stand-ins for real fonts.

use image::{Rgba, RgbaImage};

use crate::text::{TextExtent, TextFace};

/// Fixed-pitch face that paints each non-space character as a solid block
/// 3/5 of the font size wide and exactly the font size tall.
pub struct BlockFace;

impl BlockFace {
    pub fn advance(size: u32) -> u32 {
        size * 3 / 5
    }
}

impl TextFace for BlockFace {
    fn measure(&self, text: &str, size: u32) -> TextExtent {
        if text.is_empty() {
            return TextExtent::default();
        }
        TextExtent {
            width: text.chars().count() as u32 * Self::advance(size),
            height: size,
        }
    }

    fn draw(&self, canvas: &mut RgbaImage, text: &str, size: u32, origin: (i32, i32), color: Rgba<u8>) {
        let advance = Self::advance(size) as i32;
        for (i, ch) in text.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let x0 = origin.0 + i as i32 * advance;
            for y in origin.1..origin.1 + size as i32 {
                for x in x0..x0 + advance {
                    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
                        canvas.put_pixel(x as u32, y as u32, color);
                    }
                }
            }
        }
    }
}

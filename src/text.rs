use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

use crate::error::{AppError, Result};

/// Ink box of a piece of text, measured from an origin at its left edge
/// and ascender line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

/// A font that can measure and paint single lines of text at a pixel size.
pub trait TextFace {
    fn measure(&self, text: &str, size: u32) -> TextExtent;

    /// Paints `text` with its ascender line at `origin.1`.
    fn draw(&self, canvas: &mut RgbaImage, text: &str, size: u32, origin: (i32, i32), color: Rgba<u8>);
}

// ============================================================================
// TrueType Faces
// ============================================================================

pub struct TrueTypeFace {
    font: Font<'static>,
}

impl TrueTypeFace {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| AppError::InvalidFont("not a TrueType/OpenType font".into()))?;
        Ok(TrueTypeFace { font })
    }
}

impl TextFace for TrueTypeFace {
    fn measure(&self, text: &str, size: u32) -> TextExtent {
        if text.is_empty() {
            return TextExtent::default();
        }
        let scale = Scale::uniform(size as f32);
        let v_metrics = self.font.v_metrics(scale);

        let mut right = 0i32;
        let mut bottom = 0i32;
        for glyph in self.font.layout(text, scale, point(0.0, v_metrics.ascent)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                right = right.max(bb.max.x);
                bottom = bottom.max(bb.max.y);
            }
        }
        TextExtent {
            width: right.max(0) as u32,
            height: bottom.max(0) as u32,
        }
    }

    fn draw(&self, canvas: &mut RgbaImage, text: &str, size: u32, origin: (i32, i32), color: Rgba<u8>) {
        let scale = Scale::uniform(size as f32);
        let v_metrics = self.font.v_metrics(scale);
        let start = point(origin.0 as f32, origin.1 as f32 + v_metrics.ascent);

        for glyph in self.font.layout(text, scale, start) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 || px as u32 >= canvas.width() || py as u32 >= canvas.height() {
                    return;
                }
                blend_pixel(canvas.get_pixel_mut(px as u32, py as u32), color, coverage);
            });
        }
    }
}

/// Source-over blend of `color` at the given coverage.
pub(crate) fn blend_pixel(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let sa = coverage.clamp(0.0, 1.0) * color.0[3] as f32 / 255.0;
    if sa <= 0.0 {
        return;
    }
    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for c in 0..3 {
        let src = color.0[c] as f32 * sa;
        let bg = dst.0[c] as f32 * da * (1.0 - sa);
        dst.0[c] = ((src + bg) / out_a).round() as u8;
    }
    dst.0[3] = (out_a * 255.0).round() as u8;
}

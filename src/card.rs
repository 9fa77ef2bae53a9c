use image::RgbaImage;

use crate::config::ColorPolicy;
use crate::fit::FitResult;
use crate::text::TextFace;

/// A decoded card background together with the name it was looked up by.
/// The name drives the text color.
#[derive(Debug, Clone)]
pub struct Background {
    pub name: String,
    pub image: RgbaImage,
}

impl Background {
    pub fn new(name: impl Into<String>, image: RgbaImage) -> Self {
        Background {
            name: name.into(),
            image,
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Draws the fitted lines centered on a copy of the background.
pub fn render_card(
    background: &Background,
    fit: &FitResult,
    face: &dyn TextFace,
    colors: &ColorPolicy,
) -> RgbaImage {
    let mut card = background.image.clone();
    let color = colors.text_color(&background.name);
    let (card_width, card_height) = card.dimensions();

    let mut y = (card_height as i64 - fit.total_height() as i64).div_euclid(2);
    for (line, line_height) in fit.lines.iter().zip(&fit.line_heights) {
        let extent = face.measure(line, fit.font_size);
        let x = (card_width as i64 - extent.width as i64).div_euclid(2);
        face.draw(&mut card, line, fit.font_size, (x as i32, y as i32), color);
        y += *line_height as i64;
    }

    card
}

// ============================================================================
// Duplication
// ============================================================================

/// `quantity` sets worth of independent copies of `card`.
pub fn duplicate_card(card: &RgbaImage, quantity: u32, cards_per_set: u32) -> Vec<RgbaImage> {
    let count = quantity as usize * cards_per_set as usize;
    (0..count).map(|_| card.clone()).collect()
}

use std::path::Path;

use image::imageops;
use image::{Rgba, RgbaImage};

use crate::error::{AppError, Result};

/// Fill for freshly created sheets
const TRANSPARENT: Rgba<u8> = Rgba([255, 255, 255, 0]);

// ============================================================================
// Row Sheets
// ============================================================================

/// Pixel offset of the card at `index` in a grid of `num_columns` columns.
pub fn grid_position(
    index: usize,
    num_columns: u32,
    card_size: (u32, u32),
    row_padding: u32,
    col_padding: u32,
) -> (u32, u32) {
    let row = index as u32 / num_columns;
    let col = index as u32 % num_columns;
    (
        col * (card_size.0 + col_padding),
        row * (card_size.1 + row_padding),
    )
}

/// Lays identical cards out left-to-right, top-to-bottom on a transparent
/// canvas. Every card is alpha-composited onto the canvas.
pub fn compose_grid(
    cards: &[RgbaImage],
    num_columns: u32,
    row_padding: u32,
    col_padding: u32,
) -> Result<RgbaImage> {
    let first = cards
        .first()
        .ok_or_else(|| AppError::EmptyInput("no cards to lay out".into()))?;
    if num_columns == 0 {
        return Err(AppError::InvalidConfig("columns must be at least 1".into()));
    }

    let (card_width, card_height) = first.dimensions();
    let num_rows = (cards.len() as u32).div_ceil(num_columns);

    let width = span(num_columns, card_width, col_padding)
        .ok_or_else(|| too_large(format!("{} columns of {}px cards", num_columns, card_width)))?;
    let height = span(num_rows, card_height, row_padding)
        .ok_or_else(|| too_large(format!("{} rows of {}px cards", num_rows, card_height)))?;
    let mut canvas = blank_canvas(width, height)?;

    for (index, card) in cards.iter().enumerate() {
        let (x, y) = grid_position(
            index,
            num_columns,
            (card_width, card_height),
            row_padding,
            col_padding,
        );
        imageops::overlay(&mut canvas, card, x as i64, y as i64);
    }

    Ok(canvas)
}

// ============================================================================
// Combined Sheet
// ============================================================================

/// Reads saved row sheets back and stacks them in the given order.
pub fn compose_master<P: AsRef<Path>>(sheet_paths: &[P], padding: u32) -> Result<RgbaImage> {
    let sheets = sheet_paths
        .iter()
        .map(|path| Ok(image::open(path.as_ref())?.to_rgba8()))
        .collect::<Result<Vec<_>>>()?;
    stack_sheets(&sheets, padding)
}

/// Stacks sheets top to bottom. The canvas takes the first sheet's width;
/// sheets are copied over the canvas as-is.
pub fn stack_sheets(sheets: &[RgbaImage], padding: u32) -> Result<RgbaImage> {
    let first = sheets
        .first()
        .ok_or_else(|| AppError::EmptyInput("no row sheets to combine".into()))?;

    let width = first.width();
    let gaps = u32::try_from(sheets.len() - 1).ok().and_then(|n| n.checked_mul(padding));
    let height = sheets
        .iter()
        .try_fold(0u32, |total, sheet| total.checked_add(sheet.height()))
        .zip(gaps)
        .and_then(|(sheets_height, gaps)| sheets_height.checked_add(gaps))
        .ok_or_else(|| too_large(format!("{} stacked sheets", sheets.len())))?;
    let mut canvas = blank_canvas(width, height)?;

    let mut y_offset = 0u32;
    for sheet in sheets {
        imageops::replace(&mut canvas, sheet, 0, y_offset as i64);
        y_offset += sheet.height() + padding;
    }

    Ok(canvas)
}

// ============================================================================
// Canvas Size
// ============================================================================

/// `count` items of `size` pixels with `padding` between neighbours.
fn span(count: u32, size: u32, padding: u32) -> Option<u32> {
    let items = count.checked_mul(size)?;
    let gaps = count.saturating_sub(1).checked_mul(padding)?;
    items.checked_add(gaps)
}

/// Transparent canvas, refusing dimensions whose RGBA buffer length
/// cannot be addressed.
fn blank_canvas(width: u32, height: u32) -> Result<RgbaImage> {
    let bytes = (width as u64)
        .checked_mul(height as u64)
        .and_then(|pixels| pixels.checked_mul(4))
        .and_then(|len| usize::try_from(len).ok());
    if bytes.is_none() {
        return Err(too_large(format!("{}x{} pixels", width, height)));
    }
    Ok(RgbaImage::from_pixel(width, height, TRANSPARENT))
}

fn too_large(what: String) -> AppError {
    AppError::InvalidConfig(format!("sheet too large: {}", what))
}

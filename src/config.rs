use std::path::PathBuf;

use image::Rgba;

use crate::error::{AppError, Result};

// ============================================================================
// Constants
// ============================================================================

/// Physical cards printed together as one set
pub const CARDS_PER_SET: u32 = 45;

/// Grid geometry for a row sheet
pub const NUM_COLUMNS: u32 = 9;
pub const ROW_PADDING: u32 = 30;
pub const COL_PADDING: u32 = 30;

/// Vertical gap between row sheets in the combined sheet
pub const SHEET_PADDING: u32 = 50;

/// Font size search range, in pixels
pub const MAX_FONT_SIZE: u32 = 100;
pub const MIN_FONT_SIZE: u32 = 20;

/// Space reserved around the name on each card
pub const TEXT_MARGIN_X: u32 = 159;
pub const TEXT_MARGIN_Y: u32 = 100;

pub const OUTPUT_DPI: u32 = 300;

/// Background names containing this token (any case) get light text
pub const DARK_MARKER: &str = "HITAM";

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

// ============================================================================
// Color Policy
// ============================================================================

/// Picks the text color from the background's file name.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPolicy {
    pub dark_marker: String,
    pub light: Rgba<u8>,
    pub dark: Rgba<u8>,
}

impl Default for ColorPolicy {
    fn default() -> Self {
        ColorPolicy {
            dark_marker: DARK_MARKER.to_string(),
            light: WHITE,
            dark: BLACK,
        }
    }
}

impl ColorPolicy {
    pub fn is_dark_background(&self, background_ref: &str) -> bool {
        background_ref
            .to_uppercase()
            .contains(&self.dark_marker.to_uppercase())
    }

    pub fn text_color(&self, background_ref: &str) -> Rgba<u8> {
        if self.is_dark_background(background_ref) {
            self.light
        } else {
            self.dark
        }
    }
}

// ============================================================================
// Sheet Configuration
// ============================================================================

/// Everything a run needs to know besides the roster itself.
#[derive(Debug, Clone)]
pub struct SheetConfig {
    pub backgrounds_dir: PathBuf,
    pub fonts_dir: PathBuf,
    pub output_dir: PathBuf,
    pub num_columns: u32,
    pub row_padding: u32,
    pub col_padding: u32,
    pub sheet_padding: u32,
    pub cards_per_set: u32,
    pub max_font_size: u32,
    pub min_font_size: u32,
    pub text_margin_x: u32,
    pub text_margin_y: u32,
    pub dpi: u32,
    pub colors: ColorPolicy,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            backgrounds_dir: PathBuf::from("static/backgrounds"),
            fonts_dir: PathBuf::from("static/fonts"),
            output_dir: PathBuf::from("static/hasil"),
            num_columns: NUM_COLUMNS,
            row_padding: ROW_PADDING,
            col_padding: COL_PADDING,
            sheet_padding: SHEET_PADDING,
            cards_per_set: CARDS_PER_SET,
            max_font_size: MAX_FONT_SIZE,
            min_font_size: MIN_FONT_SIZE,
            text_margin_x: TEXT_MARGIN_X,
            text_margin_y: TEXT_MARGIN_Y,
            dpi: OUTPUT_DPI,
            colors: ColorPolicy::default(),
        }
    }
}

impl SheetConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_columns == 0 {
            return Err(AppError::InvalidConfig("columns must be at least 1".into()));
        }
        if self.cards_per_set == 0 {
            return Err(AppError::InvalidConfig("cards per set must be at least 1".into()));
        }
        if self.min_font_size == 0 {
            return Err(AppError::InvalidConfig("minimum font size must be at least 1".into()));
        }
        if self.min_font_size > self.max_font_size {
            return Err(AppError::InvalidConfig(format!(
                "minimum font size {} exceeds maximum {}",
                self.min_font_size, self.max_font_size
            )));
        }
        if self.dpi == 0 {
            return Err(AppError::InvalidConfig("dpi must be at least 1".into()));
        }
        Ok(())
    }

    /// Area available for the name on a card of the given size.
    pub fn text_box(&self, card_width: u32, card_height: u32) -> (u32, u32) {
        (
            card_width.saturating_sub(self.text_margin_x),
            card_height.saturating_sub(self.text_margin_y),
        )
    }
}

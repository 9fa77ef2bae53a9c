#![allow(dead_code)]

use std::sync::Arc;

pub use idcard_sheets::testing::BlockFace;
use idcard_sheets::{MemoryResolver, RowRecord};
use image::{Rgba, RgbaImage};

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const ORANGE: Rgba<u8> = Rgba([240, 140, 20, 255]);

/// Card backgrounds are 459x160, leaving a 300x60 text area with the
/// default margins.
pub const CARD_WIDTH: u32 = 459;
pub const CARD_HEIGHT: u32 = 160;

pub fn resolver() -> MemoryResolver {
    MemoryResolver::new()
        .with_background("HITAM.png", RgbaImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, BLACK))
        .with_background("ORANYE.png", RgbaImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, ORANGE))
        .with_font("Block.ttf", Arc::new(BlockFace))
}

pub fn row(name: &str, background: &str, quantity: u32) -> RowRecord {
    RowRecord {
        name: name.to_string(),
        background_ref: background.to_string(),
        font_ref: "Block.ttf".to_string(),
        quantity,
    }
}

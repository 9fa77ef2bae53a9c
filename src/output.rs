use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use printpdf::{
    ColorBits, ColorSpace, Image as PdfImage, ImageTransform, ImageXObject, Mm, PdfDocument, Px,
};

use crate::error::{AppError, Result};
use crate::pipeline::SheetOutput;

const MM_PER_INCH: f32 = 25.4;
const METERS_PER_INCH: f64 = 0.0254;

// ============================================================================
// PNG
// ============================================================================

/// Writes an RGBA PNG tagged with the given print resolution.
pub fn save_png(image: &RgbaImage, path: &Path, dpi: u32) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let (width, height) = image.dimensions();
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let pixels_per_meter = dpi_to_pixels_per_meter(dpi);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: pixels_per_meter,
        yppu: pixels_per_meter,
        unit: png::Unit::Meter,
    }));

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| AppError::Image(format!("{}: {}", path.display(), e)))?;
    png_writer
        .write_image_data(image.as_raw())
        .map_err(|e| AppError::Image(format!("{}: {}", path.display(), e)))?;
    png_writer
        .finish()
        .map_err(|e| AppError::Image(format!("{}: {}", path.display(), e)))?;

    Ok(())
}

fn dpi_to_pixels_per_meter(dpi: u32) -> u32 {
    (dpi as f64 / METERS_PER_INCH).round() as u32
}

// ============================================================================
// Manifest
// ============================================================================

pub fn write_manifest(output: &SheetOutput, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| AppError::Manifest(format!("{}: {}", path.display(), e)))?;
    std::fs::write(path, json)?;
    Ok(())
}

// ============================================================================
// PDF
// ============================================================================

/// Single-page PDF holding `sheet` at its native size for `dpi`.
pub fn export_pdf(sheet: &RgbaImage, path: &Path, dpi: u32) -> Result<()> {
    let (width_px, height_px) = sheet.dimensions();
    let width_mm = width_px as f32 / dpi as f32 * MM_PER_INCH;
    let height_mm = height_px as f32 / dpi as f32 * MM_PER_INCH;

    let (doc, page, layer) = PdfDocument::new("ID Card Sheet", Mm(width_mm), Mm(height_mm), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);

    // Print shops expect white where the sheet is transparent
    let flattened = flatten_on_white(sheet);

    let image = PdfImage::from(ImageXObject {
        width: Px(width_px as usize),
        height: Px(height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: flattened.into_raw(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(0.0)),
            dpi: Some(dpi as f32),
            ..Default::default()
        },
    );

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer)
        .map_err(|e| AppError::Pdf(e.to_string()))?;

    Ok(())
}

fn flatten_on_white(image: &RgbaImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut rgb_image = RgbImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = a as f32 / 255.0;
        let bg = 255.0;
        let out_r = (r as f32 * alpha + bg * (1.0 - alpha)).round() as u8;
        let out_g = (g as f32 * alpha + bg * (1.0 - alpha)).round() as u8;
        let out_b = (b as f32 * alpha + bg * (1.0 - alpha)).round() as u8;
        rgb_image.put_pixel(x, y, Rgb([out_r, out_g, out_b]));
    }
    rgb_image
}

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use image::RgbaImage;
use log::{debug, info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::card::{duplicate_card, render_card, Background};
use crate::config::SheetConfig;
use crate::error::{AppError, Result};
use crate::fit::{fit_text, BoundingBox};
use crate::output::save_png;
use crate::resources::ResourceResolver;
use crate::roster::RowRecord;
use crate::sheet::{compose_grid, compose_master};
use crate::text::TextFace;

pub const COMBINED_FILE_NAME: &str = "combined_all.png";

pub fn row_sheet_file_name(row_index: usize) -> String {
    format!("labelnama_{}.png", row_index)
}

/// Files produced by one run, in roster order.
#[derive(Debug, Clone, Serialize)]
pub struct SheetOutput {
    pub run_id: String,
    pub row_sheets: Vec<PathBuf>,
    pub combined: PathBuf,
}

/// A roster row with both of its resources loaded
struct PreparedRow<'a> {
    record: &'a RowRecord,
    background: Background,
    face: Arc<dyn TextFace>,
}

// ============================================================================
// Run Identifiers
// ============================================================================

/// Date stamp plus a short random suffix, e.g. `20261019-1A2B3C4D`.
pub fn generate_run_id() -> String {
    let uuid = Uuid::new_v4();
    let hex = format!("{:x}", uuid);
    format!("{}-{}", Local::now().format("%Y%m%d"), hex[..8].to_uppercase())
}

fn validate_run_id(run_id: &str) -> Result<()> {
    let valid = !run_id.is_empty()
        && run_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::InvalidConfig(format!(
            "run id must be non-empty and use only letters, digits, '-' or '_': {:?}",
            run_id
        )))
    }
}

// ============================================================================
// Pipeline
// ============================================================================

pub struct Pipeline<R: ResourceResolver> {
    config: SheetConfig,
    resolver: R,
}

impl<R: ResourceResolver> Pipeline<R> {
    pub fn new(config: SheetConfig, resolver: R) -> Self {
        Pipeline { config, resolver }
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn run(&self, rows: &[RowRecord]) -> Result<SheetOutput> {
        self.run_with_id(rows, &generate_run_id())
    }

    /// Renders every row sheet and the combined sheet under
    /// `output_dir/<run_id>/`. Resources for all rows are loaded before
    /// anything is written, so a missing file leaves no partial output.
    pub fn run_with_id(&self, rows: &[RowRecord], run_id: &str) -> Result<SheetOutput> {
        self.config.validate()?;
        validate_run_id(run_id)?;
        if rows.is_empty() {
            return Err(AppError::EmptyInput("roster has no rows".into()));
        }

        let prepared = rows
            .iter()
            .map(|record| self.prepare(record))
            .collect::<Result<Vec<_>>>()?;

        let run_dir = self.config.output_dir.join(run_id);
        std::fs::create_dir_all(&run_dir)?;

        let mut row_sheets = Vec::with_capacity(prepared.len());
        for (index, row) in prepared.iter().enumerate() {
            let sheet = self.render_row_sheet(row)?;
            let path = run_dir.join(row_sheet_file_name(index));
            save_png(&sheet, &path, self.config.dpi)?;
            row_sheets.push(path);
        }

        let combined_image = compose_master(&row_sheets, self.config.sheet_padding)?;
        let combined = run_dir.join(COMBINED_FILE_NAME);
        save_png(&combined_image, &combined, self.config.dpi)?;

        Ok(SheetOutput {
            run_id: run_id.to_string(),
            row_sheets,
            combined,
        })
    }

    fn prepare<'a>(&self, record: &'a RowRecord) -> Result<PreparedRow<'a>> {
        let background = self.resolver.background(&record.background_ref)?;
        let face = self.resolver.font(&record.font_ref)?;
        Ok(PreparedRow {
            record,
            background,
            face,
        })
    }

    /// Fits the name to the background's text area and draws it.
    pub fn make_card(&self, name: &str, background: &Background, face: &dyn TextFace) -> RgbaImage {
        let (width, height) = self
            .config
            .text_box(background.image.width(), background.image.height());
        let fit = fit_text(
            name,
            BoundingBox { width, height },
            face,
            self.config.max_font_size,
            self.config.min_font_size,
        );

        debug!(
            "{}: font size {} across {} line(s)",
            name,
            fit.font_size,
            fit.lines.len()
        );
        if fit.overflow {
            warn!(
                "{:?} does not fit {}x{} even at {}px; text will spill over",
                name, width, height, fit.font_size
            );
        }

        render_card(background, &fit, face, &self.config.colors)
    }

    fn render_row_sheet(&self, row: &PreparedRow<'_>) -> Result<RgbaImage> {
        let record = row.record;
        let card = self.make_card(&record.name, &row.background, row.face.as_ref());

        info!(
            "Generating {} ID cards for {}",
            record.quantity as u64 * self.config.cards_per_set as u64,
            record.name
        );
        let cards = duplicate_card(&card, record.quantity, self.config.cards_per_set);
        info!("Total ID cards for {}: {}", record.name, cards.len());

        compose_grid(
            &cards,
            self.config.num_columns,
            self.config.row_padding,
            self.config.col_padding,
        )
    }
}

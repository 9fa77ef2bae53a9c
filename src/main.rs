// idcard-sheets: Generate printable name card sheets from a roster spreadsheet

use std::path::PathBuf;

use clap::Parser;
use idcard_sheets::config::{self, ColorPolicy, SheetConfig};
use idcard_sheets::output::{export_pdf, write_manifest};
use idcard_sheets::pipeline::generate_run_id;
use idcard_sheets::{read_roster_file, AppError, DirectoryResolver, Pipeline};

// ============================================================================
// Data Structures
// ============================================================================

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate printable name card sheets from a roster")]
struct Args {
    /// Roster CSV with columns nama, background, font, jumlah
    #[arg(short, long)]
    input: PathBuf,

    /// Directory holding background images
    #[arg(long, default_value = "static/backgrounds")]
    backgrounds: PathBuf,

    /// Directory holding font files
    #[arg(long, default_value = "static/fonts")]
    fonts: PathBuf,

    /// Output directory; each run writes into its own subdirectory
    #[arg(short, long, default_value = "static/hasil")]
    output: PathBuf,

    /// Run identifier (defaults to a dated random id)
    #[arg(long)]
    run_id: Option<String>,

    /// Cards per row on a sheet
    #[arg(long, default_value_t = config::NUM_COLUMNS)]
    columns: u32,

    /// Vertical gap between card rows, in pixels
    #[arg(long, default_value_t = config::ROW_PADDING)]
    row_padding: u32,

    /// Horizontal gap between card columns, in pixels
    #[arg(long, default_value_t = config::COL_PADDING)]
    col_padding: u32,

    /// Vertical gap between row sheets in the combined sheet
    #[arg(long, default_value_t = config::SHEET_PADDING)]
    sheet_padding: u32,

    /// Cards printed per set (jumlah counts sets)
    #[arg(long, default_value_t = config::CARDS_PER_SET)]
    cards_per_set: u32,

    /// Largest font size tried, in pixels
    #[arg(long, default_value_t = config::MAX_FONT_SIZE)]
    max_font_size: u32,

    /// Smallest font size accepted, in pixels
    #[arg(long, default_value_t = config::MIN_FONT_SIZE)]
    min_font_size: u32,

    /// Horizontal space on a card kept free of text
    #[arg(long, default_value_t = config::TEXT_MARGIN_X)]
    margin_x: u32,

    /// Vertical space on a card kept free of text
    #[arg(long, default_value_t = config::TEXT_MARGIN_Y)]
    margin_y: u32,

    /// Resolution tag written into the PNGs
    #[arg(long, default_value_t = config::OUTPUT_DPI)]
    dpi: u32,

    /// Backgrounds whose name contains this get white text
    #[arg(long, default_value = config::DARK_MARKER)]
    dark_marker: String,

    /// Also write manifest.json listing the produced files
    #[arg(long)]
    manifest: bool,

    /// Also export the combined sheet as a PDF
    #[arg(long)]
    pdf: bool,
}

impl Args {
    fn sheet_config(&self) -> SheetConfig {
        SheetConfig {
            backgrounds_dir: self.backgrounds.clone(),
            fonts_dir: self.fonts.clone(),
            output_dir: self.output.clone(),
            num_columns: self.columns,
            row_padding: self.row_padding,
            col_padding: self.col_padding,
            sheet_padding: self.sheet_padding,
            cards_per_set: self.cards_per_set,
            max_font_size: self.max_font_size,
            min_font_size: self.min_font_size,
            text_margin_x: self.margin_x,
            text_margin_y: self.margin_y,
            dpi: self.dpi,
            colors: ColorPolicy {
                dark_marker: self.dark_marker.clone(),
                ..ColorPolicy::default()
            },
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args = Args::parse();
    let config = args.sheet_config();
    config.validate()?;

    // Load roster
    let rows = read_roster_file(&args.input)?;

    let run_id = args.run_id.clone().unwrap_or_else(generate_run_id);
    let resolver = DirectoryResolver::new(&config.backgrounds_dir, &config.fonts_dir);
    let pipeline = Pipeline::new(config, resolver);

    // Generate sheets
    let output = pipeline.run_with_id(&rows, &run_id)?;
    let run_dir = pipeline.config().output_dir.join(&output.run_id);

    if args.pdf {
        let combined = image::open(&output.combined)?.to_rgba8();
        let pdf_path = run_dir.join("combined_all.pdf");
        export_pdf(&combined, &pdf_path, pipeline.config().dpi)?;
        println!("✓ Generated: {}", pdf_path.display());
    }

    if args.manifest {
        let manifest_path = run_dir.join("manifest.json");
        write_manifest(&output, &manifest_path)?;
        println!("  Manifest: {}", manifest_path.display());
    }

    println!("✓ Generated: {}", output.combined.display());
    println!("  Run ID: {}", output.run_id);
    for (row, path) in rows.iter().zip(&output.row_sheets) {
        println!("  {}: {}", row.name, path.display());
    }

    Ok(())
}

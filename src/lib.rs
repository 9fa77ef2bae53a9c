//! Printable sheets of name cards.
//!
//! Each roster row becomes one card (the name auto-fit onto a background),
//! duplicated into a grid sheet. All row sheets are then stacked into a
//! single combined sheet.

pub mod card;
pub mod config;
pub mod error;
pub mod fit;
pub mod output;
pub mod pipeline;
pub mod resources;
pub mod roster;
pub mod sheet;
pub mod text;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use card::{duplicate_card, render_card, Background};
pub use config::{ColorPolicy, SheetConfig};
pub use error::{AppError, ResourceKind, Result};
pub use fit::{fit_text, BoundingBox, FitResult};
pub use pipeline::{Pipeline, SheetOutput};
pub use resources::{DirectoryResolver, MemoryResolver, Resource, ResourceResolver};
pub use roster::{read_roster, read_roster_file, RowRecord};
pub use sheet::{compose_grid, compose_master, stack_sheets};
pub use text::{TextExtent, TextFace, TrueTypeFace};

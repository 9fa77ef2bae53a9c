use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::card::Background;
use crate::error::{AppError, Result};
pub use crate::error::ResourceKind;
use crate::text::{TextFace, TrueTypeFace};

pub enum Resource {
    Background(Background),
    Font(Arc<dyn TextFace>),
}

/// Turns the names used in a roster into loaded backgrounds and fonts.
pub trait ResourceResolver {
    fn resolve(&self, kind: ResourceKind, name: &str) -> Result<Resource>;

    fn background(&self, name: &str) -> Result<Background> {
        match self.resolve(ResourceKind::Background, name)? {
            Resource::Background(background) => Ok(background),
            Resource::Font(_) => Err(missing(ResourceKind::Background, name, PathBuf::from(name))),
        }
    }

    fn font(&self, name: &str) -> Result<Arc<dyn TextFace>> {
        match self.resolve(ResourceKind::Font, name)? {
            Resource::Font(face) => Ok(face),
            Resource::Background(_) => Err(missing(ResourceKind::Font, name, PathBuf::from(name))),
        }
    }
}

fn missing(kind: ResourceKind, name: &str, path: PathBuf) -> AppError {
    AppError::MissingResource {
        kind,
        name: name.to_string(),
        path,
    }
}

/// Only bare file names are looked up; anything that could escape the
/// resource directory is treated as absent.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}

// ============================================================================
// Directory Lookup
// ============================================================================

pub struct DirectoryResolver {
    backgrounds_dir: PathBuf,
    fonts_dir: PathBuf,
}

impl DirectoryResolver {
    pub fn new(backgrounds_dir: impl Into<PathBuf>, fonts_dir: impl Into<PathBuf>) -> Self {
        DirectoryResolver {
            backgrounds_dir: backgrounds_dir.into(),
            fonts_dir: fonts_dir.into(),
        }
    }

    fn locate(&self, kind: ResourceKind, name: &str) -> Result<PathBuf> {
        let dir: &Path = match kind {
            ResourceKind::Background => &self.backgrounds_dir,
            ResourceKind::Font => &self.fonts_dir,
        };
        let path = dir.join(name);
        if !is_plain_file_name(name) || !path.is_file() {
            return Err(missing(kind, name, path));
        }
        Ok(path)
    }
}

impl ResourceResolver for DirectoryResolver {
    fn resolve(&self, kind: ResourceKind, name: &str) -> Result<Resource> {
        let path = self.locate(kind, name)?;
        debug!("Loading {} from {}", kind, path.display());

        match kind {
            ResourceKind::Background => {
                let image = image::open(&path)
                    .map_err(|e| AppError::Image(format!("{}: {}", path.display(), e)))?
                    .to_rgba8();
                Ok(Resource::Background(Background::new(name, image)))
            }
            ResourceKind::Font => {
                let bytes = std::fs::read(&path)?;
                let face = TrueTypeFace::from_bytes(bytes)
                    .map_err(|e| AppError::InvalidFont(format!("{}: {}", path.display(), e)))?;
                Ok(Resource::Font(Arc::new(face)))
            }
        }
    }
}

// ============================================================================
// In-Memory Lookup
// ============================================================================

/// Resolver over resources that are already loaded.
#[derive(Default)]
pub struct MemoryResolver {
    backgrounds: HashMap<String, image::RgbaImage>,
    fonts: HashMap<String, Arc<dyn TextFace>>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, name: impl Into<String>, image: image::RgbaImage) -> Self {
        self.backgrounds.insert(name.into(), image);
        self
    }

    pub fn with_font(mut self, name: impl Into<String>, face: Arc<dyn TextFace>) -> Self {
        self.fonts.insert(name.into(), face);
        self
    }
}

impl ResourceResolver for MemoryResolver {
    fn resolve(&self, kind: ResourceKind, name: &str) -> Result<Resource> {
        let found = match kind {
            ResourceKind::Background => self
                .backgrounds
                .get(name)
                .map(|image| Resource::Background(Background::new(name, image.clone()))),
            ResourceKind::Font => self.fonts.get(name).map(|face| Resource::Font(Arc::clone(face))),
        };
        found.ok_or_else(|| missing(kind, name, PathBuf::from(name)))
    }
}

//! Font-size search that wraps a name into a bounding box.
//!
//! Sizes are tried from the largest down, one pixel at a time. The first
//! size whose greedy word-wrap fits the box height wins. When nothing fits,
//! the layout at the smallest size is accepted and flagged as overflowing.

use crate::text::TextFace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitResult {
    pub lines: Vec<String>,
    pub font_size: u32,
    /// Measured height of each entry in `lines`
    pub line_heights: Vec<u32>,
    /// Set when even the minimum size did not fit the box height
    pub overflow: bool,
}

impl FitResult {
    pub fn total_height(&self) -> u32 {
        self.line_heights.iter().sum()
    }
}

pub fn fit_text(
    name: &str,
    bounds: BoundingBox,
    face: &dyn TextFace,
    max_font_size: u32,
    min_font_size: u32,
) -> FitResult {
    let min_font_size = min_font_size.min(max_font_size);
    let mut font_size = max_font_size;

    loop {
        let lines = wrap_words(name, face, font_size, bounds.width);
        let line_heights: Vec<u32> = lines
            .iter()
            .map(|line| face.measure(line, font_size).height)
            .collect();
        let total: u32 = line_heights.iter().sum();

        let fits = total <= bounds.height;
        if fits || font_size <= min_font_size {
            return FitResult {
                lines,
                font_size,
                line_heights,
                overflow: !fits,
            };
        }
        font_size -= 1;
    }
}

/// Greedy word-wrap at a fixed size. A word that is wider than `max_width`
/// on its own still gets a line to itself.
pub fn wrap_words(text: &str, face: &dyn TextFace, font_size: u32, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if face.measure(&candidate, font_size).width <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

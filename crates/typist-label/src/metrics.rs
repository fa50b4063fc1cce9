#![forbid(unsafe_code)]

//! Line height sources.

use std::fmt;

/// Supplies the height of each line of a label.
pub trait LineMetrics: fmt::Debug {
    /// Height of line `line` (0-based), in layout units.
    fn line_height(&self, line: usize) -> f32;
}

/// Every line has the same height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLineHeight(pub f32);

impl Default for FixedLineHeight {
    fn default() -> Self {
        Self(1.0)
    }
}

impl LineMetrics for FixedLineHeight {
    fn line_height(&self, _line: usize) -> f32 {
        self.0
    }
}

/// Explicit per-line heights. Lines past the end reuse the last height.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineHeights(pub Vec<f32>);

impl LineMetrics for LineHeights {
    fn line_height(&self, line: usize) -> f32 {
        self.0
            .get(line)
            .or_else(|| self.0.last())
            .copied()
            .unwrap_or(1.0)
    }
}

/// Line index of every char of `text`; a newline belongs to the line it
/// ends.
pub fn line_indices(text: &str) -> Vec<usize> {
    let mut line = 0;
    text.chars()
        .map(|c| {
            let this = line;
            if c == '\n' {
                line += 1;
            }
            this
        })
        .collect()
}

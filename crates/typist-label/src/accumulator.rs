#![forbid(unsafe_code)]

//! Per-glyph accumulators that effects add into each frame.

/// A per-glyph `(x, y)` accumulator, zeroed at the start of every frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulator2 {
    values: Vec<(f32, f32)>,
}

impl Accumulator2 {
    /// An accumulator for `len` glyphs, all zero.
    pub fn new(len: usize) -> Self {
        Self {
            values: vec![(0.0, 0.0); len],
        }
    }

    /// Resize to `len` glyphs and zero everything.
    pub fn reset_to(&mut self, len: usize) {
        self.values.clear();
        self.values.resize(len, (0.0, 0.0));
    }

    /// Zero every entry.
    pub fn clear(&mut self) {
        self.values.fill((0.0, 0.0));
    }

    /// Add `(x, y)` to glyph `index`. Out-of-range indices are ignored.
    #[inline]
    pub fn add(&mut self, index: usize, x: f32, y: f32) {
        if let Some(v) = self.values.get_mut(index) {
            v.0 += x;
            v.1 += y;
        }
    }

    /// Value of glyph `index`, zero when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> (f32, f32) {
        self.values.get(index).copied().unwrap_or((0.0, 0.0))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[(f32, f32)] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (f32, f32)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_and_clears() {
        let mut acc = Accumulator2::new(3);
        acc.add(1, 1.0, 2.0);
        acc.add(1, 0.5, -1.0);
        acc.add(9, 1.0, 1.0);
        assert_eq!(acc.get(1), (1.5, 1.0));
        assert_eq!(acc.get(9), (0.0, 0.0));
        acc.clear();
        assert!(acc.iter().all(|&v| v == (0.0, 0.0)));
        acc.reset_to(5);
        assert_eq!(acc.len(), 5);
    }
}

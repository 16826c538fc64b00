//! One-dimensional convenience surface.
//!
//! A [`LineTree`] is a plain binary segment tree over `[0, len)` that takes
//! index ranges instead of [`Cube`]s.

use std::ops::Range;

use orthotree_cube::Cube;

use crate::{Result, SegmentTree, TreeError};

/// Binary segment tree over a flat array.
pub type LineTree = SegmentTree<1>;

impl SegmentTree<1> {
    /// Build a tree over `values`.
    pub fn from_slice(values: &[i64]) -> Result<Self> {
        let len = i64::try_from(values.len()).map_err(|_| TreeError::CapacityOverflow)?;
        Self::new(values, [len])
    }

    /// Add `delta` to every index in `span`.
    pub fn add_span(&mut self, span: Range<i64>, delta: i64) -> Result<()> {
        let domain = self.span_domain(span)?;
        self.add_range(domain, delta)
    }

    /// Set every index in `span` to `value`.
    pub fn assign_span(&mut self, span: Range<i64>, value: i64) -> Result<()> {
        let domain = self.span_domain(span)?;
        self.assign_range(domain, value)
    }

    /// Sum of the values in `span`.
    pub fn query_span(&mut self, span: Range<i64>) -> Result<i64> {
        let domain = self.span_domain(span)?;
        self.query_range(domain)
    }

    pub fn get_at(&mut self, index: i64) -> Result<i64> {
        self.get([index])
    }

    fn span_domain(&self, span: Range<i64>) -> Result<Cube<1>> {
        Cube::from_ranges([span.clone()]).ok_or_else(|| {
            TreeError::out_of_bounds(format!("[{}, {})", span.start, span.end), self.domain())
        })
    }
}

//! Axis-aligned integer hyper-rectangles for orthotree.
//!
//! A [`Cube`] is a half-open box `[low, high)` in `D`-dimensional integer
//! space. Every tree node and every range request is expressed as one.
//! A zero extent on any axis makes the box empty; [`Cube::EMPTY`] is the
//! canonical form of "no overlap".

use std::fmt;
use std::ops::Range;

/// A half-open hyper-rectangle `[low, high)` over `D` integer axes.
///
/// Invariant: `low[k] <= high[k]` on every axis, and `high[k] - low[k]`
/// fits in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cube<const D: usize> {
    low: [i64; D],
    high: [i64; D],
}

impl<const D: usize> Cube<D> {
    /// Number of orthants a domain splits into (`2^D`).
    pub const ORTHANTS: usize = {
        assert!(D < usize::BITS as usize, "too many axes to enumerate orthants");
        1 << D
    };

    /// The canonical empty domain, `[0, 0)` on every axis.
    pub const EMPTY: Self = Self {
        low: [0; D],
        high: [0; D],
    };

    /// Create a domain from inclusive lower and exclusive upper bounds.
    ///
    /// Returns `None` if any axis is inverted or too long to measure in an
    /// `i64`.
    pub fn new(low: [i64; D], high: [i64; D]) -> Option<Self> {
        let measurable = low
            .iter()
            .zip(&high)
            .all(|(l, h)| l <= h && h.checked_sub(*l).is_some());
        measurable.then_some(Self { low, high })
    }

    /// The domain `[0, extents)`. Returns `None` for a negative extent.
    pub fn from_extents(extents: [i64; D]) -> Option<Self> {
        Self::new([0; D], extents)
    }

    /// The single-cell domain `[point, point + 1)`, or `None` if a
    /// coordinate is `i64::MAX`.
    pub fn unit(point: [i64; D]) -> Option<Self> {
        let mut high = point;
        for c in &mut high {
            *c = c.checked_add(1)?;
        }
        Some(Self { low: point, high })
    }

    /// Create a domain from one range per axis.
    pub fn from_ranges(ranges: [Range<i64>; D]) -> Option<Self> {
        Self::new(
            std::array::from_fn(|k| ranges[k].start),
            std::array::from_fn(|k| ranges[k].end),
        )
    }

    pub fn low(&self) -> [i64; D] {
        self.low
    }

    pub fn high(&self) -> [i64; D] {
        self.high
    }

    /// Length of the domain along `axis`.
    pub fn extent(&self, axis: usize) -> i64 {
        self.high[axis] - self.low[axis]
    }

    pub fn extents(&self) -> [i64; D] {
        std::array::from_fn(|k| self.extent(k))
    }

    /// Number of cells in the domain, saturating at `i64::MAX`.
    pub fn volume(&self) -> i64 {
        (0..D).fold(1i64, |acc, k| acc.saturating_mul(self.extent(k)))
    }

    /// Number of cells, or `None` if it does not fit in an `i64`.
    pub fn checked_volume(&self) -> Option<i64> {
        (0..D).try_fold(1i64, |acc, k| acc.checked_mul(self.extent(k)))
    }

    pub fn is_empty(&self) -> bool {
        (0..D).any(|k| self.low[k] == self.high[k])
    }

    /// True when the domain is exactly one cell.
    pub fn is_point(&self) -> bool {
        (0..D).all(|k| self.low[k].checked_add(1) == Some(self.high[k]))
    }

    /// Per-axis floor midpoint.
    pub fn center(&self) -> [i64; D] {
        std::array::from_fn(|k| self.low[k] + self.extent(k).div_euclid(2))
    }

    /// The orthant selected by the bits of `index`.
    ///
    /// Bit `k` set takes the low half `[low[k], mid[k])` of axis `k`, clear
    /// takes the high half `[mid[k], high[k])`. On an axis of extent 1 the
    /// low half is empty.
    pub fn orthant(&self, index: usize) -> Self {
        self.split(index, &self.center())
    }

    /// Iterate over all `2^D` orthants together with their index.
    pub fn orthants(&self) -> Orthants<D> {
        Orthants {
            parent: *self,
            mid: self.center(),
            next: 0,
        }
    }

    /// All `2^D` orthants, in index order.
    pub fn subdivide(&self) -> Vec<Self> {
        self.orthants().map(|(_, orthant)| orthant).collect()
    }

    fn split(&self, index: usize, mid: &[i64; D]) -> Self {
        debug_assert!(index < Self::ORTHANTS);
        let mut low = self.low;
        let mut high = self.high;
        for k in 0..D {
            if index & (1 << k) != 0 {
                high[k] = mid[k];
            } else {
                low[k] = mid[k];
            }
        }
        Self { low, high }
    }

    /// Overlap of two domains; [`Cube::EMPTY`] when they do not overlap.
    pub fn intersect(&self, other: &Self) -> Self {
        let mut low = [0; D];
        let mut high = [0; D];
        for k in 0..D {
            let lo = self.low[k].max(other.low[k]);
            let hi = self.high[k].min(other.high[k]);
            if lo >= hi {
                return Self::EMPTY;
            }
            low[k] = lo;
            high[k] = hi;
        }
        Self { low, high }
    }

    /// True when the domains share no cell. Empty domains are disjoint from
    /// everything.
    pub fn is_disjoint_from(&self, other: &Self) -> bool {
        self.is_empty()
            || other.is_empty()
            || (0..D).any(|k| other.low[k] >= self.high[k] || other.high[k] <= self.low[k])
    }

    pub fn contains_point(&self, point: &[i64; D]) -> bool {
        (0..D).all(|k| self.low[k] <= point[k] && point[k] < self.high[k])
    }

    /// True when every cell of `other` lies inside `self`.
    pub fn contains(&self, other: &Self) -> bool {
        other.is_empty()
            || (0..D).all(|k| self.low[k] <= other.low[k] && other.high[k] <= self.high[k])
    }

    /// Iterate over every cell in row-major order (last axis fastest).
    pub fn points(&self) -> Points<D> {
        Points {
            cube: *self,
            next: (!self.is_empty()).then_some(self.low),
        }
    }

    /// Row-major offset of `point` relative to the `low` corner.
    pub fn linear_offset(&self, point: &[i64; D]) -> Option<usize> {
        if !self.contains_point(point) {
            return None;
        }
        (0..D).try_fold(0usize, |acc, k| {
            let extent = usize::try_from(self.extent(k)).ok()?;
            let coord = usize::try_from(point[k] - self.low[k]).ok()?;
            acc.checked_mul(extent)?.checked_add(coord)
        })
    }
}

impl<const D: usize> fmt::Display for Cube<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if D == 0 {
            return write!(f, "[]");
        }
        for k in 0..D {
            if k > 0 {
                write!(f, " x ")?;
            }
            write!(f, "[{}, {})", self.low[k], self.high[k])?;
        }
        Ok(())
    }
}

/// Iterator over the orthants of a [`Cube`], see [`Cube::orthants`].
#[derive(Debug, Clone)]
pub struct Orthants<const D: usize> {
    parent: Cube<D>,
    mid: [i64; D],
    next: usize,
}

impl<const D: usize> Iterator for Orthants<D> {
    type Item = (usize, Cube<D>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= Cube::<D>::ORTHANTS {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some((index, self.parent.split(index, &self.mid)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = Cube::<D>::ORTHANTS - self.next;
        (remaining, Some(remaining))
    }
}

impl<const D: usize> ExactSizeIterator for Orthants<D> {}

/// Row-major iterator over the cells of a [`Cube`], see [`Cube::points`].
#[derive(Debug, Clone)]
pub struct Points<const D: usize> {
    cube: Cube<D>,
    next: Option<[i64; D]>,
}

impl<const D: usize> Iterator for Points<D> {
    type Item = [i64; D];

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let mut cursor = current;
        self.next = None;
        for k in (0..D).rev() {
            cursor[k] += 1;
            if cursor[k] < self.cube.high[k] {
                self.next = Some(cursor);
                break;
            }
            cursor[k] = self.cube.low[k];
        }
        Some(current)
    }
}

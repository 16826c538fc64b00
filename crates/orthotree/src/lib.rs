//! Lazy-propagation segment tree over N-dimensional integer grids.
//!
//! A [`SegmentTree`] stores one `i64` per cell of a `D`-dimensional grid
//! `[0, extents)` and supports, in time proportional to the boundary of the
//! region rather than its volume:
//!
//! - adding a constant to every cell of an axis-aligned region,
//! - assigning a constant to every cell of a region,
//! - summing the cells of a region.
//!
//! Each node covers a [`Cube`] and splits it into `2^D` orthants at the
//! per-axis floor midpoint. Updates that exactly cover a node stop there and
//! leave an [`Operation`] pending; the pending operation is pushed to the
//! children the next time a traversal has to descend through that node.
//!
//! ```
//! use orthotree::{Cube, SegmentTree};
//!
//! let mut tree = SegmentTree::filled([4, 4], 0).unwrap();
//! tree.add_range(Cube::from_ranges([0..2, 0..2]).unwrap(), 3).unwrap();
//! tree.assign_range(Cube::from_ranges([1..3, 1..3]).unwrap(), 7).unwrap();
//! assert_eq!(tree.total(), 37);
//! assert_eq!(tree.get([1, 1]).unwrap(), 7);
//! ```
//!
//! The structure is single-owner: queries push pending work down and so
//! take `&mut self`. Share it across threads behind a single lock.

mod error;
pub mod layout;
mod line;

pub use error::{Result, TreeError};
pub use line::LineTree;
pub use orthotree_cube::Cube;
pub use orthotree_op::Operation;

use layout::{Layout, NodeRef};
use tracing::{debug, trace};

/// Range-add, range-assign, range-sum tree over a `D`-dimensional grid.
///
/// `values[v]` always holds the true sum over node `v`'s domain, including
/// the operation pending at `v`. `pending[v]` is what `v`'s children have
/// not seen yet. Point nodes never keep a pending operation.
///
/// Sums are exact whenever they fit in an `i64`. Intermediate node sums that
/// do not fit wrap in two's complement rather than panicking, so every
/// result is the true sum modulo `2^64`.
#[derive(Debug, Clone)]
pub struct SegmentTree<const D: usize> {
    entire_domain: Cube<D>,
    layout: Layout<D>,
    values: Vec<i64>,
    pending: Vec<Operation>,
}

impl<const D: usize> SegmentTree<D> {
    /// Build a tree over `[0, extents)` from row-major cell values.
    pub fn new(values: &[i64], extents: [i64; D]) -> Result<Self> {
        let entire_domain = grid_domain(extents)?;
        let volume = entire_domain
            .checked_volume()
            .and_then(|volume| usize::try_from(volume).ok())
            .ok_or(TreeError::CapacityOverflow)?;
        if values.len() != volume {
            return Err(TreeError::DimensionMismatch {
                expected: volume,
                actual: values.len(),
            });
        }
        let layout = Layout::new(&extents).ok_or(TreeError::CapacityOverflow)?;
        let slots = layout.slots();

        let mut tree = Self {
            entire_domain,
            values: node_table(slots, 0)?,
            pending: node_table(slots, Operation::IDENTITY)?,
            layout,
        };
        tree.build(values, NodeRef::ROOT, entire_domain);

        debug!(
            ?extents,
            volume,
            slots,
            depth = tree.layout.depth(),
            "built segment tree"
        );
        Ok(tree)
    }

    /// Build a tree over `[0, extents)` with every cell set to `value`.
    pub fn filled(extents: [i64; D], value: i64) -> Result<Self> {
        let volume = grid_domain(extents)?
            .checked_volume()
            .and_then(|volume| usize::try_from(volume).ok())
            .ok_or(TreeError::CapacityOverflow)?;
        Self::new(&vec![value; volume], extents)
    }

    /// Per-axis extents the tree was built with.
    pub fn extents(&self) -> [i64; D] {
        self.entire_domain.high()
    }

    /// The whole grid as a domain.
    pub fn domain(&self) -> Cube<D> {
        self.entire_domain
    }

    /// Number of cells in the grid.
    pub fn volume(&self) -> i64 {
        self.entire_domain.volume()
    }

    /// Length of the node arrays.
    pub fn node_slots(&self) -> usize {
        self.values.len()
    }

    /// Apply `op` to every cell of `domain`.
    pub fn apply_to_range(&mut self, domain: Cube<D>, op: Operation) -> Result<()> {
        self.check_region(&domain)?;
        trace!(%domain, %op, "apply");
        if !domain.is_empty() {
            self.apply_from(NodeRef::ROOT, domain, self.entire_domain, op);
        }
        Ok(())
    }

    /// Set every cell of `domain` to `value`.
    pub fn assign_range(&mut self, domain: Cube<D>, value: i64) -> Result<()> {
        self.apply_to_range(domain, Operation::assign(value))
    }

    /// Add `delta` to every cell of `domain`.
    pub fn add_range(&mut self, domain: Cube<D>, delta: i64) -> Result<()> {
        self.apply_to_range(domain, Operation::add(delta))
    }

    /// Sum of the cells in `domain`. An empty domain sums to 0.
    pub fn query_range(&mut self, domain: Cube<D>) -> Result<i64> {
        self.check_region(&domain)?;
        trace!(%domain, "query");
        if domain.is_empty() {
            return Ok(0);
        }
        Ok(self.query_from(NodeRef::ROOT, domain, self.entire_domain))
    }

    /// Value of the cell at `point`.
    pub fn get(&mut self, point: [i64; D]) -> Result<i64> {
        match Cube::unit(point).filter(|cell| self.entire_domain.contains(cell)) {
            Some(cell) => self.query_range(cell),
            None => {
                debug!(?point, bounds = %self.entire_domain, "rejected point outside grid");
                Err(TreeError::out_of_bounds(
                    format!("{point:?}"),
                    self.entire_domain,
                ))
            }
        }
    }

    /// Sum of every cell in the grid.
    pub fn total(&self) -> i64 {
        self.values.first().copied().unwrap_or_default()
    }

    /// Every cell value in row-major order.
    ///
    /// Pending operations are pushed all the way down on the way.
    pub fn snapshot(&mut self) -> Vec<i64> {
        let len = usize::try_from(self.entire_domain.volume()).unwrap_or_default();
        let mut cells = vec![0; len];
        self.collect_from(NodeRef::ROOT, self.entire_domain, &mut cells);
        cells
    }

    fn check_region(&self, domain: &Cube<D>) -> Result<()> {
        if self.entire_domain.contains(domain) {
            return Ok(());
        }
        debug!(%domain, bounds = %self.entire_domain, "rejected region outside grid");
        Err(TreeError::out_of_bounds(domain, self.entire_domain))
    }

    fn build(&mut self, initial: &[i64], node: NodeRef, domain: Cube<D>) {
        if domain.is_point() {
            if let Some(offset) = self.entire_domain.linear_offset(&domain.low()) {
                self.values[node.address] = initial[offset];
            }
            return;
        }
        for (i, orthant) in domain.orthants() {
            if !orthant.is_empty() {
                self.build(initial, self.layout.child(node, i), orthant);
            }
        }
        self.pull(node, &domain);
    }

    /// Fold `op` into `node`: compose it into the pending slot, then
    /// refresh the stored sum with it.
    fn absorb(&mut self, node: NodeRef, domain: &Cube<D>, op: Operation) {
        let v = node.address;
        self.pending[v].absorb(op);
        self.values[v] = op.evaluate(self.values[v], domain.volume());
        if domain.is_point() {
            self.pending[v] = Operation::IDENTITY;
        }
    }

    /// Hand the operation pending at `node` to its children.
    fn push(&mut self, node: NodeRef, domain: &Cube<D>) {
        let op = std::mem::take(&mut self.pending[node.address]);
        if op.is_identity() {
            return;
        }
        for (i, orthant) in domain.orthants() {
            if !orthant.is_empty() {
                self.absorb(self.layout.child(node, i), &orthant, op);
            }
        }
    }

    /// Recompute the sum at `node` from its children.
    fn pull(&mut self, node: NodeRef, domain: &Cube<D>) {
        let sum = domain
            .orthants()
            .filter(|(_, orthant)| !orthant.is_empty())
            .map(|(i, _)| self.values[self.layout.child(node, i).address])
            .fold(0i64, i64::wrapping_add);
        self.values[node.address] = sum;
    }

    // `target` is non-empty and inside `domain`.
    fn apply_from(&mut self, node: NodeRef, target: Cube<D>, domain: Cube<D>, op: Operation) {
        if target == domain {
            self.absorb(node, &domain, op);
            return;
        }
        self.push(node, &domain);
        for (i, orthant) in domain.orthants() {
            let sub = orthant.intersect(&target);
            if !sub.is_empty() {
                self.apply_from(self.layout.child(node, i), sub, orthant, op);
            }
        }
        self.pull(node, &domain);
    }

    fn query_from(&mut self, node: NodeRef, target: Cube<D>, domain: Cube<D>) -> i64 {
        if target == domain {
            return self.values[node.address];
        }
        self.push(node, &domain);
        let mut sum = 0i64;
        for (i, orthant) in domain.orthants() {
            let sub = orthant.intersect(&target);
            if !sub.is_empty() {
                let part = self.query_from(self.layout.child(node, i), sub, orthant);
                sum = sum.wrapping_add(part);
            }
        }
        sum
    }

    fn collect_from(&mut self, node: NodeRef, domain: Cube<D>, cells: &mut [i64]) {
        if domain.is_point() {
            if let Some(offset) = self.entire_domain.linear_offset(&domain.low()) {
                cells[offset] = self.values[node.address];
            }
            return;
        }
        self.push(node, &domain);
        for (i, orthant) in domain.orthants() {
            if !orthant.is_empty() {
                self.collect_from(self.layout.child(node, i), orthant, cells);
            }
        }
    }
}

/// Allocate a node table, reporting allocation failure instead of aborting.
fn node_table<T: Clone>(slots: usize, fill: T) -> Result<Vec<T>> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(slots)
        .map_err(|_| TreeError::CapacityOverflow)?;
    table.resize(slots, fill);
    Ok(table)
}

fn grid_domain<const D: usize>(extents: [i64; D]) -> Result<Cube<D>> {
    match extents.iter().position(|&extent| extent <= 0) {
        Some(axis) => Err(TreeError::InvalidExtent {
            axis,
            extent: extents[axis],
        }),
        None => Cube::from_extents(extents).ok_or(TreeError::CapacityOverflow),
    }
}

//! Node addressing for the flat value and pending arrays.
//!
//! Nodes are stored level by level and node 0 is the root. Subdividing
//! halves every axis, rounding up, so at depth `h` no node is wider than
//! `ceil(e_k / 2^h)` on axis `k`. Once that bound reaches 1 the axis is
//! settled: every node at that depth is one cell wide on it and only the
//! high half of its split is non-empty. Settled axes drop out of the
//! branching, so a node at depth `h` owns `2^live_h` child slots, where
//! `live_h` counts the axes still splitting.
//!
//! The `i`-th orthant of the node at position `p` within level `h` lives at
//! position `p * 2^live_h + rank(i)` within level `h + 1`. `rank` keeps only
//! the bits of `i` that belong to live axes.
//!
//! The deepest level `H = max_k ceil(log2(e_k))` holds
//! `prod_k 2^ceil(log2(e_k))` slots, which is less than `2^D * volume`, and
//! each level above it holds at most half of the one below. The table
//! therefore stays under `2^(D+1) * volume` slots whatever the shape of the
//! grid.

/// A node's address in the flat arrays together with its depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef {
    pub address: usize,
    pub depth: usize,
}

impl NodeRef {
    pub const ROOT: Self = Self {
        address: 0,
        depth: 0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Level {
    start: usize,
    // bit k is set while axis k still splits at this depth
    live: usize,
}

/// Slot assignment for every node of a grid of one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout<const D: usize> {
    levels: Vec<Level>,
    slots: usize,
}

impl<const D: usize> Layout<D> {
    /// Lay out the tree for a grid with the given extents, or `None` if the
    /// table would not be addressable.
    pub fn new(extents: &[i64; D]) -> Option<Self> {
        let splits = extents.map(axis_depth);
        let depth = splits.iter().copied().max().unwrap_or(0);

        let mut levels = Vec::new();
        let mut start = 0usize;
        let mut width = 1usize;
        for h in 0..=depth {
            let live = (0..D)
                .filter(|&k| h < splits[k])
                .fold(0usize, |mask, k| mask | (1 << k));
            levels.push(Level { start, live });
            start = start.checked_add(width)?;
            width = width.checked_mul(1usize.checked_shl(live.count_ones())?)?;
        }
        Some(Self {
            levels,
            slots: start,
        })
    }

    /// Length of the node arrays.
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Depth of the deepest level.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// The node in the given orthant of `node`.
    ///
    /// `node` must not be a point and the orthant must be non-empty.
    pub fn child(&self, node: NodeRef, orthant: usize) -> NodeRef {
        let level = self.levels[node.depth];
        let next = self.levels[node.depth + 1];
        debug_assert_eq!(orthant & !level.live, 0, "orthant is empty on a settled axis");
        let fanout = 1usize << level.live.count_ones();
        let position = node.address - level.start;
        NodeRef {
            address: next.start + position * fanout + rank::<D>(orthant, level.live),
            depth: node.depth + 1,
        }
    }
}

// ceil(log2(extent)), the number of levels at which this axis still splits
fn axis_depth(extent: i64) -> u32 {
    u64::try_from(extent.max(1))
        .unwrap_or(1)
        .next_power_of_two()
        .trailing_zeros()
}

/// Bits of `orthant` on the axes in `live`, packed towards bit 0.
fn rank<const D: usize>(orthant: usize, live: usize) -> usize {
    (0..D)
        .filter(|&k| live & (1 << k) != 0)
        .enumerate()
        .fold(0, |packed, (slot, k)| packed | (((orthant >> k) & 1) << slot))
}

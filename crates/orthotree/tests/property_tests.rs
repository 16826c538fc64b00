//! Property tests for orthotree
//!
//! Every property runs the tree next to the dense reference grid from
//! orthotree-testkit and compares observable sums.

use orthotree::{Cube, Operation, SegmentTree};
use orthotree_testkit::ReferenceGrid;
use orthotree_testkit::proptest::{
    strategy_grid, strategy_nonempty_region, strategy_operation, strategy_region,
    strategy_script,
};
use proptest::prelude::*;

// ============================================================================
// Construction
// ============================================================================

proptest! {
    // Every unit cell reads back its initial value.
    #[test]
    fn prop_round_trip_2d((extents, values) in strategy_grid::<2>(9)) {
        let mut tree = SegmentTree::new(&values, extents).unwrap();
        let grid = ReferenceGrid::new(values.clone(), extents);
        for point in tree.domain().points() {
            prop_assert_eq!(tree.get(point).unwrap(), grid.get(point));
        }
        prop_assert_eq!(tree.snapshot(), values);
    }

    #[test]
    fn prop_round_trip_3d((extents, values) in strategy_grid::<3>(5)) {
        let mut tree = SegmentTree::new(&values, extents).unwrap();
        prop_assert_eq!(tree.total(), values.iter().sum::<i64>());
        prop_assert_eq!(tree.snapshot(), values);
    }
}

// ============================================================================
// Range Sums
// ============================================================================

proptest! {
    // query_range agrees with a cell-by-cell sum for any region.
    #[test]
    fn prop_sum_consistency(
        ((extents, values), regions) in strategy_grid::<2>(10).prop_flat_map(|(e, v)| {
            (Just((e, v)), prop::collection::vec(strategy_region(e), 1..8))
        })
    ) {
        let mut tree = SegmentTree::new(&values, extents).unwrap();
        let grid = ReferenceGrid::new(values, extents);
        for region in regions {
            prop_assert_eq!(tree.query_range(region).unwrap(), grid.sum(&region));
        }
    }

    // Querying twice without a mutation in between returns the same sum.
    #[test]
    fn prop_idempotent_requery(
        (script, region) in strategy_script::<2>(8, 6).prop_flat_map(|s| {
            let extents = s.extents;
            (Just(s), strategy_region(extents))
        })
    ) {
        let mut tree = SegmentTree::new(&script.initial, script.extents).unwrap();
        for (domain, op) in &script.steps {
            tree.apply_to_range(*domain, *op).unwrap();
        }
        let first = tree.query_range(region).unwrap();
        let second = tree.query_range(region).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Updates
// ============================================================================

proptest! {
    // add_range raises the region's sum by exactly k * volume.
    #[test]
    fn prop_add_raises_sum_by_volume(
        ((extents, values), region, k) in strategy_grid::<3>(6).prop_flat_map(|(e, v)| {
            (Just((e, v)), strategy_region(e), -20i64..20)
        })
    ) {
        let mut tree = SegmentTree::new(&values, extents).unwrap();
        let before = tree.query_range(region).unwrap();
        tree.add_range(region, k).unwrap();
        prop_assert_eq!(tree.query_range(region).unwrap(), before + k * region.volume());
    }

    // assign_range makes the region's sum k * volume regardless of history.
    #[test]
    fn prop_assign_fixes_sum(
        (script, region, k) in strategy_script::<2>(8, 5).prop_flat_map(|s| {
            let extents = s.extents;
            (Just(s), strategy_region(extents), -20i64..20)
        })
    ) {
        let mut tree = SegmentTree::new(&script.initial, script.extents).unwrap();
        for (domain, op) in &script.steps {
            tree.apply_to_range(*domain, *op).unwrap();
        }
        tree.assign_range(region, k).unwrap();
        prop_assert_eq!(tree.query_range(region).unwrap(), k * region.volume());
    }

    // Opposite adds over overlapping regions cancel on the overlap only.
    #[test]
    fn prop_overlapping_adds(
        (extents, d1, d2) in prop::array::uniform::<_, 2>(1i64..=9).prop_flat_map(|e| {
            (Just(e), strategy_nonempty_region(e), strategy_nonempty_region(e))
        })
    ) {
        let mut tree = SegmentTree::filled(extents, 0).unwrap();
        tree.add_range(d1, 5).unwrap();
        tree.add_range(d2, -5).unwrap();
        for point in tree.domain().points() {
            let expected = match (d1.contains_point(&point), d2.contains_point(&point)) {
                (true, false) => 5,
                (false, true) => -5,
                _ => 0,
            };
            prop_assert_eq!(tree.get(point).unwrap(), expected, "at {:?}", point);
        }
    }

    // Arbitrary scripts of adds and assigns match the reference grid.
    #[test]
    fn prop_script_matches_reference_2d(script in strategy_script::<2>(9, 12)) {
        let mut tree = SegmentTree::new(&script.initial, script.extents).unwrap();
        let mut grid = ReferenceGrid::new(script.initial.clone(), script.extents);
        for (domain, op) in &script.steps {
            tree.apply_to_range(*domain, *op).unwrap();
            grid.apply(domain, *op);
            prop_assert_eq!(tree.total(), grid.sum(&grid.domain()));
        }
        prop_assert_eq!(tree.snapshot(), grid.cells().to_vec());
    }

    #[test]
    fn prop_script_matches_reference_1d(script in strategy_script::<1>(33, 16)) {
        let mut tree = SegmentTree::new(&script.initial, script.extents).unwrap();
        let mut grid = ReferenceGrid::new(script.initial.clone(), script.extents);
        for (domain, op) in &script.steps {
            tree.apply_to_range(*domain, *op).unwrap();
            grid.apply(domain, *op);
        }
        for point in grid.domain().points() {
            prop_assert_eq!(tree.get(point).unwrap(), grid.get(point));
        }
    }

    #[test]
    fn prop_script_matches_reference_3d(script in strategy_script::<3>(5, 8)) {
        let mut tree = SegmentTree::new(&script.initial, script.extents).unwrap();
        let mut grid = ReferenceGrid::new(script.initial.clone(), script.extents);
        for (domain, op) in &script.steps {
            tree.apply_to_range(*domain, *op).unwrap();
            grid.apply(domain, *op);
        }
        prop_assert_eq!(tree.snapshot(), grid.cells().to_vec());
    }

    // Interleaving queries with updates must not disturb later results.
    #[test]
    fn prop_queries_between_updates(
        (script, probes) in strategy_script::<2>(8, 8).prop_flat_map(|s| {
            let extents = s.extents;
            let n = s.steps.len();
            (Just(s), prop::collection::vec(strategy_region(extents), n..=n))
        })
    ) {
        let mut tree = SegmentTree::new(&script.initial, script.extents).unwrap();
        let mut grid = ReferenceGrid::new(script.initial.clone(), script.extents);
        for ((domain, op), probe) in script.steps.iter().zip(&probes) {
            prop_assert_eq!(tree.query_range(*probe).unwrap(), grid.sum(probe));
            tree.apply_to_range(*domain, *op).unwrap();
            grid.apply(domain, *op);
        }
        prop_assert_eq!(tree.snapshot(), grid.cells().to_vec());
    }
}

// ============================================================================
// Boundary Validation
// ============================================================================

proptest! {
    // Regions poking outside the grid are refused and leave the tree intact.
    #[test]
    fn prop_out_of_bounds_leaves_tree_untouched(
        ((extents, values), op, overhang) in strategy_grid::<2>(6).prop_flat_map(|(e, v)| {
            (Just((e, v)), strategy_operation(), 1i64..4)
        })
    ) {
        let mut tree = SegmentTree::new(&values, extents).unwrap();
        let region = Cube::new([0, 0], [extents[0] + overhang, extents[1]]).unwrap();
        prop_assert!(tree.apply_to_range(region, op).unwrap_err().is_out_of_bounds());
        prop_assert!(tree.query_range(region).is_err());
        prop_assert!(tree.get([extents[0], 0]).is_err());
        prop_assert_eq!(tree.snapshot(), values);
    }
}

#[test]
fn identity_operation_changes_nothing() {
    let values: Vec<i64> = (0..20).collect();
    let mut tree = SegmentTree::new(&values, [4, 5]).unwrap();
    tree.apply_to_range(Cube::new([1, 1], [3, 4]).unwrap(), Operation::IDENTITY)
        .unwrap();
    assert_eq!(tree.snapshot(), values);
}

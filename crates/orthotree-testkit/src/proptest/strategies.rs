//! Proptest strategies for orthotree property-based testing.
//!
//! Grids stay small so the dense reference model remains cheap to check.

use orthotree_cube::Cube;
use orthotree_op::Operation;
use proptest::prelude::*;

// ============================================================================
// Grid Strategies
// ============================================================================

/// Strategy for per-axis extents in `1..=max_extent`.
pub fn strategy_extents<const D: usize>(max_extent: i64) -> impl Strategy<Value = [i64; D]> {
    prop::array::uniform::<_, D>(1..=max_extent)
}

/// Strategy for extents together with one initial value per cell.
pub fn strategy_grid<const D: usize>(
    max_extent: i64,
) -> impl Strategy<Value = ([i64; D], Vec<i64>)> {
    strategy_extents::<D>(max_extent).prop_flat_map(|extents| {
        let volume = extents.iter().product::<i64>() as usize;
        (Just(extents), prop::collection::vec(-100i64..100, volume))
    })
}

// ============================================================================
// Region Strategies
// ============================================================================

/// Strategy for a region inside `[0, extents)`, possibly empty.
pub fn strategy_region<const D: usize>(extents: [i64; D]) -> impl Strategy<Value = Cube<D>> {
    let axes: Vec<_> = extents.iter().map(|&e| (0..=e, 0..=e)).collect();
    axes.prop_map(|bounds| {
        Cube::new(
            std::array::from_fn(|k| bounds[k].0.min(bounds[k].1)),
            std::array::from_fn(|k| bounds[k].0.max(bounds[k].1)),
        )
        .unwrap()
    })
}

/// Strategy for a region inside `[0, extents)` holding at least one cell.
pub fn strategy_nonempty_region<const D: usize>(
    extents: [i64; D],
) -> impl Strategy<Value = Cube<D>> {
    let axes: Vec<_> = extents.iter().map(|&e| (0..e, 0..e)).collect();
    axes.prop_map(|bounds| {
        Cube::new(
            std::array::from_fn(|k| bounds[k].0.min(bounds[k].1)),
            std::array::from_fn(|k| bounds[k].0.max(bounds[k].1) + 1),
        )
        .unwrap()
    })
}

// ============================================================================
// Operation Strategies
// ============================================================================

/// Strategy for add and assign operations with small constants.
pub fn strategy_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (-50i64..50).prop_map(Operation::add),
        (-50i64..50).prop_map(Operation::assign),
    ]
}

/// A grid plus a sequence of range operations to run against it.
#[derive(Debug, Clone)]
pub struct Script<const D: usize> {
    pub extents: [i64; D],
    pub initial: Vec<i64>,
    pub steps: Vec<(Cube<D>, Operation)>,
}

/// Strategy for a [`Script`] with up to `max_steps` operations.
pub fn strategy_script<const D: usize>(
    max_extent: i64,
    max_steps: usize,
) -> impl Strategy<Value = Script<D>> {
    strategy_grid::<D>(max_extent).prop_flat_map(move |(extents, initial)| {
        let step = (strategy_region(extents), strategy_operation());
        prop::collection::vec(step, 0..=max_steps).prop_map(move |steps| Script {
            extents,
            initial: initial.clone(),
            steps,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_regions_stay_inside_grid(
            (extents, region) in strategy_extents::<3>(6)
                .prop_flat_map(|e| (Just(e), strategy_region(e)))
        ) {
            let grid = Cube::from_extents(extents).unwrap();
            prop_assert!(grid.contains(&region));
        }

        #[test]
        fn prop_nonempty_regions_hold_cells(
            region in strategy_nonempty_region([5, 1, 3])
        ) {
            prop_assert!(!region.is_empty());
            prop_assert!(Cube::from_extents([5, 1, 3]).unwrap().contains(&region));
        }

        #[test]
        fn prop_grid_values_match_volume((extents, values) in strategy_grid::<2>(7)) {
            prop_assert_eq!(values.len() as i64, extents[0] * extents[1]);
        }
    }
}

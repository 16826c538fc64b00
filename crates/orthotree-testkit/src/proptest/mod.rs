//! Proptest strategies for orthotree property-based testing.

pub mod strategies;

pub use strategies::{
    strategy_extents, strategy_grid, strategy_nonempty_region, strategy_operation,
    strategy_region, strategy_script, Script,
};

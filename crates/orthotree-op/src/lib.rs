//! Range operations for orthotree.
//!
//! An [`Operation`] is a bulk mutation that either adds a constant to every
//! cell of a region or assigns a constant to every cell. Operations compose,
//! which is what lets a tree node hold a single pending operation no matter
//! how many updates have landed on it.

use std::fmt;

/// A pending add or assign.
///
/// `is_reset` marks an assign, in which case `delta` is the assigned value.
/// Otherwise `delta` is added to every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    is_reset: bool,
    delta: i64,
}

impl Operation {
    /// The operation that changes nothing.
    pub const IDENTITY: Self = Self {
        is_reset: false,
        delta: 0,
    };

    /// Add `delta` to every cell.
    pub const fn add(delta: i64) -> Self {
        Self {
            is_reset: false,
            delta,
        }
    }

    /// Set every cell to `value`.
    pub const fn assign(value: i64) -> Self {
        Self {
            is_reset: true,
            delta: value,
        }
    }

    pub const fn is_reset(&self) -> bool {
        self.is_reset
    }

    pub const fn delta(&self) -> i64 {
        self.delta
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The operation equivalent to applying `older` and then `self`.
    ///
    /// An assign discards whatever came before it; adds accumulate onto the
    /// older operation, assign or add.
    #[must_use]
    pub fn compose(self, older: Self) -> Self {
        if self.is_reset {
            self
        } else {
            Self {
                is_reset: older.is_reset,
                delta: older.delta.wrapping_add(self.delta),
            }
        }
    }

    /// Fold a newer operation into this pending one.
    pub fn absorb(&mut self, newer: Self) {
        *self = newer.compose(*self);
    }

    /// Apply the operation to the sum `aggregate` of `volume` cells.
    ///
    /// Arithmetic wraps, so the result is exact modulo `2^64`.
    pub fn evaluate(&self, aggregate: i64, volume: i64) -> i64 {
        let spread = volume.wrapping_mul(self.delta);
        if self.is_reset {
            spread
        } else {
            aggregate.wrapping_add(spread)
        }
    }
}

impl Default for Operation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_reset, self.delta) {
            (true, value) => write!(f, "assign({value})"),
            (false, 0) => write!(f, "identity"),
            (false, delta) => write!(f, "add({delta:+})"),
        }
    }
}

//! Test fixtures for orthotree.
//!
//! [`ReferenceGrid`] is a dense, obviously-correct model of a grid under
//! range operations. Property tests run the same operations against it and
//! against the tree and compare. The [`proptest`] module generates grids,
//! regions and operation scripts.

pub mod proptest;
mod reference;

pub use reference::ReferenceGrid;

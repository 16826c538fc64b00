//! Fuzz harness for range operations on a 2-D grid
//!
//! Decodes the input into a grid shape and a sequence of adds, assigns and
//! queries, then checks every answer against the dense reference grid.
//! Target: `SegmentTree::<2>` apply and query paths

#![no_main]

use libfuzzer_sys::fuzz_target;
use orthotree::{Cube, Operation, SegmentTree};
use orthotree_testkit::ReferenceGrid;

fn bounds(a: u8, b: u8, extent: i64) -> (i64, i64) {
    let a = i64::from(a) % (extent + 1);
    let b = i64::from(b) % (extent + 1);
    (a.min(b), a.max(b))
}

fuzz_target!(|data: &[u8]| {
    let [w, h, rest @ ..] = data else {
        return;
    };
    let extents = [i64::from(*w % 12) + 1, i64::from(*h % 12) + 1];

    let mut tree = SegmentTree::filled(extents, 0).expect("extents are positive");
    let mut grid = ReferenceGrid::filled(extents, 0);

    for chunk in rest.chunks_exact(6) {
        let (x0, x1) = bounds(chunk[1], chunk[2], extents[0]);
        let (y0, y1) = bounds(chunk[3], chunk[4], extents[1]);
        let region = Cube::new([x0, y0], [x1, y1]).expect("bounds are ordered");
        let value = i64::from(chunk[5] as i8);

        match chunk[0] % 3 {
            0 => {
                tree.add_range(region, value).expect("region is inside the grid");
                grid.apply(&region, Operation::add(value));
            }
            1 => {
                tree.assign_range(region, value).expect("region is inside the grid");
                grid.apply(&region, Operation::assign(value));
            }
            _ => {
                let sum = tree.query_range(region).expect("region is inside the grid");
                assert_eq!(sum, grid.sum(&region), "query over {region}");
            }
        }
        assert_eq!(tree.total(), grid.sum(&grid.domain()));
    }

    assert_eq!(tree.snapshot(), grid.cells());
});

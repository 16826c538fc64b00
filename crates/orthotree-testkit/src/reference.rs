use orthotree_cube::Cube;
use orthotree_op::Operation;

/// Dense row-major grid that applies every operation cell by cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceGrid<const D: usize> {
    domain: Cube<D>,
    cells: Vec<i64>,
}

impl<const D: usize> ReferenceGrid<D> {
    /// Panics if `cells` does not hold exactly one value per cell.
    pub fn new(cells: Vec<i64>, extents: [i64; D]) -> Self {
        let domain = Cube::from_extents(extents).expect("extents must be non-negative");
        assert_eq!(
            usize::try_from(domain.volume()).ok(),
            Some(cells.len()),
            "reference grid needs one value per cell"
        );
        Self { domain, cells }
    }

    pub fn filled(extents: [i64; D], value: i64) -> Self {
        let domain = Cube::from_extents(extents).expect("extents must be non-negative");
        let len = usize::try_from(domain.volume()).expect("volume fits in memory");
        Self::new(vec![value; len], extents)
    }

    pub fn domain(&self) -> Cube<D> {
        self.domain
    }

    pub fn cells(&self) -> &[i64] {
        &self.cells
    }

    pub fn apply(&mut self, region: &Cube<D>, op: Operation) {
        for point in region.points() {
            let offset = self.offset(&point);
            self.cells[offset] = op.evaluate(self.cells[offset], 1);
        }
    }

    /// Sum of the cells in `region`, wrapping like the tree does.
    pub fn sum(&self, region: &Cube<D>) -> i64 {
        region
            .points()
            .map(|point| self.cells[self.offset(&point)])
            .fold(0, i64::wrapping_add)
    }

    pub fn get(&self, point: [i64; D]) -> i64 {
        self.cells[self.offset(&point)]
    }

    fn offset(&self, point: &[i64; D]) -> usize {
        self.domain
            .linear_offset(point)
            .unwrap_or_else(|| panic!("{point:?} is outside {}", self.domain))
    }
}

use ndarray::{Array2, ArrayView1};

/// Zero-initialised `rows x cols` tally, used as event type x event time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMatrix {
    counts: Array2<usize>,
}

impl CountMatrix {
    pub fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            counts: Array2::zeros((rows, cols)),
        }
    }

    #[inline]
    pub fn dim(&self) -> (usize, usize) {
        self.counts.dim()
    }

    #[inline]
    pub fn increment(&mut self, row: usize, col: usize) {
        self.counts[[row, col]] += 1;
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> usize {
        self.counts[[row, col]]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: usize) {
        self.counts[[row, col]] = value;
    }

    pub fn row(&self, row: usize) -> ArrayView1<'_, usize> {
        self.counts.row(row)
    }

    /// Column totals across all rows.
    pub fn column_sums(&self) -> Vec<usize> {
        self.counts.columns().into_iter().map(|c| c.sum()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_with_requested_shape() {
        let m = CountMatrix::zeroed(2, 3);
        assert_eq!(m.dim(), (2, 3));
        assert!(m.row(0).iter().chain(m.row(1).iter()).all(|&c| c == 0));
    }

    #[test]
    fn increments_and_sums_columns() {
        let mut m = CountMatrix::zeroed(2, 3);
        m.increment(0, 1);
        m.increment(1, 1);
        m.increment(1, 2);
        m.set(0, 0, 4);
        assert_eq!(m.get(1, 1), 1);
        assert_eq!(m.column_sums(), vec![4, 2, 1]);
        assert_eq!(m.row(1).to_vec(), vec![0, 1, 1]);
    }
}

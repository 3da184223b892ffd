/// Zero-initialised tally over a fixed number of buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountVector {
    counts: Vec<usize>,
}

impl CountVector {
    pub fn zeroed(len: usize) -> Self {
        Self {
            counts: vec![0; len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[inline]
    pub fn increment(&mut self, bucket: usize) {
        self.counts[bucket] += 1;
    }

    #[inline]
    pub fn get(&self, bucket: usize) -> usize {
        self.counts[bucket]
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.counts
    }

    /// Turns per-bucket counts into suffix sums, so that bucket `k` holds the
    /// total of buckets `k..len`.
    pub fn accumulate_from_end(&mut self) {
        for k in (1..self.counts.len()).rev() {
            self.counts[k - 1] += self.counts[k];
        }
    }

    /// Sum of squared counts.
    pub fn sum_of_squares(&self) -> f64 {
        self.counts.iter().map(|&c| (c as f64).powi(2)).sum()
    }

    pub fn is_non_increasing(&self) -> bool {
        self.counts.windows(2).all(|w| w[0] >= w[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let v = CountVector::zeroed(3);
        assert_eq!(v.as_slice(), &[0, 0, 0]);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn increments_single_bucket() {
        let mut v = CountVector::zeroed(3);
        v.increment(1);
        v.increment(1);
        v.increment(2);
        assert_eq!(v.as_slice(), &[0, 2, 1]);
        assert_eq!(v.sum_of_squares(), 5.0);
    }

    #[test]
    fn accumulate_from_end_builds_step_function() {
        let mut v = CountVector::zeroed(4);
        for (bucket, times) in [(0, 1), (1, 0), (2, 3), (3, 2)] {
            for _ in 0..times {
                v.increment(bucket);
            }
        }
        v.accumulate_from_end();
        assert_eq!(v.as_slice(), &[6, 5, 5, 2]);
        assert!(v.is_non_increasing());
    }

    #[test]
    fn accumulate_on_empty_or_single_is_noop() {
        let mut empty = CountVector::zeroed(0);
        empty.accumulate_from_end();
        assert!(empty.is_empty());

        let mut single = CountVector::zeroed(1);
        single.increment(0);
        single.accumulate_from_end();
        assert_eq!(single.as_slice(), &[1]);
    }
}

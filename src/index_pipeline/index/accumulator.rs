/// Running sum and count of the indices of eligible pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndexAccumulator {
    sum: f64,
    valid_count: usize,
}

impl IndexAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, index: f64) {
        self.sum += index;
        self.valid_count += 1;
    }

    /// Combines two partial accumulators.
    pub fn merge(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            valid_count: self.valid_count + other.valid_count,
        }
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn valid_count(&self) -> usize {
        self.valid_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_merge() {
        let mut left = IndexAccumulator::new();
        left.add(0.5);
        left.add(-0.25);

        let mut right = IndexAccumulator::new();
        right.add(1.0);

        let merged = left.merge(right);
        assert_eq!(merged.valid_count(), 3);
        assert!((merged.sum() - 1.25).abs() < 1e-12);
        assert_eq!(IndexAccumulator::new().merge(IndexAccumulator::new()), IndexAccumulator::new());
    }
}

/// Represent a range from [start, end) in haplotype space
/// Inclusive start, exclusive of end
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    /// Check if `[start, end)` intersects this interval
    #[inline]
    pub fn overlap(&self, start: i64, end: i64) -> bool {
        self.start < end && start < self.end
    }

    /// Check if a single coordinate falls inside this interval
    #[inline]
    pub fn contains(&self, coord: i64) -> bool {
        self.start <= coord && coord < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(0, 10, true)]
    #[case(0, 5, false)]
    #[case(6, 7, false)]
    #[case(5, 6, true)]
    #[case(3, 6, true)]
    fn test_overlap_is_half_open(#[case] start: i64, #[case] end: i64, #[case] expected: bool) {
        let iv = Interval { start: 5, end: 6 };
        assert_eq!(iv.overlap(start, end), expected);
    }

    #[rstest]
    fn test_contains() {
        let iv = Interval { start: 10, end: 13 };
        assert!(!iv.contains(9));
        assert!(iv.contains(10));
        assert!(iv.contains(12));
        assert!(!iv.contains(13));
    }
}

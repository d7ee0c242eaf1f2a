//! Chunk boundary planning.

use std::ops::Range;

/// Fixed-size paragraph ranges covering `total` paragraphs.
///
/// Every range spans `size` paragraphs except a shorter final remainder; an
/// empty document plans no ranges at all.
pub fn chunk_ranges(total: usize, size: usize) -> Vec<Range<usize>> {
    let size = size.max(1);
    (0..total)
        .step_by(size)
        .map(|start| start..(start + size).min(total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_plans_nothing() {
        assert!(chunk_ranges(0, 50).is_empty());
    }

    #[test]
    fn test_exact_multiple() {
        let ranges = chunk_ranges(100, 50);
        assert_eq!(ranges, vec![0..50, 50..100]);
    }

    #[test]
    fn test_remainder_goes_to_final_chunk() {
        let ranges = chunk_ranges(101, 50);
        assert_eq!(ranges, vec![0..50, 50..100, 100..101]);
    }

    #[test]
    fn test_single_short_document() {
        assert_eq!(chunk_ranges(3, 50), vec![0..3]);
    }

    #[test]
    fn test_chunk_count_is_ceiling_division() {
        for total in 0..=200 {
            let ranges = chunk_ranges(total, 50);
            assert_eq!(ranges.len(), total.div_ceil(50));
            assert_eq!(ranges.iter().map(|r| r.len()).sum::<usize>(), total);
        }
    }

    #[test]
    fn test_zero_size_floors_to_one() {
        assert_eq!(chunk_ranges(2, 0), vec![0..1, 1..2]);
    }
}

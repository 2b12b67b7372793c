//! Page arithmetic.

use std::ops::Range;

/// `ceil(total / size)`, never less than one page
pub fn page_count(total: usize, size: usize) -> usize {
    let size = size.max(1);
    total.div_ceil(size).max(1)
}

/// Effective page index (clamped) and the slice range it covers
pub fn page_bounds(total: usize, size: usize, index: usize) -> (usize, Range<usize>) {
    let size = size.max(1);
    let index = index.min(page_count(total, size) - 1);
    let start = (index * size).min(total);
    let end = (start + size).min(total);
    (index, start..end)
}

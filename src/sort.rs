//! In-place bitonic sort
//!
//! The classic network sorts power-of-two lengths only. Other lengths are
//! rejected with [`SortError::UnsupportedLength`] rather than left in an
//! unspecified order; [`sort_padded`] handles them explicitly.

use crate::diagnostics::SortError;
use crate::exec::sequential_pass;
use crate::network::{Layout, is_supported_len, schedule};
use std::cmp::Ordering;

/// Sort `data` ascending with the classic bitonic network.
///
/// Equal elements may be reordered. Lengths 0 and 1 are no-ops.
///
/// # Errors
///
/// [`SortError::UnsupportedLength`] when the length is not a power of two.
/// `data` is left untouched in that case.
///
/// # Example
///
/// ```
/// let mut data = [3, 7, 4, 8, 6, 2, 1, 5];
/// bitonic::sort(&mut data).unwrap();
/// assert_eq!(data, [1, 2, 3, 4, 5, 6, 7, 8]);
/// ```
pub fn sort<T: Ord>(data: &mut [T]) -> Result<(), SortError> {
    sort_by(data, T::cmp)
}

/// Sort `data` with the classic bitonic network using `cmp` as the order.
///
/// `cmp` must be a total order.
pub fn sort_by<T, F>(data: &mut [T], mut cmp: F) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = data.len();
    if !is_supported_len(n) {
        return Err(SortError::unsupported_length(n));
    }

    for pass in schedule(n, Layout::Alternating) {
        sequential_pass(data, pass, &mut cmp);
    }
    Ok(())
}

/// Sort `data` ascending, whatever its length.
///
/// Runs the network for the next power of two as if the tail were filled
/// with values greater than every element. The filler never exists.
pub fn sort_padded<T: Ord>(data: &mut [T]) {
    sort_padded_by(data, T::cmp)
}

/// [`sort_padded`] with a caller-supplied total order
pub fn sort_padded_by<T, F>(data: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for pass in schedule(data.len(), Layout::Padded) {
        sequential_pass(data, pass, &mut cmp);
    }
}

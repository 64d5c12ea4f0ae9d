//! Sorting tests

use bitonic::{SortError, sort, sort_by, sort_padded, sort_padded_by};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn sorted_copy<T: Ord + Clone>(values: &[T]) -> Vec<T> {
    let mut expected = values.to_vec();
    expected.sort();
    expected
}

// ==================== Reference Scenarios ====================

#[test]
fn test_sort_eight() {
    let mut data = vec![3, 7, 4, 8, 6, 2, 1, 5];
    sort(&mut data).unwrap();
    assert_eq!(data, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_sort_two() {
    let mut data = vec![2, 1];
    sort(&mut data).unwrap();
    assert_eq!(data, vec![1, 2]);
}

#[test]
fn test_sort_four_reversed() {
    let mut data = vec![4, 3, 2, 1];
    sort(&mut data).unwrap();
    assert_eq!(data, vec![1, 2, 3, 4]);
}

#[test]
fn test_sort_all_equal() {
    let mut data = vec![1, 1, 1, 1];
    sort(&mut data).unwrap();
    assert_eq!(data, vec![1, 1, 1, 1]);
}

#[test]
fn test_sort_empty() {
    let mut data: Vec<i32> = vec![];
    sort(&mut data).unwrap();
    assert!(data.is_empty());
}

#[test]
fn test_sort_single() {
    let mut data = vec![42];
    sort(&mut data).unwrap();
    assert_eq!(data, vec![42]);
}

#[test]
fn test_sort_extremes() {
    let mut data = vec![i64::MAX, 0, i64::MIN, -1];
    sort(&mut data).unwrap();
    assert_eq!(data, vec![i64::MIN, -1, 0, i64::MAX]);
}

#[test]
fn test_sort_strings() {
    let mut data = vec!["pear", "apple", "fig", "kiwi"];
    sort(&mut data).unwrap();
    assert_eq!(data, vec!["apple", "fig", "kiwi", "pear"]);
}

// ==================== Unsupported Lengths ====================

#[test]
fn test_non_power_of_two_rejected() {
    for len in [3usize, 5, 6, 7, 9, 12, 100] {
        let mut data: Vec<usize> = (0..len).rev().collect();
        let before = data.clone();

        match sort(&mut data) {
            Err(SortError::UnsupportedLength { len: got, next }) => {
                assert_eq!(got, len);
                assert_eq!(next, len.next_power_of_two());
            }
            other => panic!("expected UnsupportedLength for {len}, got {other:?}"),
        }
        assert_eq!(data, before, "rejected input must be left untouched");
    }
}

// ==================== Padded Network ====================

#[test]
fn test_sort_padded_every_small_length() {
    for len in 0..=70usize {
        let mut data: Vec<usize> = (0..len).map(|i| (i * 37 + 11) % 23).collect();
        let expected = sorted_copy(&data);
        sort_padded(&mut data);
        assert_eq!(data, expected, "len = {len}");
    }
}

#[test]
fn test_sort_padded_agrees_with_classic() {
    let original = vec![5, 3, 9, 1, 7, 2, 8, 6, 4, 0, 15, 11, 13, 10, 14, 12];
    let mut classic = original.clone();
    let mut padded = original;

    sort(&mut classic).unwrap();
    sort_padded(&mut padded);
    assert_eq!(classic, padded);
}

#[test]
fn test_sort_padded_by_key() {
    let mut data = vec![(3, 'c'), (1, 'a'), (2, 'b')];
    sort_padded_by(&mut data, |a, b| a.0.cmp(&b.0));
    assert_eq!(data, vec![(1, 'a'), (2, 'b'), (3, 'c')]);
}

// ==================== Properties ====================

fn power_of_two_vec() -> impl Strategy<Value = Vec<i32>> {
    (0u32..=9).prop_flat_map(|exp| proptest::collection::vec(any::<i32>(), 1usize << exp))
}

proptest! {
    #[test]
    fn prop_sort_matches_std(mut data in power_of_two_vec()) {
        let expected = sorted_copy(&data);
        sort(&mut data).unwrap();
        // Equal to the std result: non-decreasing and a permutation
        prop_assert_eq!(data, expected);
    }

    #[test]
    fn prop_sort_is_idempotent(mut data in power_of_two_vec()) {
        sort(&mut data).unwrap();
        let once = data.clone();
        sort(&mut data).unwrap();
        prop_assert_eq!(data, once);
    }

    #[test]
    fn prop_sort_by_reverse(mut data in power_of_two_vec()) {
        let mut expected = sorted_copy(&data);
        expected.reverse();
        sort_by(&mut data, |a, b| b.cmp(a)).unwrap();
        prop_assert_eq!(data, expected);
    }

    #[test]
    fn prop_sort_padded_any_length(mut data in proptest::collection::vec(any::<i16>(), 0..300)) {
        let expected = sorted_copy(&data);
        sort_padded(&mut data);
        prop_assert_eq!(data, expected);
    }

    #[test]
    fn prop_few_distinct_values(mut data in proptest::collection::vec(0u8..3, 64)) {
        let expected = sorted_copy(&data);
        sort(&mut data).unwrap();
        prop_assert!(data.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(data, expected);
    }
}

//! Evenly spread index selection.

use std::collections::BTreeSet;

/// Choose `count` indices out of `0..total`, spread across the range.
///
/// When `total <= count` every index is returned. Otherwise the first and
/// last index are always kept and the interior slots are taken at
/// `floor(i * (total - 2) / (count - 1))` for `i = 1..count - 1`. Indices
/// are returned sorted and distinct; if rounding ever collapses two picks,
/// the lowest unused interior indices backfill until `count` are chosen.
/// A `count` of one keeps only the first index.
///
/// # Examples
///
/// ```
/// use reimagine_core::spread_indices;
///
/// assert_eq!(spread_indices(6, 4), vec![0, 1, 2, 5]);
/// assert_eq!(spread_indices(3, 4), vec![0, 1, 2]);
/// assert_eq!(spread_indices(10, 1), vec![0]);
/// assert!(spread_indices(10, 0).is_empty());
/// ```
pub fn spread_indices(total: usize, count: usize) -> Vec<usize> {
    if total <= count {
        return (0..total).collect();
    }
    match count {
        0 => return Vec::new(),
        1 => return vec![0],
        _ => {}
    }

    let mut picked = BTreeSet::from([0, total - 1]);
    let step = (total - 2) as f64 / (count - 1) as f64;
    for i in 1..count - 1 {
        picked.insert((i as f64 * step).floor() as usize);
    }

    let mut candidate = 1;
    while picked.len() < count && candidate < total - 1 {
        picked.insert(candidate);
        candidate += 1;
    }

    picked.into_iter().collect()
}

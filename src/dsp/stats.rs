//! Order statistics for short lists.

/// Median of `values`, sorting them ascending in place.
///
/// For an even count the two middle values are averaged with truncating
/// division. Returns `None` for an empty slice.
pub fn median(values: &mut [i32]) -> Option<i32> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2)
    }
}

//! Lookup helpers shared by the segment and elevation tables.

/// Index of the first element whose key is not less than `target`.
///
/// `items` must be sorted by `key`. Returns `items.len()` when every key is
/// smaller than `target`.
pub fn lower_bound<T, K, F>(items: &[T], target: K, key: F) -> usize
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    items.partition_point(|item| key(item) < target)
}

/// Linear interpolation between `(x0, y0)` and `(x1, y1)`.
///
/// Coincident abscissas return `y0`.
pub fn interpolate(x: f64, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> f64 {
    let dx = x1 - x0;
    if dx == 0.0 {
        return y0;
    }
    y0 + (x - x0) / dx * (y1 - y0)
}

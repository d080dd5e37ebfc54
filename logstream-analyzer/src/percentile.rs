/// Interpolated p-th percentile of `values`, with `p` in `[0, 100]`.
///
/// Copies and sorts `values` ascending, then takes the fractional rank
/// `index = p / 100 * (n - 1)` and linearly interpolates between the two
/// neighbouring ranks. When `index` lands on the last element (always the
/// case for `p == 100`) the maximum is returned as-is.
///
/// Returns 0 for an empty slice. `p` outside `[0, 100]` is clamped; NaN is
/// treated as 0.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 100.0) };

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let n = sorted.len();

    let index = (p / 100.0) * (n - 1) as f64;
    let lower = index.floor() as usize;
    let upper = lower + 1;

    if upper >= n {
        return sorted[n - 1];
    }

    let weight = index - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

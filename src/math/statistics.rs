use num_traits::ToPrimitive;

/// Arithmetic mean of numeric samples, `None` when empty
pub fn mean<T: ToPrimitive + Copy>(samples: &[T]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let total: f64 = samples.iter().filter_map(ToPrimitive::to_f64).sum();
    Some(total / samples.len() as f64)
}

/// Population standard deviation, `None` when empty
pub fn std_dev<T: ToPrimitive + Copy>(samples: &[T]) -> Option<f64> {
    let centre = mean(samples)?;
    let variance = samples
        .iter()
        .filter_map(ToPrimitive::to_f64)
        .map(|value| (value - centre).powi(2))
        .sum::<f64>()
        / samples.len() as f64;
    Some(variance.sqrt())
}

/// Percentage of `hits` out of `total`, `None` when `total` is zero
pub fn success_rate(hits: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| 100.0 * hits as f64 / total as f64)
}

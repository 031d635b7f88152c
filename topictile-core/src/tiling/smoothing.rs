//! Moving-average smoothing of similarity sequences

/// Centred moving average over `[i - width, i + width]`, clamped to the
/// sequence, applied `passes` times.
///
/// Each pass reads from the previous pass's output. `width == 0` or
/// `passes == 0` returns the input unchanged.
pub fn smooth(values: &[f64], width: usize, passes: usize) -> Vec<f64> {
    let mut current = values.to_vec();
    if width == 0 || values.len() < 2 {
        return current;
    }

    for _ in 0..passes {
        let n = current.len();
        let next: Vec<f64> = (0..n)
            .map(|i| {
                let lo = i.saturating_sub(width);
                let hi = (i + width + 1).min(n);
                let window = &current[lo..hi];
                window.iter().sum::<f64>() / window.len() as f64
            })
            .collect();
        current = next;
    }

    current
}

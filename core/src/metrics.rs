//! Size accounting for prune results.

/// Number of characters (Unicode scalar values) in `text`.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Percentage of `original` removed to reach `pruned`, rounded to two
/// decimals. Zero-length originals yield `0.0`. Negative when the service
/// returned more than it was given.
pub fn reduction_rate(original: usize, pruned: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    let rate = (original as f64 - pruned as f64) / original as f64 * 100.0;
    round2(rate)
}

/// Sizes and reduction rate for a code/pruned pair, in that order.
pub fn compute_metrics(code: &str, pruned_code: &str) -> (usize, usize, f64) {
    let original = char_count(code);
    let pruned = char_count(pruned_code);
    (original, pruned, reduction_rate(original, pruned))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

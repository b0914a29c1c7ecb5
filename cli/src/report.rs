use prune_core::PruneResult;

/// Format `n` with comma thousands separators, e.g. `12,345`.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Human-readable summary printed after a successful prune.
pub fn render_summary(result: &PruneResult) -> String {
    format!(
        "Pruning complete\n  \
         Relevance score: {:.1}%\n  \
         Original size:   {} chars\n  \
         Pruned size:     {} chars\n  \
         Reduction:       {:.1}%\n\n\
         Pruned code:\n\n{}",
        result.score * 100.0,
        format_count(result.original_size),
        format_count(result.pruned_size),
        result.reduction_rate,
        result.pruned_code
    )
}

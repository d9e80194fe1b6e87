//! Number and metric formatting shared by the tree report and the browser.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tree::Metrics;

/// Format a count with thousands separators.
pub fn format_count(count: u64) -> String {
    let count_str = count.to_string();
    let mut result = String::new();
    for (i, c) in count_str.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a byte size with binary units.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KiB", "MiB", "GiB", "TiB", "PiB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64;
    for (i, unit) in UNITS.iter().enumerate() {
        size /= 1024.0;
        if size < 1024.0 || i == UNITS.len() - 1 {
            return format!("{:.1} {}", size, unit);
        }
    }
    format!("{} B", bytes)
}

/// `"L lines, ~T tokens, S"`
pub fn format_metrics(metrics: &Metrics) -> String {
    format!(
        "{} lines, ~{} tokens, {}",
        format_count(metrics.lines),
        format_count(metrics.tokens),
        format_size(metrics.size_bytes)
    )
}

/// Truncate to `max_width` display columns, ending in `...` when cut.
pub fn ellipsize(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let (budget, suffix) = if max_width > 3 {
        (max_width - 3, "...")
    } else {
        (max_width, "")
    };

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(suffix);
    out
}

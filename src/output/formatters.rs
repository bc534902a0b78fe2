//! Formatting utilities for terminal output

/// `"1 puzzle"`, `"3 puzzles"`
#[must_use]
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Create a bar string showing `part` out of `total`
#[must_use]
pub fn ratio_bar(part: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (part.min(total) * width) / total
    };

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

//! Human-readable formatting.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
const STEP: f64 = 1024.0;

/// Format a byte count with 1024-based units and at most two decimals,
/// trailing zeros dropped (`1536` → `1.5 KB`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }
    let mut scaled = bytes as f64;
    let mut unit = 0;
    while scaled >= STEP && unit < UNITS.len() - 1 {
        scaled /= STEP;
        unit += 1;
    }
    let fixed = format!("{scaled:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

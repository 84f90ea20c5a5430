//! Small formatting helpers shared by the library and the CLI.

/// Formats seconds as HH:MM:SS (e.g., 3725.0 -> "01:02:05"). Returns "??:??:??" for invalid inputs.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "??:??:??".to_string();
    }

    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Non-blank lines of a diagnostic text, trimmed at the end.
pub fn diagnostic_lines(diagnostics: &str) -> impl Iterator<Item = &str> {
    diagnostics
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
}

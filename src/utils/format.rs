// src/utils/format.rs
use chrono::{DateTime, Utc};

// Format a creation time for display
pub fn format_time_ago(time: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(time);

    let seconds = duration.num_seconds();

    if seconds < 60 {
        format!("{} seconds ago", seconds.max(0))
    } else if seconds < 3600 {
        format!("{} minutes ago", duration.num_minutes())
    } else if seconds < 86400 {
        format!("{} hours ago", duration.num_hours())
    } else if seconds < 2592000 {
        format!("{} days ago", duration.num_days())
    } else if seconds < 31536000 {
        format!("{} months ago", duration.num_days() / 30)
    } else {
        format!("{} years ago", duration.num_days() / 365)
    }
}

// Truncate a label if it's too long for the listing
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        // No room for an ellipsis; never exceed max_len.
        s.chars().take(max_len).collect()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}

//! Display formatting for route figures

/// Format a distance as `"{km:.1} km"`
#[must_use]
pub fn format_distance_km(km: f64) -> String {
    format!("{km:.1} km")
}

/// Format a duration as `"{h} jam {m} menit"`, or `"{m} menit"` under an hour
///
/// Seconds are truncated, not rounded.
#[must_use]
pub fn format_duration_minutes(minutes: f64) -> String {
    // Saturating float-to-int cast: negative and NaN become 0.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_seconds = (minutes * 60.0).floor() as u64;
    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;

    if hours > 0 {
        format!("{hours} jam {mins} menit")
    } else {
        format!("{mins} menit")
    }
}

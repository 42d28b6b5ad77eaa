//! Conversions between the output's native units (seconds, raw volume) and
//! what the controls show (0-100 progress, 0-1 volume, `m:ss`).

/// Position as a percentage of `duration`, clamped to `0..=100`.
///
/// `None` while the duration is unknown (zero, negative or not finite).
pub fn progress_percent(current: f64, duration: f64) -> Option<f64> {
    if !duration.is_finite() || duration <= 0.0 || !current.is_finite() {
        return None;
    }
    Some((current / duration * 100.0).clamp(0.0, 100.0))
}

/// Seconds to seek to for a progress value; `None` while the duration is
/// unknown.
pub fn seek_target(progress: f64, duration: f64) -> Option<f64> {
    if !duration.is_finite() || duration <= 0.0 || progress.is_nan() {
        return None;
    }
    Some(progress.clamp(0.0, 100.0) / 100.0 * duration)
}

pub fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

pub fn is_muted(volume: f64) -> bool {
    volume == 0.0
}

/// Format seconds as `m:ss`. Minutes are not padded; seconds below ten are.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

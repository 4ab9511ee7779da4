//! Subtitle timestamp formatting shared by the SRT and VTT encoders.

/// Format non-negative fractional seconds as `HH:MM:SS{sep}mmm`.
///
/// SRT separates milliseconds with a comma, WebVTT with a period.  All four
/// components are floored, never rounded — `1.9995` renders as `…01.999`,
/// matching the files this app has always produced.
pub fn format_timestamp(seconds: f64, separator: char) -> String {
    let whole = seconds.floor() as u64;
    let hours = whole / 3_600;
    let minutes = (whole % 3_600) / 60;
    let secs = whole % 60;
    let millis = (seconds.fract() * 1000.0) as u64;
    format!("{hours:02}:{minutes:02}:{secs:02}{separator}{millis:03}")
}

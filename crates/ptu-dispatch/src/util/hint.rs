// Retry-hint extraction for transport implementors.

use std::time::Duration;

use reqwest::header::HeaderMap;

/// Parse the server's retry hint from rate-limit response headers.
///
/// Prefers the millisecond-resolution `retry-after-ms` header; falls back to
/// `retry-after` as numeric seconds or HTTP-date (RFC 7231). The returned
/// value is the one the dispatcher uses for both the budget comparison and
/// the actual wait. Returns `None` if neither header yields a usable
/// duration, or the date is in the past.
pub fn parse_retry_hint(headers: &HeaderMap) -> Option<Duration> {
    if let Some(value) = headers.get("retry-after-ms").and_then(|v| v.to_str().ok()) {
        // u64 parse rejects negatives and fractions
        return value.parse::<u64>().ok().map(Duration::from_millis);
    }
    parse_retry_after(headers)
}

/// Parse the `Retry-After` header as either numeric seconds or HTTP-date.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get("retry-after")?.to_str().ok()?;

    // Numeric seconds first (most common for APIs). Guard against negative,
    // NaN, and infinity values that would panic in Duration::from_secs_f64().
    if let Ok(secs) = value.parse::<f64>() {
        if secs >= 0.0 && secs.is_finite() {
            return Some(Duration::from_secs_f64(secs));
        }
        return None;
    }

    if let Ok(date) = httpdate::parse_http_date(value) {
        let now = std::time::SystemTime::now();
        if let Ok(duration) = date.duration_since(now) {
            return Some(duration);
        }
        // Date is in the past
    }

    None
}

//! Small helpers shared by config, location and price source code.

/// Trimmed value of an optional setting; blank counts as unset.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Whether an origin or base URL uses a scheme a browser can share.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

const ERROR_BODY_CHARS: usize = 180;

/// Shorten an upstream error body so it fits in a one-line message.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(ERROR_BODY_CHARS).collect()
}

/// Current Unix timestamp in milliseconds.
pub fn unix_timestamp_millis_now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format an AUD amount the way prices are displayed, e.g. `$3.50`.
pub fn format_aud(amount: f64) -> String {
    format!("${amount:.2}")
}

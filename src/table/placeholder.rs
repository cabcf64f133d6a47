//! Stand-ins for missing cell values.

/// The value, or `-` if there is none
pub fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => "-",
    }
}

/// The value, or an empty string if there is none
pub fn or_empty(value: Option<&str>) -> &str {
    value.unwrap_or_default()
}

/// The value, or `text` if there is none or it is only whitespace
pub fn or_text<'a>(value: Option<&'a str>, text: &'a str) -> &'a str {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => text,
    }
}

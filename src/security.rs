use subtle::ConstantTimeEq;

/// Outcome of checking a request's API key against the configured one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCheck {
    /// No key configured: the protected endpoint is disabled
    NotConfigured,
    /// The request did not send a key
    Missing,
    Invalid,
    Valid,
}

/// Constant-time string comparison to prevent timing attacks
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Check a provided API key. An empty configured key counts as not configured.
pub fn check_api_key(expected: Option<&str>, provided: Option<&str>) -> KeyCheck {
    let expected = match expected {
        Some(key) if !key.is_empty() => key,
        _ => return KeyCheck::NotConfigured,
    };

    match provided {
        None => KeyCheck::Missing,
        Some(key) if constant_time_compare(expected, key) => KeyCheck::Valid,
        Some(_) => KeyCheck::Invalid,
    }
}

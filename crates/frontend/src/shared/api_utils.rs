//! API utilities for frontend-backend communication.

/// Get the base URL for API requests.
///
/// The panel is served from the same origin as the backend, so this is just
/// the current window origin. Empty string if window is not available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

/// Build a full API URL from a path starting with `/api/`.
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

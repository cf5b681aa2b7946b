use web_sys::window;

const AUTH_TOKEN_KEY: &str = "authToken";
const COMPANY_ID_KEY: &str = "companyId";

fn local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn session_storage() -> Option<web_sys::Storage> {
    window()?.session_storage().ok()?
}

/// Bearer token: persistent scope first, then the tab-scoped fallback.
pub fn get_auth_token() -> Option<String> {
    local_storage()
        .and_then(|s| s.get_item(AUTH_TOKEN_KEY).ok().flatten())
        .or_else(|| session_storage().and_then(|s| s.get_item(AUTH_TOKEN_KEY).ok().flatten()))
}

/// Explicitly stored company id, if the host page set one.
pub fn get_stored_company_id() -> Option<String> {
    local_storage().and_then(|s| s.get_item(COMPANY_ID_KEY).ok().flatten())
}

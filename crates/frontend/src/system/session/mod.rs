//! Session/tenant context.
//!
//! Resolved once at startup and provided through Leptos context. The API
//! client consumes the resolved `Session` and never touches browser storage
//! or the raw token itself.

mod claims;
mod storage;

pub use claims::company_id_from_token;

use leptos::prelude::*;

/// Authentication and tenant scope for the current browser session.
///
/// `company_id == None` means no tenant could be resolved; tenant-scoped
/// API calls fail fast without issuing a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub auth_token: Option<String>,
    pub company_id: Option<String>,
}

impl Session {
    /// Resolve from browser storage: the stored company id wins, otherwise
    /// the id is recovered from the bearer token payload.
    pub fn resolve() -> Self {
        let auth_token = storage::get_auth_token();
        let company_id = storage::get_stored_company_id()
            .or_else(|| auth_token.as_deref().and_then(company_id_from_token));

        if company_id.is_none() {
            log::warn!(
                "No company ID found. Set companyId in localStorage or sign in with a token that carries tenant_id"
            );
        }

        Self {
            auth_token,
            company_id,
        }
    }

    /// `Authorization` header value, when a token is present.
    pub fn bearer(&self) -> Option<String> {
        self.auth_token.as_ref().map(|t| format!("Bearer {}", t))
    }
}

pub fn use_session() -> Session {
    use_context::<Session>().expect("Session not provided in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_formats_token() {
        let session = Session {
            auth_token: Some("abc.def.ghi".to_string()),
            company_id: None,
        };
        assert_eq!(session.bearer().as_deref(), Some("Bearer abc.def.ghi"));
        assert_eq!(Session::default().bearer(), None);
    }
}

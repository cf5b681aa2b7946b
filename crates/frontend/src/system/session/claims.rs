//! Tenant-id recovery from the bearer token payload.
//!
//! The payload segment is decoded without signature verification: this is
//! scope *discovery*, not authentication; the backend validates the token on
//! every call.

use base64::{engine::general_purpose, Engine as _};

/// Claim keys that may carry the tenant id, in precedence order.
const TENANT_CLAIMS: [&str; 3] = ["tenant_id", "companyId", "company_id"];

/// Extract the company id from the middle segment of a JWT-shaped token.
pub fn company_id_from_token(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let bytes = decode_segment(payload)?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;

    TENANT_CLAIMS
        .iter()
        .find_map(|key| claims.get(*key).and_then(claim_value))
}

fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    general_purpose::URL_SAFE_NO_PAD
        .decode(segment)
        .or_else(|_| general_purpose::URL_SAFE.decode(segment))
        .ok()
}

fn claim_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: serde_json::Value) -> String {
        let encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("header.{}.signature", encoded)
    }

    #[test]
    fn extracts_tenant_id() {
        let token = token_with_payload(serde_json::json!({
            "sub": "user-1",
            "tenant_id": "11111111-2222-3333-4444-555555555555"
        }));
        assert_eq!(
            company_id_from_token(&token).as_deref(),
            Some("11111111-2222-3333-4444-555555555555")
        );
    }

    #[test]
    fn tenant_id_takes_precedence_over_company_variants() {
        let token = token_with_payload(serde_json::json!({
            "company_id": "last",
            "companyId": "middle",
            "tenant_id": "first"
        }));
        assert_eq!(company_id_from_token(&token).as_deref(), Some("first"));
    }

    #[test]
    fn camel_case_beats_snake_case() {
        let token = token_with_payload(serde_json::json!({
            "company_id": "last",
            "companyId": "middle"
        }));
        assert_eq!(company_id_from_token(&token).as_deref(), Some("middle"));
    }

    #[test]
    fn malformed_tokens_yield_none() {
        assert_eq!(company_id_from_token("not-a-jwt"), None);
        assert_eq!(company_id_from_token("a.%%%.c"), None);
        let no_claim = token_with_payload(serde_json::json!({"sub": "user-1"}));
        assert_eq!(company_id_from_token(&no_claim), None);
    }

    #[test]
    fn numeric_claims_are_stringified() {
        let token = token_with_payload(serde_json::json!({"companyId": 42}));
        assert_eq!(company_id_from_token(&token).as_deref(), Some("42"));
    }
}

//! REST client for the predefined-items endpoints.
//!
//! Thin translation layer: every operation resolves tenant scope from the
//! session up front (failing before any request leaves the client), builds
//! an authenticated request, and normalizes the backend envelope into typed
//! results. No retries, no caching.

use crate::shared::api_utils::api_url;
use crate::system::session::Session;
use contracts::domain::a001_predefined_item::{
    ImportSummary, ItemPage, PredefinedItem, PredefinedItemDraft,
};
use contracts::shared::api::ApiEnvelope;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Page size while browsing the table.
pub const PAGE_SIZE: u32 = 20;

/// Page size of the fetch-everything workaround used for category extraction
/// and edit-by-id lookup; the backend exposes no single-item endpoint.
pub const FETCH_ALL_SIZE: u32 = 1000;

const BASE_PATH: &str = "/api/predefined-items";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Tenant scope could not be resolved; no request was sent.
    #[error("Company ID not found. Please login or set company ID.")]
    MissingTenant,

    /// Non-2xx response; `message` comes from the body envelope when present.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Transport-level failure (offline, DNS, CORS, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The response arrived but did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Browse/lookup parameters, before tenant scoping is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    pub search: String,
    pub category: String,
}

impl ListQuery {
    pub fn browse(page: u32, search: &str, category: &str) -> Self {
        Self {
            page,
            size: PAGE_SIZE,
            search: search.to_string(),
            category: category.to_string(),
        }
    }

    /// One oversized page standing in for "all items".
    pub fn fetch_all() -> Self {
        Self {
            size: FETCH_ALL_SIZE,
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
struct QueryParams<'a> {
    #[serde(rename = "companyId")]
    company_id: &'a str,
    page: u32,
    size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
}

/// Encode the tenant-scoped query string. Empty search/category are omitted
/// entirely rather than sent as empty parameters.
fn build_query(company_id: &str, query: &ListQuery) -> String {
    let params = QueryParams {
        company_id,
        page: query.page,
        size: query.size,
        search: (!query.search.is_empty()).then_some(query.search.as_str()),
        category: (!query.category.is_empty()).then_some(query.category.as_str()),
    };
    serde_qs::to_string(&params).unwrap_or_default()
}

fn require_company(session: &Session) -> Result<&str, ApiError> {
    session.company_id.as_deref().ok_or(ApiError::MissingTenant)
}

fn endpoint(path: &str) -> String {
    api_url(&format!("{}{}", BASE_PATH, path))
}

fn authorize(builder: RequestBuilder, session: &Session) -> RequestBuilder {
    match session.bearer() {
        Some(bearer) => builder.header("Authorization", &bearer),
        None => builder,
    }
}

/// Unwrap a JSON envelope response into its `data` payload.
async fn envelope_data<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !response.ok() {
        // failed calls still ship an envelope with a message when they can
        let message = response
            .json::<ApiEnvelope<serde_json::Value>>()
            .await
            .map(|env| env.message_or_status(status))
            .unwrap_or_else(|_| format!("HTTP error! status: {}", status));
        return Err(ApiError::Http { status, message });
    }

    let envelope: ApiEnvelope<T> = response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(ApiError::Http {
            status,
            message: envelope.message_or_status(status),
        });
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Decode("response envelope carried no data".to_string()))
}

/// Like [`envelope_data`] for acknowledgements whose `data` may be null.
async fn envelope_ack(response: Response) -> Result<(), ApiError> {
    let status = response.status();
    if !response.ok() {
        let message = response
            .json::<ApiEnvelope<serde_json::Value>>()
            .await
            .map(|env| env.message_or_status(status))
            .unwrap_or_else(|_| format!("HTTP error! status: {}", status));
        return Err(ApiError::Http { status, message });
    }

    let envelope: ApiEnvelope<serde_json::Value> = response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(ApiError::Http {
            status,
            message: envelope.message_or_status(status),
        });
    }
    Ok(())
}

/// Fetch one page of items with optional search/category filters.
pub async fn fetch_items(session: &Session, query: &ListQuery) -> Result<ItemPage, ApiError> {
    let company_id = require_company(session)?;
    let url = format!("{}?{}", endpoint(""), build_query(company_id, query));
    let response = authorize(Request::get(&url), session)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    envelope_data(response).await
}

pub async fn create_item(
    session: &Session,
    draft: &PredefinedItemDraft,
) -> Result<PredefinedItem, ApiError> {
    let company_id = require_company(session)?;
    let url = format!("{}?companyId={}", endpoint(""), company_id);
    let response = authorize(Request::post(&url), session)
        .json(draft)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    envelope_data(response).await
}

pub async fn update_item(
    session: &Session,
    id: &str,
    draft: &PredefinedItemDraft,
) -> Result<PredefinedItem, ApiError> {
    let company_id = require_company(session)?;
    let url = format!("{}?companyId={}", endpoint(&format!("/{}", id)), company_id);
    let response = authorize(Request::put(&url), session)
        .json(draft)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    envelope_data(response).await
}

/// Soft delete: the backend marks the item inactive instead of removing it.
pub async fn delete_item(session: &Session, id: &str) -> Result<(), ApiError> {
    let company_id = require_company(session)?;
    let url = format!("{}?companyId={}", endpoint(&format!("/{}", id)), company_id);
    let response = authorize(Request::delete(&url), session)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    envelope_ack(response).await
}

/// Push a batch of drafts in one call. The panel's CSV flow uploads the raw
/// file instead; this endpoint serves scripted imports against the same
/// catalog surface.
pub async fn bulk_create(
    session: &Session,
    items: &[PredefinedItemDraft],
) -> Result<ImportSummary, ApiError> {
    let company_id = require_company(session)?;
    let url = format!("{}?companyId={}", endpoint("/bulk-create"), company_id);
    let response = authorize(Request::post(&url), session)
        .json(&items)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    envelope_data(response).await
}

/// Upload a raw CSV file as multipart form data. The client never rewrites
/// the file; whatever the user picked is what the backend parses.
pub async fn import_csv(session: &Session, file: &web_sys::File) -> Result<ImportSummary, ApiError> {
    let company_id = require_company(session)?;
    let url = format!("{}?companyId={}", endpoint("/import-csv"), company_id);

    let form = web_sys::FormData::new().map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;

    // no explicit content type: the browser supplies the multipart boundary
    let response = authorize(Request::post(&url), session)
        .body(form)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    envelope_data(response).await
}

/// Result of the CSV export call: raw bytes plus the server filename hint.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
}

/// Download the catalog as CSV. The payload is binary, not an envelope.
pub async fn export_csv(session: &Session) -> Result<CsvExport, ApiError> {
    let company_id = require_company(session)?;
    let url = format!("{}?companyId={}", endpoint("/export-csv"), company_id);
    let response = authorize(Request::get(&url), session)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status();
    if !response.ok() {
        return Err(ApiError::Http {
            status,
            message: format!("HTTP error! status: {}", status),
        });
    }

    let filename = response
        .headers()
        .get("content-disposition")
        .as_deref()
        .and_then(filename_from_disposition);
    let bytes = response
        .binary()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    Ok(CsvExport { bytes, filename })
}

/// Fallback export filename when the server provides no hint.
pub fn default_export_filename() -> String {
    format!("predefined-items-{}.csv", chrono::Utc::now().format("%Y-%m-%d"))
}

/// Pull a filename out of a `content-disposition` header value.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let start = header.find("filename")?;
    let rest = &header[start + "filename".len()..];
    let eq = rest.find('=')?;
    // a ';' before '=' means the '=' belongs to a later directive
    if rest[..eq].contains(';') || rest[..eq].contains('\n') {
        return None;
    }
    let raw = rest[eq + 1..].split(';').next().unwrap_or("").trim();
    let name: String = raw.chars().filter(|&c| c != '"' && c != '\'').collect();
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_query_includes_filters_when_present() {
        let query = ListQuery::browse(2, "nails", "Hardware");
        assert_eq!(
            build_query("c-1", &query),
            "companyId=c-1&page=2&size=20&search=nails&category=Hardware"
        );
    }

    #[test]
    fn build_query_omits_empty_filters() {
        let query = ListQuery::browse(0, "", "");
        assert_eq!(build_query("c-1", &query), "companyId=c-1&page=0&size=20");
    }

    #[test]
    fn build_query_encodes_reserved_characters() {
        let query = ListQuery::browse(0, "a&b c", "");
        let encoded = build_query("c-1", &query);
        assert!(encoded.contains("search=a%26b+c") || encoded.contains("search=a%26b%20c"));
    }

    #[test]
    fn fetch_all_uses_oversized_first_page() {
        let query = ListQuery::fetch_all();
        assert_eq!(query.page, 0);
        assert_eq!(query.size, 1000);
        assert!(query.search.is_empty() && query.category.is_empty());
    }

    #[test]
    fn missing_tenant_fails_before_any_request() {
        let session = Session::default();
        assert_eq!(require_company(&session), Err(ApiError::MissingTenant));

        let scoped = Session {
            auth_token: None,
            company_id: Some("c-1".to_string()),
        };
        assert_eq!(require_company(&scoped), Ok("c-1"));
    }

    #[test]
    fn filename_from_disposition_handles_common_shapes() {
        assert_eq!(
            filename_from_disposition("attachment; filename=items.csv").as_deref(),
            Some("items.csv")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=\"predefined_items_20240105.csv\"")
                .as_deref(),
            Some("predefined_items_20240105.csv")
        );
        assert_eq!(filename_from_disposition("inline"), None);
        assert_eq!(filename_from_disposition("attachment; filename="), None);
    }

    #[test]
    fn default_filename_is_dated_csv() {
        let name = default_export_filename();
        assert!(name.starts_with("predefined-items-"));
        assert!(name.ends_with(".csv"));
        // predefined-items-YYYY-MM-DD.csv
        assert_eq!(name.len(), "predefined-items-".len() + 10 + ".csv".len());
    }
}

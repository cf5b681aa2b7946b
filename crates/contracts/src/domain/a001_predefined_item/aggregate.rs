use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredefinedItemId(pub Uuid);

impl PredefinedItemId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(PredefinedItemId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// View Projection
// ============================================================================

/// A predefined catalog item as the backend returns it. Read-only on the
/// client; edits go through [`PredefinedItemDraft`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredefinedItem {
    pub id: PredefinedItemId,

    pub name: String,

    /// Server-generated; absent until the backend assigns one.
    #[serde(default)]
    pub sku: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(rename = "unitType")]
    pub unit_type: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "defaultPrice", default)]
    pub default_price: Option<f64>,

    #[serde(rename = "companyId", default)]
    pub company_id: Option<Uuid>,

    #[serde(rename = "companyName", default)]
    pub company_name: Option<String>,

    /// Soft-delete flag; inactive items never reach the listing.
    #[serde(rename = "isActive", default = "default_is_active")]
    pub is_active: bool,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::NaiveDateTime>,

    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<chrono::NaiveDateTime>,

    #[serde(rename = "createdBy", default)]
    pub created_by: Option<String>,
}

fn default_is_active() -> bool {
    true
}

// ============================================================================
// Create/Update Body
// ============================================================================

/// POST/PUT body for the catalog endpoints. Blank optional fields serialize
/// as explicit `null`; the backend distinguishes null from empty string.
/// SKU is server-assigned and intentionally absent here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredefinedItemDraft {
    pub name: String,

    pub category: Option<String>,

    #[serde(rename = "unitType")]
    pub unit_type: String,

    pub description: Option<String>,

    #[serde(rename = "defaultPrice")]
    pub default_price: Option<f64>,
}

// ============================================================================
// List Payload
// ============================================================================

/// `data` payload of the paginated listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemPage {
    #[serde(default)]
    pub items: Vec<PredefinedItem>,

    #[serde(rename = "totalElements", default)]
    pub total_elements: u64,

    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,

    #[serde(rename = "currentPage", default)]
    pub current_page: u32,

    #[serde(rename = "pageSize", default)]
    pub page_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_serializes_blank_optionals_as_null() {
        let draft = PredefinedItemDraft {
            name: "Lumber".to_string(),
            category: None,
            unit_type: "board-ft".to_string(),
            description: None,
            default_price: None,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Lumber",
                "category": null,
                "unitType": "board-ft",
                "description": null,
                "defaultPrice": null
            })
        );
    }

    #[test]
    fn item_decodes_with_minimal_fields() {
        let item: PredefinedItem = serde_json::from_str(
            r#"{
                "id": "0aa2fd2c-9d0e-4d5f-8f4a-d77cf3f2a001",
                "name": "Nails",
                "unitType": "box"
            }"#,
        )
        .unwrap();
        assert_eq!(item.name, "Nails");
        assert_eq!(item.unit_type, "box");
        assert!(item.sku.is_none());
        assert!(item.default_price.is_none());
        assert!(item.is_active);
    }

    #[test]
    fn page_decodes_spring_shape() {
        let page: ItemPage = serde_json::from_str(
            r#"{
                "items": [],
                "totalElements": 41,
                "totalPages": 3,
                "currentPage": 2,
                "pageSize": 20
            }"#,
        )
        .unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
        assert!(page.items.is_empty());
    }
}

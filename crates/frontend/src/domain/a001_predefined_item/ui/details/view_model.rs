use contracts::domain::a001_predefined_item::{PredefinedItem, PredefinedItemDraft};

/// Editable form fields, kept as raw strings until submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemForm {
    pub name: String,
    pub category: String,
    pub unit_type: String,
    pub description: String,
    pub default_price: String,
}

/// Inline messages for the required fields; `None` means the field is fine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    pub name: Option<&'static str>,
    pub unit_type: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.unit_type.is_none()
    }
}

impl ItemForm {
    pub fn from_item(item: &PredefinedItem) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category.clone().unwrap_or_default(),
            unit_type: item.unit_type.clone(),
            description: item.description.clone().unwrap_or_default(),
            default_price: item.default_price.map(|p| p.to_string()).unwrap_or_default(),
        }
    }

    /// Required-field check; failures block submission and show inline.
    pub fn validate(&self) -> FormErrors {
        FormErrors {
            name: self.name.trim().is_empty().then_some("Name is required"),
            unit_type: self
                .unit_type
                .trim()
                .is_empty()
                .then_some("Unit type is required"),
        }
    }

    /// Build the request body: trimmed values, blank optionals as explicit
    /// null, unparseable prices as null (the backend re-validates anyway).
    pub fn to_draft(&self) -> PredefinedItemDraft {
        PredefinedItemDraft {
            name: self.name.trim().to_string(),
            category: non_blank(&self.category),
            unit_type: self.unit_type.trim().to_string(),
            description: non_blank(&self.description),
            default_price: {
                let raw = self.default_price.trim();
                if raw.is_empty() {
                    None
                } else {
                    raw.parse().ok()
                }
            },
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_fields_are_flagged() {
        let form = ItemForm {
            name: "   ".to_string(),
            unit_type: String::new(),
            ..Default::default()
        };
        let errors = form.validate();
        assert_eq!(errors.name, Some("Name is required"));
        assert_eq!(errors.unit_type, Some("Unit type is required"));
        assert!(!errors.is_empty());
    }

    #[test]
    fn filled_required_fields_pass() {
        let form = ItemForm {
            name: "Lumber".to_string(),
            unit_type: "board-ft".to_string(),
            ..Default::default()
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn draft_maps_blank_optionals_to_null() {
        let form = ItemForm {
            name: " Lumber ".to_string(),
            category: "  ".to_string(),
            unit_type: "board-ft".to_string(),
            description: String::new(),
            default_price: String::new(),
        };
        let draft = form.to_draft();
        assert_eq!(draft.name, "Lumber");
        assert_eq!(draft.category, None);
        assert_eq!(draft.unit_type, "board-ft");
        assert_eq!(draft.description, None);
        assert_eq!(draft.default_price, None);

        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            body,
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
    fn draft_parses_price_and_keeps_filled_optionals() {
        let form = ItemForm {
            name: "Nails".to_string(),
            category: "Hardware".to_string(),
            unit_type: "box".to_string(),
            description: "galvanized".to_string(),
            default_price: " 12.50 ".to_string(),
        };
        let draft = form.to_draft();
        assert_eq!(draft.category.as_deref(), Some("Hardware"));
        assert_eq!(draft.default_price, Some(12.5));
    }

    #[test]
    fn unparseable_price_becomes_null() {
        let form = ItemForm {
            name: "Nails".to_string(),
            unit_type: "box".to_string(),
            default_price: "free".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_draft().default_price, None);
    }

    #[test]
    fn from_item_round_trips_fields() {
        let item: PredefinedItem = serde_json::from_str(
            r#"{
                "id": "0aa2fd2c-9d0e-4d5f-8f4a-d77cf3f2a001",
                "name": "Nails",
                "category": "Hardware",
                "unitType": "box",
                "defaultPrice": 3.25
            }"#,
        )
        .unwrap();
        let form = ItemForm::from_item(&item);
        assert_eq!(form.name, "Nails");
        assert_eq!(form.category, "Hardware");
        assert_eq!(form.unit_type, "box");
        assert_eq!(form.default_price, "3.25");
        assert!(form.description.is_empty());
    }
}

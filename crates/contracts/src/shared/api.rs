use serde::{Deserialize, Serialize};

/// Generic envelope wrapping every JSON response from the backend.
///
/// `success == false` carries the failure reason in `message`; `data` is
/// `null` in that case. Unknown fields are tolerated so the client survives
/// backend additions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Failure message to show the user, falling back to a generic status
    /// line when the backend sent nothing useful.
    pub fn message_or_status(&self, status: u16) -> String {
        if self.message.trim().is_empty() {
            format!("HTTP error! status: {}", status)
        } else {
            self.message.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_failure_envelope_without_data() {
        let env: ApiEnvelope<Vec<String>> =
            serde_json::from_str(r#"{"success":false,"message":"Access denied","data":null}"#)
                .unwrap();
        assert!(!env.success);
        assert_eq!(env.message_or_status(403), "Access denied");
        assert!(env.data.is_none());
    }

    #[test]
    fn blank_message_falls_back_to_status_line() {
        let env: ApiEnvelope<()> = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(env.message_or_status(500), "HTTP error! status: 500");
    }
}

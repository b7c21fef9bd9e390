use serde::{Deserialize, Serialize};

/// Error body returned by the catalog service alongside a non-success status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

impl ApiErrorBody {
    /// Best-effort parse; an empty or foreign body yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let body: Self = serde_json::from_str(raw).ok()?;
        body.status_message.as_ref()?;
        Some(body)
    }

    pub fn message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

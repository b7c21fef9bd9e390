use thiserror::Error;

/// Failure of a single catalog request.
///
/// The orchestrator collapses every variant into the `last_error` text of the
/// catalog state; the variants only exist so callers and logs can tell a dead
/// network apart from a rejecting server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP error! Status: {status}{}", message_suffix(.message))]
    Response {
        status: u16,
        message: Option<String>,
    },
    #[error("malformed catalog response: {0}")]
    Decode(String),
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(" ({message})"),
        None => String::new(),
    }
}

impl CatalogError {
    pub fn response(status: u16) -> Self {
        Self::Response {
            status,
            message: None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else if let Some(status) = value.status() {
            Self::response(status.as_u16())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

use serde::{Deserialize, Serialize};

/// Capability payload of the signed-in operator.
///
/// The desk receives this once and hands it down through context; row actions
/// check `is_admin` here instead of reading any ambient storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub is_admin: bool,
}

impl UserInfo {
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

//! Wire types returned by z/OSMF.

use serde::Deserialize;

/// z/OSMF error body, e.g.
/// `{"rc": 4, "reason": 13, "category": 1, "message": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ZosmfErrorBody {
    #[serde(default)]
    pub rc: i32,
    #[serde(default)]
    pub reason: i32,
    #[serde(default)]
    pub category: i32,
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

impl ZosmfErrorBody {
    /// Message with the return/reason codes and any details appended.
    pub fn describe(&self) -> String {
        let mut text = format!(
            "{} (rc={}, reason={}, category={})",
            self.message, self.rc, self.reason, self.category
        );
        for detail in &self.details {
            text.push_str("; ");
            text.push_str(detail);
        }
        text
    }
}

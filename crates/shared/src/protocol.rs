use serde::{Deserialize, Serialize};

/// Assessment produced by the review backend for one submission.
///
/// Every field is optional on the wire: absent strings deserialize to empty
/// and an absent score to `None`, so partial backend replies stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReviewResult {
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub suggested_fix: String,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Liveness payload served at the service root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub message: String,
}

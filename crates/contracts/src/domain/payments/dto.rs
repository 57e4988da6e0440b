use serde::{Deserialize, Serialize};

/// Body of `POST /api/payments/:id/refund`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefundPaymentRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

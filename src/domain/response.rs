use crate::domain::status::DeliveryStatus;
use crate::domain::value::MessageId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResult {
    pub msid: String,
    pub message_id: MessageId,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: i64,
    pub description: String,
    pub validation_errors: Vec<String>,
    pub results: Vec<SubmitResult>,
}

#[derive(Debug, Clone, PartialEq)]
/// Delivery status of one (message, recipient) pair.
pub struct MessageStatus {
    /// Canonical message id reported by the gateway, in decimal form.
    pub message_id: String,
    pub msid: String,
    pub status: DeliveryStatus,
    pub cost: f64,
    /// Never set by this crate; available for callers annotating results.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusResponse {
    pub code: i64,
    pub description: String,
    pub validation_errors: Vec<String>,
    /// Statuses flattened in gateway order: group first, then recipient.
    pub statuses: Vec<MessageStatus>,
}

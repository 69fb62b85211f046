use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Delivery status reported by the status endpoint for one recipient.
///
/// Values the crate does not know are preserved in [`DeliveryStatus::Other`] and
/// classified as non-terminal.
pub enum DeliveryStatus {
    Pending,
    NotSent,
    Sent,
    Sending,
    Delivered,
    NotDelivered,
    Other(String),
}

impl DeliveryStatus {
    pub const PENDING: &'static str = "Pending";
    pub const NOT_SENT: &'static str = "NotSent";
    pub const SENT: &'static str = "Sent";
    pub const SENDING: &'static str = "Sending";
    pub const DELIVERED: &'static str = "Delivered";
    pub const NOT_DELIVERED: &'static str = "NotDelivered";

    /// Map a wire value to a status. Matching is exact and case-sensitive.
    pub fn parse(value: &str) -> Self {
        match value {
            Self::PENDING => Self::Pending,
            Self::NOT_SENT => Self::NotSent,
            Self::SENT => Self::Sent,
            Self::SENDING => Self::Sending,
            Self::DELIVERED => Self::Delivered,
            Self::NOT_DELIVERED => Self::NotDelivered,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Wire value as returned by the gateway.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => Self::PENDING,
            Self::NotSent => Self::NOT_SENT,
            Self::Sent => Self::SENT,
            Self::Sending => Self::SENDING,
            Self::Delivered => Self::DELIVERED,
            Self::NotDelivered => Self::NOT_DELIVERED,
            Self::Other(value) => value,
        }
    }

    /// `true` for statuses that will not change on later queries.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Delivered | Self::NotDelivered | Self::NotSent)
    }

    /// `true` only for [`DeliveryStatus::Delivered`].
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// `true` for terminal failures.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::NotDelivered | Self::NotSent)
    }
}

impl From<&str> for DeliveryStatus {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for DeliveryStatus {
    fn from(value: String) -> Self {
        match Self::parse(&value) {
            Self::Other(_) => Self::Other(value),
            known => known,
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` if `status` is terminal (`Delivered`, `NotDelivered`, `NotSent`).
pub fn is_final_status(status: &str) -> bool {
    DeliveryStatus::parse(status).is_final()
}

/// Returns `true` if `status` is `Delivered`.
pub fn is_delivered_status(status: &str) -> bool {
    status == DeliveryStatus::DELIVERED
}

/// Returns `true` if `status` is `NotDelivered` or `NotSent`.
pub fn is_failed_status(status: &str) -> bool {
    DeliveryStatus::parse(status).is_failed()
}

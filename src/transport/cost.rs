use serde::Deserialize;

/// Cost value returned by the gateway as either JSON number or numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TransportCost {
    Number(f64),
    String(String),
}

impl TransportCost {
    /// Numeric value; strings that do not parse as a number count as zero.
    pub fn into_f64(self) -> f64 {
        match self {
            Self::Number(value) => value,
            Self::String(value) => value.trim().parse().unwrap_or_default(),
        }
    }
}

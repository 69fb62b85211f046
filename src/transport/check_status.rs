use serde::Deserialize;

use super::cost::TransportCost;
use crate::domain::{DeliveryStatus, MessageId, MessageStatus, StatusResponse};

/// Placeholder substituted with the comma-joined message ids.
pub const STATUS_ID_PLACEHOLDER: &str = "%s";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusJsonResponse {
    #[serde(default)]
    code: Option<i64>,
    // Older gateway versions report the result code as `status`; `code` wins when both are set.
    #[serde(default)]
    status: Option<i64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    validation_errors: Option<Vec<String>>,
    #[serde(default)]
    data: Option<StatusJsonData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum StatusJsonData {
    Groups(Vec<StatusJsonGroup>),
    Group(StatusJsonGroup),
}

impl StatusJsonData {
    fn into_groups(self) -> Vec<StatusJsonGroup> {
        match self {
            Self::Groups(groups) => groups,
            Self::Group(group) => vec![group],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct StatusJsonGroup {
    #[serde(rename = "messageID", default)]
    message_id: Option<i64>,
    #[serde(default)]
    statuses: Option<Vec<StatusJsonEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
struct StatusJsonEntry {
    #[serde(default)]
    msid: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    cost: Option<TransportCost>,
}

pub fn encode_status_url(template: &str, message_ids: &[MessageId]) -> String {
    let ids = message_ids
        .iter()
        .map(MessageId::to_string)
        .collect::<Vec<_>>()
        .join(",");
    template.replacen(STATUS_ID_PLACEHOLDER, &ids, 1)
}

pub fn decode_status_json_response(json: &str) -> Result<StatusResponse, TransportError> {
    let parsed: StatusJsonResponse = serde_json::from_str(json)?;

    let statuses = parsed
        .data
        .map(StatusJsonData::into_groups)
        .unwrap_or_default()
        .into_iter()
        .flat_map(|group| {
            let message_id = group.message_id.unwrap_or_default().to_string();
            group
                .statuses
                .unwrap_or_default()
                .into_iter()
                .map(move |entry| MessageStatus {
                    message_id: message_id.clone(),
                    msid: entry.msid.unwrap_or_default(),
                    status: DeliveryStatus::from(entry.status.unwrap_or_default()),
                    cost: entry.cost.map(TransportCost::into_f64).unwrap_or_default(),
                    error: None,
                })
        })
        .collect();

    Ok(StatusResponse {
        code: parsed.code.or(parsed.status).unwrap_or_default(),
        description: parsed.description.unwrap_or_default(),
        validation_errors: parsed.validation_errors.unwrap_or_default(),
        statuses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_status_url_joins_ids() {
        let url = encode_status_url(
            "https://example.invalid/status?messageIDs=%s",
            &[MessageId::new(1001), MessageId::new(1002)],
        );
        assert_eq!(url, "https://example.invalid/status?messageIDs=1001,1002");
    }

    #[test]
    fn encode_status_url_substitutes_first_placeholder_only() {
        let url = encode_status_url("https://example.invalid/%s?x=%s", &[MessageId::new(7)]);
        assert_eq!(url, "https://example.invalid/7?x=%s");
    }

    #[test]
    fn decode_json_response_flattens_groups_in_order() {
        let json = r#"
        {
          "code": 0,
          "description": "Success",
          "validationErrors": [],
          "data": [
            {
              "messageID": 1001,
              "statuses": [
                {
                  "msid": "79001234567",
                  "status": "Delivered",
                  "date": "2024-05-01T10:00:00Z",
                  "userDeliveryDate": "2024-05-01T10:00:05Z",
                  "partCount": 1,
                  "isViber": false,
                  "trafficPatternType": "Service",
                  "cost": 1.5
                },
                {"msid": "79007654321", "status": "Pending", "cost": 0}
              ]
            },
            {
              "messageID": 1002,
              "statuses": [
                {"msid": "79005555555", "status": "NotSent", "cost": "0.25"}
              ]
            }
          ]
        }
        "#;

        let response = decode_status_json_response(json).unwrap();
        assert_eq!(response.code, 0);
        assert_eq!(response.description, "Success");

        let flat = response
            .statuses
            .iter()
            .map(|s| (s.message_id.as_str(), s.msid.as_str(), s.status.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            flat,
            vec![
                ("1001", "79001234567", "Delivered"),
                ("1001", "79007654321", "Pending"),
                ("1002", "79005555555", "NotSent"),
            ]
        );
        assert_eq!(response.statuses[0].cost, 1.5);
        assert_eq!(response.statuses[2].cost, 0.25);
        assert!(response.statuses.iter().all(|s| s.error.is_none()));
    }

    #[test]
    fn decode_json_response_accepts_legacy_single_group_schema() {
        let json = r#"
        {
          "status": 0,
          "description": "Success",
          "data": {
            "messageID": 1001,
            "statuses": [
              {"msid": "79001234567", "status": "Sent", "cost": 1.5}
            ]
          }
        }
        "#;

        let response = decode_status_json_response(json).unwrap();
        assert_eq!(response.code, 0);
        assert_eq!(response.statuses.len(), 1);
        assert_eq!(response.statuses[0].message_id, "1001");
        assert_eq!(response.statuses[0].status, DeliveryStatus::Sent);
    }

    #[test]
    fn decode_json_response_parses_error_payload() {
        let json = r#"
        {
          "code": 3,
          "description": "Access denied",
          "validationErrors": ["bad token"],
          "data": null
        }
        "#;

        let response = decode_status_json_response(json).unwrap();
        assert_eq!(response.code, 3);
        assert_eq!(response.description, "Access denied");
        assert_eq!(response.validation_errors, vec!["bad token".to_owned()]);
        assert!(response.statuses.is_empty());
    }

    #[test]
    fn decode_json_response_uses_canonical_group_id() {
        let json = r#"
        {"code": 0, "data": [{"messageID": 2002, "statuses": [{"msid": "1", "status": "Sending"}]}]}
        "#;

        let response = decode_status_json_response(json).unwrap();
        assert_eq!(response.statuses[0].message_id, "2002");
        assert_eq!(response.statuses[0].cost, 0.0);
    }

    #[test]
    fn decode_json_response_prefers_code_when_both_result_fields_present() {
        let json = r#"
        {
          "code": 0,
          "status": 7,
          "description": "Success",
          "data": [{"messageID": 1, "statuses": [{"msid": "79001234567", "status": "Sent"}]}]
        }
        "#;

        let response = decode_status_json_response(json).unwrap();
        assert_eq!(response.code, 0);
        assert_eq!(response.statuses.len(), 1);
        assert_eq!(response.statuses[0].status, DeliveryStatus::Sent);

        let json = r#"{"code": null, "status": 4, "description": "Denied"}"#;
        assert_eq!(decode_status_json_response(json).unwrap().code, 4);
    }

    #[test]
    fn decode_json_response_treats_null_fields_as_empty() {
        let json = r#"
        {
          "code": 0,
          "description": null,
          "data": [
            {
              "messageID": 1001,
              "statuses": [
                {"msid": null, "status": null, "cost": null},
                {"msid": "79001234567", "status": "Delivered", "cost": 2}
              ]
            }
          ]
        }
        "#;

        let response = decode_status_json_response(json).unwrap();
        assert_eq!(response.description, "");
        assert_eq!(response.statuses.len(), 2);
        assert_eq!(response.statuses[0].msid, "");
        assert_eq!(response.statuses[0].status, DeliveryStatus::Other(String::new()));
        assert!(!response.statuses[0].status.is_final());
        assert_eq!(response.statuses[0].cost, 0.0);
        assert_eq!(response.statuses[1].status, DeliveryStatus::Delivered);
    }

    #[test]
    fn decode_json_response_rejects_malformed_body() {
        assert!(decode_status_json_response("<html>").is_err());
        assert!(decode_status_json_response(r#"{"code": 0, "data": "nope"}"#).is_err());
    }
}

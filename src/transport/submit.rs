use serde::{Deserialize, Serialize};

use crate::domain::{MessageId, SubmitBatch, SubmitResponse, SubmitResult};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct SubmitBatchJson<'a> {
    submits: Vec<SubmitJson<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    naming: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SubmitJson<'a> {
    msid: &'a str,
    message: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitJsonResponse {
    #[serde(default)]
    status: Option<i64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    validation_errors: Option<Vec<String>>,
    #[serde(default)]
    data: Option<SubmitJsonData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitJsonData {
    #[serde(default)]
    submit_results: Option<Vec<SubmitJsonResult>>,
}

#[derive(Debug, Clone, Deserialize)]
struct SubmitJsonResult {
    #[serde(default)]
    msid: Option<String>,
    #[serde(rename = "messageID", default)]
    message_id: Option<i64>,
    #[serde(default)]
    code: Option<String>,
}

pub fn encode_submit_json(batch: &SubmitBatch) -> Result<String, serde_json::Error> {
    let body = SubmitBatchJson {
        submits: batch
            .submits
            .iter()
            .map(|submit| SubmitJson {
                msid: submit.msid().as_str(),
                message: submit.message().as_str(),
            })
            .collect(),
        naming: batch.naming.as_deref(),
    };
    serde_json::to_string(&body)
}

pub fn decode_submit_json_response(json: &str) -> Result<SubmitResponse, TransportError> {
    let parsed: SubmitJsonResponse = serde_json::from_str(json)?;

    let results = parsed
        .data
        .and_then(|data| data.submit_results)
        .unwrap_or_default()
        .into_iter()
        .map(|result| SubmitResult {
            msid: result.msid.unwrap_or_default(),
            message_id: MessageId::new(result.message_id.unwrap_or_default()),
            code: result.code.unwrap_or_default(),
        })
        .collect();

    Ok(SubmitResponse {
        status: parsed.status.unwrap_or_default(),
        description: parsed.description.unwrap_or_default(),
        validation_errors: parsed.validation_errors.unwrap_or_default(),
        results,
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::{MessageText, Msid, SubmitMessage};

    use super::*;

    fn batch() -> SubmitBatch {
        SubmitBatch::new(vec![
            SubmitMessage::new(
                Msid::new("79001234567").unwrap(),
                MessageText::new("Hello").unwrap(),
            ),
            SubmitMessage::new(
                Msid::new("79007654321").unwrap(),
                MessageText::new("World").unwrap(),
            ),
        ])
    }

    #[test]
    fn encode_submit_json_body() {
        let json = encode_submit_json(&batch().with_naming("test")).unwrap();
        assert_eq!(
            json,
            r#"{"submits":[{"msid":"79001234567","message":"Hello"},{"msid":"79007654321","message":"World"}],"naming":"test"}"#
        );
    }

    #[test]
    fn encode_omits_naming_when_unset() {
        let json = encode_submit_json(&batch()).unwrap();
        assert!(!json.contains("naming"));

        let json = encode_submit_json(&SubmitBatch::default()).unwrap();
        assert_eq!(json, r#"{"submits":[]}"#);
    }

    #[test]
    fn decode_json_response_maps_submit_results() {
        let json = r#"
        {
          "status": 0,
          "description": "Success",
          "validationErrors": null,
          "data": {
            "submitResults": [
              {"msid": "79001234567", "messageID": 1001, "code": "OK"},
              {"msid": "79007654321", "messageID": 1002, "code": "InvalidMsid"}
            ]
          }
        }
        "#;

        let response = decode_submit_json_response(json).unwrap();
        assert_eq!(response.status, 0);
        assert_eq!(response.description, "Success");
        assert!(response.validation_errors.is_empty());
        assert_eq!(
            response.results,
            vec![
                SubmitResult {
                    msid: "79001234567".to_owned(),
                    message_id: MessageId::new(1001),
                    code: "OK".to_owned(),
                },
                SubmitResult {
                    msid: "79007654321".to_owned(),
                    message_id: MessageId::new(1002),
                    code: "InvalidMsid".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn decode_json_response_parses_error_payload_without_data() {
        let json = r#"
        {
          "status": 1,
          "description": "Invalid token",
          "validationErrors": ["token expired"]
        }
        "#;

        let response = decode_submit_json_response(json).unwrap();
        assert_eq!(response.status, 1);
        assert_eq!(response.description, "Invalid token");
        assert_eq!(response.validation_errors, vec!["token expired".to_owned()]);
        assert!(response.results.is_empty());
    }

    #[test]
    fn decode_json_response_treats_null_fields_as_empty() {
        let json = r#"
        {
          "status": 1,
          "description": "Invalid token",
          "validationErrors": null,
          "data": {
            "submitResults": [
              {"msid": "79001234567", "messageID": 1001, "code": null},
              {"msid": null, "messageID": null, "code": "OK"}
            ]
          }
        }
        "#;

        let response = decode_submit_json_response(json).unwrap();
        assert_eq!(response.status, 1);
        assert_eq!(response.description, "Invalid token");
        assert_eq!(
            response.results,
            vec![
                SubmitResult {
                    msid: "79001234567".to_owned(),
                    message_id: MessageId::new(1001),
                    code: String::new(),
                },
                SubmitResult {
                    msid: String::new(),
                    message_id: MessageId::new(0),
                    code: "OK".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn decode_json_response_rejects_malformed_body() {
        let err = decode_submit_json_response("{ not json }").unwrap_err();
        assert!(matches!(err, TransportError::Json(_)));

        let err = decode_submit_json_response(r#"{"status": "zero"}"#).unwrap_err();
        assert!(matches!(err, TransportError::Json(_)));
    }
}

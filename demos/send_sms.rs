use std::io;

use mts_sms::{BearerToken, MessageText, Msid, MtsClient, MtsError, SubmitBatch, SubmitMessage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var("MTS_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MTS_TOKEN environment variable is required",
        )
    })?;
    let msid_raw = std::env::var("MTS_MSID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MTS_MSID environment variable is required",
        )
    })?;
    let message = std::env::var("MTS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the mts-sms demo.".to_owned());

    let client = MtsClient::new()?;
    let token = BearerToken::new(token)?;
    let mut batch = SubmitBatch::new(vec![SubmitMessage::new(
        Msid::new(msid_raw)?,
        MessageText::new(message)?,
    )])
    .with_naming("demo");

    let result = client.submit(&mut batch, &token).await;
    for submit in &batch.submits {
        println!(
            "msid: {}, message_id: {:?}, send_error: {}",
            submit.msid(),
            submit.message_id,
            submit.send_error
        );
    }

    match result {
        Err(MtsError::Api {
            validation_errors, ..
        }) if !validation_errors.is_empty() => {
            Err(format!("gateway rejected the batch: {validation_errors:?}").into())
        }
        other => Ok(other?),
    }
}

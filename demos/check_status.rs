use std::io;

use mts_sms::{BearerToken, MessageId, MtsClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var("MTS_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MTS_TOKEN environment variable is required",
        )
    })?;
    let ids_raw = std::env::var("MTS_MESSAGE_IDS").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MTS_MESSAGE_IDS environment variable is required (comma-separated ids)",
        )
    })?;

    let message_ids = ids_raw
        .split(',')
        .map(|id| id.trim().parse::<i64>().map(MessageId::new))
        .collect::<Result<Vec<_>, _>>()?;

    let client = MtsClient::new()?;
    let statuses = client
        .message_statuses(&message_ids, &BearerToken::new(token)?)
        .await?;

    for status in statuses {
        println!(
            "message_id: {}, msid: {}, status: {}, final: {}, cost: {}",
            status.message_id,
            status.msid,
            status.status,
            status.status.is_final(),
            status.cost
        );
    }

    Ok(())
}

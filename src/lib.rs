//! Typed Rust client for the MTS Marketolog SMS REST API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! wire-format quirks, and a small client layer issuing one HTTP request per call.
//!
//! ```rust,no_run
//! use mts_sms::{BearerToken, MessageText, Msid, MtsClient, SubmitBatch, SubmitMessage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mts_sms::MtsError> {
//!     let client = MtsClient::new()?;
//!     let token = BearerToken::new("...")?;
//!     let mut batch = SubmitBatch::new(vec![SubmitMessage::new(
//!         Msid::new("79001234567")?,
//!         MessageText::new("hello")?,
//!     )]);
//!     client.submit(&mut batch, &token).await?;
//!
//!     if let Some(id) = batch.submits[0].message_id {
//!         let status = client.message_status(id, &token).await?;
//!         println!("{}: {}", status.msid, status.status);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{MtsClient, MtsClientBuilder, MtsError};
pub use domain::{
    BearerToken, DeliveryStatus, MessageId, MessageStatus, MessageText, Msid, PhoneNumber,
    SUBMIT_OK_CODE, StatusResponse, SubmitBatch, SubmitMessage, SubmitResponse, SubmitResult,
    ValidationError, is_delivered_status, is_failed_status, is_final_status,
};

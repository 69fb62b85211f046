//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod status;
mod validation;
mod value;

pub use request::{SUBMIT_OK_CODE, SubmitBatch, SubmitMessage};
pub use response::{MessageStatus, StatusResponse, SubmitResponse, SubmitResult};
pub use status::{DeliveryStatus, is_delivered_status, is_failed_status, is_final_status};
pub use validation::ValidationError;
pub use value::{BearerToken, MessageId, MessageText, Msid, PhoneNumber};

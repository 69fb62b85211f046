use crate::domain::response::SubmitResult;
use crate::domain::value::{MessageId, MessageText, Msid};

/// Per-recipient code the gateway uses for an accepted submit.
pub const SUBMIT_OK_CODE: &str = "OK";

#[derive(Debug, Clone, PartialEq, Eq)]
/// One outbound message of a [`SubmitBatch`].
///
/// `message_id` and `send_error` are filled in by [`crate::MtsClient::submit`].
pub struct SubmitMessage {
    msid: Msid,
    message: MessageText,
    pub message_id: Option<MessageId>,
    pub send_error: bool,
}

impl SubmitMessage {
    pub fn new(msid: Msid, message: MessageText) -> Self {
        Self {
            msid,
            message,
            message_id: None,
            send_error: false,
        }
    }

    pub fn msid(&self) -> &Msid {
        &self.msid
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered batch of messages submitted in a single request.
///
/// The batch may be empty. Submitting never reorders or removes elements.
pub struct SubmitBatch {
    pub submits: Vec<SubmitMessage>,
    pub naming: Option<String>,
}

impl SubmitBatch {
    pub fn new(submits: Vec<SubmitMessage>) -> Self {
        Self {
            submits,
            naming: None,
        }
    }

    /// Attach a campaign label (`naming`).
    pub fn with_naming(mut self, naming: impl Into<String>) -> Self {
        self.naming = Some(naming.into());
        self
    }

    /// Append a message to the batch.
    pub fn push(&mut self, msid: Msid, message: MessageText) {
        self.submits.push(SubmitMessage::new(msid, message));
    }

    /// Write gateway results back into the batch.
    ///
    /// Each result updates the first element with the same msid. Results without a
    /// matching element are ignored and elements without a result are left untouched.
    pub fn apply_results(&mut self, results: &[SubmitResult]) {
        for result in results {
            let Some(target) = self
                .submits
                .iter_mut()
                .find(|submit| submit.msid.as_str() == result.msid)
            else {
                continue;
            };

            target.message_id = Some(result.message_id);
            if result.code != SUBMIT_OK_CODE {
                target.send_error = true;
            }
        }
    }
}

//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod check_status;
mod cost;
mod submit;

pub use check_status::{
    STATUS_ID_PLACEHOLDER, decode_status_json_response, encode_status_url,
};
pub use submit::{decode_submit_json_response, encode_submit_json};

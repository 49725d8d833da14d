pub mod user;
pub mod workout;

use serde::{Deserialize, Serialize};

/// Plain acknowledgement body, used wherever an endpoint has nothing richer
/// to say.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

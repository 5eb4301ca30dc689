use serde::Serialize;

#[derive(Debug, Default, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new<S: ToString>(message: S) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new<S: ToString>(error: S) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

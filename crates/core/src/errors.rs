use thiserror::Error;

/// Text sent back for any failure the user cannot act on.
pub const GENERIC_FAILURE: &str = "❌ Something went wrong.";

#[derive(Error, Debug)]
pub enum WardenError {
    #[error("Authorization error: actor lacks the required capability")]
    Authorization,

    #[error("Wrong channel: not a ticket channel")]
    WrongChannel,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Platform error: {0}")]
    Platform(#[from] eyre::Report),
}

impl WardenError {
    /// Short, prefixed text suitable for an ephemeral reply.
    ///
    /// Platform failures never leak their details to the user; they are
    /// logged by the caller instead.
    pub fn user_message(&self) -> String {
        match self {
            WardenError::Authorization => "❌ No permission.".to_string(),
            WardenError::WrongChannel => {
                "❌ Wrong channel: use this inside a ticket channel.".to_string()
            }
            WardenError::Validation(message) => format!("❌ {}", message),
            WardenError::NotFound(_) | WardenError::Platform(_) => GENERIC_FAILURE.to_string(),
        }
    }

    /// Whether this failure is something the operator should look at.
    pub fn is_internal(&self) -> bool {
        matches!(self, WardenError::NotFound(_) | WardenError::Platform(_))
    }
}

pub type WardenResult<T> = Result<T, WardenError>;

use slackline_types::models::Status;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Bad or missing input: empty body, unknown channel, duplicate id.
    #[error("{0}")]
    Validation(String),

    #[error("message not found: {0}")]
    NotFound(String),

    /// The operation is not legal for the message's current status.
    #[error("cannot {action} message {id}: it is {status}")]
    InvalidState {
        id: String,
        status: Status,
        action: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

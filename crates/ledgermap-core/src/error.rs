pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown account node: {id}")]
    UnknownAccount { id: String },

    #[error("Transaction {edge_id} references a missing account node")]
    MissingEndpoint { edge_id: String },

    #[error("Duplicate transaction id: {edge_id}")]
    DuplicateTransaction { edge_id: String },

    #[error(transparent)]
    Layout(#[from] gridpack::Error),

    #[error("Invalid diagram JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

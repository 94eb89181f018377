/// Errors raised by searchkit operations.
///
/// Every error surfaces to the immediate caller on first attempt; nothing is
/// retried or swallowed inside the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested connection name was never configured. There is no
    /// fallback to a default configuration.
    #[error("Configuration `{0}` not found")]
    ConfigurationNotFound(String),

    /// I/O-level failure reaching the engine. `status` is 500 for timeouts
    /// and 504 for every other transport failure.
    #[error("Transport failure ({status}): {message}")]
    Transport { status: u16, message: String },

    /// The engine answered with an error envelope (`{"error":{"reason":..}}`);
    /// carries the reason verbatim.
    #[error("{0}")]
    Engine(String),

    /// A document fetch round-tripped successfully but the document is
    /// absent (`found` false or missing). Not a fault, a negative answer.
    #[error("Document `{id}` in index `{index}` does not exist")]
    NotFound { index: String, id: String },

    /// The engine returned a success body missing a field the operation
    /// requires (no error envelope was present).
    #[error("Invalid response from search engine")]
    InvalidResponse,
}

pub type Result<T> = std::result::Result<T, Error>;

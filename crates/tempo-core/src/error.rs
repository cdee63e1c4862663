use thiserror::Error;

/// Unified error type for the entire Tempo client.
#[derive(Error, Debug)]
pub enum TempoError {
    // ── Transport / protocol errors ────────────────────────────
    #[error("transport error: {0}")]
    Transport(String),

    #[error("api error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unexpected content type: {0}")]
    ContentType(String),

    // ── Agent backend errors ───────────────────────────────────
    #[error("agent execution failed: {0}")]
    Agent(String),

    // ── Task / time-block errors ───────────────────────────────
    #[error("task error: {0}")]
    Task(String),

    // ── Memory errors ──────────────────────────────────────────
    #[error("memory error: {0}")]
    Memory(String),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    #[error("config validation failed: {field}: {reason}")]
    ConfigValidation { field: String, reason: String },

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TempoError>;

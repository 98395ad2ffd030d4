use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlockscoutError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Explorer API error: {message}")]
    Api { message: String },

    #[error("RPC error: {message}")]
    Rpc { message: String },

    #[error("Invalid wallet address: {address}")]
    InvalidAddress { address: String },

    #[error("Invalid API base URL: {url}")]
    InvalidUrl { url: String },

    #[error("Balance queries require rpc_url to be configured")]
    RpcUnconfigured,
}

pub type Result<T> = std::result::Result<T, BlockscoutError>;
